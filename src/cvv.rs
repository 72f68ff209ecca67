//! CVV/CVC/CID input handling.
//!
//! The form accepts 3 digit codes (printed on the back of most cards) and
//! 4 digit codes (American Express, printed on the front). The upper bound
//! is applied while typing; the lower bound is only checked on submit.
//!
//! # Example
//!
//! ```
//! use card_vault::cvv::{normalize_cvv, is_long_enough};
//!
//! assert_eq!(normalize_cvv("12a34 5"), "1234");
//! assert!(is_long_enough("123"));
//! assert!(!is_long_enough("12"));
//! ```

use crate::format::strip_formatting;

/// Minimum number of CVV digits accepted on submit.
pub const MIN_CVV_DIGITS: usize = 3;

/// Maximum number of CVV digits kept while typing.
pub const MAX_CVV_DIGITS: usize = 4;

/// Keeps only digits and truncates to [`MAX_CVV_DIGITS`].
///
/// # Example
///
/// ```
/// use card_vault::cvv::normalize_cvv;
///
/// assert_eq!(normalize_cvv("123"), "123");
/// assert_eq!(normalize_cvv("123456"), "1234");
/// assert_eq!(normalize_cvv("x"), "");
/// ```
pub fn normalize_cvv(raw: &str) -> String {
    let mut digits = strip_formatting(raw);
    digits.truncate(MAX_CVV_DIGITS);
    digits
}

/// Returns true if `value` has at least [`MIN_CVV_DIGITS`] characters.
///
/// This mirrors the submit-time rule: the value is expected to be normalized
/// already, so only its length is inspected.
#[inline]
pub fn is_long_enough(value: &str) -> bool {
    value.chars().count() >= MIN_CVV_DIGITS
}
