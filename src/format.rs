//! Card field normalization.
//!
//! These functions turn whatever the user typed into the canonical display
//! form of each field. They never fail: non-digit characters are dropped and
//! overlong input is grouped or truncated rather than rejected.
//!
//! # Canonical Forms
//!
//! - **Card number**: groups of up to 4 digits joined by single spaces
//! - **Expiry**: `MM`, `MM/Y` or `MM/YY` while typing
//! - **CVV**: up to 4 digits (see [`crate::cvv`])
//!
//! # Example
//!
//! ```
//! use card_vault::format::{normalize_card_number, normalize_expiry};
//!
//! assert_eq!(normalize_card_number("4111-1111-1111-1111"), "4111 1111 1111 1111");
//! assert_eq!(normalize_card_number("41111"), "4111 1");
//!
//! assert_eq!(normalize_expiry("1"), "1");
//! assert_eq!(normalize_expiry("122"), "12/2");
//! assert_eq!(normalize_expiry("12/2"), "12/2");
//! ```

/// Number of digits in each card number group.
pub const GROUP_SIZE: usize = 4;

/// Number of month digits before the expiry separator is inserted.
const EXPIRY_MONTH_DIGITS: usize = 2;

/// Number of digits kept in a canonical expiry (`MMYY`).
const EXPIRY_MAX_DIGITS: usize = 4;

/// Formats a card number into space-separated groups of four.
///
/// Every non-digit character is removed first, so separators in the input
/// never influence where the new groups start.
///
/// # Example
///
/// ```
/// use card_vault::format::normalize_card_number;
///
/// assert_eq!(normalize_card_number("4111111111111111"), "4111 1111 1111 1111");
/// assert_eq!(normalize_card_number("41 11 11"), "4111 11");
/// assert_eq!(normalize_card_number("abc"), "");
/// ```
pub fn normalize_card_number(raw: &str) -> String {
    let digits = strip_formatting(raw);

    let mut result = String::with_capacity(digits.len() + digits.len() / GROUP_SIZE);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % GROUP_SIZE == 0 {
            result.push(' ');
        }
        result.push(c);
    }

    result
}

/// Formats an expiry date as `MM/YY`, building it up as digits are typed.
///
/// Up to two digits are returned unchanged. Past that a `/` is inserted after
/// the month and anything beyond the fourth digit is dropped. Feeding the
/// output back in yields the same value.
///
/// # Example
///
/// ```
/// use card_vault::format::normalize_expiry;
///
/// assert_eq!(normalize_expiry("12"), "12");
/// assert_eq!(normalize_expiry("1225"), "12/25");
/// assert_eq!(normalize_expiry("12/25"), "12/25");
/// assert_eq!(normalize_expiry("122599"), "12/25");
/// ```
pub fn normalize_expiry(raw: &str) -> String {
    let digits = strip_formatting(raw);

    if digits.len() <= EXPIRY_MONTH_DIGITS {
        return digits;
    }

    // digits are ASCII, byte slicing is char slicing
    let end = digits.len().min(EXPIRY_MAX_DIGITS);
    format!(
        "{}/{}",
        &digits[..EXPIRY_MONTH_DIGITS],
        &digits[EXPIRY_MONTH_DIGITS..end]
    )
}

/// Strips everything but ASCII digits, preserving order.
///
/// # Example
///
/// ```
/// use card_vault::format::strip_formatting;
///
/// assert_eq!(strip_formatting("4111 1111 1111 1111"), "4111111111111111");
/// assert_eq!(strip_formatting("12/25"), "1225");
/// ```
pub fn strip_formatting(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns the number of ASCII digits in `input`.
#[inline]
pub fn digit_count(input: &str) -> usize {
    input.chars().filter(|c| c.is_ascii_digit()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_card_number_16() {
        assert_eq!(
            normalize_card_number("4111111111111111"),
            "4111 1111 1111 1111"
        );
    }

    #[test]
    fn test_normalize_card_number_partial() {
        assert_eq!(normalize_card_number("4"), "4");
        assert_eq!(normalize_card_number("4111"), "4111");
        assert_eq!(normalize_card_number("41111"), "4111 1");
        assert_eq!(normalize_card_number("411111111"), "4111 1111 1");
    }

    #[test]
    fn test_normalize_card_number_regroups_input() {
        // Input grouping is ignored entirely
        assert_eq!(normalize_card_number("41 1111 11"), "4111 1111");
        assert_eq!(normalize_card_number("4111-1111 1111.1111"), "4111 1111 1111 1111");
    }

    #[test]
    fn test_normalize_card_number_no_cap() {
        assert_eq!(
            normalize_card_number("41111111111111111111"),
            "4111 1111 1111 1111 1111"
        );
    }

    #[test]
    fn test_normalize_card_number_empty() {
        assert_eq!(normalize_card_number(""), "");
        assert_eq!(normalize_card_number("   "), "");
        assert_eq!(normalize_card_number("abcd"), "");
    }

    #[test]
    fn test_normalize_card_number_unicode_digits_dropped() {
        // Only ASCII digits count
        assert_eq!(normalize_card_number("４１1"), "1");
    }

    #[test]
    fn test_normalize_expiry_partial() {
        assert_eq!(normalize_expiry(""), "");
        assert_eq!(normalize_expiry("0"), "0");
        assert_eq!(normalize_expiry("09"), "09");
        assert_eq!(normalize_expiry("093"), "09/3");
        assert_eq!(normalize_expiry("0930"), "09/30");
    }

    #[test]
    fn test_normalize_expiry_drops_extra_digits() {
        assert_eq!(normalize_expiry("093012"), "09/30");
        assert_eq!(normalize_expiry("12/2030"), "12/20");
    }

    #[test]
    fn test_normalize_expiry_reentrant() {
        assert_eq!(normalize_expiry("09/3"), "09/3");
        assert_eq!(normalize_expiry("09/30"), "09/30");
        // Deleting the last digit of "09/3" leaves "09/"
        assert_eq!(normalize_expiry("09/"), "09");
    }

    #[test]
    fn test_normalize_expiry_strips_noise() {
        assert_eq!(normalize_expiry("ab1c2d3e"), "12/3");
    }

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("4111 1111 1111 1111"), "4111111111111111");
        assert_eq!(strip_formatting("4111-1111-1111-1111"), "4111111111111111");
        assert_eq!(strip_formatting("4111.1111.1111.1111"), "4111111111111111");
    }

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count("4111 1111 1111 1111"), 16);
        assert_eq!(digit_count(""), 0);
        assert_eq!(digit_count("12/25"), 4);
    }
}
