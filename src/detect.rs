//! Card issuer classification from the leading characters of a card number.
//!
//! This is a display heuristic, not issuer validation: it looks at the first
//! one or two characters exactly as they appear in the (usually canonical,
//! space-grouped) string and maps them to a network name.
//!
//! # Performance
//!
//! Classification is O(1) using slice pattern matching on the input bytes.

use std::fmt;

/// Card networks recognized by the prefix classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Issuer {
    /// Visa - prefix 4
    Visa,
    /// MasterCard - prefix 51-55
    MasterCard,
    /// American Express - prefix 34, 37
    AmericanExpress,
    /// Discover - prefix 60, 65
    Discover,
    /// Anything else, including short or empty input
    Unknown,
}

impl Issuer {
    /// Returns the human-readable network name.
    #[inline]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Visa => "Visa",
            Self::MasterCard => "MasterCard",
            Self::AmericanExpress => "American Express",
            Self::Discover => "Discover",
            Self::Unknown => "Unknown",
        }
    }

    /// Returns true unless the issuer is [`Issuer::Unknown`].
    #[inline]
    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl fmt::Display for Issuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Detects the issuer from the literal leading characters of `card_number`.
///
/// Spaces are not stripped, so `" 4111"` is [`Issuer::Unknown`]. Rules are
/// checked in order and the first match wins.
///
/// # Example
///
/// ```
/// use card_vault::detect::{detect_issuer, Issuer};
///
/// assert_eq!(detect_issuer("4111 1111 1111 1111"), Issuer::Visa);
/// assert_eq!(detect_issuer("3782 822463 10005"), Issuer::AmericanExpress);
/// assert_eq!(detect_issuer("5"), Issuer::Unknown);
/// ```
#[inline]
pub fn detect_issuer(card_number: &str) -> Issuer {
    match card_number.as_bytes() {
        [b'4', ..] => Issuer::Visa,
        [b'5', b'1'..=b'5', ..] => Issuer::MasterCard,
        [b'3', b'4' | b'7', ..] => Issuer::AmericanExpress,
        [b'6', b'0' | b'5', ..] => Issuer::Discover,
        _ => Issuer::Unknown,
    }
}

/// Returns the network name for `card_number`.
///
/// Shorthand for `detect_issuer(card_number).name()`.
///
/// # Example
///
/// ```
/// use card_vault::classify_issuer;
///
/// assert_eq!(classify_issuer("4111222233334444"), "Visa");
/// assert_eq!(classify_issuer("5112345678901234"), "MasterCard");
/// assert_eq!(classify_issuer("9999999999999999"), "Unknown");
/// ```
#[inline]
pub fn classify_issuer(card_number: &str) -> &'static str {
    detect_issuer(card_number).name()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visa() {
        assert_eq!(detect_issuer("4"), Issuer::Visa);
        assert_eq!(detect_issuer("4111 1111 1111 1111"), Issuer::Visa);
        assert_eq!(detect_issuer("4x"), Issuer::Visa);
    }

    #[test]
    fn test_mastercard_range() {
        for prefix in ["51", "52", "53", "54", "55"] {
            assert_eq!(detect_issuer(prefix), Issuer::MasterCard, "{}", prefix);
        }
        assert_eq!(detect_issuer("50"), Issuer::Unknown);
        assert_eq!(detect_issuer("56"), Issuer::Unknown);
    }

    #[test]
    fn test_amex() {
        assert_eq!(detect_issuer("3411"), Issuer::AmericanExpress);
        assert_eq!(detect_issuer("3782 822463 10005"), Issuer::AmericanExpress);
        assert_eq!(detect_issuer("35"), Issuer::Unknown);
    }

    #[test]
    fn test_discover() {
        assert_eq!(detect_issuer("6011 1111 1111 1117"), Issuer::Discover);
        assert_eq!(detect_issuer("6500"), Issuer::Discover);
        assert_eq!(detect_issuer("62"), Issuer::Unknown);
    }

    #[test]
    fn test_short_input_falls_through() {
        assert_eq!(detect_issuer(""), Issuer::Unknown);
        assert_eq!(detect_issuer("5"), Issuer::Unknown);
        assert_eq!(detect_issuer("3"), Issuer::Unknown);
        assert_eq!(detect_issuer("6"), Issuer::Unknown);
    }

    #[test]
    fn test_separator_inside_prefix_is_literal() {
        // "5 1..." is not a MasterCard prefix because the space is kept
        assert_eq!(detect_issuer("5 1"), Issuer::Unknown);
        assert_eq!(detect_issuer(" 4111"), Issuer::Unknown);
    }

    #[test]
    fn test_non_ascii_input() {
        assert_eq!(detect_issuer("é4"), Issuer::Unknown);
    }

    #[test]
    fn test_classify_names() {
        assert_eq!(classify_issuer("4111222233334444"), "Visa");
        assert_eq!(classify_issuer("5112345678901234"), "MasterCard");
        assert_eq!(classify_issuer("371449635398431"), "American Express");
        assert_eq!(classify_issuer("6011000990139424"), "Discover");
        assert_eq!(classify_issuer("9999999999999999"), "Unknown");
    }

    #[test]
    fn test_issuer_display() {
        assert_eq!(Issuer::AmericanExpress.to_string(), "American Express");
        assert!(Issuer::Visa.is_known());
        assert!(!Issuer::Unknown.is_known());
    }
}
