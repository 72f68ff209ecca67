//! Masked and placeholder renderings of a card for display.
//!
//! The live preview shows what has been typed so far, falling back to
//! placeholders for empty fields. Saved cards only ever show the last four
//! digits of the number and never the CVV.

use crate::card::CardRecord;
use crate::detect::{detect_issuer, Issuer};
use std::fmt;

/// Character used to hide digits.
pub const MASK_CHAR: char = '•';

/// Preview placeholder for an empty card number.
pub const NUMBER_PLACEHOLDER: &str = "•••• •••• •••• ••••";

/// Preview placeholder for an empty holder name.
pub const HOLDER_PLACEHOLDER: &str = "FULL NAME";

/// Preview placeholder for an empty expiry.
pub const EXPIRY_PLACEHOLDER: &str = "MM/YY";

/// Masks a card number down to its last four digits.
///
/// Whitespace is removed before taking the last four characters, so the
/// canonical grouped form and the raw digits give the same result.
///
/// # Example
///
/// ```
/// use card_vault::mask::mask_card_number;
///
/// assert_eq!(mask_card_number("4111 1111 1111 1234"), "•••• •••• •••• 1234");
/// assert_eq!(mask_card_number("12"), "•••• •••• •••• 12");
/// ```
pub fn mask_card_number(card_number: &str) -> String {
    let compact: Vec<char> = card_number.chars().filter(|c| !c.is_whitespace()).collect();
    let start = compact.len().saturating_sub(4);
    let last_four: String = compact[start..].iter().collect();

    let mut result = String::with_capacity(NUMBER_PLACEHOLDER.len() + last_four.len());
    for _ in 0..3 {
        for _ in 0..4 {
            result.push(MASK_CHAR);
        }
        result.push(' ');
    }
    result.push_str(&last_four);
    result
}

/// What the card preview renders for the record being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CardPreview {
    /// Card number as typed, or [`NUMBER_PLACEHOLDER`].
    pub card_number: String,
    /// Holder name upper-cased, or [`HOLDER_PLACEHOLDER`].
    pub card_holder: String,
    /// Expiry as typed, or [`EXPIRY_PLACEHOLDER`].
    pub expiry_date: String,
}

impl CardPreview {
    /// Builds the preview of `record`.
    ///
    /// # Example
    ///
    /// ```
    /// use card_vault::{mask::CardPreview, CardRecord};
    ///
    /// let preview = CardPreview::of(&CardRecord::from_raw("4111", "jane", "", ""));
    /// assert_eq!(preview.card_number, "4111");
    /// assert_eq!(preview.card_holder, "JANE");
    /// assert_eq!(preview.expiry_date, "MM/YY");
    /// ```
    pub fn of(record: &CardRecord) -> Self {
        Self {
            card_number: or_placeholder(&record.card_number, NUMBER_PLACEHOLDER),
            card_holder: or_placeholder(&record.card_holder, HOLDER_PLACEHOLDER).to_uppercase(),
            expiry_date: or_placeholder(&record.expiry_date, EXPIRY_PLACEHOLDER),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// One entry of the saved-cards list.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CardSummary {
    /// Holder name as entered.
    pub card_holder: String,
    /// Network detected from the number prefix.
    pub issuer: Issuer,
    /// Number masked to the last four digits.
    pub masked_number: String,
    /// Expiry as entered.
    pub expiry_date: String,
}

impl CardSummary {
    /// Summarizes `record` for the saved-cards list.
    pub fn of(record: &CardRecord) -> Self {
        Self {
            card_holder: record.card_holder.clone(),
            issuer: detect_issuer(&record.card_number),
            masked_number: mask_card_number(&record.card_number),
            expiry_date: record.expiry_date.clone(),
        }
    }
}

impl fmt::Display for CardSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}) {} exp {}",
            self.card_holder, self.issuer, self.masked_number, self.expiry_date
        )
    }
}
