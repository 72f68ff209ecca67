//! The card record entered through the form, and the names of its fields.
//!
//! `CardRecord` holds the four canonical field strings. It carries no
//! validity flag: validity is always recomputed with
//! [`validate_record`](crate::validate::validate_record).

use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::cvv::normalize_cvv;
use crate::format::{normalize_card_number, normalize_expiry};

/// Display cap for the card number input: 16 digits plus 3 separators.
pub const CARD_NUMBER_INPUT_CAP: usize = 19;

/// Display cap for the expiry input (`MM/YY`).
pub const EXPIRY_INPUT_CAP: usize = 5;

/// Display cap for the CVV input.
pub const CVV_INPUT_CAP: usize = crate::cvv::MAX_CVV_DIGITS;

/// One of the four editable fields of a [`CardRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum CardField {
    /// The card number, canonically grouped in fours.
    CardNumber,
    /// The card holder name, stored verbatim.
    CardHolder,
    /// The expiry date, canonically `MM/YY`.
    ExpiryDate,
    /// The card verification code.
    Cvv,
}

impl CardField {
    /// All card fields in form order.
    pub const ALL: [CardField; 4] = [
        CardField::CardNumber,
        CardField::CardHolder,
        CardField::ExpiryDate,
        CardField::Cvv,
    ];

    /// Canonicalizes `raw` for this field.
    ///
    /// The holder name is not reformatted.
    pub fn normalize(&self, raw: &str) -> String {
        match self {
            Self::CardNumber => normalize_card_number(raw),
            Self::CardHolder => raw.to_string(),
            Self::ExpiryDate => normalize_expiry(raw),
            Self::Cvv => normalize_cvv(raw),
        }
    }

    /// Maximum number of characters the input control accepts, if any.
    #[inline]
    pub const fn input_cap(&self) -> Option<usize> {
        match self {
            Self::CardNumber => Some(CARD_NUMBER_INPUT_CAP),
            Self::CardHolder => None,
            Self::ExpiryDate => Some(EXPIRY_INPUT_CAP),
            Self::Cvv => Some(CVV_INPUT_CAP),
        }
    }
}

impl fmt::Display for CardField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Field::from(*self).fmt(f)
    }
}

/// Key of the validation error map: the card fields plus the optional
/// email destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum Field {
    /// See [`CardField::CardNumber`].
    CardNumber,
    /// See [`CardField::CardHolder`].
    CardHolder,
    /// See [`CardField::ExpiryDate`].
    ExpiryDate,
    /// See [`CardField::Cvv`].
    Cvv,
    /// Email destination, only checked when one is required.
    Email,
}

impl Field {
    /// Stable identifier used by the CLI, server and WASM bindings.
    #[inline]
    pub const fn key(&self) -> &'static str {
        match self {
            Self::CardNumber => "cardNumber",
            Self::CardHolder => "cardHolder",
            Self::ExpiryDate => "expiryDate",
            Self::Cvv => "cvv",
            Self::Email => "email",
        }
    }

    /// Label used when building user-facing messages.
    #[inline]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::CardNumber => "Card number",
            Self::CardHolder => "Card holder name",
            Self::ExpiryDate => "Expiry date",
            Self::Cvv => "CVV",
            Self::Email => "Email address",
        }
    }
}

impl From<CardField> for Field {
    fn from(field: CardField) -> Self {
        match field {
            CardField::CardNumber => Field::CardNumber,
            CardField::CardHolder => Field::CardHolder,
            CardField::ExpiryDate => Field::ExpiryDate,
            CardField::Cvv => Field::Cvv,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A payment card as entered in the form.
///
/// # Security
///
/// - Field contents are zeroed on drop using the `zeroize` crate
/// - Debug output masks the card number and CVV
#[derive(Clone, Default, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct CardRecord {
    /// Canonical card number, e.g. `"4111 1111 1111 1111"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub card_number: String,
    /// Card holder name as typed.
    #[cfg_attr(feature = "serde", serde(default))]
    pub card_holder: String,
    /// Canonical expiry, e.g. `"12/30"`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub expiry_date: String,
    /// Card verification code, digits only.
    #[cfg_attr(feature = "serde", serde(default))]
    pub cvv: String,
}

impl CardRecord {
    /// Creates an empty record.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a record from raw input, normalizing every field.
    ///
    /// # Example
    ///
    /// ```
    /// use card_vault::CardRecord;
    ///
    /// let record = CardRecord::from_raw("4111111111111111", "Jane Doe", "1230", "123");
    /// assert_eq!(record.card_number, "4111 1111 1111 1111");
    /// assert_eq!(record.expiry_date, "12/30");
    /// ```
    pub fn from_raw(card_number: &str, card_holder: &str, expiry_date: &str, cvv: &str) -> Self {
        Self::new()
            .with_field(CardField::CardNumber, card_number)
            .with_field(CardField::CardHolder, card_holder)
            .with_field(CardField::ExpiryDate, expiry_date)
            .with_field(CardField::Cvv, cvv)
    }

    /// Returns a copy of the record with `field` set to the canonical form of
    /// `raw`. Other fields are untouched.
    ///
    /// # Example
    ///
    /// ```
    /// use card_vault::{CardField, CardRecord};
    ///
    /// let record = CardRecord::new().with_field(CardField::ExpiryDate, "123");
    /// assert_eq!(record.expiry_date, "12/3");
    /// assert!(record.card_number.is_empty());
    /// ```
    #[must_use]
    pub fn with_field(&self, field: CardField, raw: &str) -> Self {
        let mut next = self.clone();
        *next.slot_mut(field) = field.normalize(raw);
        next
    }

    /// Returns the current value of `field`.
    #[inline]
    pub fn get(&self, field: CardField) -> &str {
        match field {
            CardField::CardNumber => &self.card_number,
            CardField::CardHolder => &self.card_holder,
            CardField::ExpiryDate => &self.expiry_date,
            CardField::Cvv => &self.cvv,
        }
    }

    /// Returns true if every field is empty.
    pub fn is_empty(&self) -> bool {
        CardField::ALL.iter().all(|&f| self.get(f).is_empty())
    }

    /// Returns the card number masked for display, see
    /// [`mask_card_number`](crate::mask::mask_card_number).
    #[inline]
    pub fn masked_number(&self) -> String {
        crate::mask::mask_card_number(&self.card_number)
    }

    fn slot_mut(&mut self, field: CardField) -> &mut String {
        match field {
            CardField::CardNumber => &mut self.card_number,
            CardField::CardHolder => &mut self.card_holder,
            CardField::ExpiryDate => &mut self.expiry_date,
            CardField::Cvv => &mut self.cvv,
        }
    }
}

impl fmt::Debug for CardRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Mask the card number and CVV in debug output
        f.debug_struct("CardRecord")
            .field("card_number", &self.masked_number())
            .field("card_holder", &self.card_holder)
            .field("expiry_date", &self.expiry_date)
            .field("cvv", &"*".repeat(self.cvv.len()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_field_normalizes_only_that_field() {
        let record = CardRecord::new()
            .with_field(CardField::CardNumber, "4111111111111111")
            .with_field(CardField::Cvv, "12a3");

        assert_eq!(record.card_number, "4111 1111 1111 1111");
        assert_eq!(record.cvv, "123");
        assert_eq!(record.card_holder, "");
        assert_eq!(record.expiry_date, "");
    }

    #[test]
    fn test_with_field_leaves_original_untouched() {
        let original = CardRecord::from_raw("4111", "A", "12", "1");
        let edited = original.with_field(CardField::CardHolder, "B");
        assert_eq!(original.card_holder, "A");
        assert_eq!(edited.card_holder, "B");
        assert_eq!(edited.card_number, original.card_number);
    }

    #[test]
    fn test_holder_is_verbatim() {
        let record = CardRecord::new().with_field(CardField::CardHolder, "  jane  doe ");
        assert_eq!(record.card_holder, "  jane  doe ");
    }

    #[test]
    fn test_with_field_idempotent() {
        let record = CardRecord::from_raw("4111-1111-1111-1111", "Jane", "1230", "123");
        let again = CardRecord::from_raw(
            &record.card_number,
            &record.card_holder,
            &record.expiry_date,
            &record.cvv,
        );
        assert_eq!(record, again);
    }

    #[test]
    fn test_get_and_is_empty() {
        let record = CardRecord::new();
        assert!(record.is_empty());

        let record = record.with_field(CardField::ExpiryDate, "0");
        assert!(!record.is_empty());
        assert_eq!(record.get(CardField::ExpiryDate), "0");
    }

    #[test]
    fn test_input_caps() {
        assert_eq!(CardField::CardNumber.input_cap(), Some(19));
        assert_eq!(CardField::CardHolder.input_cap(), None);
        assert_eq!(CardField::ExpiryDate.input_cap(), Some(5));
        assert_eq!(CardField::Cvv.input_cap(), Some(4));
    }

    #[test]
    fn test_field_keys() {
        assert_eq!(Field::from(CardField::CardNumber).key(), "cardNumber");
        assert_eq!(CardField::ExpiryDate.to_string(), "expiryDate");
        assert_eq!(Field::Email.to_string(), "email");
    }

    #[test]
    fn test_debug_is_masked() {
        let record = CardRecord::from_raw("4111111111111111", "Jane Doe", "1230", "987");
        let debug = format!("{:?}", record);
        assert!(!debug.contains("4111 1111 1111 1111"));
        assert!(!debug.contains("987"));
        assert!(debug.contains("1111"));
        assert!(debug.contains("Jane Doe"));
    }

    #[test]
    fn test_record_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardRecord>();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialize_missing_fields_are_empty() {
        let record: CardRecord =
            serde_json::from_str(r#"{"cardNumber":"4111 1111 1111 1111"}"#).unwrap();
        assert_eq!(record.card_number, "4111 1111 1111 1111");
        assert_eq!(record.card_holder, "");
        assert_eq!(record.expiry_date, "");
        assert_eq!(record.cvv, "");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_camel_case_keys() {
        let record = CardRecord::from_raw("4111111111111111", "Jane Doe", "1230", "123");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "cardNumber": "4111 1111 1111 1111",
                "cardHolder": "Jane Doe",
                "expiryDate": "12/30",
                "cvv": "123"
            })
        );
        let back: CardRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
