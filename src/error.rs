//! Field-level validation errors.
//!
//! These are user-facing data, not faults: [`validate_record`] collects one
//! per failing field so the form can show them next to the inputs.
//!
//! [`validate_record`]: crate::validate::validate_record

use crate::card::Field;
use std::fmt;

/// Why a single form field failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub enum FieldError {
    /// The field is empty (or only whitespace, for trimmed fields).
    Required,

    /// The field has a value but it is malformed.
    Invalid,

    /// The value has fewer digits than required.
    TooShort {
        /// The minimum number of digits.
        minimum: usize,
    },
}

impl FieldError {
    /// Renders the full message shown under `field` in the form.
    ///
    /// # Example
    ///
    /// ```
    /// use card_vault::{Field, FieldError};
    ///
    /// assert_eq!(FieldError::Required.message(Field::CardNumber), "Card number is required");
    /// assert_eq!(FieldError::Invalid.message(Field::ExpiryDate), "Invalid expiry date");
    /// assert_eq!(
    ///     FieldError::TooShort { minimum: 3 }.message(Field::Cvv),
    ///     "CVV must be at least 3 digits"
    /// );
    /// ```
    pub fn message(&self, field: Field) -> String {
        match self {
            Self::Required => format!("{} is required", field.label()),
            Self::Invalid => format!("Invalid {}", lowercase_label(field)),
            Self::TooShort { minimum } => {
                format!("{} must be at least {} digits", field.label(), minimum)
            }
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Required => write!(f, "required"),
            Self::Invalid => write!(f, "invalid"),
            Self::TooShort { minimum } => write!(f, "must be at least {} digits", minimum),
        }
    }
}

impl std::error::Error for FieldError {}

fn lowercase_label(field: Field) -> String {
    match field {
        // Acronym stays upper case
        Field::Cvv => field.label().to_string(),
        _ => field.label().to_lowercase(),
    }
}
