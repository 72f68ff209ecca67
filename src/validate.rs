//! Whole-record validation for the card form.
//!
//! Every field is checked independently and all failures are collected, so
//! the form can flag every bad input at once instead of one per submit.
//!
//! # Rules
//!
//! | Field | Required when | Otherwise invalid when |
//! |-------|---------------|------------------------|
//! | card number | empty after trim | not 13-19 digits |
//! | card holder | empty after trim | never |
//! | expiry date | empty | not `MM/YY` or already expired |
//! | CVV | empty | fewer than 3 characters |
//! | email (optional) | empty after trim | not shaped like `local@domain.tld` |
//!
//! No Luhn checksum is applied to the card number: the check is a length
//! plausibility test only.

use chrono::Datelike;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::card::{CardRecord, Field};
use crate::cvv::{is_long_enough, MIN_CVV_DIGITS};
use crate::error::FieldError;
use crate::expiry::is_expiry_valid;
use crate::format::digit_count;

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 13;

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Permissive `local@domain.tld` shape, not RFC 5322.
static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
    })
}

/// Outcome of [`validate_record`]: the errors keyed by field.
///
/// Fields that passed have no entry. The map is ordered by form position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ValidationReport {
    field_errors: BTreeMap<Field, FieldError>,
}

impl ValidationReport {
    /// Returns true if no field produced an error.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Returns the error for `field`, if any.
    #[inline]
    pub fn error(&self, field: impl Into<Field>) -> Option<FieldError> {
        self.field_errors.get(&field.into()).copied()
    }

    /// Returns the full UI message for `field`, if it failed.
    pub fn message(&self, field: impl Into<Field>) -> Option<String> {
        let field = field.into();
        self.error(field).map(|e| e.message(field))
    }

    /// Returns all field errors in form order.
    #[inline]
    pub fn field_errors(&self) -> &BTreeMap<Field, FieldError> {
        &self.field_errors
    }

    /// Iterates `(field, message)` pairs in form order.
    pub fn messages(&self) -> impl Iterator<Item = (Field, String)> + '_ {
        self.field_errors.iter().map(|(&f, e)| (f, e.message(f)))
    }

    /// Removes the error for `field`, returning it.
    ///
    /// The form calls this when the user edits a flagged input.
    pub fn clear(&mut self, field: impl Into<Field>) -> Option<FieldError> {
        self.field_errors.remove(&field.into())
    }

    fn record(&mut self, field: Field, result: Result<(), FieldError>) {
        if let Err(e) = result {
            self.field_errors.insert(field, e);
        }
    }
}

/// Returns true if `value` holds between 13 and 19 digits.
///
/// Non-digit characters are ignored.
///
/// # Example
///
/// ```
/// use card_vault::is_card_number_valid;
///
/// assert!(is_card_number_valid("4111 1111 1111 1111"));
/// assert!(is_card_number_valid("4222222222222"));
/// assert!(!is_card_number_valid("123"));
/// ```
#[inline]
pub fn is_card_number_valid(value: &str) -> bool {
    (MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digit_count(value))
}

/// Returns true if `value` looks like `local@domain.tld`.
///
/// # Example
///
/// ```
/// use card_vault::validate::is_email_valid;
///
/// assert!(is_email_valid("jane@example.com"));
/// assert!(!is_email_valid("jane@example"));
/// assert!(!is_email_valid("jane doe@example.com"));
/// ```
#[inline]
pub fn is_email_valid(value: &str) -> bool {
    email_regex().is_match(value)
}

/// Validates every field of `record`, collecting errors.
///
/// `email` is only checked when `Some`, i.e. when the caller needs an email
/// destination. `now` anchors the expiry check.
///
/// # Example
///
/// ```
/// use card_vault::{validate_record, CardRecord, Field, FieldError};
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
///
/// let report = validate_record(&CardRecord::new(), None, &now);
/// assert!(!report.is_valid());
/// assert_eq!(report.error(Field::Cvv), Some(FieldError::Required));
///
/// let record = CardRecord::from_raw("4111111111111111", "Jane Doe", "01/30", "123");
/// assert!(validate_record(&record, None, &now).is_valid());
/// ```
pub fn validate_record(
    record: &CardRecord,
    email: Option<&str>,
    now: &impl Datelike,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    report.record(Field::CardNumber, check_card_number(&record.card_number));
    report.record(Field::CardHolder, check_card_holder(&record.card_holder));
    report.record(Field::ExpiryDate, check_expiry(&record.expiry_date, now));
    report.record(Field::Cvv, check_cvv(&record.cvv));

    if let Some(email) = email {
        report.record(Field::Email, check_email(email));
    }

    report
}

fn check_card_number(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }
    if !is_card_number_valid(value) {
        return Err(FieldError::Invalid);
    }
    Ok(())
}

fn check_card_holder(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required);
    }
    Ok(())
}

fn check_expiry(value: &str, now: &impl Datelike) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !is_expiry_valid(value, now) {
        return Err(FieldError::Invalid);
    }
    Ok(())
}

fn check_cvv(value: &str) -> Result<(), FieldError> {
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    // The 4-digit upper bound belongs to normalization, not validation
    if !is_long_enough(value) {
        return Err(FieldError::TooShort {
            minimum: MIN_CVV_DIGITS,
        });
    }
    Ok(())
}

fn check_email(value: &str) -> Result<(), FieldError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(FieldError::Required);
    }
    if !is_email_valid(value) {
        return Err(FieldError::Invalid);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardField;
    use chrono::NaiveDate;

    fn jan_2025() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    fn valid_record() -> CardRecord {
        CardRecord::from_raw("4111111111111111", "Jane Doe", "01/30", "123")
    }

    #[test]
    fn test_card_number_length_bounds() {
        assert!(!is_card_number_valid("411111111111")); // 12
        assert!(is_card_number_valid("4111111111111")); // 13
        assert!(is_card_number_valid("4111111111111111111")); // 19
        assert!(!is_card_number_valid("41111111111111111111")); // 20
    }

    #[test]
    fn test_card_number_ignores_separators() {
        assert!(is_card_number_valid("4111 1111 1111 1111"));
        assert!(is_card_number_valid("4111-1111-1111-1111"));
        assert!(!is_card_number_valid("4111 x"));
    }

    #[test]
    fn test_no_checksum() {
        // Fails Luhn, still passes the length check
        assert!(is_card_number_valid("4111111111111112"));
    }

    #[test]
    fn test_empty_record_has_four_required_errors() {
        let report = validate_record(&CardRecord::new(), None, &jan_2025());
        assert!(!report.is_valid());
        assert_eq!(report.field_errors().len(), 4);
        for field in CardField::ALL {
            assert_eq!(report.error(field), Some(FieldError::Required));
        }
        assert_eq!(report.error(Field::Email), None);
    }

    #[test]
    fn test_valid_record() {
        let report = validate_record(&valid_record(), None, &jan_2025());
        assert!(report.is_valid());
        assert!(report.field_errors().is_empty());
    }

    #[test]
    fn test_whitespace_only_fields() {
        let mut record = valid_record();
        record.card_number = "   ".to_string();
        record.card_holder = " \t".to_string();
        let report = validate_record(&record, None, &jan_2025());
        assert_eq!(report.error(Field::CardNumber), Some(FieldError::Required));
        assert_eq!(report.error(Field::CardHolder), Some(FieldError::Required));
    }

    #[test]
    fn test_expiry_not_trimmed() {
        let mut record = valid_record();
        record.expiry_date = " ".to_string();
        let report = validate_record(&record, None, &jan_2025());
        assert_eq!(report.error(Field::ExpiryDate), Some(FieldError::Invalid));
    }

    #[test]
    fn test_errors_are_collected_not_short_circuited() {
        let record = CardRecord::from_raw("123", "Jane", "12/24", "12");
        let report = validate_record(&record, Some("nope"), &jan_2025());

        assert_eq!(report.error(Field::CardNumber), Some(FieldError::Invalid));
        assert_eq!(report.error(Field::CardHolder), None);
        assert_eq!(report.error(Field::ExpiryDate), Some(FieldError::Invalid));
        assert_eq!(
            report.error(Field::Cvv),
            Some(FieldError::TooShort { minimum: 3 })
        );
        assert_eq!(report.error(Field::Email), Some(FieldError::Invalid));
    }

    #[test]
    fn test_partial_expiry_is_invalid() {
        let record = valid_record().with_field(CardField::ExpiryDate, "012");
        let report = validate_record(&record, None, &jan_2025());
        assert_eq!(report.error(Field::ExpiryDate), Some(FieldError::Invalid));
    }

    #[test]
    fn test_cvv_upper_bound_not_rechecked() {
        let mut record = valid_record();
        record.cvv = "123456".to_string();
        assert!(validate_record(&record, None, &jan_2025()).is_valid());
    }

    #[test]
    fn test_email_rules() {
        let now = jan_2025();
        let record = valid_record();

        let report = validate_record(&record, Some("  "), &now);
        assert_eq!(report.error(Field::Email), Some(FieldError::Required));

        let report = validate_record(&record, Some(" jane@example.com "), &now);
        assert!(report.is_valid());

        let report = validate_record(&record, Some("a@b"), &now);
        assert_eq!(report.error(Field::Email), Some(FieldError::Invalid));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_email_valid("a@b.co"));
        assert!(is_email_valid("first.last+tag@sub.example.org"));
        assert!(!is_email_valid("@example.com"));
        assert!(!is_email_valid("jane@"));
        assert!(!is_email_valid("jane@@example.com"));
        assert!(!is_email_valid(""));
    }

    #[test]
    fn test_report_messages_in_form_order() {
        let report = validate_record(&CardRecord::new(), Some(""), &jan_2025());
        let messages: Vec<_> = report.messages().map(|(_, m)| m).collect();
        assert_eq!(
            messages,
            vec![
                "Card number is required",
                "Card holder name is required",
                "Expiry date is required",
                "CVV is required",
                "Email address is required",
            ]
        );
    }

    #[test]
    fn test_report_clear() {
        let mut report = validate_record(&CardRecord::new(), None, &jan_2025());
        assert_eq!(report.clear(CardField::Cvv), Some(FieldError::Required));
        assert_eq!(report.clear(CardField::Cvv), None);
        assert_eq!(report.field_errors().len(), 3);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let record = valid_record();
        let first = validate_record(&record, None, &jan_2025());
        let second = validate_record(&record, None, &jan_2025());
        assert_eq!(first, second);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_report_serialized_shape() {
        let record = CardRecord::from_raw("4111111111111111", "Jane Doe", "1230", "12");
        let report = validate_record(&record, Some(""), &NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
        assert_eq!(
            serde_json::to_value(&report).unwrap(),
            serde_json::json!({
                "fieldErrors": {
                    "cvv": {"tooShort": {"minimum": 3}},
                    "email": "required"
                }
            })
        );
    }
}
