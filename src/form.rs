//! Form state owned by the UI layer.
//!
//! [`CardForm`] holds the record being typed and the errors from the last
//! submit. It applies the input caps a browser `maxLength` would, normalizes
//! the edited field, and clears that field's error as soon as it changes.

use chrono::Datelike;

use crate::card::{CardField, CardRecord};
use crate::mask::CardPreview;
use crate::validate::{validate_record, ValidationReport};

/// The card entry form.
///
/// # Example
///
/// ```
/// use card_vault::{form::CardForm, CardField};
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
/// let mut form = CardForm::new();
///
/// form.input(CardField::CardNumber, "4111111111111111");
/// form.input(CardField::CardHolder, "Jane Doe");
/// form.input(CardField::ExpiryDate, "0130");
/// form.input(CardField::Cvv, "123");
///
/// let saved = form.submit(None, &now).unwrap();
/// assert_eq!(saved.card_number, "4111 1111 1111 1111");
/// assert!(form.record().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CardForm {
    record: CardRecord,
    report: ValidationReport,
}

impl CardForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a keystroke-level edit to `field`.
    ///
    /// `raw` is the full new input value. It is cut to the field's input cap
    /// before normalization, and any error shown for the field is cleared.
    pub fn input(&mut self, field: CardField, raw: &str) -> &CardRecord {
        let capped = match field.input_cap() {
            Some(cap) => truncate_chars(raw, cap),
            None => raw,
        };
        self.record = self.record.with_field(field, capped);
        self.report.clear(field);
        &self.record
    }

    /// Validates the current record.
    ///
    /// On success the record is returned and the form is reset to empty.
    /// On failure the record is kept and the report is stored for display.
    pub fn submit(
        &mut self,
        email: Option<&str>,
        now: &impl Datelike,
    ) -> Result<CardRecord, &ValidationReport> {
        let report = validate_record(&self.record, email, now);
        if report.is_valid() {
            self.report = report;
            return Ok(std::mem::take(&mut self.record));
        }
        self.report = report;
        Err(&self.report)
    }

    /// The record as currently typed.
    #[inline]
    pub fn record(&self) -> &CardRecord {
        &self.record
    }

    /// Errors from the last submit that the user has not yet edited away.
    #[inline]
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// The live preview of the current record.
    pub fn preview(&self) -> CardPreview {
        CardPreview::of(&self.record)
    }

    /// Clears the record and any errors.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Returns the prefix of `s` holding at most `max` characters.
fn truncate_chars(s: &str, max: usize) -> &str {
    match s.char_indices().nth(max) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}
