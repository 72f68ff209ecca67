//! WebAssembly bindings for the card form.
//!
//! # Usage from JavaScript
//!
//! ```javascript
//! import init, { normalize_card_number, validate_form, classify_issuer } from 'card_vault';
//!
//! await init();
//!
//! input.value = normalize_card_number(input.value);   // "4111 1111 ..."
//!
//! const result = validate_form(number, holder, expiry, cvv, null);
//! if (!result.valid) {
//!     showError('cardNumber', result.card_number_error);
//! }
//!
//! label.textContent = classify_issuer(number);        // "Visa"
//! ```

#![cfg(feature = "wasm")]

use chrono::NaiveDate;
use wasm_bindgen::prelude::*;

use crate::card::{CardRecord, Field};
use crate::validate::ValidationReport;

/// Per-field messages from [`validate_form`], returned to JavaScript.
#[wasm_bindgen]
pub struct FormValidation {
    report: ValidationReport,
}

#[wasm_bindgen]
impl FormValidation {
    #[wasm_bindgen(getter)]
    pub fn valid(&self) -> bool {
        self.report.is_valid()
    }

    #[wasm_bindgen(getter)]
    pub fn card_number_error(&self) -> Option<String> {
        self.report.message(Field::CardNumber)
    }

    #[wasm_bindgen(getter)]
    pub fn card_holder_error(&self) -> Option<String> {
        self.report.message(Field::CardHolder)
    }

    #[wasm_bindgen(getter)]
    pub fn expiry_date_error(&self) -> Option<String> {
        self.report.message(Field::ExpiryDate)
    }

    #[wasm_bindgen(getter)]
    pub fn cvv_error(&self) -> Option<String> {
        self.report.message(Field::Cvv)
    }

    #[wasm_bindgen(getter)]
    pub fn email_error(&self) -> Option<String> {
        self.report.message(Field::Email)
    }
}

/// Groups card number digits in fours.
#[wasm_bindgen]
pub fn normalize_card_number(raw: &str) -> String {
    crate::format::normalize_card_number(raw)
}

/// Builds `MM/YY` from typed digits.
#[wasm_bindgen]
pub fn normalize_expiry(raw: &str) -> String {
    crate::format::normalize_expiry(raw)
}

/// Keeps up to four CVV digits.
#[wasm_bindgen]
pub fn normalize_cvv(raw: &str) -> String {
    crate::cvv::normalize_cvv(raw)
}

/// Checks the card number has 13-19 digits.
#[wasm_bindgen]
pub fn is_card_number_valid(value: &str) -> bool {
    crate::validate::is_card_number_valid(value)
}

/// Checks an `MM/YY` value against the browser's current date.
#[wasm_bindgen]
pub fn is_expiry_valid(value: &str) -> bool {
    crate::expiry::is_expiry_valid(value, &today())
}

/// Network name from the number prefix.
#[wasm_bindgen]
pub fn classify_issuer(card_number: &str) -> String {
    crate::detect::classify_issuer(card_number).to_string()
}

/// Masks a number to its last four digits.
#[wasm_bindgen]
pub fn mask_card_number(card_number: &str) -> String {
    crate::mask::mask_card_number(card_number)
}

/// Validates the whole form against the browser's current date.
///
/// Pass `null` for `email` when no email destination is needed.
#[wasm_bindgen]
pub fn validate_form(
    card_number: &str,
    card_holder: &str,
    expiry_date: &str,
    cvv: &str,
    email: Option<String>,
) -> FormValidation {
    let record = CardRecord {
        card_number: card_number.to_string(),
        card_holder: card_holder.to_string(),
        expiry_date: expiry_date.to_string(),
        cvv: cvv.to_string(),
    };
    let report = crate::validate::validate_record(&record, email.as_deref(), &today());
    FormValidation { report }
}

/// Today's local date according to the JavaScript host.
fn today() -> NaiveDate {
    let now = js_sys::Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1,
        now.get_date(),
    )
    .unwrap_or_default()
}
