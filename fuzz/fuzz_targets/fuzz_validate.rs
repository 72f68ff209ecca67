//! Fuzz target for whole-record validation.
//!
//! Tests that validate_record() never panics on arbitrary records.

#![no_main]

use arbitrary::Arbitrary;
use card_vault::{validate_record, CardRecord};
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    card_number: String,
    card_holder: String,
    expiry_date: String,
    cvv: String,
    email: Option<String>,
    normalize: bool,
}

fuzz_target!(|input: Input| {
    let record = if input.normalize {
        CardRecord::from_raw(&input.card_number, &input.card_holder, &input.expiry_date, &input.cvv)
    } else {
        CardRecord {
            card_number: input.card_number,
            card_holder: input.card_holder,
            expiry_date: input.expiry_date,
            cvv: input.cvv,
        }
    };

    let Some(now) = NaiveDate::from_ymd_opt(2025, 1, 15) else {
        return;
    };
    let report = validate_record(&record, input.email.as_deref(), &now);
    assert_eq!(report.is_valid(), report.field_errors().is_empty());
    let _ = report.messages().count();
    let _ = format!("{:?}", record);
});
