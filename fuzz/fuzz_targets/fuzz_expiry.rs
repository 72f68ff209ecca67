//! Fuzz target for expiry date parsing.
//!
//! Tests that expiry parsing never panics on arbitrary input or dates.

#![no_main]

use arbitrary::Arbitrary;
use card_vault::expiry;
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    value: &'a str,
    year: i32,
    ordinal: u32,
}

fuzz_target!(|input: Input<'_>| {
    let _ = expiry::parse_expiry(input.value);

    let Some(now) = NaiveDate::from_yo_opt(input.year, input.ordinal) else {
        return;
    };

    let valid = expiry::is_expiry_valid(input.value, &now);
    if let Ok(exp) = expiry::validate_expiry(input.value, &now) {
        assert!(valid);
        assert!(!exp.is_expired_at(&now));
        assert_eq!(exp.to_string(), input.value);
    }
});
