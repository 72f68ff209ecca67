//! Fuzz target for keystroke normalization.
//!
//! Tests that the normalizers never panic and keep their output shape.

#![no_main]

use card_vault::{classify_issuer, cvv, format, mask};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let number = format::normalize_card_number(data);
    let expiry = format::normalize_expiry(data);
    let code = cvv::normalize_cvv(data);
    let _ = mask::mask_card_number(data);
    let _ = classify_issuer(data);

    // Normalizing is idempotent
    assert_eq!(format::normalize_card_number(&number), number);
    assert_eq!(format::normalize_expiry(&expiry), expiry);
    assert_eq!(cvv::normalize_cvv(&code), code);

    // Digits survive card number grouping
    assert_eq!(format::strip_formatting(&number), format::strip_formatting(data));
    assert!(expiry.len() <= 5);
    assert!(code.len() <= cvv::MAX_CVV_DIGITS);
});
