//! # card_vault
//!
//! Normalization, validation and issuer classification for a payment card
//! entry form.
//!
//! ## Features
//!
//! - Keystroke normalization: grouped card numbers, `MM/YY` expiry, capped CVV
//! - Whole-form validation that collects every field error at once
//! - Issuer classification from the number prefix, for display
//! - Masked previews and saved-card summaries
//! - Export to a plain-text file, or email with a file fallback
//! - Multiple interfaces: library, CLI, REST API, WASM
//!
//! ## Quick Start
//!
//! ```rust
//! use card_vault::{classify_issuer, normalize_card_number, normalize_expiry, normalize_cvv};
//!
//! assert_eq!(normalize_card_number("4111111111111111"), "4111 1111 1111 1111");
//! assert_eq!(normalize_expiry("1230"), "12/30");
//! assert_eq!(normalize_cvv("12345"), "1234");
//!
//! assert_eq!(classify_issuer("4111 1111 1111 1111"), "Visa");
//! ```
//!
//! ## Validation
//!
//! ```rust
//! use card_vault::{validate_record, CardField, CardRecord, Field, FieldError};
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//!
//! let record = CardRecord::new()
//!     .with_field(CardField::CardNumber, "4111 1111 1111 1111")
//!     .with_field(CardField::CardHolder, "Jane Doe")
//!     .with_field(CardField::ExpiryDate, "12/24")
//!     .with_field(CardField::Cvv, "12");
//!
//! let report = validate_record(&record, None, &now);
//! assert!(!report.is_valid());
//! assert_eq!(report.error(Field::ExpiryDate), Some(FieldError::Invalid));
//! assert_eq!(report.message(Field::Cvv).as_deref(), Some("CVV must be at least 3 digits"));
//! ```
//!
//! ## Form State
//!
//! ```rust
//! use card_vault::{form::CardForm, vault::CardVault, CardField};
//! use chrono::NaiveDate;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
//! let mut form = CardForm::new();
//! let mut vault = CardVault::new();
//!
//! form.input(CardField::CardNumber, "5112345678901234");
//! form.input(CardField::CardHolder, "Jane Doe");
//! form.input(CardField::ExpiryDate, "0330");
//! form.input(CardField::Cvv, "123");
//!
//! if let Ok(record) = form.submit(None, &now) {
//!     vault.save(record);
//! }
//!
//! let summary = &vault.summaries()[0];
//! assert_eq!(summary.issuer.name(), "MasterCard");
//! assert_eq!(summary.masked_number, "•••• •••• •••• 1234");
//! ```
//!
//! ## Supported Issuers
//!
//! | Issuer | Prefix |
//! |--------|--------|
//! | Visa | 4 |
//! | MasterCard | 51-55 |
//! | American Express | 34, 37 |
//! | Discover | 60, 65 |
//!
//! Classification looks at the literal first characters only. It is a
//! display hint, not issuer validation, and no Luhn checksum is applied.
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | Serialize/deserialize records and reports |
//! | `dispatch` | Async file export and email dispatch (tokio) |
//! | `config` | TOML configuration |
//! | `cli` | Command-line tool |
//! | `server` | REST API with Swagger UI |
//! | `wasm` | WebAssembly support |
//!
//! ## Security
//!
//! This crate is a form helper, not a vault in the PCI-DSS sense. It does:
//!
//! - Zero `CardRecord` contents on drop
//! - Mask the number and CVV in `Debug` output and in logs
//! - Contain no unsafe code (`#![deny(unsafe_code)]`)
//!
//! The export file contains the full card including the CVV.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod clock;
#[cfg(feature = "config")]
pub mod config;
pub mod cvv;
pub mod detect;
#[cfg(feature = "dispatch")]
pub mod dispatch;
pub mod error;
pub mod expiry;
pub mod export;
pub mod form;
pub mod format;
pub mod mask;
pub mod validate;
pub mod vault;

#[cfg(feature = "wasm")]
mod wasm;

// Re-export main types at crate root
pub use card::{CardField, CardRecord, Field};
pub use cvv::normalize_cvv;
pub use detect::{classify_issuer, detect_issuer, Issuer};
pub use error::FieldError;
pub use expiry::is_expiry_valid;
pub use format::{normalize_card_number, normalize_expiry};
pub use validate::{is_card_number_valid, validate_record, ValidationReport};
