//! Plain-text export document for a saved card.
//!
//! This is the content of the "downloadable" text file. It contains the full
//! card details including the CVV, so it must only be written where the user
//! asked for it.

use chrono::NaiveDateTime;

use crate::card::CardRecord;

/// File name used when no export path is configured.
pub const DEFAULT_EXPORT_FILE: &str = "my_cards.txt";

const RULE: &str = "----------------";

/// Timestamp layout used on the `Generated on` line.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders the export document for `record`.
///
/// # Example
///
/// ```
/// use card_vault::{export::render_export, CardRecord};
/// use chrono::NaiveDate;
///
/// let record = CardRecord::from_raw("4111111111111111", "Jane Doe", "1230", "123");
/// let at = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(9, 30, 0).unwrap();
///
/// let doc = render_export(&record, at);
/// assert!(doc.starts_with("Card Information:\n"));
/// assert!(doc.contains("Card Number: 4111 1111 1111 1111\n"));
/// assert!(doc.ends_with("Generated on: 2025-01-15 09:30:00\n"));
/// ```
pub fn render_export(record: &CardRecord, generated_on: NaiveDateTime) -> String {
    format!(
        "Card Information:\n\
         {rule}\n\
         Card Number: {number}\n\
         Card Holder: {holder}\n\
         Expiry Date: {expiry}\n\
         CVV: {cvv}\n\
         {rule}\n\
         Generated on: {at}\n",
        rule = RULE,
        number = record.card_number,
        holder = record.card_holder,
        expiry = record.expiry_date,
        cvv = record.cvv,
        at = generated_on.format(TIMESTAMP_FORMAT),
    )
}
