//! The in-memory list of saved cards.
//!
//! Cards are appended in submission order and never edited or removed.

use crate::card::CardRecord;
use crate::mask::CardSummary;

/// Append-only list of saved cards.
///
/// # Example
///
/// ```
/// use card_vault::{vault::CardVault, CardRecord};
///
/// let mut vault = CardVault::new();
/// vault.save(CardRecord::from_raw("4111111111111111", "Jane Doe", "1230", "123"));
///
/// let summaries = vault.summaries();
/// assert_eq!(summaries[0].masked_number, "•••• •••• •••• 1111");
/// assert_eq!(summaries[0].issuer.name(), "Visa");
/// ```
#[derive(Debug, Clone, Default)]
pub struct CardVault {
    saved: Vec<CardRecord>,
}

impl CardVault {
    /// Creates an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record, returning its position in the list.
    pub fn save(&mut self, record: CardRecord) -> usize {
        self.saved.push(record);
        self.saved.len() - 1
    }

    /// Number of saved cards.
    #[inline]
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    /// Returns true if nothing has been saved.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Saved records in submission order.
    #[inline]
    pub fn records(&self) -> &[CardRecord] {
        &self.saved
    }

    /// Display summaries in submission order.
    pub fn summaries(&self) -> Vec<CardSummary> {
        self.saved.iter().map(CardSummary::of).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::Issuer;

    #[test]
    fn test_save_preserves_order() {
        let mut vault = CardVault::new();
        assert!(vault.is_empty());

        assert_eq!(vault.save(CardRecord::from_raw("4111", "A", "", "")), 0);
        assert_eq!(vault.save(CardRecord::from_raw("3782", "B", "", "")), 1);

        assert_eq!(vault.len(), 2);
        assert_eq!(vault.records()[0].card_holder, "A");
        assert_eq!(vault.records()[1].card_holder, "B");
    }

    #[test]
    fn test_summaries() {
        let mut vault = CardVault::new();
        vault.save(CardRecord::from_raw("6011000990139424", "Sam", "0927", "123"));
        vault.save(CardRecord::from_raw("9999999999999999", "Kim", "1128", "123"));

        let summaries = vault.summaries();
        assert_eq!(summaries[0].issuer, Issuer::Discover);
        assert_eq!(summaries[0].masked_number, "•••• •••• •••• 9424");
        assert_eq!(summaries[1].issuer, Issuer::Unknown);
    }

    #[test]
    fn test_duplicates_are_kept() {
        let record = CardRecord::from_raw("4111111111111111", "Jane", "1230", "123");
        let mut vault = CardVault::new();
        vault.save(record.clone());
        vault.save(record);
        assert_eq!(vault.len(), 2);
    }
}
