use serde::Serialize;
use thiserror::Error;

use super::{
    Amount, Denomination, Quantity, QuantityPolicy, SanitizedQuantity, ZeroDisplay, sanitize,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Row {index} is out of range (ledger has {rows} rows)")]
    RowOutOfRange { index: usize, rows: usize },

    #[error("Invalid denomination: '{0}' (expected a positive whole number)")]
    InvalidDenomination(String),
}

/// One denomination and how many notes of it were counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LedgerEntry {
    pub denomination: Denomination,
    pub quantity: Quantity,
}

impl LedgerEntry {
    pub fn total(&self) -> Amount {
        self.denomination.times(self.quantity)
    }
}

/// Fixed, ordered set of denominations with a mutable quantity for each.
/// Totals are derived on every call, never cached.
#[derive(Debug, Clone)]
pub struct Ledger {
    entries: Vec<LedgerEntry>,
    policy: QuantityPolicy,
    zero_display: ZeroDisplay,
}

impl Ledger {
    /// Create a ledger with every quantity at zero.
    pub fn new(denominations: &[Denomination]) -> Self {
        let entries = denominations
            .iter()
            .map(|&denomination| LedgerEntry {
                denomination,
                quantity: 0,
            })
            .collect();

        Self {
            entries,
            policy: QuantityPolicy::default(),
            zero_display: ZeroDisplay::default(),
        }
    }

    pub fn with_policy(mut self, policy: QuantityPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_zero_display(mut self, zero_display: ZeroDisplay) -> Self {
        self.zero_display = zero_display;
        self
    }

    pub fn policy(&self) -> QuantityPolicy {
        self.policy
    }

    pub fn zero_display(&self) -> ZeroDisplay {
        self.zero_display
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn entries(&self) -> &[LedgerEntry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&LedgerEntry> {
        self.entries.get(index)
    }

    pub fn denominations(&self) -> impl Iterator<Item = Denomination> + '_ {
        self.entries.iter().map(|e| e.denomination)
    }

    pub fn quantities(&self) -> impl Iterator<Item = Quantity> + '_ {
        self.entries.iter().map(|e| e.quantity)
    }

    /// Row index of a denomination, if it is part of this ledger.
    pub fn position(&self, denomination: Denomination) -> Option<usize> {
        self.entries
            .iter()
            .position(|e| e.denomination == denomination)
    }

    /// Sanitize `raw` and store the result as the quantity of row `index`.
    pub fn set_quantity(
        &mut self,
        index: usize,
        raw: &str,
    ) -> Result<SanitizedQuantity, LedgerError> {
        let rows = self.entries.len();
        let sanitized = sanitize(raw, self.policy, self.zero_display);
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(LedgerError::RowOutOfRange { index, rows })?;
        entry.quantity = sanitized.quantity;
        Ok(sanitized)
    }

    /// Apply `set_quantity` to rows 0.. in order. Rows past the end of `raws`
    /// keep their current quantity. Nothing changes if `raws` has more values
    /// than the ledger has rows.
    pub fn set_quantities<S: AsRef<str>>(
        &mut self,
        raws: &[S],
    ) -> Result<Vec<SanitizedQuantity>, LedgerError> {
        let rows = self.entries.len();
        if raws.len() > rows {
            return Err(LedgerError::RowOutOfRange { index: rows, rows });
        }
        raws.iter()
            .enumerate()
            .map(|(index, raw)| self.set_quantity(index, raw.as_ref()))
            .collect()
    }

    /// Current quantity of a row rendered as field text.
    pub fn quantity_text(&self, index: usize) -> Option<String> {
        self.entries
            .get(index)
            .map(|e| SanitizedQuantity::new(e.quantity, self.zero_display).text)
    }

    pub fn row_total(&self, index: usize) -> Option<Amount> {
        self.entries.get(index).map(LedgerEntry::total)
    }

    pub fn grand_total(&self) -> Amount {
        self.entries
            .iter()
            .fold(0, |sum: Amount, entry| sum.saturating_add(entry.total()))
    }

    /// Reset every quantity to zero.
    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            entry.quantity = 0;
        }
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new(&Denomination::defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MAX_QUANTITY, OverflowMode};

    fn sample() -> Ledger {
        let mut ledger = Ledger::default();
        ledger.set_quantities(&["1", "2", "", "", "3", "", ""]).unwrap();
        ledger
    }

    #[test]
    fn test_new_ledger_is_zero() {
        let ledger = Ledger::default();
        assert_eq!(ledger.len(), 7);
        assert!(ledger.quantities().all(|q| q == 0));
        assert_eq!(ledger.grand_total(), 0);
    }

    #[test]
    fn test_row_totals() {
        let ledger = sample();
        let totals: Vec<Amount> = (0..ledger.len())
            .map(|i| ledger.row_total(i).unwrap())
            .collect();
        assert_eq!(totals, vec![5000, 4000, 0, 0, 300, 0, 0]);
        assert_eq!(ledger.row_total(7), None);
    }

    #[test]
    fn test_grand_total_is_sum_of_rows() {
        let ledger = sample();
        assert_eq!(ledger.grand_total(), 9300);

        let sum: Amount = (0..ledger.len()).filter_map(|i| ledger.row_total(i)).sum();
        assert_eq!(ledger.grand_total(), sum);
    }

    #[test]
    fn test_all_maximum_quantities() {
        let mut ledger = Ledger::default();
        for i in 0..ledger.len() {
            ledger.set_quantity(i, "99999").unwrap();
        }

        let expected: Amount = ledger
            .denominations()
            .map(|d| Amount::from(d.value()) * Amount::from(MAX_QUANTITY))
            .sum();
        assert_eq!(ledger.grand_total(), expected);
        assert_eq!(ledger.grand_total(), 866_991_330);
    }

    #[test]
    fn test_set_quantity_recomputes_not_accumulates() {
        let mut ledger = Ledger::default();
        ledger.set_quantity(0, "1").unwrap();
        ledger.set_quantity(0, "12").unwrap();
        ledger.set_quantity(0, "1").unwrap();
        assert_eq!(ledger.grand_total(), 5000);
    }

    #[test]
    fn test_set_quantity_sanitizes() {
        let mut ledger = Ledger::default();
        let result = ledger.set_quantity(4, "12a3b").unwrap();
        assert_eq!(result.quantity, 123);
        assert_eq!(result.text, "123");
        assert_eq!(ledger.row_total(4), Some(12300));
    }

    #[test]
    fn test_set_quantity_out_of_range() {
        let mut ledger = Ledger::default();
        let result = ledger.set_quantity(7, "1");
        assert_eq!(result, Err(LedgerError::RowOutOfRange { index: 7, rows: 7 }));
    }

    #[test]
    fn test_set_quantities_too_many_leaves_ledger_unchanged() {
        let mut ledger = sample();
        let result = ledger.set_quantities(&["1"; 8]);

        assert_eq!(result, Err(LedgerError::RowOutOfRange { index: 7, rows: 7 }));
        assert_eq!(ledger.grand_total(), 9300);
        assert_eq!(ledger.quantities().collect::<Vec<_>>(), vec![1, 2, 0, 0, 3, 0, 0]);
    }

    #[test]
    fn test_policy_is_applied() {
        let mut ledger = Ledger::default()
            .with_policy(QuantityPolicy::strict().with_overflow(OverflowMode::Clamp));
        assert_eq!(ledger.set_quantity(0, "123456").unwrap().quantity, 99999);

        let mut loose = Ledger::default().with_policy(QuantityPolicy::Unbounded);
        assert_eq!(loose.set_quantity(0, "123456").unwrap().quantity, 123456);
        assert_eq!(loose.grand_total(), 617_280_000);
    }

    #[test]
    fn test_clear() {
        let mut ledger = sample();
        ledger.clear();
        assert_eq!(ledger.grand_total(), 0);
        assert!((0..ledger.len()).all(|i| ledger.row_total(i) == Some(0)));
        assert_eq!(ledger.quantity_text(0).as_deref(), Some(""));

        let mut zeroed = sample().with_zero_display(ZeroDisplay::Zero);
        zeroed.clear();
        assert_eq!(zeroed.quantity_text(0).as_deref(), Some("0"));
    }

    #[test]
    fn test_position() {
        let ledger = Ledger::default();
        assert_eq!(ledger.position(Denomination::new(500).unwrap()), Some(3));
        assert_eq!(ledger.position(Denomination::new(10).unwrap()), None);
    }

    #[test]
    fn test_grand_total_saturates() {
        let big = Denomination::new(u32::MAX).unwrap();
        let mut ledger = Ledger::new(&[big, big, big, big, big, big, big])
            .with_policy(QuantityPolicy::Unbounded);
        for i in 0..ledger.len() {
            ledger.set_quantity(i, "4294967295").unwrap();
        }
        assert_eq!(ledger.grand_total(), Amount::MAX);
    }
}
