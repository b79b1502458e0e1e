use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::domain::{
    Amount, DEFAULT_CURRENCY_PREFIX, Denomination, Ledger, QuantityPolicy, ZeroDisplay,
    format_currency,
};

use super::AppError;

/// Which rows appear in a printed summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryRows {
    /// Only denominations with a quantity above zero.
    #[default]
    NonZero,
    /// Every configured denomination.
    All,
}

/// Everything that differs between counter variants.
///
/// The default is the strict counter: the usual seven notes, `Rs.` prefix,
/// quantities capped at five digits, blank idle fields and zero rows left out
/// of the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    pub denominations: Vec<Denomination>,
    pub currency_prefix: String,
    pub quantity_policy: QuantityPolicy,
    pub zero_display: ZeroDisplay,
    pub summary_rows: SummaryRows,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            denominations: Denomination::defaults(),
            currency_prefix: DEFAULT_CURRENCY_PREFIX.to_string(),
            quantity_policy: QuantityPolicy::default(),
            zero_display: ZeroDisplay::default(),
            summary_rows: SummaryRows::default(),
        }
    }
}

impl LedgerConfig {
    pub fn with_denominations(mut self, denominations: Vec<Denomination>) -> Self {
        self.denominations = denominations;
        self
    }

    pub fn with_currency_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.currency_prefix = prefix.into();
        self
    }

    pub fn with_quantity_policy(mut self, policy: QuantityPolicy) -> Self {
        self.quantity_policy = policy;
        self
    }

    pub fn with_zero_display(mut self, zero_display: ZeroDisplay) -> Self {
        self.zero_display = zero_display;
        self
    }

    pub fn with_summary_rows(mut self, summary_rows: SummaryRows) -> Self {
        self.summary_rows = summary_rows;
        self
    }

    /// Reject settings a ledger cannot be built or displayed from.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.denominations.is_empty() {
            return Err(AppError::EmptyDenominations);
        }
        if self.currency_prefix.trim().is_empty() {
            return Err(AppError::EmptyCurrencyPrefix);
        }

        let mut seen = HashSet::new();
        for &denomination in &self.denominations {
            if !seen.insert(denomination) {
                return Err(AppError::DuplicateDenomination(denomination));
            }
        }
        Ok(())
    }

    /// Build a zeroed ledger for this configuration.
    pub fn build_ledger(&self) -> Result<Ledger, AppError> {
        self.validate()?;
        Ok(Ledger::new(&self.denominations)
            .with_policy(self.quantity_policy)
            .with_zero_display(self.zero_display))
    }

    pub fn format_currency(&self, amount: Amount) -> String {
        format_currency(amount, &self.currency_prefix)
    }
}
