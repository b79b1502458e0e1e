use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Denomination, Ledger, Quantity, format_grouped};

use super::{LedgerConfig, SummaryRows};

const TITLE: &str = "===== CASH COUNTER SUMMARY =====";
const RULE_WIDTH: usize = 45;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub denomination: Denomination,
    pub quantity: Quantity,
    pub total: Amount,
}

/// Snapshot of a counted ledger, ready to print or export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub generated_at: DateTime<Utc>,
    pub currency_prefix: String,
    pub rows: Vec<SummaryRow>,
    pub grand_total: Amount,
}

impl Summary {
    pub fn from_ledger(ledger: &Ledger, config: &LedgerConfig) -> Self {
        let rows = ledger
            .entries()
            .iter()
            .filter(|entry| match config.summary_rows {
                SummaryRows::NonZero => entry.quantity > 0,
                SummaryRows::All => true,
            })
            .map(|entry| SummaryRow {
                denomination: entry.denomination,
                quantity: entry.quantity,
                total: entry.total(),
            })
            .collect();

        Self {
            generated_at: Utc::now(),
            currency_prefix: config.currency_prefix.clone(),
            rows,
            grand_total: ledger.grand_total(),
        }
    }

    /// Fixed-width text report. Columns only line up in a monospaced font.
    pub fn render(&self) -> String {
        let prefix = &self.currency_prefix;
        let rule = "-".repeat(RULE_WIDTH);

        let mut lines = vec![
            TITLE.to_string(),
            String::new(),
            format!("{:<10} {:>5} {:>18}", "NOTE", "QTY", "TOTAL"),
            rule.clone(),
        ];
        lines.extend(self.rows.iter().map(|row| {
            format!(
                "{} {:>10} × {:>5} = {} {:>18}",
                prefix,
                format_grouped(Amount::from(row.denomination.value())),
                row.quantity,
                prefix,
                format_grouped(row.total)
            )
        }));
        lines.push(rule);
        lines.push(format!(
            "{:<18} {} {:>18}",
            "GRAND TOTAL",
            prefix,
            format_grouped(self.grand_total)
        ));
        lines.push("=".repeat(RULE_WIDTH));
        lines.join("\n")
    }
}

/// Render the printable summary of `ledger`.
pub fn render_summary(ledger: &Ledger, config: &LedgerConfig) -> String {
    Summary::from_ledger(ledger, config).render()
}
