use serde::Serialize;
use tracing::{debug, info};

use crate::domain::{Denomination, Ledger};

use super::{AppError, LedgerConfig, Summary};

/// What a form shows after one quantity field was edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowUpdate {
    pub index: usize,
    /// Sanitized field text; written back to the field once.
    pub text: String,
    pub row_total_display: String,
    pub grand_total_display: String,
}

/// Display state of a single denomination row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowView {
    pub label: String,
    pub text: String,
    pub total_display: String,
}

/// Display state of the whole form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LedgerView {
    pub rows: Vec<RowView>,
    pub grand_total_display: String,
}

/// Owns the ledger for the lifetime of a counting session and answers the
/// events a presentation layer forwards to it. Every handler returns the values
/// to display instead of touching any widget.
pub struct CounterSession {
    config: LedgerConfig,
    ledger: Ledger,
}

impl CounterSession {
    pub fn new(config: LedgerConfig) -> Result<Self, AppError> {
        let ledger = config.build_ledger()?;
        info!(
            denominations = ledger.len(),
            currency = %config.currency_prefix,
            "Counter session started"
        );
        Ok(Self { config, ledger })
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Row index for a denomination typed by the user (e.g. "500").
    pub fn row_for_denomination(&self, input: &str) -> Result<usize, AppError> {
        input
            .parse::<Denomination>()
            .ok()
            .and_then(|d| self.ledger.position(d))
            .ok_or_else(|| AppError::UnknownDenomination(input.trim().to_string()))
    }

    /// A quantity field changed to `raw`.
    pub fn on_quantity_changed(
        &mut self,
        index: usize,
        raw: &str,
    ) -> Result<RowUpdate, AppError> {
        let sanitized = self.ledger.set_quantity(index, raw)?;
        let row_total = self.ledger.row_total(index).unwrap_or_default();
        debug!(row = index, quantity = sanitized.quantity, "Quantity updated");

        Ok(RowUpdate {
            index,
            text: sanitized.text,
            row_total_display: self.config.format_currency(row_total),
            grand_total_display: self.config.format_currency(self.ledger.grand_total()),
        })
    }

    /// Feed quantities for the first rows in order, as if typed one by one.
    pub fn load_quantities<S: AsRef<str>>(&mut self, raws: &[S]) -> Result<(), AppError> {
        if raws.len() > self.ledger.len() {
            return Err(AppError::TooManyQuantities {
                given: raws.len(),
                rows: self.ledger.len(),
            });
        }
        for (index, raw) in raws.iter().enumerate() {
            self.on_quantity_changed(index, raw.as_ref())?;
        }
        Ok(())
    }

    /// "Clear All" was pressed.
    pub fn on_clear(&mut self) -> LedgerView {
        self.ledger.clear();
        info!("Ledger cleared");
        self.view()
    }

    /// "Print Summary" was pressed.
    pub fn on_print_summary(&self) -> String {
        let summary = self.summary();
        info!(
            rows = summary.rows.len(),
            grand_total = summary.grand_total,
            "Summary rendered"
        );
        summary.render()
    }

    pub fn summary(&self) -> Summary {
        Summary::from_ledger(&self.ledger, &self.config)
    }

    /// Full redraw of the form.
    pub fn view(&self) -> LedgerView {
        let rows = self
            .ledger
            .entries()
            .iter()
            .enumerate()
            .map(|(index, entry)| RowView {
                label: format!("{} {}", self.config.currency_prefix, entry.denomination),
                text: self.ledger.quantity_text(index).unwrap_or_default(),
                total_display: self.config.format_currency(entry.total()),
            })
            .collect();

        LedgerView {
            rows,
            grand_total_display: self.config.format_currency(self.ledger.grand_total()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ZeroDisplay;

    fn session() -> CounterSession {
        CounterSession::new(LedgerConfig::default()).unwrap()
    }

    #[test]
    fn test_on_quantity_changed() {
        let mut session = session();
        let update = session.on_quantity_changed(0, "1x2").unwrap();

        assert_eq!(update.index, 0);
        assert_eq!(update.text, "12");
        assert_eq!(update.row_total_display, "Rs. 60,000");
        assert_eq!(update.grand_total_display, "Rs. 60,000");

        let update = session.on_quantity_changed(6, "5").unwrap();
        assert_eq!(update.row_total_display, "Rs. 100");
        assert_eq!(update.grand_total_display, "Rs. 60,100");
    }

    #[test]
    fn test_writing_back_text_is_stable() {
        let mut session = session();
        let first = session.on_quantity_changed(2, "0012345678").unwrap();
        let second = session.on_quantity_changed(2, &first.text).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.text, "123");
    }

    #[test]
    fn test_unknown_row() {
        let mut session = session();
        assert!(matches!(
            session.on_quantity_changed(9, "1"),
            Err(AppError::Ledger(_))
        ));
    }

    #[test]
    fn test_row_for_denomination() {
        let session = session();
        assert_eq!(session.row_for_denomination("5000").unwrap(), 0);
        assert_eq!(session.row_for_denomination(" 20 ").unwrap(), 6);
        assert!(matches!(
            session.row_for_denomination("10"),
            Err(AppError::UnknownDenomination(_))
        ));
        assert!(session.row_for_denomination("fifty").is_err());
    }

    #[test]
    fn test_load_quantities() {
        let mut session = session();
        session.load_quantities(&["1", "2", "", "", "3"]).unwrap();
        assert_eq!(session.ledger().grand_total(), 9300);

        let too_many = vec!["1"; 8];
        assert!(matches!(
            session.load_quantities(too_many.as_slice()),
            Err(AppError::TooManyQuantities { given: 8, rows: 7 })
        ));
    }

    #[test]
    fn test_on_clear_resets_view() {
        let mut session = session();
        session.load_quantities(&["4", "4"]).unwrap();

        let view = session.on_clear();
        assert_eq!(view.grand_total_display, "Rs. 0");
        assert!(view.rows.iter().all(|r| r.text.is_empty()));
        assert!(view.rows.iter().all(|r| r.total_display == "Rs. 0"));
        assert_eq!(view.rows[0].label, "Rs. 5000");
    }

    #[test]
    fn test_zero_display_in_view() {
        let config = LedgerConfig::default().with_zero_display(ZeroDisplay::Zero);
        let mut session = CounterSession::new(config).unwrap();
        let view = session.on_clear();
        assert!(view.rows.iter().all(|r| r.text == "0"));
    }

    #[test]
    fn test_on_print_summary() {
        let mut session = session();
        session.load_quantities(&["1", "2", "0", "0", "3", "0", "0"]).unwrap();

        let text = session.on_print_summary();
        assert!(text.contains("GRAND TOTAL        Rs.              9,300"));
        assert_eq!(text.matches(" × ").count(), 3);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = LedgerConfig::default().with_denominations(vec![]);
        assert!(CounterSession::new(config).is_err());
    }
}
