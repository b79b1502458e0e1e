use thiserror::Error;

use crate::domain::{Denomination, LedgerError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("No denominations configured")]
    EmptyDenominations,

    #[error("Currency prefix must not be empty")]
    EmptyCurrencyPrefix,

    #[error("Denomination listed more than once: {0}")]
    DuplicateDenomination(Denomination),

    #[error("Unknown denomination: {0}")]
    UnknownDenomination(String),

    #[error("Too many quantities: got {given}, but only {rows} denominations are configured")]
    TooManyQuantities { given: usize, rows: usize },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}
