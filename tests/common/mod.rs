// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use cash_counter::application::{CounterSession, LedgerConfig};
use cash_counter::cli::Cli;
use clap::Parser;

/// Quantities for the standard note set: 1 x 5000, 2 x 2000, 3 x 100.
pub const SAMPLE_QUANTITIES: [&str; 7] = ["1", "2", "0", "0", "3", "0", "0"];

/// Helper to create a session with the default configuration
pub fn test_session() -> CounterSession {
    CounterSession::new(LedgerConfig::default()).expect("default config is valid")
}

/// Helper to create a session already holding `SAMPLE_QUANTITIES`
pub fn sample_session() -> CounterSession {
    let mut session = test_session();
    session
        .load_quantities(&SAMPLE_QUANTITIES)
        .expect("sample quantities fit the default ledger");
    session
}

/// Run the command line with `args` and scripted stdin, returning stdout
pub fn run_cli(args: &[&str], stdin: &str) -> Result<String> {
    let cli = Cli::try_parse_from(std::iter::once("cash-counter").chain(args.iter().copied()))?;
    let mut out = Vec::new();
    cli.execute(stdin.as_bytes(), &mut out)?;
    Ok(String::from_utf8(out)?)
}
