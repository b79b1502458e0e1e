use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufRead, Write};
use tracing::info;

use crate::application::{CounterSession, LedgerConfig, SummaryRows};
use crate::domain::{
    DEFAULT_CURRENCY_PREFIX, OverflowMode, QuantityPolicy, ZeroDisplay, parse_denominations,
};
use crate::io::{ExportFormat, SummaryExporter};

mod interactive;

pub use interactive::{SessionCommand, run_interactive};

/// Cash Counter - total cash by denomination
#[derive(Parser, Debug)]
#[command(name = "cash-counter")]
#[command(about = "Count notes per denomination, keep a running total and print a summary")]
#[command(version)]
pub struct Cli {
    /// Denominations to count, largest first (e.g. "5000,2000,1000")
    #[arg(long, global = true, value_name = "LIST")]
    pub denominations: Option<String>,

    /// Currency prefix shown before amounts
    #[arg(long, global = true, default_value = DEFAULT_CURRENCY_PREFIX)]
    pub currency: String,

    /// Accept quantities of any size instead of capping them at 5 digits
    #[arg(long, global = true)]
    pub no_limit: bool,

    /// Cap oversized quantities at 99999 instead of dropping the extra digits
    #[arg(long, global = true, conflicts_with = "no_limit")]
    pub clamp: bool,

    /// How an empty quantity is shown: blank, zero
    #[arg(long, global = true, default_value = "blank")]
    pub zero_display: String,

    /// List denominations with zero quantity in the summary
    #[arg(long, global = true)]
    pub show_zero_rows: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show per-denomination totals and the grand total
    Count {
        /// Quantities in denomination order; non-digits are ignored
        quantities: Vec<String>,
    },

    /// Print the cash counter summary
    Summary {
        /// Quantities in denomination order; non-digits are ignored
        quantities: Vec<String>,

        /// Output format: table, csv, json
        #[arg(short, long, default_value = "table")]
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// List the configured denominations
    Denominations,

    /// Count interactively, one "<denomination> <quantity>" per line
    Interactive,
}

impl Cli {
    /// Build the ledger configuration from the global flags.
    pub fn config(&self) -> Result<LedgerConfig> {
        let mut config = LedgerConfig::default().with_currency_prefix(self.currency.trim());

        if let Some(list) = &self.denominations {
            let denominations = parse_denominations(list)
                .with_context(|| format!("Invalid denomination list '{}'", list))?;
            config = config.with_denominations(denominations);
        }

        let policy = if self.no_limit {
            QuantityPolicy::Unbounded
        } else if self.clamp {
            QuantityPolicy::strict().with_overflow(OverflowMode::Clamp)
        } else {
            QuantityPolicy::strict()
        };

        let zero_display = ZeroDisplay::from_str(&self.zero_display).ok_or_else(|| {
            anyhow::anyhow!(
                "Invalid zero display '{}'. Valid values: blank, zero",
                self.zero_display
            )
        })?;

        let summary_rows = if self.show_zero_rows {
            SummaryRows::All
        } else {
            SummaryRows::NonZero
        };

        config = config
            .with_quantity_policy(policy)
            .with_zero_display(zero_display)
            .with_summary_rows(summary_rows);
        config.validate()?;
        Ok(config)
    }

    pub fn run(self) -> Result<()> {
        let stdin = io::stdin();
        let stdout = io::stdout();
        self.execute(stdin.lock(), &mut stdout.lock())
    }

    /// Run the parsed command against the given input and output streams.
    pub fn execute<R: BufRead, W: Write>(self, input: R, out: &mut W) -> Result<()> {
        let config = self.config()?;
        let mut session = CounterSession::new(config)?;

        match self.command {
            Commands::Count { quantities } => {
                session.load_quantities(&quantities)?;
                run_count_command(&session, out)?;
            }

            Commands::Summary {
                quantities,
                format,
                output,
            } => {
                session.load_quantities(&quantities)?;
                let format = ExportFormat::from_str(&format).ok_or_else(|| {
                    anyhow::anyhow!("Invalid format '{}'. Valid formats: table, csv, json", format)
                })?;
                run_summary_command(&session, format, output.as_deref(), out)?;
            }

            Commands::Denominations => {
                for denomination in session.ledger().denominations() {
                    writeln!(
                        out,
                        "{} {}",
                        session.config().currency_prefix,
                        denomination
                    )?;
                }
            }

            Commands::Interactive => {
                run_interactive(&mut session, input, out)?;
            }
        }

        Ok(())
    }
}

fn run_count_command<W: Write>(session: &CounterSession, out: &mut W) -> Result<()> {
    let view = session.view();

    writeln!(out, "{:<12} {:>8} {:>18}", "NOTE", "QTY", "TOTAL")?;
    writeln!(out, "{}", "-".repeat(40))?;
    for row in &view.rows {
        writeln!(
            out,
            "{:<12} {:>8} {:>18}",
            row.label, row.text, row.total_display
        )?;
    }
    writeln!(out, "{}", "-".repeat(40))?;
    writeln!(
        out,
        "{:<12} {:>8} {:>18}",
        "GRAND TOTAL", "", view.grand_total_display
    )?;
    Ok(())
}

fn run_summary_command<W: Write>(
    session: &CounterSession,
    format: ExportFormat,
    output: Option<&str>,
    out: &mut W,
) -> Result<()> {
    let summary = session.summary();
    let exporter = SummaryExporter::new(&summary);

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path))?;
            let count = exporter.export(format, file)?;
            info!(path = %path, "Summary written");
            writeln!(out, "Exported summary with {} rows to {}", count, path)?;
        }
        None => {
            exporter.export(format, &mut *out)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("cash-counter").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = parse(&["denominations"]).config().unwrap();
        assert_eq!(config, LedgerConfig::default());
    }

    #[test]
    fn test_config_flags() {
        let cli = parse(&[
            "count",
            "--denominations",
            "100,50",
            "--currency",
            "EUR",
            "--no-limit",
            "--zero-display",
            "zero",
            "--show-zero-rows",
        ]);
        let config = cli.config().unwrap();

        assert_eq!(config.denominations.len(), 2);
        assert_eq!(config.currency_prefix, "EUR");
        assert_eq!(config.quantity_policy, QuantityPolicy::Unbounded);
        assert_eq!(config.zero_display, ZeroDisplay::Zero);
        assert_eq!(config.summary_rows, SummaryRows::All);
    }

    #[test]
    fn test_clamp_conflicts_with_no_limit() {
        let result = Cli::try_parse_from(["cash-counter", "count", "--clamp", "--no-limit"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_zero_display() {
        let cli = parse(&["count", "--zero-display", "dash"]);
        assert!(cli.config().is_err());
    }
}
