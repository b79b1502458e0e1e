use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::debug;

use crate::application::{AppError, CounterSession, LedgerView};

const HELP: &str = "\
Commands:
  <denomination> <quantity>   set the quantity for a note (e.g. \"500 12\")
  <denomination>              empty that note's quantity
  show                        show every row and the grand total
  clear                       reset all quantities
  summary                     print the cash counter summary
  help                        show this help
  quit | exit                 leave";

/// One line typed into an interactive session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Set { denomination: String, raw: String },
    Show,
    Clear,
    Summary,
    Help,
    Quit,
}

impl SessionCommand {
    /// Parse a line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>, AppError> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        let command = match head.to_lowercase().as_str() {
            "" => return Ok(None),
            "show" => SessionCommand::Show,
            "clear" => SessionCommand::Clear,
            "summary" | "print" => SessionCommand::Summary,
            "help" | "?" => SessionCommand::Help,
            "quit" | "exit" | "q" => SessionCommand::Quit,
            "set" => {
                let (denomination, raw) =
                    rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
                if denomination.is_empty() {
                    return Err(AppError::UnknownCommand(line.to_string()));
                }
                SessionCommand::Set {
                    denomination: denomination.to_string(),
                    raw: raw.trim().to_string(),
                }
            }
            _ if head.starts_with(|c: char| c.is_ascii_digit()) => SessionCommand::Set {
                denomination: head.to_string(),
                raw: rest.to_string(),
            },
            _ => return Err(AppError::UnknownCommand(head.to_string())),
        };
        Ok(Some(command))
    }
}

/// Drive `session` from line input until end of input or `quit`.
/// Bad lines are reported and the session carries on; bytes that are not
/// UTF-8 are replaced rather than ending the session.
pub fn run_interactive<R: BufRead, W: Write>(
    session: &mut CounterSession,
    mut input: R,
    out: &mut W,
) -> Result<()> {
    writeln!(out, "Cash Counter. Type \"help\" for commands.")?;
    write_view(out, &session.view())?;

    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let line = String::from_utf8_lossy(&buf);
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "Error: {}", e)?;
                continue;
            }
        };
        debug!(?command, "Session command");

        match command {
            SessionCommand::Set { denomination, raw } => {
                let update = session
                    .row_for_denomination(&denomination)
                    .and_then(|index| session.on_quantity_changed(index, &raw));
                match update {
                    Ok(update) => {
                        let view = session.view();
                        writeln!(
                            out,
                            "{} x {} = {}    GRAND TOTAL: {}",
                            view.rows[update.index].label,
                            display_text(&update.text),
                            update.row_total_display,
                            update.grand_total_display
                        )?;
                    }
                    Err(e) => writeln!(out, "Error: {}", e)?,
                }
            }
            SessionCommand::Show => write_view(out, &session.view())?,
            SessionCommand::Clear => {
                let view = session.on_clear();
                writeln!(out, "Cleared.")?;
                write_view(out, &view)?;
            }
            SessionCommand::Summary => writeln!(out, "{}", session.on_print_summary())?,
            SessionCommand::Help => writeln!(out, "{}", HELP)?,
            SessionCommand::Quit => break,
        }
    }

    out.flush()?;
    Ok(())
}

fn write_view<W: Write>(out: &mut W, view: &LedgerView) -> Result<()> {
    for row in &view.rows {
        writeln!(
            out,
            "  {:<12} {:>6} {:>18}",
            row.label,
            display_text(&row.text),
            row.total_display
        )?;
    }
    writeln!(out, "  {:<12} {:>6} {:>18}", "GRAND TOTAL", "", view.grand_total_display)?;
    Ok(())
}

// A blank field would vanish in a terminal.
fn display_text(text: &str) -> &str {
    if text.is_empty() { "-" } else { text }
}
