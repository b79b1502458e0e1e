use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use tracing::debug;

use crate::application::Summary;

/// Output formats for a summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Table,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Table => "table",
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" | "text" => Some(ExportFormat::Table),
            "csv" => Some(ExportFormat::Csv),
            "json" => Some(ExportFormat::Json),
            _ => None,
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// JSON document written by a full export
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarySnapshot {
    pub version: String,
    #[serde(flatten)]
    pub summary: Summary,
}

/// Writes a summary in one of the supported formats
pub struct SummaryExporter<'a> {
    summary: &'a Summary,
}

impl<'a> SummaryExporter<'a> {
    pub fn new(summary: &'a Summary) -> Self {
        Self { summary }
    }

    /// Export in `format`. Returns the number of denomination rows written.
    pub fn export<W: Write>(&self, format: ExportFormat, writer: W) -> Result<usize> {
        let count = match format {
            ExportFormat::Table => self.export_table(writer)?,
            ExportFormat::Csv => self.export_csv(writer)?,
            ExportFormat::Json => self.export_json(writer)?,
        };
        debug!(format = %format, rows = count, "Summary exported");
        Ok(count)
    }

    /// Export the printable text report
    pub fn export_table<W: Write>(&self, mut writer: W) -> Result<usize> {
        writeln!(writer, "{}", self.summary.render())?;
        writer.flush()?;
        Ok(self.summary.rows.len())
    }

    /// Export rows to CSV format, followed by a grand total record
    pub fn export_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        // Write header
        csv_writer.write_record(["denomination", "quantity", "total"])?;

        let mut count = 0;
        for row in &self.summary.rows {
            csv_writer.write_record([
                row.denomination.to_string(),
                row.quantity.to_string(),
                row.total.to_string(),
            ])?;
            count += 1;
        }
        csv_writer.write_record([
            "grand_total".to_string(),
            String::new(),
            self.summary.grand_total.to_string(),
        ])?;

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the summary as a JSON snapshot
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let snapshot = SummarySnapshot {
            version: env!("CARGO_PKG_VERSION").to_string(),
            summary: self.summary.clone(),
        };

        let json = serde_json::to_string_pretty(&snapshot)?;
        writer.write_all(json.as_bytes())?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(self.summary.rows.len())
    }
}
