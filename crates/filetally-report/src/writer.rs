//! Tab-separated report output.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;
use tracing::debug;

use crate::report::Report;

/// Header of the four-column layout.
pub const HEADER: [&str; 4] = ["Extension", "Size", "Count", "Size In Bytes"];

/// Label in the first column of the totals row.
pub const TOTALS_LABEL: &str = "totals";

/// Errors that can occur while writing a report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// The output file could not be created.
    #[error("Cannot create report file {path}: {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A row could not be written.
    #[error("Failed to write report row: {0}")]
    Write(#[from] csv::Error),

    /// Buffered output could not be flushed.
    #[error("Failed to flush report: {0}")]
    Flush(#[from] std::io::Error),
}

/// Column layout of the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReportLayout {
    /// Header, `extension, size, count, bytes` rows, and a totals row.
    #[default]
    Full,
    /// `extension, size` rows only, no header or totals.
    Legacy,
}

/// Serializes a [`Report`] as tab-separated text.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportWriter {
    layout: ReportLayout,
}

impl ReportWriter {
    /// Create a writer for the given layout.
    pub fn new(layout: ReportLayout) -> Self {
        Self { layout }
    }

    /// Write the whole report to `out` and flush it.
    pub fn write<W: Write>(&self, report: &Report, out: W) -> Result<(), ReportError> {
        let mut tsv = WriterBuilder::new()
            .delimiter(b'\t')
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .has_headers(false)
            .from_writer(out);

        match self.layout {
            ReportLayout::Full => {
                tsv.write_record(HEADER)?;
                for row in &report.rows {
                    let human = row.human_size();
                    let count = row.count.to_string();
                    let bytes = row.size.to_string();
                    tsv.write_record([
                        row.extension.as_str(),
                        human.as_str(),
                        count.as_str(),
                        bytes.as_str(),
                    ])?;
                }
                let human = report.totals.human_size();
                let count = report.totals.count.to_string();
                let bytes = report.totals.size.to_string();
                tsv.write_record([TOTALS_LABEL, human.as_str(), count.as_str(), bytes.as_str()])?;
            }
            ReportLayout::Legacy => {
                for row in &report.rows {
                    let human = row.human_size();
                    tsv.write_record([row.extension.as_str(), human.as_str()])?;
                }
            }
        }

        tsv.flush()?;
        Ok(())
    }

    /// Render the report into a string.
    pub fn render(&self, report: &Report) -> Result<String, ReportError> {
        let mut buf = Vec::new();
        self.write(report, &mut buf)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    /// Create (or truncate) `path` and write the report into it.
    ///
    /// The file is flushed before this returns; any failure is reported.
    pub fn write_to_path(&self, report: &Report, path: &Path) -> Result<(), ReportError> {
        let file = File::create(path).map_err(|source| ReportError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        self.write(report, file)?;
        debug!(path = %path.display(), rows = report.rows.len(), "Report written");
        Ok(())
    }
}
