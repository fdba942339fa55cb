//! Ranking and report output for filetally.
//!
//! Turns a finished [`ExtensionTable`] into a [`Report`] ordered by
//! aggregate size, then writes it as tab-separated text:
//!
//! ```text
//! Extension	Size	Count	Size In Bytes
//! .tif	1.20 GiB	5120	1288490188
//! .pdf	310.00 MiB	842	325058560
//! totals	1.50 GiB	5962	1613548748
//! ```
//!
//! ```rust,no_run
//! use filetally_report::{ExtensionTable, Report, ReportLayout, ReportWriter};
//!
//! let mut table = ExtensionTable::new();
//! table.record("scan_0001.tif", 4096);
//!
//! let report = Report::from_table(&table);
//! ReportWriter::new(ReportLayout::Full)
//!     .write_to_path(&report, "file-report.tsv".as_ref())
//!     .unwrap();
//! ```

mod format;
mod report;
mod writer;

pub use format::format_size;
pub use report::{Report, ReportRow, Totals};
pub use writer::{HEADER, ReportError, ReportLayout, ReportWriter, TOTALS_LABEL};

// Re-export core types
pub use filetally_core::{ExtensionStat, ExtensionTable};
