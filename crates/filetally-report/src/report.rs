//! Ranked extension report.

use compact_str::CompactString;

use filetally_core::{ExtensionStat, ExtensionTable};

use crate::format::format_size;

/// One detail line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Extension, or empty for files without one.
    pub extension: CompactString,
    /// Number of files.
    pub count: u64,
    /// Aggregate size in bytes.
    pub size: u64,
}

impl ReportRow {
    /// Human-readable aggregate size.
    pub fn human_size(&self) -> String {
        format_size(self.size)
    }
}

impl From<&ExtensionStat> for ReportRow {
    fn from(stat: &ExtensionStat) -> Self {
        Self {
            extension: stat.name.clone(),
            count: stat.count,
            size: stat.size,
        }
    }
}

/// Sums over the rows that made it into the report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    /// Total number of files.
    pub count: u64,
    /// Total size in bytes.
    pub size: u64,
}

impl Totals {
    /// Human-readable total size.
    pub fn human_size(&self) -> String {
        format_size(self.size)
    }
}

/// A finished table, ranked and filtered for output.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Rows ordered by size descending, then extension ascending.
    pub rows: Vec<ReportRow>,
    /// Totals over `rows` only.
    pub totals: Totals,
    /// Extensions left out because their aggregate size is zero.
    pub omitted: usize,
}

impl Report {
    /// Rank a finished table.
    ///
    /// Extensions whose aggregate size is zero are dropped, even if files
    /// were seen, and do not contribute to the totals.
    pub fn from_table(table: &ExtensionTable) -> Self {
        let mut report = Self::default();

        for stat in table.ranked() {
            if stat.size == 0 {
                report.omitted += 1;
                continue;
            }
            report.totals.count += stat.count;
            report.totals.size = report.totals.size.saturating_add(stat.size);
            report.rows.push(ReportRow::from(stat));
        }

        report
    }

    /// Check if there is nothing to report.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
