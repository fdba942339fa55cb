//! Scan result container and statistics.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;
use crate::extension::ExtensionTable;

/// Counters gathered while walking.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    /// Non-directory entries recorded.
    pub files: u64,
    /// Directories descended into (root excluded).
    pub dirs: u64,
    /// Bytes recorded.
    pub bytes: u64,
}

impl ScanStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Update stats with a file entry.
    pub fn record_file(&mut self, size: u64) {
        self.files += 1;
        self.bytes = self.bytes.saturating_add(size);
    }

    /// Record a directory.
    pub fn record_dir(&mut self) {
        self.dirs += 1;
    }
}

/// Finished extension inventory of one directory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanOutcome {
    /// Aggregates by extension. Not mutated after the walk.
    pub table: ExtensionTable,

    /// Root path that was scanned, with links resolved.
    pub root_path: PathBuf,

    /// Duration of the scan.
    pub scan_duration: Duration,

    /// Summary statistics.
    pub stats: ScanStats,

    /// Per-entry errors, in the order they were encountered.
    pub warnings: Vec<ScanWarning>,
}

impl ScanOutcome {
    /// Create a new scan outcome.
    pub fn new(
        table: ExtensionTable,
        root_path: PathBuf,
        stats: ScanStats,
        scan_duration: Duration,
        warnings: Vec<ScanWarning>,
    ) -> Self {
        Self {
            table,
            root_path,
            scan_duration,
            stats,
            warnings,
        }
    }

    /// First per-entry error encountered, if any.
    pub fn first_error(&self) -> Option<&ScanWarning> {
        self.warnings.first()
    }

    /// Check if there were any warnings during scanning.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Take the table, dropping the rest of the outcome.
    pub fn into_table(self) -> ExtensionTable {
        self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WarningKind;

    #[test]
    fn test_stats_record() {
        let mut stats = ScanStats::new();
        stats.record_dir();
        stats.record_file(1024);
        stats.record_file(10);

        assert_eq!(stats.files, 2);
        assert_eq!(stats.dirs, 1);
        assert_eq!(stats.bytes, 1034);
    }

    #[test]
    fn test_first_error_keeps_order() {
        let warnings = vec![
            ScanWarning::new("/a", "first", WarningKind::ReadError),
            ScanWarning::new("/b", "second", WarningKind::MetadataError),
        ];
        let outcome = ScanOutcome::new(
            ExtensionTable::new(),
            PathBuf::from("/"),
            ScanStats::new(),
            Duration::ZERO,
            warnings,
        );

        assert!(outcome.has_warnings());
        assert_eq!(outcome.first_error().unwrap().message, "first");
    }
}
