//! Per-extension aggregates.

use std::collections::HashMap;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// Compute the normalized extension of a file name.
///
/// The extension is the lowercase substring starting at the last `.` of the
/// base name, so `.gitignore` is its own extension and `README` has none
/// (empty string).
pub fn extension_of(file_name: &str) -> CompactString {
    match file_name.rfind('.') {
        Some(idx) => CompactString::from(file_name[idx..].to_lowercase()),
        None => CompactString::default(),
    }
}

/// Aggregate size and file count for one extension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionStat {
    /// Lowercase extension including the leading dot; empty for files
    /// without one.
    pub name: CompactString,
    /// Number of files observed with this extension.
    pub count: u64,
    /// Cumulative size in bytes.
    pub size: u64,
}

impl ExtensionStat {
    /// Create a stat for the first file seen with this extension.
    pub fn new(name: impl Into<CompactString>, size: u64) -> Self {
        Self {
            name: name.into(),
            count: 1,
            size,
        }
    }

    /// Fold one more file into this aggregate.
    pub fn add(&mut self, size: u64) {
        self.count += 1;
        self.size = self.size.saturating_add(size);
    }
}

/// Mapping from normalized extension to its aggregate.
///
/// Entries are only ever created or grown; nothing is removed or decremented.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionTable {
    entries: HashMap<CompactString, ExtensionStat>,
}

impl ExtensionTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file by name, normalizing its extension.
    pub fn record(&mut self, file_name: &str, size: u64) {
        self.record_extension(extension_of(file_name), size);
    }

    /// Record one file under an already-normalized extension.
    pub fn record_extension(&mut self, ext: impl Into<CompactString>, size: u64) {
        let ext = ext.into();
        match self.entries.get_mut(&ext) {
            Some(stat) => stat.add(size),
            None => {
                self.entries
                    .insert(ext.clone(), ExtensionStat::new(ext, size));
            }
        }
    }

    /// Look up the aggregate for an extension.
    pub fn get(&self, ext: &str) -> Option<&ExtensionStat> {
        self.entries.get(ext)
    }

    /// Number of distinct extensions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no files have been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &ExtensionStat> {
        self.entries.values()
    }

    /// Sum of sizes over all entries.
    pub fn total_size(&self) -> u64 {
        self.entries.values().map(|s| s.size).sum()
    }

    /// Sum of file counts over all entries.
    pub fn total_count(&self) -> u64 {
        self.entries.values().map(|s| s.count).sum()
    }

    /// Entries ordered by size descending, ties by name ascending.
    pub fn ranked(&self) -> Vec<&ExtensionStat> {
        let mut ranked: Vec<&ExtensionStat> = self.entries.values().collect();
        ranked.sort_by(|a, b| b.size.cmp(&a.size).then_with(|| a.name.cmp(&b.name)));
        ranked
    }
}
