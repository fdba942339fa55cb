//! Directory walker for filetally.
//!
//! This crate walks a directory tree with jwalk and folds every
//! non-directory entry into an [`ExtensionTable`] keyed by lowercase
//! extension.
//!
//! Callers are expected to check the root with [`validate_root`] first; the
//! scanner itself only fails when the root cannot be listed.
//!
//! # Example
//!
//! ```rust,no_run
//! use filetally_scan::{ExtensionScanner, ScanConfig, validate_root};
//!
//! let config = ScanConfig::new("/mnt/collections/mss-610");
//! validate_root(&config.root).unwrap();
//! let outcome = ExtensionScanner::new().scan(&config).unwrap();
//!
//! for stat in outcome.table.ranked() {
//!     println!("{}: {} files, {} bytes", stat.name, stat.count, stat.size);
//! }
//! ```
//!
//! # Progress Monitoring
//!
//! ```rust,no_run
//! use filetally_scan::{ExtensionScanner, ScanConfig};
//!
//! let scanner = ExtensionScanner::new().with_progress(|progress| {
//!     eprintln!("Scanned {} files", progress.files_scanned);
//! });
//! let outcome = scanner.scan(&ScanConfig::new(".")).unwrap();
//! ```

mod progress;
mod scanner;
mod validate;

pub use progress::ScanProgress;
pub use scanner::ExtensionScanner;
pub use validate::validate_root;

// Re-export core types for convenience
pub use filetally_core::{
    ExtensionStat, ExtensionTable, ScanConfig, ScanError, ScanOutcome, ScanStats, ScanWarning,
    WarningKind,
};
