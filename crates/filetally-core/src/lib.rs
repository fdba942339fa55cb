//! Core types for filetally.
//!
//! This crate provides the data structures shared by the scanner and the
//! reporter: the per-extension aggregate table, extension normalization,
//! scan configuration, scan results, and the error and warning types.

mod config;
mod error;
mod extension;
mod outcome;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use extension::{ExtensionStat, ExtensionTable, extension_of};
pub use outcome::{ScanOutcome, ScanStats};
