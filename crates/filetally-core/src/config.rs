//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for an extension inventory scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root directory to walk.
    pub root: PathBuf,

    /// Maximum depth to traverse (None = unlimited).
    #[builder(default)]
    #[serde(default)]
    pub max_depth: Option<u32>,

    /// Entry names to skip: exact names, `prefix*` or `*suffix`.
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Emit a progress snapshot every this many files (0 = never).
    #[builder(default = "1000")]
    #[serde(default = "default_progress_interval")]
    pub progress_interval: u64,
}

fn default_true() -> bool {
    true
}

fn default_progress_interval() -> u64 {
    1000
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a config that counts every file under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: None,
            ignore_patterns: Vec::new(),
            include_hidden: true,
            progress_interval: default_progress_interval(),
        }
    }

    /// Check if an entry name matches one of the ignore patterns.
    pub fn should_ignore(&self, name: &str) -> bool {
        self.ignore_patterns.iter().any(|pattern| {
            if let Some(prefix) = pattern.strip_suffix('*') {
                name.starts_with(prefix)
            } else if let Some(suffix) = pattern.strip_prefix('*') {
                name.ends_with(suffix)
            } else {
                name == pattern
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/mnt/collections")
            .max_depth(Some(4u32))
            .include_hidden(false)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/mnt/collections"));
        assert_eq!(config.max_depth, Some(4));
        assert!(!config.include_hidden);
        assert_eq!(config.progress_interval, 1000);
    }

    #[test]
    fn test_builder_requires_root() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_config_simple() {
        let config = ScanConfig::new("/mnt/collections");
        assert_eq!(config.root, PathBuf::from("/mnt/collections"));
        assert!(config.include_hidden);
        assert!(config.max_depth.is_none());
        assert!(config.ignore_patterns.is_empty());
    }

    #[test]
    fn test_should_ignore() {
        let config = ScanConfig::builder()
            .root("/test")
            .ignore_patterns(vec![
                "Thumbs.db".to_string(),
                "*.tmp".to_string(),
                "~$*".to_string(),
            ])
            .build()
            .unwrap();

        assert!(config.should_ignore("Thumbs.db"));
        assert!(config.should_ignore("scan.tmp"));
        assert!(config.should_ignore("~$letter.doc"));
        assert!(!config.should_ignore("letter.doc"));
    }
}
