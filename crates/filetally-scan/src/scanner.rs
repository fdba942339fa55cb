//! JWalk-based serial directory scanner.

use std::path::Path;
use std::time::Instant;

use jwalk::{Parallelism, WalkDir};
use tracing::{debug, info, warn};

use filetally_core::{
    ExtensionTable, ScanConfig, ScanError, ScanOutcome, ScanStats, ScanWarning, WarningKind,
};

use crate::progress::ScanProgress;

type ProgressFn = Box<dyn Fn(&ScanProgress)>;

/// Walks a directory tree and tallies file sizes by extension.
///
/// Traversal runs on the calling thread; the table is owned by the scan and
/// handed back in the [`ScanOutcome`].
pub struct ExtensionScanner {
    on_progress: Option<ProgressFn>,
}

impl ExtensionScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self { on_progress: None }
    }

    /// Call `f` with a snapshot every `progress_interval` files.
    pub fn with_progress(mut self, f: impl Fn(&ScanProgress) + 'static) -> Self {
        self.on_progress = Some(Box::new(f));
        self
    }

    /// Scan the tree rooted at `config.root`.
    ///
    /// Errors on individual entries are collected as warnings and the walk
    /// continues. An error is only returned when the root itself cannot be
    /// listed.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanOutcome, ScanError> {
        let start = Instant::now();
        // Resolve a symlinked root so the walk starts at the directory itself.
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        // Structural check: an unreadable root yields no table at all.
        std::fs::read_dir(&root_path).map_err(|e| ScanError::io(&root_path, e))?;

        let mut table = ExtensionTable::new();
        let mut stats = ScanStats::new();
        let mut warnings = Vec::new();

        for entry_result in build_walker(config, &root_path) {
            let entry = match entry_result {
                Ok(e) => e,
                Err(err) => {
                    let warning = walk_warning(&err, &root_path, WarningKind::ReadError);
                    warn!("{}", warning);
                    warnings.push(warning);
                    continue;
                }
            };

            let depth = entry.depth();
            let file_type = entry.file_type();

            if file_type.is_dir() {
                if depth > 0 {
                    stats.record_dir();
                }
                // jwalk keeps listing failures on the directory entry itself.
                if let Some(err) = &entry.read_children_error {
                    let warning = walk_warning(err, &entry.path(), WarningKind::ReadError);
                    warn!("{}", warning);
                    warnings.push(warning);
                }
                continue;
            }

            let path = entry.path();
            let metadata = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    let warning = walk_warning(&err, &path, WarningKind::MetadataError);
                    warn!("{}", warning);
                    warnings.push(warning);
                    continue;
                }
            };

            let size = metadata.len();
            let file_name = entry.file_name().to_string_lossy();
            table.record(&file_name, size);
            stats.record_file(size);

            if !file_type.is_file() {
                debug!(path = %path.display(), "Recorded non-regular file");
            }

            if config.progress_interval > 0 && stats.files % config.progress_interval == 0 {
                if let Some(on_progress) = &self.on_progress {
                    on_progress(&ScanProgress {
                        files_scanned: stats.files,
                        dirs_scanned: stats.dirs,
                        bytes_scanned: stats.bytes,
                        current_path: path,
                        errors_count: warnings.len() as u64,
                        elapsed: start.elapsed(),
                    });
                }
            }
        }

        let scan_duration = start.elapsed();
        info!(
            files = stats.files,
            extensions = table.len(),
            warnings = warnings.len(),
            "Scan finished in {:.2}s",
            scan_duration.as_secs_f64()
        );

        Ok(ScanOutcome::new(
            table,
            root_path,
            stats,
            scan_duration,
            warnings,
        ))
    }
}

impl Default for ExtensionScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// Configure jwalk for a single-threaded, depth-first walk that never
/// follows links.
fn build_walker(config: &ScanConfig, root: &Path) -> WalkDir {
    let filter = config.clone();

    WalkDir::new(root)
        .parallelism(Parallelism::Serial)
        .sort(true)
        .skip_hidden(!config.include_hidden)
        .follow_links(false)
        .min_depth(0)
        .max_depth(config.max_depth.map(|d| d as usize).unwrap_or(usize::MAX))
        .process_read_dir(move |depth, _path, _state, children| {
            // `None` is the synthetic listing that holds the root itself.
            if depth.is_none() || filter.ignore_patterns.is_empty() {
                return;
            }
            // Dropping an entry here also prunes its subtree.
            children.retain(|child| match child {
                Ok(entry) => !filter.should_ignore(&entry.file_name().to_string_lossy()),
                Err(_) => true,
            });
        })
}

/// Turn a jwalk error into a warning, keeping the I/O error kind when there
/// is one.
fn walk_warning(err: &jwalk::Error, fallback: &Path, kind: WarningKind) -> ScanWarning {
    let path = err.path().unwrap_or(fallback);
    match err.io_error() {
        Some(io_err) => ScanWarning::from_io(path, io_err, kind),
        None => ScanWarning::new(path, err.to_string(), kind),
    }
}
