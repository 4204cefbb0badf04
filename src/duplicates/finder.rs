//! Grouping engine: drives the hasher over every discovered file.
//!
//! # Overview
//!
//! [`DuplicateFinder`] runs the scan pipeline:
//! 1. **Walk** - enumerate every regular file under the root (full pass,
//!    so the total count is known before hashing starts)
//! 2. **Fingerprint** - stream each file through BLAKE3, reporting
//!    `(processed, total)` progress per file
//! 3. **Group** - accumulate into the [`DigestIndex`](crate::duplicates::DigestIndex)
//!    and emit groups with 2+ members
//!
//! Per-file hash failures are recorded in the [`ScanSummary`] and excluded
//! from the index; they never abort the scan. Only a missing root, a
//! non-directory root, or an operator interrupt is fatal.
//!
//! # Example
//!
//! ```no_run
//! use dupeclean::duplicates::{DuplicateFinder, FinderConfig};
//! use std::path::Path;
//!
//! let finder = DuplicateFinder::new(FinderConfig::default());
//! let (groups, summary) = finder.find_duplicates(Path::new(".")).unwrap();
//! println!(
//!     "Found {} duplicate groups, {} reclaimable",
//!     groups.len(),
//!     summary.reclaimable_display()
//! );
//! ```

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::progress::ProgressCallback;
use crate::scanner::{hash_file, FileEntry, Walker, WalkerConfig};

use super::groups::{DigestIndex, DuplicateGroup};

/// Configuration for a duplicate scan.
#[derive(Clone, Default)]
pub struct FinderConfig {
    /// Walker configuration (symlink policy).
    pub walker: WalkerConfig,
    /// Optional shutdown flag for graceful termination.
    pub shutdown_flag: Option<Arc<AtomicBool>>,
}

impl std::fmt::Debug for FinderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FinderConfig")
            .field("walker", &self.walker)
            .field("shutdown_flag", &self.shutdown_flag.as_ref().map(|_| "<flag>"))
            .finish()
    }
}

impl FinderConfig {
    /// Set the walker configuration.
    #[must_use]
    pub fn with_walker_config(mut self, walker: WalkerConfig) -> Self {
        self.walker = walker;
        self
    }

    /// Set the shutdown flag for graceful termination.
    #[must_use]
    pub fn with_shutdown_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.shutdown_flag = Some(flag);
        self
    }

    fn is_shutdown_requested(&self) -> bool {
        self.shutdown_flag
            .as_ref()
            .is_some_and(|f| f.load(Ordering::SeqCst))
    }
}

/// Statistics from one scan invocation.
#[derive(Debug, Clone, Default)]
pub struct ScanSummary {
    /// Regular files discovered under the root.
    pub total_files: usize,
    /// Files successfully fingerprinted.
    pub hashed_files: usize,
    /// Files skipped because fingerprinting or enumeration failed.
    pub failed_files: usize,
    /// Number of duplicate groups found.
    pub duplicate_groups: usize,
    /// Total redundant copies across all groups.
    pub duplicate_files: usize,
    /// Bytes reclaimable by keeping one copy per group.
    pub reclaimable_bytes: u64,
}

impl ScanSummary {
    /// Reclaimable space as a human-readable string.
    #[must_use]
    pub fn reclaimable_display(&self) -> String {
        bytesize::ByteSize(self.reclaimable_bytes).to_string()
    }

    /// Whether any per-file errors were recovered during the scan.
    #[must_use]
    pub fn had_errors(&self) -> bool {
        self.failed_files > 0
    }
}

/// Errors that can occur during duplicate finding.
#[derive(thiserror::Error, Debug)]
pub enum FinderError {
    /// The scan was interrupted by the operator (Ctrl+C).
    #[error("Scan interrupted by user")]
    Interrupted,

    /// The provided root path does not exist.
    #[error("Path not found: {0}")]
    PathNotFound(PathBuf),

    /// The provided root path is not a directory.
    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// Duplicate finder that orchestrates the scan pipeline.
pub struct DuplicateFinder {
    config: FinderConfig,
}

impl DuplicateFinder {
    /// Create a new duplicate finder with the given configuration.
    #[must_use]
    pub fn new(config: FinderConfig) -> Self {
        Self { config }
    }

    /// Create a new duplicate finder with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(FinderConfig::default())
    }

    /// Find all duplicate files under the given root.
    ///
    /// # Errors
    ///
    /// Returns [`FinderError`] if the root does not exist, is not a
    /// directory, or the scan is interrupted. Per-file read failures are
    /// not errors at this level; they are counted in the summary.
    pub fn find_duplicates(
        &self,
        root: &Path,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        self.find_duplicates_with_progress(root, None)
    }

    /// Find duplicates, reporting `(processed, total)` after each file.
    ///
    /// The progress sequence is monotonically non-decreasing in
    /// `processed`, `total` is constant for the whole scan, and the final
    /// pair satisfies `processed == total`.
    ///
    /// # Errors
    ///
    /// Same as [`find_duplicates`](Self::find_duplicates).
    pub fn find_duplicates_with_progress(
        &self,
        root: &Path,
        progress: Option<&dyn ProgressCallback>,
    ) -> Result<(Vec<DuplicateGroup>, ScanSummary), FinderError> {
        let meta = std::fs::metadata(root)
            .map_err(|_| FinderError::PathNotFound(root.to_path_buf()))?;
        if !meta.is_dir() {
            return Err(FinderError::NotADirectory(root.to_path_buf()));
        }

        let mut summary = ScanSummary::default();

        // Full enumeration pass first, so percentage-complete can be
        // computed during hashing.
        let walker = Walker::new(root, self.config.walker.clone());
        let (files, walk_errors) = walker.collect_files();
        summary.total_files = files.len();
        summary.failed_files += walk_errors.len();

        if self.config.is_shutdown_requested() {
            return Err(FinderError::Interrupted);
        }

        let total = files.len();
        if let Some(cb) = progress {
            cb.on_scan_start(total);
        }

        let mut index = DigestIndex::new();
        let mut processed = 0usize;

        for file in files {
            if self.config.is_shutdown_requested() {
                log::info!("Shutdown requested, aborting scan before completion");
                return Err(FinderError::Interrupted);
            }

            match hash_file(&file.path) {
                Ok(digest) => {
                    summary.hashed_files += 1;
                    index.insert(digest, file);
                }
                Err(e) => {
                    // Skipped, not fatal: the file joins no group.
                    log::warn!("Skipping file: {}", e);
                    summary.failed_files += 1;
                    if let Some(cb) = progress {
                        cb.on_file_error(&e.to_string());
                    }
                }
            }

            processed += 1;
            if let Some(cb) = progress {
                cb.on_progress(processed, total);
            }
        }

        if let Some(cb) = progress {
            cb.on_scan_end();
        }

        let groups = index.into_groups();
        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.reclaimable_bytes = groups.iter().map(DuplicateGroup::wasted_space).sum();

        log::info!(
            "Scan complete: {} files, {} groups, {} reclaimable",
            summary.total_files,
            summary.duplicate_groups,
            summary.reclaimable_display()
        );

        Ok((groups, summary))
    }

    /// Group an already-collected file list.
    ///
    /// Used by tests and callers that enumerate files themselves.
    #[must_use]
    pub fn group_files(&self, files: Vec<FileEntry>) -> (Vec<DuplicateGroup>, ScanSummary) {
        let mut summary = ScanSummary {
            total_files: files.len(),
            ..Default::default()
        };

        let mut index = DigestIndex::new();
        for file in files {
            match hash_file(&file.path) {
                Ok(digest) => {
                    summary.hashed_files += 1;
                    index.insert(digest, file);
                }
                Err(e) => {
                    log::warn!("Skipping file: {}", e);
                    summary.failed_files += 1;
                }
            }
        }

        let groups = index.into_groups();
        summary.duplicate_groups = groups.len();
        summary.duplicate_files = groups.iter().map(DuplicateGroup::duplicate_count).sum();
        summary.reclaimable_bytes = groups.iter().map(DuplicateGroup::wasted_space).sum();
        (groups, summary)
    }
}
