//! Directory walker built on walkdir.
//!
//! # Overview
//!
//! Provides the [`Walker`] struct for traversing a directory tree and
//! collecting regular files for duplicate detection. Traversal is
//! single-threaded and depth-first, giving a stable discovery order that
//! determines which member of a duplicate group is listed first.
//!
//! Symbolic links are not followed unless explicitly enabled in
//! [`WalkerConfig`], to avoid traversal cycles and double-counting.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use super::{FileEntry, ScanError, WalkerConfig};

/// Single-threaded recursive file discovery.
#[derive(Debug)]
pub struct Walker {
    /// Root path to walk
    root: PathBuf,
    /// Walker configuration
    config: WalkerConfig,
}

impl Walker {
    /// Create a new walker for the given path.
    #[must_use]
    pub fn new(path: &Path, config: WalkerConfig) -> Self {
        Self {
            root: path.to_path_buf(),
            config,
        }
    }

    /// Walk the directory tree, yielding file entries.
    ///
    /// Returns an iterator over [`FileEntry`] results. Errors for
    /// individual entries are yielded as [`ScanError`] values rather than
    /// stopping iteration; only regular files are yielded (directories and
    /// unfollowed symlinks are skipped silently).
    pub fn walk(&self) -> impl Iterator<Item = Result<FileEntry, ScanError>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(self.config.follow_symlinks)
            .into_iter()
            .filter_map(move |entry| match entry {
                Ok(entry) => {
                    if !entry.file_type().is_file() {
                        return None;
                    }
                    let path = entry.path().to_path_buf();
                    match entry.metadata() {
                        Ok(meta) => Some(Ok(FileEntry::new(path, meta.len()))),
                        Err(e) => Some(Err(walkdir_error_to_scan(&path, e))),
                    }
                }
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    Some(Err(walkdir_error_to_scan(&path, e)))
                }
            })
    }

    /// Collect all regular files under the root.
    ///
    /// Runs the full enumeration pass up front so the caller knows the
    /// total file count before any hashing begins. Per-entry errors are
    /// logged and collected separately; they do not abort the walk.
    #[must_use]
    pub fn collect_files(&self) -> (Vec<FileEntry>, Vec<ScanError>) {
        let mut files = Vec::new();
        let mut errors = Vec::new();

        for entry in self.walk() {
            match entry {
                Ok(file) => files.push(file),
                Err(e) => {
                    log::warn!("Skipping unreadable entry: {}", e);
                    errors.push(e);
                }
            }
        }

        log::debug!(
            "Walk of {} complete: {} files, {} errors",
            self.root.display(),
            files.len(),
            errors.len()
        );

        (files, errors)
    }
}

fn walkdir_error_to_scan(path: &Path, e: walkdir::Error) -> ScanError {
    match e.io_error().map(std::io::Error::kind) {
        Some(std::io::ErrorKind::PermissionDenied) => {
            ScanError::PermissionDenied(path.to_path_buf())
        }
        Some(std::io::ErrorKind::NotFound) => ScanError::NotFound(path.to_path_buf()),
        _ => ScanError::Io {
            path: path.to_path_buf(),
            source: e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walk error")),
        },
    }
}
