//! Scanner module for directory traversal and file hashing.
//!
//! This module provides the two leaf components of the detection pipeline:
//! - [`walker`]: recursive file discovery under a root directory
//! - [`hasher`]: streaming BLAKE3 content fingerprinting
//!
//! Both run single-threaded; at most one file handle is open at a time
//! during hashing.
//!
//! # Example
//!
//! ```no_run
//! use dupeclean::scanner::{Walker, WalkerConfig};
//! use std::path::Path;
//!
//! let walker = Walker::new(Path::new("."), WalkerConfig::default());
//! for entry in walker.walk() {
//!     match entry {
//!         Ok(file) => println!("{}: {} bytes", file.path.display(), file.size),
//!         Err(e) => eprintln!("Warning: {}", e),
//!     }
//! }
//! ```

pub mod hasher;
pub mod walker;

use std::path::PathBuf;

// Re-export main types
pub use hasher::{hash_file, hash_to_hex, Digest, DIGEST_LEN};
pub use walker::Walker;

/// Metadata for a discovered regular file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Absolute path to the file
    pub path: PathBuf,
    /// File size in bytes
    pub size: u64,
}

impl FileEntry {
    /// Create a new FileEntry.
    #[must_use]
    pub fn new(path: PathBuf, size: u64) -> Self {
        Self { path, size }
    }
}

/// Configuration for directory walking.
#[derive(Debug, Clone, Default)]
pub struct WalkerConfig {
    /// Follow symbolic links during traversal.
    ///
    /// Off by default: following links risks traversal cycles and
    /// double-counting the same content under two paths.
    pub follow_symlinks: bool,
}

impl WalkerConfig {
    /// Create a new configuration from CLI arguments.
    #[must_use]
    pub fn new(follow_symlinks: bool) -> Self {
        Self { follow_symlinks }
    }
}

/// Errors that can occur during directory scanning.
#[derive(thiserror::Error, Debug)]
pub enum ScanError {
    /// Permission was denied when accessing a file or directory.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// The specified path was not found.
    #[error("Path not found: {0}")]
    NotFound(PathBuf),

    /// An I/O error occurred while accessing a file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur during file hashing.
///
/// These are per-file failures; the grouping engine recovers from them by
/// skipping the file and continuing the scan.
#[derive(thiserror::Error, Debug)]
pub enum HashError {
    /// The specified file was not found (it may have vanished mid-scan).
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// Permission was denied when reading the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// An I/O error occurred while reading the file.
    #[error("I/O error for {path}: {source}")]
    Io {
        /// Path where the error occurred
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl HashError {
    pub(crate) fn from_io(path: &std::path::Path, source: std::io::Error) -> Self {
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => Self::PermissionDenied(path.to_path_buf()),
            _ => Self::Io {
                path: path.to_path_buf(),
                source,
            },
        }
    }
}
