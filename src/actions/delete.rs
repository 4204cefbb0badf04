//! File deletion for the resolution workflow.
//!
//! # Overview
//!
//! Each deletion is attempted independently: a failure for one member of a
//! duplicate group is reported and does not stop deletion of the remaining
//! members, and nothing already deleted is rolled back. Cleanup of a group
//! is therefore not transactional.
//!
//! Two modes are supported:
//! - [`DeleteMode::Permanent`]: `fs::remove_file`, unrecoverable (default)
//! - [`DeleteMode::Trash`]: move to the system recycle bin via the `trash`
//!   crate, recoverable
//!
//! # Example
//!
//! ```no_run
//! use dupeclean::actions::delete::{delete_file, DeleteMode};
//! use std::path::Path;
//!
//! match delete_file(Path::new("/path/to/duplicate.txt"), DeleteMode::Trash) {
//!     Ok(result) => println!("Removed: {}", result.path.display()),
//!     Err(e) => eprintln!("Failed: {}", e),
//! }
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error type for deletion operations.
#[derive(Debug, Error)]
pub enum DeleteError {
    /// File was not found (it may already be gone).
    #[error("file not found: {0}")]
    NotFound(PathBuf),

    /// Permission denied when attempting to delete.
    #[error("permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Trash operation failed.
    #[error("trash operation failed for {path}: {message}")]
    TrashFailed { path: PathBuf, message: String },

    /// General I/O error.
    #[error("I/O error for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl DeleteError {
    /// Get the path associated with this error.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(p)
            | Self::PermissionDenied(p)
            | Self::TrashFailed { path: p, .. }
            | Self::Io { path: p, .. } => p,
        }
    }
}

/// How a redundant copy is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Remove the file permanently. Cannot be undone.
    #[default]
    Permanent,
    /// Move the file to the system trash, where it can be recovered.
    Trash,
}

/// Result of a successful deletion.
#[derive(Debug, Clone)]
pub struct DeleteResult {
    /// Path that was deleted.
    pub path: PathBuf,
    /// Size of the deleted file in bytes.
    pub size: u64,
    /// Mode used for the deletion.
    pub mode: DeleteMode,
}

fn io_to_delete(path: &Path, e: io::Error) -> DeleteError {
    match e.kind() {
        io::ErrorKind::NotFound => DeleteError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => DeleteError::PermissionDenied(path.to_path_buf()),
        _ => DeleteError::Io {
            path: path.to_path_buf(),
            source: e,
        },
    }
}

/// Delete a single file.
///
/// # Errors
///
/// - `NotFound` if the file doesn't exist
/// - `PermissionDenied` if deletion is not allowed
/// - `TrashFailed` if the trash operation fails in [`DeleteMode::Trash`]
pub fn delete_file(path: &Path, mode: DeleteMode) -> Result<DeleteResult, DeleteError> {
    // Size is captured before the file disappears
    let metadata = fs::metadata(path).map_err(|e| io_to_delete(path, e))?;
    let size = metadata.len();

    match mode {
        DeleteMode::Permanent => {
            fs::remove_file(path).map_err(|e| io_to_delete(path, e))?;
            log::info!("Permanently deleted: {} ({} bytes)", path.display(), size);
        }
        DeleteMode::Trash => {
            trash::delete(path).map_err(|e| DeleteError::TrashFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
            log::info!("Moved to trash: {} ({} bytes)", path.display(), size);
        }
    }

    Ok(DeleteResult {
        path: path.to_path_buf(),
        size,
        mode,
    })
}
