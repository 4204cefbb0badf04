//! File actions module.
//!
//! This module provides the destructive and best-effort side effects of
//! the resolution workflow:
//! - [`delete`]: per-file removal, permanent or to the system trash
//! - [`preview`]: content-type inference and default-viewer launch
//!
//! ```no_run
//! use dupeclean::actions::delete::{delete_file, DeleteMode};
//! use std::path::Path;
//!
//! let result = delete_file(Path::new("/path/to/duplicate.txt"), DeleteMode::Permanent);
//! ```

pub mod delete;
pub mod preview;

// Re-export commonly used types
pub use delete::{delete_file, DeleteError, DeleteMode, DeleteResult};
pub use preview::{content_type_for, open_with_default_app, preview_file, PreviewError};
