//! File preview via the host default application.
//!
//! # Overview
//!
//! Before a duplicate group is listed, the operator may ask to see the
//! content. The content type is inferred from the path's extension and
//! mapped to a MIME-like string; unknown extensions fall back to
//! `application/octet-stream`. Anything in the `application/*` family is
//! refused (there is no meaningful way to render a binary with a viewer),
//! everything else is handed to the platform's default-application
//! launcher.
//!
//! Every failure here is best-effort: it is reported to the operator and
//! never blocks the selection step.

use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// MIME type used when the extension is unknown.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// Extension to MIME type table for common file types.
const MIME_TYPES: &[(&str, &str)] = &[
    ("txt", "text/plain"),
    ("md", "text/markdown"),
    ("csv", "text/csv"),
    ("log", "text/plain"),
    ("html", "text/html"),
    ("htm", "text/html"),
    ("css", "text/css"),
    ("xml", "text/xml"),
    ("json", "application/json"),
    ("js", "text/javascript"),
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("bmp", "image/bmp"),
    ("webp", "image/webp"),
    ("svg", "image/svg+xml"),
    ("ico", "image/x-icon"),
    ("tif", "image/tiff"),
    ("tiff", "image/tiff"),
    ("mp3", "audio/mpeg"),
    ("wav", "audio/wav"),
    ("flac", "audio/flac"),
    ("ogg", "audio/ogg"),
    ("mp4", "video/mp4"),
    ("mkv", "video/x-matroska"),
    ("mov", "video/quicktime"),
    ("avi", "video/x-msvideo"),
    ("webm", "video/webm"),
    ("pdf", "application/pdf"),
    ("zip", "application/zip"),
    ("gz", "application/gzip"),
    ("tar", "application/x-tar"),
    ("7z", "application/x-7z-compressed"),
    ("exe", "application/x-msdownload"),
    ("doc", "application/msword"),
    ("docx", "application/vnd.openxmlformats-officedocument.wordprocessingml.document"),
    ("xls", "application/vnd.ms-excel"),
    ("xlsx", "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"),
];

/// Errors that can occur while previewing a file.
///
/// All variants are recoverable: the caller reports them and proceeds to
/// the selection prompt.
#[derive(Debug, Error)]
pub enum PreviewError {
    /// The inferred type has no meaningful viewer rendering.
    #[error("cannot preview {mime} content: {path}")]
    NotPreviewable {
        /// Path that was refused
        path: String,
        /// The inferred MIME type
        mime: &'static str,
    },

    /// The default-application launcher could not be started.
    #[error("error opening file {path}: {source}")]
    LaunchFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Infer a MIME-like content type from a path's extension.
///
/// Unknown extensions (and extensionless paths) map to
/// [`OCTET_STREAM`]. Matching is case-insensitive.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return OCTET_STREAM;
    };
    let ext = ext.to_ascii_lowercase();

    MIME_TYPES
        .iter()
        .find(|(e, _)| *e == ext)
        .map_or(OCTET_STREAM, |(_, mime)| mime)
}

/// Ask the host environment to open a path with its default handler.
///
/// # Errors
///
/// Returns [`PreviewError::LaunchFailed`] if the platform launcher cannot
/// be spawned. A viewer that starts and then fails on its own is not
/// detected; the launch is fire-and-forget.
pub fn open_with_default_app(path: &Path) -> Result<(), PreviewError> {
    let mut command = launcher_command(path);

    command.spawn().map_err(|e| PreviewError::LaunchFailed {
        path: path.display().to_string(),
        source: e,
    })?;

    log::debug!("Launched default viewer for {}", path.display());
    Ok(())
}

#[cfg(target_os = "macos")]
fn launcher_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    cmd.arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn launcher_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn launcher_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}

/// Preview a file if its inferred type is viewable.
///
/// Infers the content type, refuses `application/*` types, and otherwise
/// launches the default viewer.
///
/// # Errors
///
/// - [`PreviewError::NotPreviewable`] for `application/*` types
/// - [`PreviewError::LaunchFailed`] if the viewer cannot be started
pub fn preview_file(path: &Path) -> Result<&'static str, PreviewError> {
    let mime = content_type_for(path);

    if mime.starts_with("application") {
        return Err(PreviewError::NotPreviewable {
            path: path.display().to_string(),
            mime,
        });
    }

    open_with_default_app(path)?;
    Ok(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_content_type_known_extensions() {
        assert_eq!(content_type_for(Path::new("notes.txt")), "text/plain");
        assert_eq!(content_type_for(Path::new("photo.jpg")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("song.mp3")), "audio/mpeg");
        assert_eq!(content_type_for(Path::new("doc.pdf")), "application/pdf");
    }

    #[test]
    fn test_content_type_is_case_insensitive() {
        assert_eq!(content_type_for(Path::new("PHOTO.JPG")), "image/jpeg");
        assert_eq!(content_type_for(Path::new("Readme.TXT")), "text/plain");
    }

    #[test]
    fn test_unknown_extension_is_octet_stream() {
        assert_eq!(content_type_for(Path::new("data.xyz123")), OCTET_STREAM);
    }

    #[test]
    fn test_no_extension_is_octet_stream() {
        assert_eq!(content_type_for(Path::new("Makefile")), OCTET_STREAM);
        assert_eq!(content_type_for(Path::new("/some/dir/binary")), OCTET_STREAM);
    }

    #[test]
    fn test_application_types_are_refused() {
        let err = preview_file(&PathBuf::from("archive.zip")).unwrap_err();
        assert!(matches!(err, PreviewError::NotPreviewable { .. }));

        let err = preview_file(&PathBuf::from("unknown.blob")).unwrap_err();
        assert!(matches!(
            err,
            PreviewError::NotPreviewable {
                mime: OCTET_STREAM,
                ..
            }
        ));
    }

    #[test]
    fn test_preview_error_display_names_path() {
        let err = PreviewError::NotPreviewable {
            path: "/x/archive.zip".to_string(),
            mime: "application/zip",
        };
        let msg = err.to_string();
        assert!(msg.contains("application/zip"));
        assert!(msg.contains("/x/archive.zip"));
    }
}
