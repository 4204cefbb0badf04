//! BLAKE3 file hasher with streaming support.
//!
//! # Overview
//!
//! Computes a fixed-length content digest for a single file by streaming
//! its bytes through BLAKE3 in fixed-size chunks. Memory usage is bounded
//! by the read buffer regardless of file size, and the digest depends on
//! file content only - path, timestamps, and other metadata never enter
//! the hash state.
//!
//! # Example
//!
//! ```no_run
//! use dupeclean::scanner::{hash_file, hash_to_hex};
//! use std::path::Path;
//!
//! let digest = hash_file(Path::new("Cargo.toml")).unwrap();
//! println!("{}", hash_to_hex(&digest));
//! ```

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::HashError;

/// Length of a content digest in bytes (BLAKE3 output).
pub const DIGEST_LEN: usize = 32;

/// A 256-bit content digest.
pub type Digest = [u8; DIGEST_LEN];

/// Read buffer size for streaming (64 KiB).
const READ_BUF_SIZE: usize = 64 * 1024;

/// Compute the BLAKE3 digest of a file's content.
///
/// The file is opened, fully streamed, and closed before this function
/// returns, so concurrent file-descriptor usage stays at one.
///
/// # Errors
///
/// Returns [`HashError`] if the file cannot be opened or read. Callers in
/// the grouping engine treat this as a per-file failure: the file is
/// skipped and reported, the scan continues.
pub fn hash_file(path: &Path) -> Result<Digest, HashError> {
    let mut file = File::open(path).map_err(|e| HashError::from_io(path, e))?;
    let mut hasher = blake3::Hasher::new();
    let mut buf = [0u8; READ_BUF_SIZE];

    loop {
        let n = file.read(&mut buf).map_err(|e| HashError::from_io(path, e))?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(*hasher.finalize().as_bytes())
}

/// Convert a digest to its lowercase hexadecimal representation.
#[must_use]
pub fn hash_to_hex(digest: &Digest) -> String {
    let mut out = String::with_capacity(DIGEST_LEN * 2);
    for byte in digest {
        out.push_str(&format!("{:02x}", byte));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("create temp file");
        file.write_all(content).expect("write temp file");
        path
    }

    #[test]
    fn test_hash_is_deterministic() {
        let dir = TempDir::new().unwrap();
        let path = write_file(&dir, "a.txt", b"hello world");

        let first = hash_file(&path).unwrap();
        let second = hash_file(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_identical_content_same_digest() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.txt", b"same bytes");
        let b = write_file(&dir, "b.txt", b"same bytes");

        assert_eq!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }

    #[test]
    fn test_single_byte_difference_changes_digest() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "a.bin", b"contents-0");
        let b = write_file(&dir, "b.bin", b"contents-1");

        assert_ne!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }

    #[test]
    fn test_empty_file_hashes() {
        let dir = TempDir::new().unwrap();
        let a = write_file(&dir, "empty1", b"");
        let b = write_file(&dir, "empty2", b"");

        // All empty files share one digest
        assert_eq!(hash_file(&a).unwrap(), hash_file(&b).unwrap());
    }

    #[test]
    fn test_large_file_spans_multiple_reads() {
        let dir = TempDir::new().unwrap();
        // 3 full buffers plus a partial tail
        let content = vec![0xABu8; READ_BUF_SIZE * 3 + 17];
        let path = write_file(&dir, "big.bin", &content);

        let streamed = hash_file(&path).unwrap();
        let whole = *blake3::hash(&content).as_bytes();
        assert_eq!(streamed, whole);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let err = hash_file(&dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, HashError::NotFound(_)));
    }

    #[test]
    fn test_hash_to_hex_format() {
        let mut digest: Digest = [0u8; DIGEST_LEN];
        digest[0] = 0xAB;
        digest[1] = 0xCD;
        digest[31] = 0xEF;

        let hex = hash_to_hex(&digest);
        assert_eq!(hex.len(), 64);
        assert!(hex.starts_with("abcd"));
        assert!(hex.ends_with("ef"));
    }
}
