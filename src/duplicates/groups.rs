//! Digest index and duplicate group management.
//!
//! # Overview
//!
//! The [`DigestIndex`] is the sole mutable state of one scan: a mapping from
//! content digest to the paths seen with that digest, in discovery order.
//! It is created at scan start, fed one entry per hashed file, and converted
//! into the final list of [`DuplicateGroup`]s when enumeration completes.
//!
//! Groups handed out by [`DigestIndex::into_groups`] always have length >= 2;
//! a digest seen once is by definition not a duplicate and is dropped. The
//! returned list preserves the order in which each digest was first seen,
//! so results are deterministic for a fixed traversal order.

use std::collections::HashMap;

use crate::scanner::{hash_to_hex, Digest, FileEntry};

/// Confirmed group of files sharing one content digest.
///
/// Invariant: `files.len() >= 2` for every group produced by the index.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// BLAKE3 digest of the shared content (32 bytes)
    pub digest: Digest,
    /// File size in bytes, shared by all members
    pub size: u64,
    /// Member files in discovery order
    pub files: Vec<FileEntry>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Check if this group is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Number of redundant copies (total minus the one to keep).
    #[must_use]
    pub fn duplicate_count(&self) -> usize {
        self.files.len().saturating_sub(1)
    }

    /// Bytes reclaimable by keeping a single copy.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.size * self.duplicate_count() as u64
    }

    /// Digest as hexadecimal string.
    #[must_use]
    pub fn digest_hex(&self) -> String {
        hash_to_hex(&self.digest)
    }

    /// Get just the paths of files in this group.
    #[must_use]
    pub fn paths(&self) -> Vec<std::path::PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Incrementally built mapping from digest to files.
///
/// Exclusively owned by the scanning thread; discarded (consumed by
/// [`into_groups`](Self::into_groups)) at scan end.
#[derive(Debug, Default)]
pub struct DigestIndex {
    by_digest: HashMap<Digest, Vec<FileEntry>>,
    /// Digests in first-seen order, for deterministic group output.
    order: Vec<Digest>,
}

impl DigestIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one hashed file under its digest.
    pub fn insert(&mut self, digest: Digest, file: FileEntry) {
        let entry = self.by_digest.entry(digest).or_default();
        if entry.is_empty() {
            self.order.push(digest);
        }
        entry.push(file);
    }

    /// Number of distinct digests seen so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_digest.len()
    }

    /// Check if the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_digest.is_empty()
    }

    /// Consume the index, emitting one group per digest with 2+ files.
    ///
    /// Singleton digests produce no group. Output order is the order in
    /// which each surviving digest was first seen.
    #[must_use]
    pub fn into_groups(mut self) -> Vec<DuplicateGroup> {
        let mut groups = Vec::new();

        for digest in self.order.drain(..) {
            let Some(files) = self.by_digest.remove(&digest) else {
                continue;
            };
            if files.len() < 2 {
                log::trace!(
                    "Unique content {}: {}",
                    hash_to_hex(&digest),
                    files[0].path.display()
                );
                continue;
            }
            let size = files[0].size;
            groups.push(DuplicateGroup {
                digest,
                size,
                files,
            });
        }

        groups
    }
}
