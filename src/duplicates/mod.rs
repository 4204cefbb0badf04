//! Duplicate detection module.
//!
//! This module provides:
//! - [`groups`]: the digest index and duplicate group types
//! - [`finder`]: the grouping engine that drives the scanner over a tree

pub mod finder;
pub mod groups;

pub use finder::{DuplicateFinder, FinderConfig, FinderError, ScanSummary};
pub use groups::{DigestIndex, DuplicateGroup};
