//! Property-based tests for the grouping engine.
//!
//! The central property: for any set of input files, two files land in the
//! same duplicate group exactly when their byte contents are identical.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use dupeclean::duplicates::{DuplicateFinder, FinderConfig};
use proptest::prelude::*;
use tempfile::TempDir;

/// A small content pool so generated file sets contain real duplicates.
fn content_pool() -> Vec<Vec<u8>> {
    vec![
        b"".to_vec(),
        b"a".to_vec(),
        b"alpha".to_vec(),
        b"beta".to_vec(),
        vec![0u8; 100],
        vec![1u8; 100],
        b"a longer piece of content shared by several files".to_vec(),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn same_group_iff_same_content(choices in prop::collection::vec(0usize..7, 0..20)) {
        let dir = TempDir::new().unwrap();
        let pool = content_pool();

        let mut content_by_path: HashMap<PathBuf, usize> = HashMap::new();
        for (i, &choice) in choices.iter().enumerate() {
            let path = dir.path().join(format!("file_{}.dat", i));
            fs::write(&path, &pool[choice]).unwrap();
            content_by_path.insert(path, choice);
        }

        let finder = DuplicateFinder::new(FinderConfig::default());
        let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

        prop_assert_eq!(summary.total_files, choices.len());

        // Every group is content-homogeneous with at least two members
        for group in &groups {
            prop_assert!(group.len() >= 2);
            let first = content_by_path[&group.files[0].path];
            for file in &group.files {
                prop_assert_eq!(content_by_path[&file.path], first);
            }
        }

        // No path appears in two groups
        let mut seen = std::collections::HashSet::new();
        for group in &groups {
            for file in &group.files {
                prop_assert!(seen.insert(file.path.clone()));
            }
        }

        // Every content value used 2+ times produced exactly one group of
        // exactly that size; contents used once produced none
        let mut uses: HashMap<usize, usize> = HashMap::new();
        for &choice in &choices {
            *uses.entry(choice).or_default() += 1;
        }
        let expected_groups = uses.values().filter(|&&n| n >= 2).count();
        prop_assert_eq!(groups.len(), expected_groups);

        for group in &groups {
            let choice = content_by_path[&group.files[0].path];
            prop_assert_eq!(group.len(), uses[&choice]);
        }
    }

    #[test]
    fn reclaimable_bytes_match_group_arithmetic(copies in 2usize..6, size in 0usize..512) {
        let dir = TempDir::new().unwrap();
        let content = vec![42u8; size];
        for i in 0..copies {
            fs::write(dir.path().join(format!("c{}.bin", i)), &content).unwrap();
        }

        let finder = DuplicateFinder::new(FinderConfig::default());
        let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

        prop_assert_eq!(groups.len(), 1);
        prop_assert_eq!(summary.duplicate_files, copies - 1);
        prop_assert_eq!(
            summary.reclaimable_bytes,
            ((copies - 1) * size) as u64
        );
    }
}
