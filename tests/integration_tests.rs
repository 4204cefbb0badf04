//! End-to-end tests driving the scan and resolution pipeline headlessly.

use std::fs;
use std::io::Cursor;
use std::path::Path;

use clap::Parser;
use dupeclean::cli::Cli;
use dupeclean::duplicates::{DuplicateFinder, FinderConfig};
use dupeclean::error::ExitCode;
use dupeclean::resolve::{resolve_groups, ResolveOptions};
use dupeclean::run_app_with_io;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn run_cli(args: &[&str], input_text: &str) -> (anyhow::Result<ExitCode>, String) {
    let cli = Cli::try_parse_from(std::iter::once("dupeclean").chain(args.iter().copied())).unwrap();
    let mut input = Cursor::new(input_text.to_string());
    let mut output = Vec::new();
    let result = run_app_with_io(cli, &mut input, &mut output);
    (result, String::from_utf8(output).unwrap())
}

#[test]
fn scan_then_resolve_keeps_one_copy_per_group() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "photos/img1.dat", b"picture-bytes");
    write(dir.path(), "backup/img1.dat", b"picture-bytes");
    write(dir.path(), "backup/old/img1.dat", b"picture-bytes");
    write(dir.path(), "notes.txt", b"text-bytes");
    write(dir.path(), "notes-copy.txt", b"text-bytes");
    write(dir.path(), "unique.txt", b"only one of me");

    let finder = DuplicateFinder::new(FinderConfig::default());
    let (groups, summary) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 2);
    assert_eq!(summary.total_files, 6);
    assert_eq!(summary.duplicate_files, 3);

    // Keep member 1 in each group
    let mut input = Cursor::new("1\n1\n".to_string());
    let mut output = Vec::new();
    let resolution =
        resolve_groups(&groups, &mut input, &mut output, ResolveOptions::default()).unwrap();

    assert_eq!(resolution.groups_resolved, 2);
    assert_eq!(resolution.files_deleted, 3);

    // One copy of each content survives
    let finder = DuplicateFinder::new(FinderConfig::default());
    let (groups_after, summary_after) = finder.find_duplicates(dir.path()).unwrap();
    assert!(groups_after.is_empty());
    assert_eq!(summary_after.total_files, 3);
}

#[test]
fn declined_confirmation_performs_zero_mutations() {
    let dir = TempDir::new().unwrap();
    for i in 0..4 {
        write(dir.path(), &format!("copy{}.bin", i), b"all the same");
    }

    let (result, _) = run_cli(&["-q", dir.path().to_str().unwrap()], "n\n");
    assert_eq!(result.unwrap(), ExitCode::Success);

    let remaining = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(remaining, 4);
}

#[test]
fn cleanup_over_multiple_groups_with_mixed_answers() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "a1.txt", b"group-a");
    write(dir.path(), "a2.txt", b"group-a");
    write(dir.path(), "b1.txt", b"group-b");
    write(dir.path(), "b2.txt", b"group-b");

    // proceed=y, preview=n, first group: invalid, second group: keep 2
    let (result, out) = run_cli(&["-q", dir.path().to_str().unwrap()], "y\nn\nnope\n2\n");
    assert_eq!(result.unwrap(), ExitCode::Success);
    assert!(out.contains("Invalid index"));

    // One group untouched (2 files), the other resolved down to 1 file
    let remaining = fs::read_dir(dir.path()).unwrap().count();
    assert_eq!(remaining, 3);
}

#[test]
fn nonexistent_directory_reports_error() {
    let (result, _) = run_cli(&["-q", "/no/such/dir/anywhere"], "");
    let err = result.unwrap_err();
    assert!(err.to_string().contains("scan failed"));
}

#[test]
fn empty_directory_reports_no_duplicates() {
    let dir = TempDir::new().unwrap();
    let (result, out) = run_cli(&["-q", dir.path().to_str().unwrap()], "");
    assert_eq!(result.unwrap(), ExitCode::NoDuplicates);
    assert!(out.contains("Found 0 duplicate group(s)"));
}

#[test]
fn deep_trees_are_scanned_fully() {
    let dir = TempDir::new().unwrap();
    let mut rel = String::from("d");
    for _ in 0..20 {
        rel.push_str("/d");
    }
    write(dir.path(), &format!("{}/deep.txt", rel), b"buried");
    write(dir.path(), "shallow.txt", b"buried");

    let finder = DuplicateFinder::new(FinderConfig::default());
    let (groups, _) = finder.find_duplicates(dir.path()).unwrap();

    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}
