//! Interactive resolution workflow for duplicate groups.
//!
//! # Overview
//!
//! Consumes the groups produced by the grouping engine, one at a time:
//! optionally previews the first member, lists all members with 1-based
//! indices, reads the operator's survivor selection, and deletes every
//! non-selected member.
//!
//! The workflow is written against generic [`BufRead`]/[`Write`] handles
//! (`groups in -> decisions out`) so the whole state machine can be tested
//! headlessly without a terminal.
//!
//! # Selection validation
//!
//! The selection must parse as an integer in `[1, group_len]`. On a parse
//! failure or out-of-range value, an "Invalid index" diagnostic is printed
//! and the group is abandoned with zero deletions; the workflow moves on
//! to the next group. There is no per-group retry. End of input on the
//! selection prompt likewise skips the group.
//!
//! # Deletion semantics
//!
//! Deletions inside a group are attempted independently; one failure is
//! reported and does not stop the rest of the group, nor roll back earlier
//! deletions. Partial cleanup of a group is a possible terminal state.

use std::io::{BufRead, Write};

use crate::actions::delete::{delete_file, DeleteMode};
use crate::actions::preview::preview_file;
use crate::duplicates::DuplicateGroup;

/// Options controlling a resolution pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResolveOptions {
    /// How non-survivors are removed.
    pub delete_mode: DeleteMode,
    /// Open the first member of each group with the default viewer before
    /// listing the group.
    pub preview: bool,
}

/// Outcome counters for one resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveSummary {
    /// Groups where a survivor was chosen and deletions were attempted.
    pub groups_resolved: usize,
    /// Groups abandoned due to invalid or missing input.
    pub groups_skipped: usize,
    /// Files successfully deleted.
    pub files_deleted: usize,
    /// Deletions that failed (reported, not retried).
    pub delete_failures: usize,
    /// Total bytes freed.
    pub bytes_freed: u64,
}

/// Read one line from the operator, trimmed.
///
/// Returns `None` at end of input, which callers treat as a negative or
/// skip answer.
pub fn read_trimmed_line(input: &mut impl BufRead) -> std::io::Result<Option<String>> {
    let mut line = String::new();
    let n = input.read_line(&mut line)?;
    if n == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask a yes/no question. Only an explicit `y`/`Y` counts as yes; anything
/// else, including end of input, is no.
pub fn ask_yes_no(
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> std::io::Result<bool> {
    writeln!(output, "{} [y/n]", prompt)?;
    output.flush()?;

    let answer = read_trimmed_line(input)?;
    Ok(answer.is_some_and(|a| a.eq_ignore_ascii_case("y")))
}

/// Validate a survivor selection against the group size.
///
/// Accepts a 1-based index in `[1, group_len]` and converts it to the
/// internal 0-based form. Returns `None` for anything else.
#[must_use]
pub fn parse_selection(line: &str, group_len: usize) -> Option<usize> {
    let parsed: usize = line.trim().parse().ok()?;
    if parsed < 1 || parsed > group_len {
        return None;
    }
    Some(parsed - 1)
}

/// Resolve all groups interactively.
///
/// The caller is expected to have already passed the global cleanup
/// confirmation gate; this function performs the per-group workflow only.
///
/// # Errors
///
/// Returns an error only for failures on the operator I/O surface itself;
/// filesystem problems are per-file diagnostics in the summary.
pub fn resolve_groups(
    groups: &[DuplicateGroup],
    input: &mut impl BufRead,
    output: &mut impl Write,
    options: ResolveOptions,
) -> std::io::Result<ResolveSummary> {
    let mut summary = ResolveSummary::default();

    for group in groups {
        resolve_one_group(group, input, output, options, &mut summary)?;
        writeln!(output)?;
    }

    log::info!(
        "Resolution complete: {} groups resolved, {} skipped, {} files deleted ({} failures)",
        summary.groups_resolved,
        summary.groups_skipped,
        summary.files_deleted,
        summary.delete_failures
    );

    Ok(summary)
}

fn resolve_one_group(
    group: &DuplicateGroup,
    input: &mut impl BufRead,
    output: &mut impl Write,
    options: ResolveOptions,
    summary: &mut ResolveSummary,
) -> std::io::Result<()> {
    if options.preview {
        // Best-effort: a refused or failed preview never blocks selection.
        let first = &group.files[0].path;
        match preview_file(first) {
            Ok(mime) => writeln!(output, "MIME type: {}", mime)?,
            Err(e) => writeln!(output, "{}", e)?,
        }
    }

    for (i, file) in group.files.iter().enumerate() {
        writeln!(output, "- {}: {}", i + 1, file.path.display())?;
    }
    writeln!(output, "Which file index to KEEP?")?;
    output.flush()?;

    let Some(line) = read_trimmed_line(input)? else {
        // End of input: skip this group, nothing deleted.
        summary.groups_skipped += 1;
        return Ok(());
    };

    let Some(survivor) = parse_selection(&line, group.len()) else {
        writeln!(output, "Invalid index")?;
        log::warn!(
            "Invalid survivor index {:?} for group of {} files, group abandoned",
            line,
            group.len()
        );
        summary.groups_skipped += 1;
        return Ok(());
    };

    writeln!(output, "Keeping: {}", group.files[survivor].path.display())?;
    summary.groups_resolved += 1;

    for (i, file) in group.files.iter().enumerate() {
        if i == survivor {
            continue;
        }
        writeln!(output, "Deleting {}", file.path.display())?;
        match delete_file(&file.path, options.delete_mode) {
            Ok(result) => {
                summary.files_deleted += 1;
                summary.bytes_freed += result.size;
            }
            Err(e) => {
                // Keep going: remaining members still get their attempt.
                writeln!(output, "Error: {}", e)?;
                summary.delete_failures += 1;
            }
        }
    }

    Ok(())
}
