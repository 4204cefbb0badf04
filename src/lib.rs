//! DupeClean - Interactive duplicate file finder and cleaner.
//!
//! Scans a directory tree, fingerprints every file with BLAKE3, groups
//! byte-identical files, and guides the operator through keeping exactly
//! one copy per group while deleting the rest.

pub mod actions;
pub mod cli;
pub mod duplicates;
pub mod error;
pub mod logging;
pub mod progress;
pub mod resolve;
pub mod scanner;
pub mod signal;

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use yansi::Paint;

use crate::actions::delete::DeleteMode;
use crate::cli::Cli;
use crate::duplicates::{DuplicateFinder, FinderConfig, FinderError};
use crate::error::ExitCode;
use crate::progress::Progress;
use crate::resolve::{ask_yes_no, read_trimmed_line, resolve_groups, ResolveOptions};
use crate::scanner::WalkerConfig;

/// Run the application with the given CLI arguments.
///
/// Reads operator input from stdin and writes to stdout. Returns the exit
/// code for normal terminations; hard failures (missing root directory,
/// broken operator I/O) surface as errors for `main` to report.
///
/// # Errors
///
/// Returns an error when the scan cannot start at all or the operator I/O
/// surface fails. Per-file problems never surface here; they degrade the
/// exit code to [`ExitCode::PartialSuccess`] instead.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    if cli.no_color {
        yansi::disable();
    }

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();

    run_app_with_io(cli, &mut input, &mut output)
}

/// [`run_app`] against explicit I/O handles, for headless testing.
///
/// # Errors
///
/// Same as [`run_app`].
pub fn run_app_with_io(
    cli: Cli,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<ExitCode> {
    let root = resolve_root(&cli, input, output)?;

    let handler = signal::install_handler();
    let finder = DuplicateFinder::new(
        FinderConfig::default()
            .with_walker_config(WalkerConfig::new(cli.follow_symlinks))
            .with_shutdown_flag(handler.get_flag()),
    );

    writeln!(output, "Scanning '{}' for duplicates...", root.display())?;
    let progress = Progress::new(cli.quiet);
    let (groups, scan) = match finder.find_duplicates_with_progress(&root, Some(&progress)) {
        Ok(result) => result,
        Err(FinderError::Interrupted) => return Ok(ExitCode::Interrupted),
        Err(e) => return Err(e).context("scan failed"),
    };

    writeln!(
        output,
        "Found {} duplicate group(s): {} redundant file(s), {} reclaimable",
        scan.duplicate_groups,
        scan.duplicate_files,
        scan.reclaimable_display()
    )?;

    if groups.is_empty() {
        return Ok(if scan.had_errors() {
            ExitCode::PartialSuccess
        } else {
            ExitCode::NoDuplicates
        });
    }

    // Global gate: one confirmation covers the whole group list.
    let proceed = cli.yes || ask_yes_no("Start cleaning duplicates?", input, output)?;
    if !proceed {
        writeln!(output, "Cleanup declined, nothing deleted.")?;
        return Ok(if scan.had_errors() {
            ExitCode::PartialSuccess
        } else {
            ExitCode::Success
        });
    }

    let mode = if cli.trash {
        DeleteMode::Trash
    } else {
        DeleteMode::Permanent
    };
    print_warning_banner(output, mode)?;

    let preview = ask_yes_no(
        "Open files with default applications to view contents?",
        input,
        output,
    )?;

    let resolution = resolve_groups(
        &groups,
        input,
        output,
        ResolveOptions {
            delete_mode: mode,
            preview,
        },
    )?;

    writeln!(
        output,
        "Deleted {} file(s), freed {}. {} group(s) skipped.",
        resolution.files_deleted,
        bytesize::ByteSize(resolution.bytes_freed),
        resolution.groups_skipped
    )?;

    if handler.is_shutdown_requested() {
        return Ok(ExitCode::Interrupted);
    }
    Ok(if scan.had_errors() || resolution.delete_failures > 0 {
        ExitCode::PartialSuccess
    } else {
        ExitCode::Success
    })
}

/// Determine the root directory: CLI argument, or an interactive prompt.
fn resolve_root(
    cli: &Cli,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> anyhow::Result<PathBuf> {
    match &cli.path {
        Some(path) => Ok(path.clone()),
        None => {
            writeln!(output, "Enter directory path:")?;
            output.flush()?;
            let line = read_trimmed_line(input)?;
            match line {
                Some(path) if !path.is_empty() => Ok(PathBuf::from(path)),
                _ => anyhow::bail!("No directory path provided"),
            }
        }
    }
}

fn print_warning_banner(output: &mut impl Write, mode: DeleteMode) -> std::io::Result<()> {
    let action = match mode {
        DeleteMode::Permanent => "YOU ARE ABOUT TO DELETE FILES PERMANENTLY",
        DeleteMode::Trash => "FILES WILL BE MOVED TO THE SYSTEM TRASH",
    };
    writeln!(output, "{}", "**********************************".red().bold())?;
    writeln!(output, "{}", format!("*** {} ***", action).red().bold())?;
    writeln!(output, "{}", "***    PROCEED WITH CAUTION    ***".red().bold())?;
    writeln!(output, "{}", "***     STOP WITH CTRL-C       ***".red().bold())?;
    writeln!(output, "{}", "**********************************".red().bold())?;
    Ok(())
}
