//! Command-line interface definitions.
//!
//! All arguments are defined with the clap derive API. The directory to
//! scan may be given as a positional argument; when omitted, the
//! application prompts for it interactively.
//!
//! # Example
//!
//! ```bash
//! # Scan a directory and resolve duplicates interactively
//! dupeclean ~/Downloads
//!
//! # Move redundant copies to the recycle bin instead of deleting
//! dupeclean ~/Downloads --trash
//!
//! # Non-interactive confirmation, verbose diagnostics
//! dupeclean -v -y ~/Downloads
//! ```

use clap::Parser;
use std::path::PathBuf;

/// Interactive duplicate file finder and cleaner.
///
/// DupeClean fingerprints every file under a directory with BLAKE3,
/// groups byte-identical files, and walks you through keeping exactly one
/// copy per group.
#[derive(Debug, Parser)]
#[command(name = "dupeclean")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory path to scan for duplicates (prompted for if omitted)
    #[arg(value_name = "PATH")]
    pub path: Option<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress output and all diagnostics except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Follow symbolic links during the scan
    ///
    /// Warning: may cause infinite loops if symlinks form cycles.
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Move redundant copies to the system trash instead of deleting them
    #[arg(long)]
    pub trash: bool,

    /// Skip the "proceed with cleanup?" confirmation
    #[arg(short = 'y', long)]
    pub yes: bool,
}
