//! Logging infrastructure.
//!
//! Structured logging via the `log` facade with an `env_logger` backend.
//! The level is determined by, in priority order:
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (errors only) or `-v`/`-vv`
//! 3. Default: info level

use std::env;
use std::io::Write;

use env_logger::Builder;
use log::LevelFilter;

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// Call once at startup, before any logging calls.
///
/// # Panics
///
/// Panics if called more than once, as `env_logger` can only be
/// initialized once per process.
pub fn init_logging(verbose: u8, quiet: bool) {
    let mut builder = Builder::new();

    if env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
    }

    // Compact format: level and message only. Diagnostics share the
    // terminal with prompts and the progress bar, so no timestamps.
    builder.format(|buf, record| {
        let level = record.level();
        let level_style = buf.default_level_style(level);
        writeln!(
            buf,
            "{level_style}{:<5}{level_style:#} {}",
            level,
            record.args()
        )
    });

    builder.init();
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
