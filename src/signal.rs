//! Signal handling for graceful shutdown.
//!
//! Ctrl+C is the documented way to abort a run before destructive cleanup
//! begins. The handler sets a shared `AtomicBool` flag; the grouping engine
//! checks it between files, so an interrupt during fingerprinting or group
//! presentation is always safe (no deletions yet). An interrupt while a
//! group is being deleted may leave that group partially cleaned.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dupeclean::signal::install_handler;
//!
//! let handler = install_handler();
//! if handler.is_shutdown_requested() {
//!     return;
//! }
//! // Pass handler.get_flag() to FinderConfig.
//! ```

use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Shared shutdown flag for coordinated termination.
#[derive(Debug, Clone)]
pub struct ShutdownHandler {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandler {
    /// Create a new handler with the flag initially unset.
    #[must_use]
    pub fn new() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Check if shutdown has been requested.
    #[must_use]
    pub fn is_shutdown_requested(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Manually request a shutdown.
    pub fn request_shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Get a clone of the flag for passing to the finder.
    #[must_use]
    pub fn get_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.flag)
    }

    /// Reset the flag to `false`.
    pub fn reset(&self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

impl Default for ShutdownHandler {
    fn default() -> Self {
        Self::new()
    }
}

static GLOBAL_HANDLER: OnceLock<ShutdownHandler> = OnceLock::new();

/// Install a Ctrl+C handler that sets the shutdown flag on interrupt.
///
/// Call once, early in startup. If a handler is already installed (e.g.
/// when tests invoke the application repeatedly in one process), the
/// existing one is reused, or an unhooked handler is returned as a last
/// resort; installation never fails the run.
pub fn install_handler() -> ShutdownHandler {
    if let Some(handler) = GLOBAL_HANDLER.get() {
        handler.reset();
        return handler.clone();
    }

    let handler = ShutdownHandler::new();
    let flag = handler.get_flag();

    match ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
        let _ = writeln!(std::io::stderr(), "\nInterrupted. Cleaning up...");
        let _ = std::io::stderr().flush();
        log::info!("Shutdown signal received");
    }) {
        Ok(()) => {
            let _ = GLOBAL_HANDLER.set(handler.clone());
            handler
        }
        Err(_) => {
            if let Some(existing) = GLOBAL_HANDLER.get() {
                existing.reset();
                existing.clone()
            } else {
                log::debug!("Ctrl+C handler already registered, using unhooked handler");
                let fallback = ShutdownHandler::new();
                let _ = GLOBAL_HANDLER.set(fallback.clone());
                fallback
            }
        }
    }
}
