//! Exit codes for the application boundary.

/// Process exit codes.
///
/// - 0: Success (completed normally, duplicates found and/or resolved)
/// - 1: General error (unexpected failure, missing root directory)
/// - 2: No duplicates found (completed normally)
/// - 3: Partial success (completed with some non-fatal per-file errors)
/// - 130: Interrupted by user (Ctrl+C)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Scan completed and duplicates were found.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// Scan completed but no duplicates were found.
    NoDuplicates = 2,
    /// Completed but some files could not be read or deleted.
    PartialSuccess = 3,
    /// Interrupted by user (128 + SIGINT).
    Interrupted = 130,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::NoDuplicates.as_i32(), 2);
        assert_eq!(ExitCode::PartialSuccess.as_i32(), 3);
        assert_eq!(ExitCode::Interrupted.as_i32(), 130);
    }
}
