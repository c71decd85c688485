//! Exit codes and fatal configuration errors.

use std::path::PathBuf;
use thiserror::Error;

/// Exit codes for the dupsweep binary.
///
/// - 0: Success (run completed, whether or not anything was deleted)
/// - 1: General error (unexpected failure)
/// - 2: Configuration error (bad root or mutable directory)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// The run completed normally.
    Success = 0,
    /// An unexpected error occurred.
    GeneralError = 1,
    /// The invocation was rejected before any scanning began.
    ConfigError = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

/// Problems with the invocation itself. Nothing is scanned or deleted once
/// one of these is raised.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The scan root does not exist or is not a directory.
    #[error("invalid root directory: {0}")]
    InvalidRoot(PathBuf),
    /// A declared mutable directory does not exist or is not a directory.
    #[error("bad mutable dir: {0}")]
    BadMutableDir(PathBuf),
}
