//! Exit codes for the run-digest CLI.
//!
//! Exit code ranges:
//! - 0: Success
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors

use rd_common::{Error, ErrorCategory};
use rd_config::ValidationError;

/// Exit codes for run-digest operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    /// Invalid arguments
    ArgsError = 10,

    /// Configuration could not be loaded or failed validation
    ConfigError = 11,

    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Error code name for JSON output.
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<&Error> for ExitCode {
    fn from(error: &Error) -> Self {
        match error.category() {
            ErrorCategory::Source => ExitCode::ArgsError,
            ErrorCategory::Io => ExitCode::IoError,
        }
    }
}

impl From<&ValidationError> for ExitCode {
    /// An unreadable config file is still a configuration problem.
    fn from(_: &ValidationError) -> Self {
        ExitCode::ConfigError
    }
}
