//! Exit codes for the `lakehouse` CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.

/// Exit codes for lakehouse operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Run completed
    Clean = 0,

    /// Configuration error
    ConfigError = 10,

    /// I/O error (bronze files, report output)
    IoError = 13,

    /// Database could not be opened or its catalog read
    DatabaseError = 14,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
