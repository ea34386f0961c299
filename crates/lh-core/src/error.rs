//! Top-level error for CLI commands.

use lh_bronze::WriteError;
use lh_config::ConfigError;
use thiserror::Error;

use crate::exit_codes::ExitCode;
use crate::inspect::InspectError;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("bronze write failed: {0}")]
    Write(#[from] WriteError),

    #[error(transparent)]
    Inspect(#[from] InspectError),
}

impl CoreError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CoreError::Config(_) => ExitCode::ConfigError,
            CoreError::Write(WriteError::InvalidDataset(_)) => ExitCode::InternalError,
            CoreError::Write(_) => ExitCode::IoError,
            CoreError::Inspect(InspectError::Open { .. } | InspectError::Catalog(_)) => {
                ExitCode::DatabaseError
            }
            CoreError::Inspect(_) => ExitCode::IoError,
        }
    }
}
