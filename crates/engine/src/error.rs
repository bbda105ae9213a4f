//! Engine outcomes and process exit codes.

use thiserror::Error;

/// Exit status of a run that ended normally.
pub const EXIT_OK: i32 = 0;

/// Exit status of a run that never reached the loop.
pub const EXIT_INIT_FAILURE: i32 = -1;

/// Initialization failures. Fatal, never retried.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("input initialization failed: {0:#}")]
    InputInit(anyhow::Error),
    #[error("output initialization failed: {0:#}")]
    OutputInit(anyhow::Error),
    #[error("game initialization failed: {0:#}")]
    ClientInit(anyhow::Error),
}

impl EngineError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        EXIT_INIT_FAILURE
    }

    pub fn stage(&self) -> &'static str {
        match self {
            EngineError::InputInit(_) => "input",
            EngineError::OutputInit(_) => "output",
            EngineError::ClientInit(_) => "game",
        }
    }
}

/// Map a run outcome to a process exit status.
pub fn exit_code(result: &Result<(), EngineError>) -> i32 {
    match result {
        Ok(()) => EXIT_OK,
        Err(e) => e.exit_code(),
    }
}
