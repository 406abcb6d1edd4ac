//! Error taxonomy for engine and supervisor failures.
//!
//! Only startup failures surface as errors.  Configuration degradation and
//! per-navigation load failures are logged where they happen and never
//! reach these types.

/// Failures reported by an [`Engine`](crate::Engine) implementation.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("engine initialisation failed: {0}")]
    Initialization(String),

    #[error("browser view creation failed: {0}")]
    ViewCreation(String),
}

/// Fatal failures that end the primary process with a non-zero status.
#[derive(Debug, thiserror::Error)]
pub enum SupervisorError {
    #[error("failed to initialise the browser engine")]
    Initialization(#[source] EngineError),

    #[error("failed to create the browser view")]
    ViewCreation(#[source] EngineError),
}

impl SupervisorError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            SupervisorError::Initialization(_) | SupervisorError::ViewCreation(_) => 1,
        }
    }
}
