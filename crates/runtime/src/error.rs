//! Unified error types surfaced by the runtime API.
use combat_core::{CombatError, CommandError, ErrorSeverity, SetupError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    /// A content file could not be read or parsed.
    #[error(transparent)]
    Content(#[from] anyhow::Error),

    #[error("failed to seed encounter")]
    Setup(#[source] SetupError),

    /// The engine refused a command; encounter state is unchanged.
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl RuntimeError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Content(_) => "content",
            Self::Setup(err) => err.error_code(),
            Self::Command(err) => err.error_code(),
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Content(_) => ErrorSeverity::Fatal,
            Self::Setup(err) => err.severity(),
            Self::Command(err) => err.severity(),
        }
    }
}

impl From<SetupError> for RuntimeError {
    fn from(err: SetupError) -> Self {
        Self::Setup(err)
    }
}
