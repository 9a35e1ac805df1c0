use thiserror::Error;

/// The only failure text a user ever sees; detail stays in the logs.
pub const GENERIC_FAILURE_MESSAGE: &str = "Something went wrong.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Transport,
    Status,
    Decode,
    MissingEmail,
    WorkerUnavailable,
}

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to reach generation endpoint: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("generation endpoint returned status {status} without an email")]
    Status { status: u16 },
    #[error("invalid generation response payload: {0}")]
    Decode(#[source] serde_json::Error),
    #[error("generation response did not contain an email")]
    MissingEmail,
    #[error("generation worker unavailable: {0}")]
    WorkerUnavailable(String),
}

impl GenerationError {
    pub fn kind(&self) -> FailureKind {
        match self {
            GenerationError::Transport(_) => FailureKind::Transport,
            GenerationError::Status { .. } => FailureKind::Status,
            GenerationError::Decode(_) => FailureKind::Decode,
            GenerationError::MissingEmail => FailureKind::MissingEmail,
            GenerationError::WorkerUnavailable(_) => FailureKind::WorkerUnavailable,
        }
    }

    pub fn user_message(&self) -> &'static str {
        GENERIC_FAILURE_MESSAGE
    }
}
