use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some context")]
    EmptyContext,
    #[error("unknown email type '{0}'")]
    UnknownEmailType(String),
}
