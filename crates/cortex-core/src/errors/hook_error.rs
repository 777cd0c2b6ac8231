use super::ErrorKind;

/// Errors raised while dispatching or running a hook workflow.
#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("malformed hook event: {0}")]
    MalformedEvent(String),

    #[error("missing required field: {0}")]
    MissingField(String),

    #[error("hook exceeded its wall-clock timeout")]
    TimedOut,

    #[error("marker file operation failed: {0}")]
    MarkerFile(String),
}

impl HookError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            HookError::MalformedEvent(_) => ErrorKind::UserInput,
            HookError::MissingField(_) => ErrorKind::UserInput,
            HookError::TimedOut => ErrorKind::TransientDependency,
            HookError::MarkerFile(_) => ErrorKind::TransientDependency,
        }
    }
}
