mod embed_error;
mod hook_error;
mod storage_error;

pub use embed_error::EmbedError;
pub use hook_error::HookError;
pub use storage_error::StorageError;

/// Abstract error kind, independent of which concrete enum raised it.
/// The hook binary dispatches its exit code off this, not off concrete
/// variants, so adding a new error variant never requires touching the
/// exit-code logic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    TransientDependency,
    PermanentDependency,
    IntegrityViolation,
    Security,
    ResourceExhaustion,
    UserInput,
}

impl ErrorKind {
    /// Exit code mandated for this kind when it escapes to the hook's
    /// top-level dispatcher. Security is the only blocking (2) kind;
    /// everything else is non-blocking (1).
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Security => 2,
            _ => 1,
        }
    }
}

/// Crate-wide error, aggregating every per-domain error type.
#[derive(Debug, thiserror::Error)]
pub enum CortexError {
    #[error(transparent)]
    Embed(#[from] EmbedError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Hook(#[from] HookError),

    #[error("invalid input: {0}")]
    UserInput(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl CortexError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CortexError::Embed(e) => e.kind(),
            CortexError::Storage(e) => e.kind(),
            CortexError::Hook(e) => e.kind(),
            CortexError::UserInput(_) => ErrorKind::UserInput,
            CortexError::Io(_) => ErrorKind::TransientDependency,
        }
    }
}

pub type CortexResult<T> = Result<T, CortexError>;
