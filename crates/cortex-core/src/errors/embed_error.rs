use super::ErrorKind;

/// Errors raised by the embedding client and its cache.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    /// Embedder unreachable or timed out. Never fatal: callers fall back to
    /// lexical-only behavior.
    #[error("embedder unavailable: {reason}")]
    Unavailable { reason: String },

    /// Embedder rejected the input (e.g. empty text).
    #[error("embedder rejected input: {reason}")]
    Rejected { reason: String },

    /// Rate limiter denied a non-blocking capacity check.
    #[error("embedding rate limit exceeded")]
    RateLimited,

    /// Anything else, including bugs in response parsing.
    #[error("internal embedding error: {0}")]
    Internal(String),
}

impl EmbedError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EmbedError::Unavailable { .. } => ErrorKind::TransientDependency,
            EmbedError::Rejected { .. } => ErrorKind::PermanentDependency,
            EmbedError::RateLimited => ErrorKind::ResourceExhaustion,
            EmbedError::Internal(_) => ErrorKind::TransientDependency,
        }
    }
}
