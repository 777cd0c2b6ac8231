use super::ErrorKind;

/// Storage-layer errors for SQLite operations.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("sqlite error: {message}")]
    Sqlite { message: String },

    #[error("migration failed at version {version}: {reason}")]
    MigrationFailed { version: u32, reason: String },

    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("duplicate trigger detected for {operation} on {table}")]
    DuplicateTrigger { operation: String, table: String },

    #[error("entry not found: {id}")]
    NotFound { id: String },

    #[error("database path rejected: {reason}")]
    PathRejected { reason: String },

    #[error("connection pool exhausted: {active_connections} active connections")]
    PoolExhausted { active_connections: usize },
}

impl StorageError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StorageError::Sqlite { .. } => ErrorKind::TransientDependency,
            StorageError::MigrationFailed { .. } => ErrorKind::IntegrityViolation,
            StorageError::DimensionMismatch { .. } => ErrorKind::IntegrityViolation,
            StorageError::DuplicateTrigger { .. } => ErrorKind::IntegrityViolation,
            StorageError::NotFound { .. } => ErrorKind::UserInput,
            StorageError::PathRejected { .. } => ErrorKind::Security,
            StorageError::PoolExhausted { .. } => ErrorKind::ResourceExhaustion,
        }
    }
}
