use std::path::PathBuf;

use super::env_or;
use crate::constants::*;

#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub db_path: PathBuf,
    pub project_root: PathBuf,
    pub busy_timeout_ms: u32,
    pub read_pool_size: usize,
    pub timeout_secs: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(".cortex/memory.sqlite3"),
            project_root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            busy_timeout_ms: DEFAULT_DB_BUSY_TIMEOUT_MS,
            read_pool_size: DEFAULT_READ_POOL_SIZE,
            timeout_secs: 5,
        }
    }
}

impl StorageConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        let db_path = std::env::var("CORTEX_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or(d.db_path);
        let project_root = std::env::var("CORTEX_PROJECT_ROOT")
            .map(PathBuf::from)
            .unwrap_or(d.project_root);
        Self {
            db_path,
            project_root,
            busy_timeout_ms: d.busy_timeout_ms,
            read_pool_size: env_or("CORTEX_READ_POOL_SIZE", d.read_pool_size),
            timeout_secs: env_or("CORTEX_DB_TIMEOUT", d.timeout_secs),
        }
    }
}
