/// Cortex system version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default fixed dimension of embedding vectors. Deployment-wide constant;
/// inserting a mismatched-dimension vector is rejected by the storage layer.
pub const DEFAULT_EMBEDDING_DIMENSION: usize = 768;

/// Default hard cap on the embedding cache's entry count.
pub const DEFAULT_EMBEDDING_CACHE_CAP: u64 = 1000;

/// Default embedder call timeout.
pub const DEFAULT_EMBED_TIMEOUT_SECS: u64 = 15;

/// Default maximum retry attempts for a transient embedder failure.
pub const DEFAULT_EMBED_MAX_ATTEMPTS: u32 = 3;

/// Default sustained rate limit (requests/second) against the external embedder.
pub const DEFAULT_EMBED_RATE_LIMIT_PER_SEC: u32 = 5;

/// Default busy-timeout for the SQLite writer connection, in milliseconds.
pub const DEFAULT_DB_BUSY_TIMEOUT_MS: u32 = 5_000;

/// Default size of the round-robin read connection pool.
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

/// Maximum allowed read connection pool size.
pub const MAX_READ_POOL_SIZE: usize = 8;

/// RRF smoothing constant (`C` in `1 / (C + rank)`).
pub const DEFAULT_RRF_C: f64 = 60.0;

/// RRF weight applied to the vector-search ranking.
pub const DEFAULT_RRF_WEIGHT_VECTOR: f64 = 1.0;

/// RRF weight applied to the lexical-search ranking.
pub const DEFAULT_RRF_WEIGHT_LEXICAL: f64 = 0.7;

/// Default candidate pool multiplier used when forming `K_v`/`K_l` from
/// the final fused `K`.
pub const DEFAULT_CANDIDATE_POOL_MULTIPLIER: usize = 3;

/// Default size of the candidate pool handed to the context assembler.
pub const DEFAULT_ASSEMBLER_CANDIDATE_POOL: usize = 15;

/// Characters-per-token heuristic used when no tokenizer table is loaded.
pub const FALLBACK_CHARS_PER_TOKEN: usize = 4;

/// Default per-hook wall-clock timeout, in seconds.
pub const DEFAULT_HOOK_TIMEOUT_SECS: u64 = 30;

/// Maximum number of keywords extracted per category (file stems, language,
/// curated vocabulary) during `post-tool-use` ingestion.
pub const MAX_KEYWORDS_PER_CATEGORY: usize = 5;

/// Interval over which the resource-monitor health snapshot is cached.
pub const HEALTH_SNAPSHOT_CACHE_SECS: u64 = 8;

/// File extensions accepted for the database path.
pub const ALLOWED_DB_EXTENSIONS: &[&str] = &["db", "sqlite", "sqlite3"];

/// Name of the marker file written by session-end/pre-compact and consumed
/// by session-start.
pub const MARKER_FILE_NAME: &str = "last_session_summary.txt";
