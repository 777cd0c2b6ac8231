use serde::{Deserialize, Serialize};

/// 1:1 with a [`super::MemoryEntry`], present only when embedding succeeded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingRecord {
    pub entry_id: String,
    pub vector: Vec<f32>,
    pub model_id: String,
}
