//! Component C: hybrid search combining dense-semantic and sparse-lexical
//! evidence via Reciprocal Rank Fusion.

pub mod engine;
pub mod rrf;

pub use engine::{HybridSearchEngine, SearchHit, SearchOutcome};
