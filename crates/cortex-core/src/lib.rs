//! # cortex-core
//!
//! Foundation crate for the Cortex semantic memory engine.
//! Defines the shared data model, per-domain error types, trait contracts
//! implemented by the other crates, and environment-driven configuration.
//! Every other crate in the workspace depends on this one.

pub mod config;
pub mod constants;
pub mod errors;
pub mod memory;
pub mod models;
pub mod traits;

pub use config::CortexConfig;
pub use errors::{CortexError, CortexResult, ErrorKind};
pub use memory::{ContentType, EmbeddingRecord, MemoryEntry};
