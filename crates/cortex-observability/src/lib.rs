//! Ambient observability: health reporting, degradation tracking, query
//! logging, and structured tracing setup.

pub mod degradation;
pub mod engine;
pub mod health;
pub mod query_log;
pub mod tracing_setup;

pub use engine::ObservabilityEngine;
