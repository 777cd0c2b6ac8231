pub mod reporter;

pub use reporter::{CachedHealthReporter, HealthReporter};
