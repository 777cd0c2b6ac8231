//! Span definitions per operation. Each span carries duration and
//! metadata via the `tracing` crate.

/// Create a hybrid search span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr) => {
        tracing::info_span!("cortex.retrieval", query = %$query)
    };
}

/// Create an embedding span.
#[macro_export]
macro_rules! embedding_span {
    ($provider:expr, $dimension:expr) => {
        tracing::info_span!("cortex.embedding", provider = %$provider, dimension = $dimension)
    };
}

/// Create a hook dispatch span.
#[macro_export]
macro_rules! hook_span {
    ($event:expr) => {
        tracing::info_span!("cortex.hook", event = %$event)
    };
}

pub mod names {
    pub const RETRIEVAL: &str = "cortex.retrieval";
    pub const EMBEDDING: &str = "cortex.embedding";
    pub const HOOK: &str = "cortex.hook";
}
