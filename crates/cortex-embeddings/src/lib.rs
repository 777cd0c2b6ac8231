//! # cortex-embeddings
//!
//! Component A: turns text into a dense vector and amortizes the cost of a
//! slow remote embedder over a bounded, content-addressed LRU cache.

mod backend;
mod cache;
mod client;
mod rate_limit;

pub use backend::{EmbedderBackend, HttpEmbedder, StubEmbedder};
pub use cache::LruEmbeddingCache;
pub use client::EmbeddingClient;
pub use rate_limit::RateLimiter;

/// Render the SHA-256 cache key for the given text, as lowercase hex.
/// Computed over the exact UTF-8 bytes sent to the embedder (§4.1 Keying).
pub fn cache_key(text: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_is_deterministic_and_full_width() {
        let a = cache_key("hello world");
        let b = cache_key("hello world");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn cache_key_differs_on_whitespace() {
        assert_ne!(cache_key("hello world"), cache_key("hello world "));
    }
}
