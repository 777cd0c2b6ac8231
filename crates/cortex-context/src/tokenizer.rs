//! Token estimation: `tiktoken-rs` when a BPE table is loadable, falling
//! back to a 4-chars-per-token heuristic otherwise (§4.4 Algorithm step 3).

use cortex_core::constants::FALLBACK_CHARS_PER_TOKEN;

pub trait TokenCounter: Send + Sync {
    fn count(&self, text: &str) -> usize;
}

/// Wraps a `tiktoken-rs` BPE table matching the embedding/assistant model's
/// tokenizer family.
pub struct TiktokenCounter {
    bpe: tiktoken_rs::CoreBPE,
}

impl TiktokenCounter {
    /// Loads the `cl100k_base` table (GPT-3.5/4 family). Returns `None` if
    /// the table cannot be loaded, so callers fall back to the heuristic.
    pub fn load() -> Option<Self> {
        tiktoken_rs::cl100k_base().ok().map(|bpe| Self { bpe })
    }
}

impl TokenCounter for TiktokenCounter {
    fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }
}

/// 4-characters-per-token heuristic, used when no tokenizer table is
/// loaded.
pub struct HeuristicCounter;

impl TokenCounter for HeuristicCounter {
    fn count(&self, text: &str) -> usize {
        text.chars().count().div_ceil(FALLBACK_CHARS_PER_TOKEN)
    }
}

/// Picks `TiktokenCounter` when available, else the heuristic. This is the
/// counter callers should construct by default.
pub fn default_counter() -> Box<dyn TokenCounter> {
    match TiktokenCounter::load() {
        Some(c) => Box::new(c),
        None => Box::new(HeuristicCounter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn heuristic_rounds_up() {
        let counter = HeuristicCounter;
        assert_eq!(counter.count("abcd"), 1);
        assert_eq!(counter.count("abcde"), 2);
        assert_eq!(counter.count(""), 0);
    }
}
