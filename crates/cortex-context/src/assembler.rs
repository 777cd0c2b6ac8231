//! Component D: greedy token-budget packing of hybrid search results into
//! a single injectable text block (§4.4).

use cortex_core::config::ContextConfig;
pub use cortex_core::config::ContextStrategy;
use cortex_core::memory::MemoryEntry;
use cortex_core::models::SessionContext;
use cortex_core::traits::SearchFilter;
use cortex_retrieval::HybridSearchEngine;

use crate::tokenizer::TokenCounter;

const DELIMITER: &str = "\n---\n";

#[derive(Debug, Clone)]
pub struct AssembledContext {
    pub text: String,
    pub included_entry_ids: Vec<String>,
    pub estimated_tokens: usize,
    pub sources: Vec<String>,
}

pub struct ContextAssembler<'a> {
    search: &'a HybridSearchEngine,
    counter: Box<dyn TokenCounter>,
    config: ContextConfig,
}

impl<'a> ContextAssembler<'a> {
    pub fn new(search: &'a HybridSearchEngine, counter: Box<dyn TokenCounter>, config: ContextConfig) -> Self {
        Self { search, counter, config }
    }

    pub fn assemble(
        &self,
        query: &str,
        budget_tokens: usize,
        strategy: ContextStrategy,
        session: Option<&mut SessionContext>,
    ) -> cortex_core::errors::CortexResult<AssembledContext> {
        let outcome = self.search.search(query, self.config.candidate_pool, &SearchFilter::default())?;

        let mut candidates: Vec<MemoryEntry> = outcome
            .hits
            .into_iter()
            .map(|h| h.entry)
            .collect();

        if let Some(session) = session.as_ref() {
            candidates.retain(|e| !session.is_sent(&e.id));
        }

        match strategy {
            ContextStrategy::Relevance => {}
            ContextStrategy::Recency => {
                candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            ContextStrategy::Diverse => {
                // Relevance order is preserved; per-type caps are enforced
                // during the greedy pass below instead of re-sorting here.
            }
        }

        let assembled = self.pack(&candidates, budget_tokens, strategy);

        if let Some(session) = session {
            for id in &assembled.included_entry_ids {
                session.mark_sent(id);
            }
        }

        Ok(assembled)
    }

    fn pack(&self, candidates: &[MemoryEntry], budget_tokens: usize, strategy: ContextStrategy) -> AssembledContext {
        const DIVERSE_PER_TYPE_CAP: usize = 3;

        let mut included_ids = Vec::new();
        let mut sections = Vec::new();
        let mut sources = Vec::new();
        let mut total_tokens = 0usize;
        let mut per_type_count: std::collections::HashMap<cortex_core::memory::ContentType, usize> =
            std::collections::HashMap::new();

        for entry in candidates {
            if strategy == ContextStrategy::Diverse {
                let count = per_type_count.entry(entry.content_type).or_insert(0);
                if *count >= DIVERSE_PER_TYPE_CAP {
                    continue;
                }
            }

            let formatted = format_entry(entry);
            let tokens = self.counter.count(&formatted);

            if total_tokens + tokens <= budget_tokens {
                total_tokens += tokens;
                included_ids.push(entry.id.clone());
                sections.push(formatted);
                if let Some(tool) = &entry.source_tool {
                    sources.push(tool.clone());
                }
                if strategy == ContextStrategy::Diverse {
                    *per_type_count.get_mut(&entry.content_type).unwrap() += 1;
                }
            } else if sections.is_empty() && budget_tokens > 0 {
                // Nothing has fit yet: truncate this one entry to fit rather
                // than returning an empty context.
                let truncated = truncate_to_budget(&formatted, budget_tokens, self.counter.as_ref());
                total_tokens = self.counter.count(&truncated);
                included_ids.push(entry.id.clone());
                sections.push(truncated);
                if let Some(tool) = &entry.source_tool {
                    sources.push(tool.clone());
                }
                break;
            }
        }

        AssembledContext {
            text: sections.join(DELIMITER),
            included_entry_ids: included_ids,
            estimated_tokens: total_tokens,
            sources,
        }
    }
}

fn format_entry(entry: &MemoryEntry) -> String {
    let mut header = format!("[{}", entry.content_type.as_str());
    if let Some(tool) = &entry.source_tool {
        header.push_str(&format!(" via {tool}"));
    }
    if let Some(path) = &entry.file_path {
        header.push_str(&format!(" @ {path}"));
    }
    header.push(']');
    format!("{header}\n{}", entry.content)
}

/// Binary-search the largest character-length prefix of `text` whose
/// estimated token count fits `budget_tokens`.
fn truncate_to_budget(text: &str, budget_tokens: usize, counter: &dyn TokenCounter) -> String {
    if counter.count(text) <= budget_tokens {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let (mut lo, mut hi) = (0usize, chars.len());
    while lo < hi {
        let mid = (lo + hi + 1) / 2;
        let candidate: String = chars[..mid].iter().collect();
        if counter.count(&candidate) <= budget_tokens {
            lo = mid;
        } else {
            hi = mid - 1;
        }
    }
    chars[..lo].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::HeuristicCounter;
    use cortex_core::memory::ContentType;
    use std::sync::Arc;

    fn engine_with_entries(entries: &[(&str, ContentType)]) -> (Arc<cortex_storage::StorageEngine>, Arc<cortex_embeddings::EmbeddingClient>) {
        let storage = Arc::new(cortex_storage::StorageEngine::open_in_memory().unwrap());
        for (content, ct) in entries {
            let entry = MemoryEntry::new(*content, *ct, []);
            storage.insert(&entry, None).unwrap();
        }
        let backend = cortex_embeddings::StubEmbedder::new(2);
        backend.set_failing(true);
        let client = Arc::new(cortex_embeddings::EmbeddingClient::new(
            Box::new(backend),
            cortex_core::config::EmbeddingConfig { max_attempts: 1, ..Default::default() },
        ));
        (storage, client)
    }

    #[test]
    fn greedy_pack_respects_budget() {
        let (storage, embedder) = engine_with_entries(&[
            ("short memory about pytest", ContentType::Code),
            ("another memory about pytest fixtures in depth", ContentType::Code),
        ]);
        let search = HybridSearchEngine::new(storage, embedder, Default::default());
        let assembler = ContextAssembler::new(&search, Box::new(HeuristicCounter), Default::default());

        let result = assembler
            .assemble("pytest", 5, ContextStrategy::Relevance, None)
            .unwrap();

        assert!(result.estimated_tokens <= 5 || result.included_entry_ids.len() == 1);
    }

    #[test]
    fn session_dedup_skips_already_sent() {
        let (storage, embedder) = engine_with_entries(&[("pytest fixtures", ContentType::Code)]);
        let search = HybridSearchEngine::new(storage, embedder, Default::default());
        let assembler = ContextAssembler::new(&search, Box::new(HeuristicCounter), Default::default());

        let mut session = SessionContext::new("s1", 1000);
        let first = assembler.assemble("pytest", 1000, ContextStrategy::Relevance, Some(&mut session)).unwrap();
        assert_eq!(first.included_entry_ids.len(), 1);

        let second = assembler.assemble("pytest", 1000, ContextStrategy::Relevance, Some(&mut session)).unwrap();
        assert!(second.included_entry_ids.is_empty());
    }
}
