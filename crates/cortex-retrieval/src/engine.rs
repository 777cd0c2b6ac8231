//! Hybrid search engine: fans out to vector + lexical search in parallel,
//! fuses with RRF, and degrades gracefully when either branch fails (§4.3).

use std::sync::Mutex;

use cortex_core::config::RetrievalConfig;
use cortex_core::errors::CortexResult;
use cortex_core::memory::MemoryEntry;
use cortex_core::models::DegradationEvent;
use cortex_core::traits::{IEmbeddingProvider, IMemoryStorage, SearchFilter};

use crate::rrf::{self, FusedCandidate};

/// One fused search hit plus enough provenance for the caller (context
/// assembler, hook handlers) to act on it without re-querying storage.
#[derive(Debug, Clone)]
pub struct SearchHit {
    pub entry: MemoryEntry,
    pub score: f64,
}

#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub hits: Vec<SearchHit>,
    pub degraded: bool,
}

pub struct HybridSearchEngine {
    storage: std::sync::Arc<dyn IMemoryStorage>,
    embedder: std::sync::Arc<dyn IEmbeddingProvider>,
    config: RetrievalConfig,
    degradations: Mutex<Vec<DegradationEvent>>,
}

impl HybridSearchEngine {
    pub fn new(
        storage: std::sync::Arc<dyn IMemoryStorage>,
        embedder: std::sync::Arc<dyn IEmbeddingProvider>,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            storage,
            embedder,
            config,
            degradations: Mutex::new(Vec::new()),
        }
    }

    pub fn drain_degradations(&self) -> Vec<DegradationEvent> {
        std::mem::take(&mut *self.degradations.lock().expect("poisoned"))
    }

    fn record_degradation(&self, failure: &str, fallback: &str) {
        tracing::warn!(failure, fallback, "hybrid search degraded");
        self.degradations
            .lock()
            .expect("poisoned")
            .push(DegradationEvent::new("hybrid_search", failure, fallback));
    }

    /// Run RRF-fused search for `query_text`, returning up to `limit` hits
    /// with score `>= relevance_threshold` (if set above 0).
    pub fn search(
        &self,
        query_text: &str,
        limit: usize,
        filter: &SearchFilter,
    ) -> CortexResult<SearchOutcome> {
        let pool_size = (limit * self.config.candidate_pool_multiplier).max(limit);

        let vector_result = match self.embedder.embed(query_text) {
            Ok(vector) => Some(self.storage.vector_search(&vector, pool_size, filter)),
            Err(e) => {
                self.record_degradation(&e.to_string(), "lexical_only");
                None
            }
        };

        let lexical_result = self.storage.lexical_search(query_text, pool_size, filter);

        let (vector_ranked, lexical_ranked, degraded) = match (vector_result, lexical_result) {
            (Some(Ok(v)), Ok(l)) => (v, l, false),
            (Some(Ok(v)), Err(e)) => {
                self.record_degradation(&e.to_string(), "vector_only");
                (v, Vec::new(), true)
            }
            (Some(Err(e)), Ok(l)) => {
                self.record_degradation(&e.to_string(), "lexical_only");
                (Vec::new(), l, true)
            }
            (Some(Err(_)), Err(_)) => return Ok(SearchOutcome { hits: Vec::new(), degraded: true }),
            (None, Ok(l)) => (Vec::new(), l, true),
            (None, Err(e)) => {
                self.record_degradation(&e.to_string(), "none");
                return Ok(SearchOutcome { hits: Vec::new(), degraded: true });
            }
        };

        let mut fused = rrf::fuse(
            &vector_ranked,
            &lexical_ranked,
            self.config.rrf_c,
            self.config.weight_vector,
            self.config.weight_lexical,
        );

        // Resolve entries up front so the created_at tie-break and the
        // final hit list share one storage round trip per id.
        let mut entries = std::collections::HashMap::new();
        for id in fused.iter().map(|c| c.id.clone()).collect::<Vec<_>>() {
            if let Some(entry) = self.storage.get(&id)? {
                entries.insert(id, entry);
            }
        }
        fused.retain(|c| entries.contains_key(&c.id));

        let epoch = chrono::DateTime::<chrono::Utc>::from_timestamp(0, 0).unwrap();
        rrf::sort_deterministic(&mut fused, |id| {
            entries.get(id).map(|e: &MemoryEntry| e.created_at).unwrap_or(epoch)
        });

        let hits = build_hits(&fused, &entries, limit, self.config.relevance_threshold);
        Ok(SearchOutcome { hits, degraded })
    }
}

fn build_hits(
    fused: &[FusedCandidate],
    entries: &std::collections::HashMap<String, MemoryEntry>,
    limit: usize,
    relevance_threshold: f64,
) -> Vec<SearchHit> {
    fused
        .iter()
        .take(limit)
        .filter(|c| c.score >= relevance_threshold)
        .filter_map(|c| {
            entries.get(&c.id).map(|entry| SearchHit {
                entry: entry.clone(),
                score: c.score,
            })
        })
        .collect()
}
