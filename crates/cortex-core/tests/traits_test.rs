use chrono::Utc;
use cortex_core::errors::{CortexResult, EmbedError};
use cortex_core::traits::{CacheStats, IEmbeddingProvider, IMemoryStorage, SearchFilter};
use cortex_core::{ContentType, MemoryEntry};

#[test]
fn cache_stats_hit_rate_handles_no_traffic() {
    let stats = CacheStats::default();
    assert_eq!(stats.hit_rate(), 0.0);
}

#[test]
fn cache_stats_hit_rate_is_hits_over_total() {
    let stats = CacheStats {
        size: 1,
        max_size: 10,
        hits: 3,
        misses: 1,
        evictions: 0,
    };
    assert_eq!(stats.hit_rate(), 0.75);
}

#[test]
fn search_filter_defaults_to_unrestricted() {
    let filter = SearchFilter::default();
    assert!(filter.content_type.is_none());
    assert!(filter.keywords.is_empty());
}

/// A minimal in-memory double exercising the two trait contracts directly,
/// without pulling in a real storage/embedding crate as a dependency.
struct EchoEmbedder;

impl IEmbeddingProvider for EchoEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if text.is_empty() {
            return Err(EmbedError::Rejected { reason: "empty input".into() });
        }
        Ok(vec![text.len() as f32])
    }

    fn stats(&self) -> CacheStats {
        CacheStats::default()
    }

    fn clear(&self) {}
}

struct SingleSlotStorage {
    slot: std::sync::Mutex<Option<MemoryEntry>>,
}

impl IMemoryStorage for SingleSlotStorage {
    fn insert(&self, entry: &MemoryEntry, _vector: Option<&[f32]>) -> CortexResult<String> {
        *self.slot.lock().unwrap() = Some(entry.clone());
        Ok(entry.id.clone())
    }

    fn get(&self, id: &str) -> CortexResult<Option<MemoryEntry>> {
        Ok(self.slot.lock().unwrap().clone().filter(|e| e.id == id))
    }

    fn delete(&self, id: &str) -> CortexResult<()> {
        let mut slot = self.slot.lock().unwrap();
        if slot.as_ref().map(|e| e.id == id).unwrap_or(false) {
            *slot = None;
        }
        Ok(())
    }

    fn lexical_search(
        &self,
        _query_text: &str,
        _limit: usize,
        _filter: &SearchFilter,
    ) -> CortexResult<Vec<(String, f64)>> {
        Ok(vec![])
    }

    fn vector_search(
        &self,
        _query_vector: &[f32],
        _limit: usize,
        _filter: &SearchFilter,
    ) -> CortexResult<Vec<(String, f64)>> {
        Ok(vec![])
    }

    fn scan_recent(
        &self,
        _since: chrono::DateTime<Utc>,
        _limit: usize,
    ) -> CortexResult<Vec<MemoryEntry>> {
        Ok(self.slot.lock().unwrap().clone().into_iter().collect())
    }
}

#[test]
fn embedding_provider_contract_rejects_empty_text() {
    let embedder = EchoEmbedder;
    assert!(embedder.embed("hello").is_ok());
    assert!(matches!(
        embedder.embed(""),
        Err(EmbedError::Rejected { .. })
    ));
}

#[test]
fn storage_contract_insert_then_get_then_delete() {
    let storage = SingleSlotStorage {
        slot: std::sync::Mutex::new(None),
    };
    let entry = MemoryEntry::new("note", ContentType::Context, []);
    let id = storage.insert(&entry, None).unwrap();
    assert_eq!(storage.get(&id).unwrap().unwrap().id, id);
    storage.delete(&id).unwrap();
    assert!(storage.get(&id).unwrap().is_none());
}
