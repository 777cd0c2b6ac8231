//! `HookContext` — the single explicit bundle of handles built once in
//! `main()` and threaded by reference through a hook's workflow (§4.5,
//! §9 redesign note: no module-level singletons).

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cortex_context::{default_counter, ContextAssembler};
use cortex_core::config::CortexConfig;
use cortex_core::errors::CortexResult;
use cortex_core::traits::{IEmbeddingProvider, IMemoryStorage};
use cortex_embeddings::{EmbeddingClient, HttpEmbedder};
use cortex_observability::ObservabilityEngine;
use cortex_retrieval::HybridSearchEngine;
use cortex_session::{SessionManager, SessionStore};
use cortex_storage::StorageEngine;

use crate::docs_oracle::{DocsOracle, NullDocsOracle};
use crate::marker::MarkerFile;

pub struct HookContext {
    pub config: CortexConfig,
    pub storage: Arc<dyn IMemoryStorage>,
    pub embedder: Arc<dyn IEmbeddingProvider>,
    pub search: HybridSearchEngine,
    pub sessions: SessionManager,
    pub observability: Mutex<ObservabilityEngine>,
    pub docs: Box<dyn DocsOracle>,
    pub marker: MarkerFile,
}

impl HookContext {
    /// Build every handle this process needs, once. `project_root` is the
    /// boundary `StorageConfig::db_path` must stay within.
    pub fn build(config: CortexConfig, project_root: &Path) -> CortexResult<Self> {
        let storage: Arc<dyn IMemoryStorage> = if config.storage.db_path.to_str() == Some(":memory:") {
            Arc::new(StorageEngine::open_in_memory()?)
        } else {
            Arc::new(StorageEngine::open(
                &config.storage.db_path,
                project_root,
                config.storage.read_pool_size,
                config.storage.busy_timeout_ms,
            )?)
        };

        let endpoint = std::env::var("CORTEX_EMBEDDING_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:8080/embed".to_string());
        let model_id = std::env::var("CORTEX_EMBEDDING_MODEL").unwrap_or_else(|_| "default".to_string());
        let backend = Box::new(HttpEmbedder::new(
            endpoint,
            model_id,
            Duration::from_secs(config.embedding.timeout_secs),
        ));
        let embedder: Arc<dyn IEmbeddingProvider> =
            Arc::new(EmbeddingClient::new(backend, config.embedding.clone()));

        let search = HybridSearchEngine::new(storage.clone(), embedder.clone(), config.retrieval.clone());

        let state_dir = project_root.join(".cortex").join("sessions");
        let sessions = SessionManager::new(SessionStore::new(state_dir));

        let marker_dir = project_root.join(".cortex");
        let marker = MarkerFile::new(marker_dir);

        Ok(Self {
            config,
            storage,
            embedder,
            search,
            sessions,
            observability: Mutex::new(ObservabilityEngine::new()),
            docs: Box::new(NullDocsOracle),
            marker,
        })
    }

    pub fn context_assembler(&self) -> ContextAssembler<'_> {
        ContextAssembler::new(&self.search, default_counter(), self.config.context.clone())
    }

    pub fn log_dir(&self) -> PathBuf {
        self.config.hook.log_dir.clone()
    }
}
