use cortex_core::errors::EmbedError;

/// Raw, uncached, unretried call to an embedder. Implementations translate
/// whatever the concrete embedder does (HTTP call, local model, test stub)
/// into a fixed-dimension vector or an [`EmbedError`].
pub trait EmbedderBackend: Send + Sync {
    fn embed_remote(&self, text: &str) -> Result<Vec<f32>, EmbedError>;
    fn model_id(&self) -> &str;
}

/// Blocking HTTP embedder client. A blocking client is used deliberately:
/// the embedding cache is guarded by a synchronous mutex (see
/// [`crate::cache::LruEmbeddingCache`]), so the backend that feeds it is
/// kept synchronous too rather than mixing sync and async drivers (§9).
pub struct HttpEmbedder {
    client: reqwest::blocking::Client,
    endpoint: String,
    model_id: String,
}

impl HttpEmbedder {
    pub fn new(endpoint: impl Into<String>, model_id: impl Into<String>, timeout: std::time::Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("reqwest client builds");
        Self {
            client,
            endpoint: endpoint.into(),
            model_id: model_id.into(),
        }
    }
}

#[derive(serde::Serialize)]
struct EmbedRequest<'a> {
    input: &'a str,
    model: &'a str,
}

#[derive(serde::Deserialize)]
struct EmbedResponse {
    embedding: Vec<f32>,
}

impl EmbedderBackend for HttpEmbedder {
    fn embed_remote(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&EmbedRequest {
                input: text,
                model: &self.model_id,
            })
            .send()
            .map_err(|e| EmbedError::Unavailable {
                reason: e.to_string(),
            })?;

        if resp.status().is_client_error() {
            return Err(EmbedError::Rejected {
                reason: format!("embedder returned {}", resp.status()),
            });
        }
        if !resp.status().is_success() {
            return Err(EmbedError::Unavailable {
                reason: format!("embedder returned {}", resp.status()),
            });
        }

        let body: EmbedResponse = resp
            .json()
            .map_err(|e| EmbedError::Internal(format!("malformed embedder response: {e}")))?;
        Ok(body.embedding)
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// Deterministic stub backend for tests: returns a fixed-shape vector
/// derived from the input length, after an optional artificial delay, or
/// `Unavailable` when `fail` is set. Mirrors the §8 scenario 1 stub
/// embedder contract.
pub struct StubEmbedder {
    pub dimension: usize,
    pub delay: std::time::Duration,
    pub fail: std::sync::atomic::AtomicBool,
}

impl StubEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension,
            delay: std::time::Duration::from_millis(0),
            fail: std::sync::atomic::AtomicBool::new(false),
        }
    }

    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn set_failing(&self, failing: bool) {
        self.fail.store(failing, std::sync::atomic::Ordering::Relaxed);
    }
}

impl EmbedderBackend for StubEmbedder {
    fn embed_remote(&self, text: &str) -> Result<Vec<f32>, EmbedError> {
        if self.fail.load(std::sync::atomic::Ordering::Relaxed) {
            return Err(EmbedError::Unavailable {
                reason: "stub configured to fail".into(),
            });
        }
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let seed = text.len() as f32;
        Ok((0..self.dimension).map(|i| (seed + i as f32) * 0.001).collect())
    }

    fn model_id(&self) -> &str {
        "stub-embedder-v1"
    }
}
