//! Remote documentation oracle (§4.5 `pre-tool-use`/`user-prompt-submit`
//! step 3a): queried in parallel with hybrid search for libraries
//! detected in tool inputs or prompt text. Optional by construction —
//! every implementation must degrade to an empty result rather than fail
//! the hook.

use cortex_core::errors::CortexResult;

#[derive(Debug, Clone)]
pub struct DocSnippet {
    pub library: String,
    pub text: String,
}

/// Component contract for the docs oracle. A failing or absent oracle is
/// not an error condition for the caller: `lookup` returns `Ok(vec![])`
/// on timeout or transport failure, same as an embedder that degrades to
/// lexical-only (§4.3). Callers that want to know whether the empty
/// result means "no docs" or "oracle unavailable" should rely on a
/// separate `DegradationEvent`, not on this return value.
pub trait DocsOracle: Send + Sync {
    fn lookup(&self, libraries: &[String], timeout: std::time::Duration) -> CortexResult<Vec<DocSnippet>>;
}

/// No-op oracle: this build ships no concrete remote documentation
/// backend (none of the retrieval pack exposes one either), so the seam
/// exists but always reports "nothing found" rather than ever being
/// consulted over the network. A deployment with a real docs service
/// implements `DocsOracle` and swaps it in at `HookContext` construction.
pub struct NullDocsOracle;

impl DocsOracle for NullDocsOracle {
    fn lookup(&self, _libraries: &[String], _timeout: std::time::Duration) -> CortexResult<Vec<DocSnippet>> {
        Ok(Vec::new())
    }
}

/// Scan tool input / prompt text for `use`/`import`/`require`-style
/// library references, capped to a small number of distinct hits. Best
/// effort: false negatives are fine, this only feeds an optional
/// enrichment step.
pub fn detect_libraries(text: &str) -> Vec<String> {
    use std::collections::BTreeSet;

    static PATTERN: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        regex::Regex::new(r#"(?:use|import|require)\s+([A-Za-z0-9_./-]+)"#).expect("valid regex")
    });

    let mut found = BTreeSet::new();
    for cap in re.captures_iter(text) {
        if found.len() >= 5 {
            break;
        }
        found.insert(cap[1].to_string());
    }
    found.into_iter().collect()
}
