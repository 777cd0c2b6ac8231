//! `post-tool-use` ingest path (§4.5 steps 2-3): decide whether a tool
//! invocation produces a memory-worthy artifact, and if so derive its
//! `content_type`, keywords, and tool-source label.

use std::collections::BTreeSet;

use cortex_core::memory::{normalize_keywords, ContentType};
use serde_json::Value;

const NOISE_COMMANDS: &[&str] = &["ls", "pwd", "cat", "echo", "clear", "whoami", "cd"];
const MIN_SHELL_OUTPUT_LEN: usize = 40;
const SOURCE_DOC_EXTENSIONS: &[&str] = &[
    "md", "rs", "py", "ts", "tsx", "js", "jsx", "go", "toml", "yaml", "yml", "json", "txt",
];
const DENYLISTED_DIRS: &[&str] = &["node_modules", "target", ".git", "vendor", "dist", "__pycache__"];
const TOPIC_VOCAB: &[&str] = &[
    "async", "auth", "database", "cache", "api", "test", "error", "config", "migration", "schema",
    "retry", "timeout", "concurrency", "embedding", "index",
];
const MAX_KEYWORDS_PER_CATEGORY: usize = cortex_core::constants::MAX_KEYWORDS_PER_CATEGORY;

#[derive(Debug, Clone)]
pub struct IngestCandidate {
    pub content: String,
    pub content_type: ContentType,
    pub keywords: BTreeSet<String>,
    pub file_path: Option<String>,
}

enum ToolKind {
    FileProducing,
    Shell,
    FileRead,
    TodoUpdate,
    Other,
}

fn classify_tool(tool_name: &str) -> ToolKind {
    match tool_name {
        "Write" | "Edit" | "MultiEdit" => ToolKind::FileProducing,
        "Bash" | "Shell" => ToolKind::Shell,
        "Read" => ToolKind::FileRead,
        "TodoWrite" | "TodoUpdate" => ToolKind::TodoUpdate,
        _ => ToolKind::Other,
    }
}

/// Entry point: `None` means "this invocation is not memory-worthy".
pub fn derive_candidate(tool_name: &str, tool_input: &Value, tool_response: &Value) -> Option<IngestCandidate> {
    match classify_tool(tool_name) {
        ToolKind::FileProducing => file_producing(tool_input),
        ToolKind::Shell => shell(tool_input, tool_response),
        ToolKind::FileRead => file_read(tool_input, tool_response),
        ToolKind::TodoUpdate => todo_update(tool_input),
        ToolKind::Other => None,
    }
}

fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}

fn file_producing(tool_input: &Value) -> Option<IngestCandidate> {
    let path = str_field(tool_input, "file_path").or_else(|| str_field(tool_input, "path"))?;
    let content = str_field(tool_input, "content")
        .or_else(|| str_field(tool_input, "new_string"))
        .unwrap_or_default();

    Some(IngestCandidate {
        content: format!("{path}\n\n{content}"),
        content_type: ContentType::Code,
        keywords: keywords_for_path(path),
        file_path: Some(path.to_string()),
    })
}

fn shell(tool_input: &Value, tool_response: &Value) -> Option<IngestCandidate> {
    let command = str_field(tool_input, "command")?;
    let first_word = command.split_whitespace().next().unwrap_or("");
    if NOISE_COMMANDS.contains(&first_word) {
        return None;
    }

    let output = str_field(tool_response, "output")
        .or_else(|| str_field(tool_response, "stdout"))
        .unwrap_or_default();
    if output.trim().len() < MIN_SHELL_OUTPUT_LEN {
        return None;
    }

    Some(IngestCandidate {
        content: format!("$ {command}\n{output}"),
        content_type: ContentType::Output,
        keywords: keywords_from_text(command),
        file_path: None,
    })
}

fn file_read(tool_input: &Value, tool_response: &Value) -> Option<IngestCandidate> {
    let path = str_field(tool_input, "file_path").or_else(|| str_field(tool_input, "path"))?;
    let ext = path.rsplit('.').next().unwrap_or("");
    if !SOURCE_DOC_EXTENSIONS.contains(&ext) {
        return None;
    }
    if DENYLISTED_DIRS.iter().any(|d| path.contains(d)) {
        return None;
    }

    let content = str_field(tool_response, "content").unwrap_or_default();
    Some(IngestCandidate {
        content: format!("{path}\n\n{content}"),
        content_type: ContentType::Documentation,
        keywords: keywords_for_path(path),
        file_path: Some(path.to_string()),
    })
}

fn todo_update(tool_input: &Value) -> Option<IngestCandidate> {
    let rendered = serde_json::to_string_pretty(tool_input).unwrap_or_default();
    Some(IngestCandidate {
        content: rendered.clone(),
        content_type: ContentType::Context,
        keywords: keywords_from_text(&rendered),
        file_path: Some("todo://session".to_string()),
    })
}

fn language_from_extension(ext: &str) -> Option<&'static str> {
    match ext {
        "rs" => Some("rust"),
        "py" => Some("python"),
        "ts" | "tsx" => Some("typescript"),
        "js" | "jsx" => Some("javascript"),
        "go" => Some("go"),
        "md" => Some("markdown"),
        _ => None,
    }
}

fn keywords_for_path(path: &str) -> BTreeSet<String> {
    let file_stem = std::path::Path::new(path)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(path);
    let ext = path.rsplit('.').next().unwrap_or("");

    let mut raw: Vec<String> = file_stem
        .split(|c: char| !c.is_alphanumeric())
        .filter(|s| !s.is_empty())
        .take(MAX_KEYWORDS_PER_CATEGORY)
        .map(String::from)
        .collect();

    if let Some(lang) = language_from_extension(ext) {
        raw.push(lang.to_string());
    }

    raw.extend(topic_matches(path));
    normalize_keywords(raw)
}

fn keywords_from_text(text: &str) -> BTreeSet<String> {
    let lower = text.to_lowercase();
    let mut raw: Vec<String> = lower
        .split_whitespace()
        .filter(|w| w.len() > 2)
        .take(MAX_KEYWORDS_PER_CATEGORY)
        .map(String::from)
        .collect();
    raw.extend(topic_matches(text));
    normalize_keywords(raw)
}

fn topic_matches(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    TOPIC_VOCAB
        .iter()
        .filter(|topic| lower.contains(*topic))
        .take(MAX_KEYWORDS_PER_CATEGORY)
        .map(|s| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_command_is_not_captured() {
        let input = serde_json::json!({"command": "ls -la"});
        let response = serde_json::json!({"output": "a very long listing of files that exceeds the threshold easily"});
        assert!(derive_candidate("Bash", &input, &response).is_none());
    }

    #[test]
    fn short_shell_output_is_not_captured() {
        let input = serde_json::json!({"command": "git status"});
        let response = serde_json::json!({"output": "clean"});
        assert!(derive_candidate("Bash", &input, &response).is_none());
    }

    #[test]
    fn substantial_shell_output_is_captured_as_output() {
        let input = serde_json::json!({"command": "cargo test --all"});
        let response = serde_json::json!({"output": "running 42 tests ... test result: ok. 42 passed; 0 failed; async auth database"});
        let candidate = derive_candidate("Bash", &input, &response).unwrap();
        assert_eq!(candidate.content_type, ContentType::Output);
        assert!(candidate.keywords.contains("async"));
    }

    #[test]
    fn write_tool_is_captured_as_code_with_file_keywords() {
        let input = serde_json::json!({"file_path": "src/auth_cache.rs", "content": "fn login() {}"});
        let candidate = derive_candidate("Write", &input, &Value::Null).unwrap();
        assert_eq!(candidate.content_type, ContentType::Code);
        assert!(candidate.keywords.contains("rust"));
        assert!(candidate.keywords.contains("auth") || candidate.keywords.contains("cache"));
    }

    #[test]
    fn read_under_denylisted_dir_is_skipped() {
        let input = serde_json::json!({"file_path": "node_modules/pkg/index.md"});
        let response = serde_json::json!({"content": "docs"});
        assert!(derive_candidate("Read", &input, &response).is_none());
    }

    #[test]
    fn read_of_non_doc_extension_is_skipped() {
        let input = serde_json::json!({"file_path": "assets/logo.png"});
        let response = serde_json::json!({"content": "binary"});
        assert!(derive_candidate("Read", &input, &response).is_none());
    }

    #[test]
    fn todo_update_is_always_captured() {
        let input = serde_json::json!({"todos": [{"content": "fix bug", "status": "pending"}]});
        let candidate = derive_candidate("TodoWrite", &input, &Value::Null).unwrap();
        assert_eq!(candidate.content_type, ContentType::Context);
        assert_eq!(candidate.file_path.as_deref(), Some("todo://session"));
    }
}
