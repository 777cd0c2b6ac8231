use cortex_core::memory::normalize_keywords;
use cortex_core::{ContentType, EmbeddingRecord, MemoryEntry};

#[test]
fn new_entry_normalizes_keywords_and_defaults_optional_fields() {
    let entry = MemoryEntry::new(
        "fn main() {}",
        ContentType::Code,
        ["  Rust ".to_string(), "RUST".to_string(), "".to_string()],
    );
    assert_eq!(entry.keywords.len(), 1);
    assert!(entry.keywords.contains("rust"));
    assert!(entry.source_tool.is_none());
    assert!(entry.file_path.is_none());
}

#[test]
fn with_source_tool_and_with_file_path_are_chainable() {
    let entry = MemoryEntry::new("x", ContentType::Decision, [])
        .with_source_tool("edit")
        .with_file_path("src/lib.rs");
    assert_eq!(entry.source_tool.as_deref(), Some("edit"));
    assert_eq!(entry.file_path.as_deref(), Some("src/lib.rs"));
}

#[test]
fn content_type_round_trips_through_its_string_form() {
    for ct in [
        ContentType::Code,
        ContentType::Documentation,
        ContentType::Context,
        ContentType::Output,
        ContentType::Error,
        ContentType::Decision,
        ContentType::Learning,
    ] {
        let parsed: ContentType = ct.as_str().parse().unwrap();
        assert_eq!(parsed, ct);
    }
}

#[test]
fn content_type_rejects_unknown_strings() {
    assert!("not-a-real-type".parse::<ContentType>().is_err());
}

#[test]
fn content_type_serializes_as_snake_case() {
    let json = serde_json::to_string(&ContentType::Documentation).unwrap();
    assert_eq!(json, "\"documentation\"");
}

#[test]
fn memory_entry_round_trips_through_json() {
    let entry = MemoryEntry::new("payload", ContentType::Learning, ["tag".to_string()]);
    let json = serde_json::to_string(&entry).unwrap();
    let back: MemoryEntry = serde_json::from_str(&json).unwrap();
    assert_eq!(back, entry);
}

#[test]
fn embedding_record_is_independent_of_its_entry_and_serializes() {
    let entry = MemoryEntry::new("payload", ContentType::Output, []);
    let record = EmbeddingRecord {
        entry_id: entry.id.clone(),
        vector: vec![0.1, 0.2, 0.3],
        model_id: "stub-v1".to_string(),
    };
    let json = serde_json::to_string(&record).unwrap();
    let back: EmbeddingRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back.entry_id, entry.id);
    assert_eq!(back.vector, vec![0.1, 0.2, 0.3]);
}

#[test]
fn normalize_keywords_dedupes_across_case_and_whitespace() {
    let kws = normalize_keywords(
        ["Async".to_string(), " async ".to_string(), "ASYNC".to_string()]
            .into_iter(),
    );
    assert_eq!(kws.len(), 1);
    assert!(kws.contains("async"));
}
