//! Decodes the single stdin JSON object into the tagged `HookEvent` sum
//! type (§4.5). Unknown/missing required fields are a `UserInput` error,
//! never a panic.

use std::path::{Path, PathBuf};

use cortex_core::errors::{CortexError, CortexResult, HookError};
use serde::Deserialize;
use serde_json::Value;

/// Untyped shape of the JSON object every hook invocation receives on
/// standard input. Individual fields are required or optional depending
/// on `event`; that's enforced in `HookEvent::try_from`, not here.
#[derive(Debug, Deserialize)]
struct RawHookInput {
    event: String,
    session_id: Option<String>,
    cwd: Option<String>,
    tool_name: Option<String>,
    tool_input: Option<Value>,
    tool_response: Option<Value>,
    prompt: Option<String>,
}

#[derive(Debug, Clone)]
pub enum HookEvent {
    PreToolUse {
        session_id: String,
        cwd: PathBuf,
        tool_name: String,
        tool_input: Value,
    },
    PostToolUse {
        session_id: String,
        cwd: PathBuf,
        tool_name: String,
        tool_input: Value,
        tool_response: Value,
    },
    UserPromptSubmit {
        session_id: String,
        cwd: PathBuf,
        prompt: String,
    },
    SessionStart {
        session_id: String,
        cwd: PathBuf,
    },
    SessionEnd {
        session_id: String,
        cwd: PathBuf,
    },
    PreCompact {
        session_id: String,
        cwd: PathBuf,
    },
}

impl HookEvent {
    pub fn name(&self) -> &'static str {
        match self {
            HookEvent::PreToolUse { .. } => "pre-tool-use",
            HookEvent::PostToolUse { .. } => "post-tool-use",
            HookEvent::UserPromptSubmit { .. } => "user-prompt-submit",
            HookEvent::SessionStart { .. } => "session-start",
            HookEvent::SessionEnd { .. } => "session-end",
            HookEvent::PreCompact { .. } => "pre-compact",
        }
    }

    pub fn session_id(&self) -> &str {
        match self {
            HookEvent::PreToolUse { session_id, .. }
            | HookEvent::PostToolUse { session_id, .. }
            | HookEvent::UserPromptSubmit { session_id, .. }
            | HookEvent::SessionStart { session_id, .. }
            | HookEvent::SessionEnd { session_id, .. }
            | HookEvent::PreCompact { session_id, .. } => session_id,
        }
    }

    pub fn cwd(&self) -> &Path {
        match self {
            HookEvent::PreToolUse { cwd, .. }
            | HookEvent::PostToolUse { cwd, .. }
            | HookEvent::UserPromptSubmit { cwd, .. }
            | HookEvent::SessionStart { cwd, .. }
            | HookEvent::SessionEnd { cwd, .. }
            | HookEvent::PreCompact { cwd, .. } => cwd,
        }
    }

    /// Parse the raw stdin payload straight into a validated event.
    pub fn from_stdin_json(raw: &str) -> CortexResult<Self> {
        let parsed: RawHookInput = serde_json::from_str(raw)
            .map_err(|e| HookError::MalformedEvent(e.to_string()))?;
        Self::try_from(parsed)
    }

    /// Best-effort peek at the `event` field alone, used to pick the
    /// per-hook-name log file before the full payload is validated.
    pub fn peek_event_name(raw: &str) -> Option<String> {
        serde_json::from_str::<Value>(raw)
            .ok()?
            .get("event")?
            .as_str()
            .map(String::from)
    }
}

fn missing(field: &str) -> CortexError {
    HookError::MissingField(field.to_string()).into()
}

impl TryFrom<RawHookInput> for HookEvent {
    type Error = CortexError;

    fn try_from(raw: RawHookInput) -> CortexResult<Self> {
        let session_id = raw.session_id.ok_or_else(|| missing("session_id"))?;
        let cwd = raw.cwd.map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));

        match raw.event.as_str() {
            "pre-tool-use" => Ok(HookEvent::PreToolUse {
                session_id,
                cwd,
                tool_name: raw.tool_name.ok_or_else(|| missing("tool_name"))?,
                tool_input: raw.tool_input.unwrap_or(Value::Null),
            }),
            "post-tool-use" => Ok(HookEvent::PostToolUse {
                session_id,
                cwd,
                tool_name: raw.tool_name.ok_or_else(|| missing("tool_name"))?,
                tool_input: raw.tool_input.unwrap_or(Value::Null),
                tool_response: raw.tool_response.unwrap_or(Value::Null),
            }),
            "user-prompt-submit" => Ok(HookEvent::UserPromptSubmit {
                session_id,
                cwd,
                prompt: raw.prompt.ok_or_else(|| missing("prompt"))?,
            }),
            "session-start" => Ok(HookEvent::SessionStart { session_id, cwd }),
            "session-end" => Ok(HookEvent::SessionEnd { session_id, cwd }),
            "pre-compact" => Ok(HookEvent::PreCompact { session_id, cwd }),
            other => Err(HookError::MalformedEvent(format!("unknown event: {other}")).into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_pre_tool_use() {
        let raw = r#"{"event":"pre-tool-use","session_id":"s1","cwd":"/tmp","tool_name":"Write","tool_input":{"path":"a.rs"}}"#;
        let event = HookEvent::from_stdin_json(raw).unwrap();
        assert_eq!(event.name(), "pre-tool-use");
        assert_eq!(event.session_id(), "s1");
    }

    #[test]
    fn missing_session_id_is_user_input_error() {
        let raw = r#"{"event":"session-start"}"#;
        let err = HookEvent::from_stdin_json(raw).unwrap_err();
        assert_eq!(err.kind(), cortex_core::ErrorKind::UserInput);
    }

    #[test]
    fn unknown_event_is_malformed() {
        let raw = r#"{"event":"unheard-of","session_id":"s1"}"#;
        let err = HookEvent::from_stdin_json(raw).unwrap_err();
        assert_eq!(err.kind(), cortex_core::ErrorKind::UserInput);
    }

    #[test]
    fn post_tool_use_defaults_missing_response_to_null() {
        let raw = r#"{"event":"post-tool-use","session_id":"s1","tool_name":"Write","tool_input":{}}"#;
        let event = HookEvent::from_stdin_json(raw).unwrap();
        match event {
            HookEvent::PostToolUse { tool_response, .. } => assert!(tool_response.is_null()),
            other => panic!("expected PostToolUse, got {other:?}"),
        }
    }
}
