use serde::{Deserialize, Serialize};

/// Tagged variant describing what kind of artifact a [`super::MemoryEntry`]
/// captures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    Code,
    Documentation,
    Context,
    Output,
    Error,
    Decision,
    Learning,
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentType::Code => "code",
            ContentType::Documentation => "documentation",
            ContentType::Context => "context",
            ContentType::Output => "output",
            ContentType::Error => "error",
            ContentType::Decision => "decision",
            ContentType::Learning => "learning",
        }
    }
}

impl std::str::FromStr for ContentType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "code" => Ok(ContentType::Code),
            "documentation" => Ok(ContentType::Documentation),
            "context" => Ok(ContentType::Context),
            "output" => Ok(ContentType::Output),
            "error" => Ok(ContentType::Error),
            "decision" => Ok(ContentType::Decision),
            "learning" => Ok(ContentType::Learning),
            other => Err(format!("unknown content_type: {other}")),
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
