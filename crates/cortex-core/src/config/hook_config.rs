use std::collections::HashSet;
use std::path::PathBuf;

use super::{env_bool, env_or};
use crate::constants::DEFAULT_HOOK_TIMEOUT_SECS;

/// Controls how much a hook writes to stderr. `CORTEX_DEBUG` forces
/// `Verbose` regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackLevel {
    Silent,
    Minimal,
    Verbose,
}

impl std::str::FromStr for FeedbackLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" => Ok(FeedbackLevel::Silent),
            "minimal" => Ok(FeedbackLevel::Minimal),
            "verbose" => Ok(FeedbackLevel::Verbose),
            other => Err(format!("unknown feedback level: {other}")),
        }
    }
}

/// Process-local snapshot of hook-runtime configuration, read once at
/// `main()` entry (§6) and never mutated.
#[derive(Debug, Clone)]
pub struct HookConfig {
    pub hooks_enabled: bool,
    pub disabled_hooks: HashSet<String>,
    pub feedback_level: FeedbackLevel,
    pub debug: bool,
    pub docs_timeout_secs: u64,
    pub timeout_secs: u64,
    pub log_dir: PathBuf,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            hooks_enabled: true,
            disabled_hooks: HashSet::new(),
            feedback_level: FeedbackLevel::Minimal,
            debug: false,
            docs_timeout_secs: 5,
            timeout_secs: DEFAULT_HOOK_TIMEOUT_SECS,
            log_dir: PathBuf::from(".cortex/logs"),
        }
    }
}

impl HookConfig {
    pub fn from_env() -> Self {
        let d = Self::default();
        let debug = env_bool("CORTEX_DEBUG", d.debug);
        let feedback_level = if debug {
            FeedbackLevel::Verbose
        } else {
            std::env::var("CORTEX_FEEDBACK_LEVEL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(d.feedback_level)
        };
        Self {
            hooks_enabled: env_bool("CORTEX_HOOKS_ENABLED", d.hooks_enabled),
            disabled_hooks: HashSet::new(),
            feedback_level,
            debug,
            docs_timeout_secs: env_or("CORTEX_DOCS_TIMEOUT", d.docs_timeout_secs),
            timeout_secs: d.timeout_secs,
            log_dir: std::env::var("CORTEX_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(d.log_dir),
        }
    }

    /// Whether a specific hook (by event name, e.g. `pre-tool-use`) is
    /// enabled, honoring both the global switch and `CORTEX_HOOK_<NAME>`.
    pub fn hook_enabled(&self, event_name: &str) -> bool {
        if !self.hooks_enabled {
            return false;
        }
        let var = format!(
            "CORTEX_HOOK_{}",
            event_name.to_uppercase().replace('-', "_")
        );
        env_bool(&var, true)
    }
}
