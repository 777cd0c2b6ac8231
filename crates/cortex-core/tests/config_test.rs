//! Environment-driven config construction. Each test scopes the env vars
//! it touches to avoid bleeding into other tests in the same binary.

use std::sync::Mutex;

use cortex_core::config::{ContextStrategy, FeedbackLevel};
use cortex_core::CortexConfig;

// `std::env::set_var` affects the whole process; serialize the tests that
// touch it so they don't race against each other under the default
// multi-threaded test runner.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for (k, v) in vars {
        std::env::set_var(k, v);
    }
    f();
    for (k, _) in vars {
        std::env::remove_var(k);
    }
}

#[test]
fn from_env_falls_back_to_defaults_when_unset() {
    let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
    for var in [
        "CORTEX_EMBEDDING_CACHE_ENABLED",
        "CORTEX_EMBEDDING_CACHE_SIZE",
        "CORTEX_MCP_TIMEOUT",
        "CORTEX_DB_PATH",
        "CORTEX_PROJECT_ROOT",
        "CORTEX_READ_POOL_SIZE",
        "CORTEX_DB_TIMEOUT",
        "CORTEX_CONTEXT_MAX_TOKENS",
        "CORTEX_DEBUG",
        "CORTEX_FEEDBACK_LEVEL",
        "CORTEX_HOOKS_ENABLED",
    ] {
        std::env::remove_var(var);
    }
    let config = CortexConfig::from_env();
    assert!(config.embedding.cache_enabled);
    assert_eq!(config.embedding.dimension, 768);
    assert_eq!(config.storage.read_pool_size, 4);
    assert_eq!(config.context.default_strategy, ContextStrategy::Relevance);
    assert!(config.hook.hooks_enabled);
    assert_eq!(config.hook.feedback_level, FeedbackLevel::Minimal);
}

#[test]
fn from_env_picks_up_overrides() {
    with_env(
        &[
            ("CORTEX_EMBEDDING_CACHE_ENABLED", "false"),
            ("CORTEX_EMBEDDING_CACHE_SIZE", "42"),
            ("CORTEX_READ_POOL_SIZE", "6"),
            ("CORTEX_CONTEXT_MAX_TOKENS", "500"),
        ],
        || {
            let config = CortexConfig::from_env();
            assert!(!config.embedding.cache_enabled);
            assert_eq!(config.embedding.cache_cap, 42);
            assert_eq!(config.storage.read_pool_size, 6);
            assert_eq!(config.context.max_tokens, 500);
        },
    );
}

#[test]
fn debug_flag_forces_verbose_feedback_regardless_of_explicit_level() {
    with_env(
        &[
            ("CORTEX_DEBUG", "true"),
            ("CORTEX_FEEDBACK_LEVEL", "silent"),
        ],
        || {
            let config = CortexConfig::from_env();
            assert!(config.hook.debug);
            assert_eq!(config.hook.feedback_level, FeedbackLevel::Verbose);
        },
    );
}

#[test]
fn env_bool_accepts_common_falsy_spellings() {
    for falsy in ["0", "false", "off", "no", "FALSE"] {
        with_env(&[("CORTEX_HOOKS_ENABLED", falsy)], || {
            let config = CortexConfig::from_env();
            assert!(!config.hook.hooks_enabled, "{falsy} should disable hooks");
        });
    }
}

#[test]
fn hook_enabled_honors_both_global_and_per_hook_switches() {
    with_env(&[("CORTEX_HOOK_PRE_TOOL_USE", "false")], || {
        let config = CortexConfig::from_env();
        assert!(config.hook.hooks_enabled);
        assert!(!config.hook.hook_enabled("pre-tool-use"));
        assert!(config.hook.hook_enabled("post-tool-use"));
    });
}

#[test]
fn hook_enabled_is_false_for_every_hook_when_globally_disabled() {
    with_env(&[("CORTEX_HOOKS_ENABLED", "false")], || {
        let config = CortexConfig::from_env();
        assert!(!config.hook.hook_enabled("session-start"));
    });
}

#[test]
fn context_strategy_parses_case_insensitively() {
    assert_eq!(
        "Recency".parse::<ContextStrategy>().unwrap(),
        ContextStrategy::Recency
    );
    assert_eq!(
        "DIVERSE".parse::<ContextStrategy>().unwrap(),
        ContextStrategy::Diverse
    );
    assert!("unknown".parse::<ContextStrategy>().is_err());
}
