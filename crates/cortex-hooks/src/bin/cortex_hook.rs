//! Binary entry point for every hook event. One process per invocation:
//! reads one JSON object from stdin, builds a single `HookContext`, runs
//! the matching workflow under a `tokio` current-thread runtime, and
//! exits with one of the three exit-code policies (§4.5).

use std::io::{Read, Write};

use cortex_core::config::{CortexConfig, FeedbackLevel};

fn main() -> anyhow::Result<()> {
    let config = CortexConfig::from_env();

    let directive = match (config.hook.debug, config.hook.feedback_level) {
        (true, _) => "debug",
        (false, FeedbackLevel::Silent) => "error",
        (false, FeedbackLevel::Minimal) => "warn",
        (false, FeedbackLevel::Verbose) => "info",
    };

    let mut raw = String::new();
    std::io::stdin().read_to_string(&mut raw)?;

    let event_name = cortex_hooks::HookEvent::peek_event_name(&raw).unwrap_or_else(|| "unknown".to_string());
    let log_path = config.hook.log_dir.join(format!("{event_name}.log"));
    if let Err(e) = cortex_observability::tracing_setup::init_to_file(directive, &log_path) {
        eprintln!("cortex-hook: failed to open hook log file {}: {e}", log_path.display());
        cortex_observability::tracing_setup::init_with_directive(directive);
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let exit_code = runtime.block_on(run(config, raw));
    std::process::exit(exit_code);
}

async fn run(config: CortexConfig, raw: String) -> i32 {
    let project_root = config.storage.project_root.clone();

    let event = match cortex_hooks::HookEvent::from_stdin_json(&raw) {
        Ok(event) => event,
        Err(e) => {
            eprintln!("cortex-hook: malformed input: {e}");
            return e.kind().exit_code();
        }
    };

    let ctx = match cortex_hooks::HookContext::build(config, &project_root) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("cortex-hook: failed to initialize: {e}");
            return e.kind().exit_code();
        }
    };

    let outcome = cortex_hooks::dispatch(&ctx, event);

    if let Some(banner) = &outcome.banner {
        eprintln!("{banner}");
    }
    if outcome.exit_code == 0 {
        if let Some(injection) = &outcome.stdout {
            if let Ok(rendered) = serde_json::to_string(injection) {
                let mut stdout = std::io::stdout();
                let _ = writeln!(stdout, "{rendered}");
            }
        }
    }

    outcome.exit_code
}
