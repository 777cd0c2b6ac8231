pub mod spans;

/// Install a JSON-formatted subscriber reading its filter from `RUST_LOG`
/// (falling back to `info`). Hooks call this once at process start; never
/// re-initialize mid-process.
pub fn init() {
    init_with_directive("info");
}

/// Same as [`init`], but with an explicit fallback directive used when
/// `RUST_LOG` is unset. Hook binaries derive `default_directive` from
/// `HookConfig::feedback_level` (silent -> error, minimal -> warn,
/// verbose -> info; `CORTEX_DEBUG` forces debug upstream of this call).
pub fn init_with_directive(default_directive: &str) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt().with_env_filter(filter).json().try_init();
}

/// Install a subscriber that appends JSON lines to `path` instead of
/// stderr. Used by the hook binary, which logs one per-invocation span
/// per event-name file under the configured log directory (§4.5 Ambient).
pub fn init_to_file(default_directive: &str, path: &std::path::Path) -> std::io::Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new().create(true).append(true).open(path)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));
    let _ = fmt()
        .with_env_filter(filter)
        .json()
        .with_writer(move || file.try_clone().expect("log file clone"))
        .try_init();
    Ok(())
}
