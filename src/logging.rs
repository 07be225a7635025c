//! File-based logging setup.
//!
//! The TUI owns the terminal, so logs go to a rolling file in the data
//! directory rather than stdout/stderr. The level is controlled with the
//! `CROWNMEM_LOG` environment variable (`error`, `warn`, `info`, `debug`).

use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging into `log_dir` (the profile's data dir). Failures
/// here are reported to the caller; the app still runs without logs.
pub fn init(log_dir: PathBuf) -> std::io::Result<()> {
    let env_filter =
        EnvFilter::try_from_env("CROWNMEM_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

    std::fs::create_dir_all(&log_dir)?;

    let file_appender = tracing_appender::rolling::daily(&log_dir, "crownmem.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the writer on drop; keep it alive for the whole
    // process since init is only called once.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    tracing::info!(dir = %log_dir.display(), "logging initialized");
    Ok(())
}
