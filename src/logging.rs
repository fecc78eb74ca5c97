use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable that overrides the configured log filter.
pub const LOG_ENV: &str = "KEYHUNT_LOG";

pub fn log_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("keyhunt")
        .join("logs")
}

/// Install a file-backed subscriber. The terminal belongs to the UI, so
/// nothing is written to stdout or stderr. Keep the guard alive until exit.
pub fn init_tracing(default_level: &str) -> Result<WorkerGuard> {
    let dir = log_dir();
    fs::create_dir_all(&dir)?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("keyhunt={default_level}")));

    let file_appender = tracing_appender::rolling::never(&dir, "keyhunt.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_target(true)
        .with_level(true)
        .with_ansi(false);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .try_init();

    Ok(guard)
}
