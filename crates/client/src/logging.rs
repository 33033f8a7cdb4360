//! Logging setup for the command-line client.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Result;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::dirs;

const LOG_FILE: &str = "client.log";

/// Log to `<log dir>/<session>/client.log`, and to stderr when `verbose`.
///
/// `RUST_LOG` overrides the default `info` filter. Queued lines reach the file
/// when the returned guard drops, so hold it until the command has finished.
pub fn setup_logging(session_id: Option<&str>, verbose: bool) -> Result<WorkerGuard> {
    let session_id = session_id.map(str::to_string).unwrap_or_else(|| {
        let timestamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or_default();
        format!("session_{}", timestamp)
    });

    let session_log_dir = dirs::log_dir().join(&session_id);
    std::fs::create_dir_all(&session_log_dir)?;

    let (non_blocking_file, guard) = file_writer(&session_log_dir);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    let stderr_layer = verbose.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stderr_layer)
        .init();

    tracing::info!("Logging initialized: session={}", session_id);
    tracing::debug!("Log file: {}", session_log_dir.join(LOG_FILE).display());

    Ok(guard)
}

fn file_writer(dir: &Path) -> (NonBlocking, WorkerGuard) {
    tracing_appender::non_blocking(tracing_appender::rolling::never(dir, LOG_FILE))
}
