//! Platform-specific directory utilities.

use std::path::PathBuf;

const APP_NAME: &str = "shadow-fruit";

/// Platform log directory.
///
/// - macOS: `~/Library/Caches/shadow-fruit/logs`
/// - Linux: `~/.cache/shadow-fruit/logs` (or `$XDG_CACHE_HOME/shadow-fruit/logs`)
/// - Windows: `%LOCALAPPDATA%\shadow-fruit\logs`
/// - Fallback: `<tmp>/shadow-fruit/logs`
pub fn log_dir() -> PathBuf {
    let base_dir = directories::ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| std::env::temp_dir().join(APP_NAME));

    base_dir.join("logs")
}
