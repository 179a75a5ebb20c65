//! Platform-specific directory utilities
//!
//! Every directory can be overridden through the environment (or a `.env`
//! file), otherwise platform conventions apply:
//!
//! - Linux: `~/.local/share/swnr`, `~/.cache/swnr/logs`
//! - macOS: `~/Library/Application Support/swnr`, `~/Library/Caches/swnr/logs`
//! - Windows: `%APPDATA%\swnr`, `%LOCALAPPDATA%\swnr\logs`

use std::path::PathBuf;

use directories::ProjectDirs;

/// Directory holding `engine.toml`, `presets.toml` and `actors.ron`.
pub const DATA_DIR_ENV: &str = "SWNR_DATA_DIR";
/// Directory holding the stored actor records.
pub const STORE_DIR_ENV: &str = "SWNR_STORE_DIR";
pub const LOG_DIR_ENV: &str = "SWNR_LOG_DIR";

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "swnr")
}

fn from_env(key: &str) -> Option<PathBuf> {
    std::env::var_os(key)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Content directory. Falls back to `./data`.
pub fn data_dir() -> PathBuf {
    from_env(DATA_DIR_ENV).unwrap_or_else(|| PathBuf::from("./data"))
}

/// Actor store directory.
pub fn store_dir() -> PathBuf {
    from_env(STORE_DIR_ENV).unwrap_or_else(|| {
        project_dirs()
            .map(|dirs| dirs.data_dir().join("actors"))
            .unwrap_or_else(|| PathBuf::from("./save_data/actors"))
    })
}

pub fn log_dir() -> PathBuf {
    from_env(LOG_DIR_ENV).unwrap_or_else(|| {
        project_dirs()
            .map(|dirs| dirs.cache_dir().join("logs"))
            .unwrap_or_else(|| PathBuf::from("/tmp/swnr/logs"))
    })
}
