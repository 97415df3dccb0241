//! Configuration management for tunedex.
//!
//! Values come from environment variables, optionally pre-loaded from a `.env`
//! file in the local data directory:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults

use std::{env, path::PathBuf};

pub const APP_DIR: &str = "tunedex";

pub const DEFAULT_BOOTSTRAP_URL: &str =
    "https://raw.githubusercontent.com/Algoritmos-y-Programacion/api-proyecto/main";

fn app_dir() -> PathBuf {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push(APP_DIR);
    path
}

/// Loads environment variables from `tunedex/.env` in the local data directory.
///
/// The file is optional. Variables already set in the environment are not
/// overridden.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/tunedex/.env`
/// - macOS: `~/Library/Application Support/tunedex/.env`
/// - Windows: `%LOCALAPPDATA%/tunedex/.env`
///
/// # Errors
///
/// Returns an error if the directory cannot be created or an existing `.env`
/// file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let path = app_dir().join(".env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if !path.is_file() {
        return Ok(());
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Directory holding the four collection files.
///
/// `TUNEDEX_DATA_DIR` if set, otherwise `db` under the application directory.
pub fn data_dir() -> PathBuf {
    match env::var("TUNEDEX_DATA_DIR") {
        Ok(dir) if !dir.trim().is_empty() => PathBuf::from(dir),
        _ => app_dir().join("db"),
    }
}

/// Base URL of the seed repository used by `tunedex restore`.
pub fn bootstrap_url() -> String {
    env::var("TUNEDEX_BOOTSTRAP_URL").unwrap_or_else(|_| DEFAULT_BOOTSTRAP_URL.to_string())
}
