//! Cross-Platform Path Utilities
//!
//! Resolves the engine's data directory (~/.mock-interview/).

use std::path::{Path, PathBuf};

use crate::utils::error::{AppError, AppResult};

/// Get the user's home directory
pub fn home_dir() -> AppResult<PathBuf> {
    dirs::home_dir().ok_or_else(|| AppError::config("Could not determine home directory"))
}

/// Get the engine directory (~/.mock-interview/)
pub fn mock_interview_dir() -> AppResult<PathBuf> {
    Ok(home_dir()?.join(".mock-interview"))
}

/// Get the config file path (~/.mock-interview/config.json)
pub fn config_path() -> AppResult<PathBuf> {
    Ok(mock_interview_dir()?.join("config.json"))
}

/// Ensure a directory exists, creating it if necessary
pub fn ensure_dir(path: &Path) -> AppResult<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Get the engine directory, creating it if it doesn't exist
pub fn ensure_mock_interview_dir() -> AppResult<PathBuf> {
    let path = mock_interview_dir()?;
    ensure_dir(&path)?;
    Ok(path)
}
