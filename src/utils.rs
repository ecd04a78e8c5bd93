use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::AppError;

pub const APP_DIR: &str = "pocketphone";

pub fn data_dir() -> Result<PathBuf, AppError> {
    let base = dirs::data_dir()
        .ok_or_else(|| AppError::Other("no data directory on this platform".to_string()))?;
    Ok(base.join(APP_DIR))
}

pub fn ensure_data_dir() -> Result<PathBuf, AppError> {
    let dir = data_dir()?;
    fs::create_dir_all(&dir)?;
    Ok(dir)
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Wall-clock time in the `HH:MM` form message timestamps use.
pub fn clock_time() -> String {
    chrono::Local::now().format("%H:%M").to_string()
}
