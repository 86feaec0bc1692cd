use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;

/// Route tracing output to a log file in the platform data dir; stdout
/// belongs to the terminal UI.
pub fn init() -> Result<PathBuf> {
    let dir = dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("worddr");
    fs::create_dir_all(&dir)?;

    let path = dir.join("worddr.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)?;

    tracing_subscriber::fmt()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .init();

    Ok(path)
}
