use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::ui::types::choices::TaskChoice;

/// Reads a task from a JSON file shaped like `{"type": "filter-stream", "params": {...}}`.
pub fn load_task_choice<P: AsRef<Path>>(path: P) -> Result<TaskChoice> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let choice = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    debug!(path = %path.display(), "config loaded");
    Ok(choice)
}

/// Writes `choice` as pretty JSON, the same shape [`load_task_choice`] reads.
pub fn save_task_choice<P: AsRef<Path>>(path: P, choice: &TaskChoice) -> Result<()> {
    let path = path.as_ref();
    let text = serde_json::to_string_pretty(choice)?;
    fs::write(path, text + "\n").with_context(|| format!("writing config {}", path.display()))
}
