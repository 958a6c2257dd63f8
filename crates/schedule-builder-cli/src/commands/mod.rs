pub mod config;
pub mod grid;
pub mod modes;
pub mod paint;
pub mod report;
pub mod roster;

use std::path::Path;

use schedule_builder_core::CoreError;

/// Read and parse a JSON file.
pub fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CoreError> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
