//! Drill options files
//!
//! Options are stored as JSON in the shape of `DrillOptions`; any field left
//! out takes its default.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use triadic_core::DrillOptions;

/// Read and normalize drill options from a JSON file
pub fn load_options<P: AsRef<Path>>(path: P) -> Result<DrillOptions> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read options file {}", path.display()))?;
    parse_options(&contents).with_context(|| format!("Invalid options in {}", path.display()))
}

/// Parse and normalize drill options from JSON text
pub fn parse_options(json: &str) -> Result<DrillOptions> {
    let mut options: DrillOptions = serde_json::from_str(json)?;
    options.normalize();
    log::debug!("loaded options: {:?}", options);
    Ok(options)
}

/// Write drill options as pretty-printed JSON
pub fn save_options<P: AsRef<Path>>(path: P, options: &DrillOptions) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(options)?;
    fs::write(path, json)
        .with_context(|| format!("Failed to write options file {}", path.display()))
}
