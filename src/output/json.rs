//! Deterministic JSON file output
//!
//! Pretty-printed, key-sorted JSON artifacts suitable for byte-level
//! comparison between runs.

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Serialize `data` as JSON and write it to `path`, overwriting any existing
/// content.
///
/// Output is two-space indented with `": "` after each key, and mapping keys
/// appear in lexicographic order regardless of the input's insertion order.
/// Identical input therefore always produces byte-identical files.
pub fn write_json(path: impl AsRef<Path>, data: &impl Serialize) -> Result<()> {
    let path = path.as_ref();

    // Routing through Value sorts mapping keys during serialization.
    let value = serde_json::to_value(data).context("Failed to convert value to JSON")?;
    let text = serde_json::to_string_pretty(&value).context("Failed to render JSON")?;

    debug!("Writing {}:\n{}", path.display(), text);
    fs::write(path, &text).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(())
}
