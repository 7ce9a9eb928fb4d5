//! Template loading, README persistence and JSON stats logging.

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Logs any serializable value as pretty-printed JSON.
pub fn print_json(value: &impl Serialize) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Reads the README template as UTF-8 text.
pub async fn read_template(path: &Path) -> Result<String> {
    let template = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("could not read template '{}'", path.display()))?;
    debug!(path = %path.display(), bytes = template.len(), "Template loaded");
    Ok(template)
}

/// Writes the rendered README, replacing any existing file.
pub async fn write_output(path: &Path, contents: &str) -> Result<()> {
    tokio::fs::write(path, contents)
        .await
        .with_context(|| format!("could not write '{}'", path.display()))?;
    debug!(path = %path.display(), bytes = contents.len(), "README written");
    Ok(())
}
