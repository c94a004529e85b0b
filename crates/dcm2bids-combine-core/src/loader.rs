// read config documents from disk, picking the encoding from the file extension

use crate::format::Format;
use crate::model::Document;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Load a single config file (JSON or YAML)
pub fn load_document(path: &Path) -> Result<Document> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let format = Format::from_path(path);
    let document = format
        .decode(&content)
        .with_context(|| format!("Failed to parse {} config file: {}", format, path.display()))?;

    tracing::debug!(
        path = %path.display(),
        %format,
        descriptions = document.descriptions.len(),
        "loaded config"
    );

    Ok(document)
}

/// Load every config in argument order, stopping at the first failure
pub fn load_documents(paths: &[PathBuf]) -> Result<Vec<Document>> {
    paths.iter().map(|p| load_document(p)).collect()
}
