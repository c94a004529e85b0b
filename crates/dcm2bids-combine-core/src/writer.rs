// render the combined config and write it out in one go

use crate::config::Output;
use crate::format::Format;
use crate::model::Document;
use anyhow::{Context, Result};
use std::fs;
use std::io::Write;

pub fn render(document: &Document, format: Format) -> Result<String> {
    format
        .encode(document)
        .with_context(|| format!("Failed to serialize combined config as {}", format))
}

/// Write an already rendered document. Callers render first so a failed merge never touches the destination.
pub fn write_output(rendered: &str, output: &Output) -> Result<()> {
    match output {
        Output::Stdout => {
            let stdout = std::io::stdout();
            let mut lock = stdout.lock();
            lock.write_all(rendered.as_bytes())
                .and_then(|_| lock.flush())
                .context("Failed to write combined config to stdout")?;
        }
        Output::File(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
            }
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write combined config: {}", path.display()))?;
        }
    }
    Ok(())
}
