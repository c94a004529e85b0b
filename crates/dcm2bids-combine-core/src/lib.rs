pub mod config;
pub mod error;
pub mod format;
pub mod loader;
pub mod merge;
pub mod model;
pub mod writer;

pub use config::{CombineOptions, Output};
pub use error::CombineError;
pub use format::Format;
pub use merge::{combine, update_intended_for};
pub use model::{Description, Document, IntendedFor, Reference};

use anyhow::{Context, Result};

/// What a successful run combined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CombineSummary {
    pub documents: usize,
    pub descriptions: usize,
}

/// Load every input, combine them, and write the result.
///
/// The combined config is fully rendered before anything is written, so any
/// load or merge error leaves the destination untouched.
pub fn cmd_combine(options: &CombineOptions) -> Result<CombineSummary> {
    let documents = loader::load_documents(&options.inputs)?;

    let combined = merge::combine(&documents)
        .with_context(|| format!("Failed to combine {} config files", documents.len()))?;

    let rendered = writer::render(&combined, options.format)?;
    writer::write_output(&rendered, &options.output)?;

    let summary = CombineSummary {
        documents: documents.len(),
        descriptions: combined.descriptions.len(),
    };
    tracing::info!(
        documents = summary.documents,
        descriptions = summary.descriptions,
        output = %options.output,
        format = %options.format,
        "wrote combined config"
    );

    Ok(summary)
}
