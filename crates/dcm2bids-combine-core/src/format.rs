// JSON and YAML encodings of a config document

use crate::error::Result;
use crate::model::Document;
use serde_json::Value;
use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Format {
    #[default]
    Json,
    Yaml,
}

impl Format {
    /// `.yaml` / `.yml` (any case) read as YAML, everything else as JSON
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Format::Yaml,
            _ => Format::Json,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Format::Json => "json",
            Format::Yaml => "yaml",
        }
    }

    pub fn decode(&self, content: &str) -> Result<Document> {
        let value: Value = match self {
            Format::Json => serde_json::from_str(content)?,
            Format::Yaml => serde_yaml::from_str(content)?,
        };
        Document::from_value(value)
    }

    /// JSON output is indented by two spaces; both encodings end with a newline.
    pub fn encode(&self, document: &Document) -> Result<String> {
        match self {
            Format::Json => {
                let mut out = serde_json::to_string_pretty(document)?;
                out.push('\n');
                Ok(out)
            }
            Format::Yaml => Ok(serde_yaml::to_string(document)?),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
