// typed errors raised while decoding and combining configs

use serde_json::Value;

pub type Result<T> = std::result::Result<T, CombineError>;

#[derive(Debug, thiserror::Error)]
pub enum CombineError {
    /// Two documents disagree on a shared top-level field
    #[error("Conflicting values for top-level parameter [{name}]: {first} vs {second}")]
    TopLevelParameter {
        name: String,
        first: Value,
        second: Value,
    },

    /// Two descriptions anywhere in the input share a string `id`
    #[error("Found multiple descriptions with ID [{0}]")]
    DescriptionId(String),

    #[error("IntendedFor must be int, str or (int | str)[]. Found [{value}]")]
    InvalidIntendedFor { value: Value },

    #[error("IntendedFor must be 'int' or 'str'. Found [{value}]")]
    InvalidIntendedForElement { value: Value },

    /// Shifting an index past the end of the `i64` range
    #[error("IntendedFor index [{index}] cannot be offset by {offset}")]
    IndexOverflow { index: i64, offset: i64 },

    #[error("Invalid config document: {0}")]
    InvalidDocument(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl CombineError {
    /// True for irreconcilable merge conflicts, as opposed to malformed input
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            CombineError::TopLevelParameter { .. } | CombineError::DescriptionId(_)
        )
    }
}
