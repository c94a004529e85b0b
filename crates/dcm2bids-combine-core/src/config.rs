// resolved options for one combine run

use crate::format::Format;
use std::fmt;
use std::path::{Path, PathBuf};

/// Environment variable holding the log filter (tracing `EnvFilter` syntax)
pub const LOG_ENV: &str = "DCM2BIDS_COMBINE_LOG";
pub const DEFAULT_LOG_FILTER: &str = "warn";

/// Where the combined config goes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Output {
    #[default]
    Stdout,
    File(PathBuf),
}

impl Output {
    /// `-` means stdout, as on the command line
    pub fn from_arg(arg: &str) -> Self {
        if arg == "-" {
            Output::Stdout
        } else {
            Output::File(PathBuf::from(arg))
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            Output::Stdout => None,
            Output::File(p) => Some(p.as_path()),
        }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Output::Stdout => write!(f, "<stdout>"),
            Output::File(p) => write!(f, "{}", p.display()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineOptions {
    pub inputs: Vec<PathBuf>,
    pub output: Output,
    pub format: Format,
}

impl CombineOptions {
    /// Defaults: write JSON to stdout
    pub fn new(inputs: Vec<PathBuf>) -> Self {
        Self {
            inputs,
            output: Output::Stdout,
            format: Format::Json,
        }
    }

    pub fn with_output(mut self, output: Output) -> Self {
        self.output = output;
        self
    }

    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }
}
