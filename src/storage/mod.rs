//! Corpus persistence
//!
//! The corpus is written once, at the end of a run, as either a JSON array of
//! records or a CSV table. See [`export`] for the writers.

pub mod export;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use export::{save, write_csv, write_json};

/// Output file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON array of records, keys in insertion order
    #[default]
    Json,
    /// One row per record, one column per field key
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            other => Err(format!("unknown output format '{other}' (expected json or csv)")),
        }
    }
}
