//! Harness error types.
//!
//! Everything here is fatal to the run. A checksum mismatch is not an error:
//! it is reported through [`crate::runner::Verdict`] and the run continues.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    // === Suite configuration ===
    #[error("Cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("Config not found for {0}")]
    MissingEntry(String),

    #[error("Config not found for {workload}, field: {field}")]
    MissingField { workload: String, field: String },

    #[error("Invalid config value for {workload}, field: {field}: expected {expected}")]
    InvalidField {
        workload: String,
        field: String,
        expected: &'static str,
    },

    // === Registry ===
    #[error("Workload registered twice: {0}")]
    DuplicateWorkload(String),

    #[error("Workload registered as {registered} reports name {reported}")]
    NameMismatch { registered: String, reported: String },

    // === Harness settings / process ===
    #[error("Invalid settings file {path}: {source}")]
    Settings {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Usage: {0}")]
    Usage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    pub fn missing_field(workload: &str, field: &str) -> Self {
        HarnessError::MissingField {
            workload: workload.to_string(),
            field: field.to_string(),
        }
    }

    pub fn invalid_field(workload: &str, field: &str, expected: &'static str) -> Self {
        HarnessError::InvalidField {
            workload: workload.to_string(),
            field: field.to_string(),
            expected,
        }
    }
}

pub type Result<T> = std::result::Result<T, HarnessError>;
