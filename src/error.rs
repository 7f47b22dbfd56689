use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while reading the source dataset.
///
/// Per-field coercion problems (bad dates, bad salaries) are never reported
/// here; they turn into `None` on the affected posting.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{path}: expected a top-level array of records")]
    NotRecords { path: PathBuf },

    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: PathBuf, column: &'static str },

    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

/// Invalid settings supplied through the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var}: invalid value '{value}' ({reason})")]
    InvalidValue {
        var: &'static str,
        value: String,
        reason: &'static str,
    },
}
