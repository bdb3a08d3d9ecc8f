use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading project configuration files. These never
/// cross the public API: resolution degrades to empty alias/library sets
/// and the error is logged instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;
