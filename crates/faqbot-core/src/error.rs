use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read corpus {path}: {source}")]
    CorpusLoad {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed corpus {path}: {source}")]
    CorpusFormat {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Normalization failed: {0}")]
    Normalization(String),

    #[error("Match failed: {0}")]
    Match(String),
}

pub type Result<T> = std::result::Result<T, Error>;
