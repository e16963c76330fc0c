use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CodeListError>;

#[derive(Debug, Error)]
pub enum CodeListError {
    #[error("No codes to compress: the input set is empty")]
    EmptyInput,

    #[error("Invalid gap tolerance {0}: must be zero or positive")]
    InvalidTolerance(i64),

    #[error("Invalid range {start}...{end}: start is greater than end")]
    InvalidRange { start: i64, end: i64 },

    #[error("Missing field in code list document: {path}")]
    MissingField { path: String },

    #[error("Invalid code at entry {index}: {value}")]
    CodeParse { index: usize, value: String },

    #[error("Failed to create directory {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to create file {path}")]
    CreateFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl From<toml::de::Error> for CodeListError {
    fn from(err: toml::de::Error) -> Self {
        CodeListError::Config(format!("TOML parse error: {}", err))
    }
}
