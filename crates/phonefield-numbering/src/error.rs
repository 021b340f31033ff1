use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NumberingError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid prefix '{prefix}' at {path}:{line}")]
    InvalidPrefix {
        path: PathBuf,
        line: usize,
        prefix: String,
    },
}

pub type Result<T> = std::result::Result<T, NumberingError>;
