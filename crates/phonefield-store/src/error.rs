use phonefield_core::{CoreError, UserId};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("sqlite error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("invalid user profile: {0}")]
    Core(#[from] CoreError),
    #[error("no home directory to keep the user database in")]
    MissingHomeDir,
    #[error("stored user id is not a uuid: {0}")]
    CorruptUserId(String),
    #[error("user not found: {0}")]
    UserNotFound(UserId),
    #[error("migration error: {0}")]
    Migration(String),
    #[error("invalid database path: {0}")]
    InvalidDbPath(PathBuf),
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorKind {
    Io,
    Sql,
    Core,
    MissingHomeDir,
    CorruptUserId,
    UserNotFound,
    Migration,
    InvalidDbPath,
}

impl StoreError {
    pub fn kind(&self) -> StoreErrorKind {
        match self {
            StoreError::Io(_) => StoreErrorKind::Io,
            StoreError::Sql(_) => StoreErrorKind::Sql,
            StoreError::Core(_) => StoreErrorKind::Core,
            StoreError::MissingHomeDir => StoreErrorKind::MissingHomeDir,
            StoreError::CorruptUserId(_) => StoreErrorKind::CorruptUserId,
            StoreError::UserNotFound(_) => StoreErrorKind::UserNotFound,
            StoreError::Migration(_) => StoreErrorKind::Migration,
            StoreError::InvalidDbPath(_) => StoreErrorKind::InvalidDbPath,
        }
    }
}
