use crate::domain::UserId;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
    #[error("{0}")]
    Backend(String),
}

/// Read access to user profiles owned by another subsystem.
pub trait UserDirectory {
    /// The raw default-country setting of `user`, `None` when unset.
    fn default_country(&self, user: &UserId) -> Result<Option<String>, DirectoryError>;
}
