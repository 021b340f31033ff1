use crate::directory::DirectoryError;
use crate::domain::UserId;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid region code: {0}")]
    InvalidRegionCode(String),
    #[error("invalid language tag: {0}")]
    InvalidLanguage(String),
    #[error("unknown country: {0}")]
    UnknownCountry(String),
    #[error("user name is required")]
    EmptyUserName,
}

/// Failures surfaced by [`crate::PhoneResolver`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PhoneError {
    #[error("invalid country code: {0}")]
    InvalidCountryCode(String),
    #[error("invalid phone number")]
    InvalidPhoneNumber,
    #[error("unknown user: {0}")]
    UnknownUser(UserId),
    #[error("user directory error: {0}")]
    Directory(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneErrorKind {
    InvalidCountryCode,
    InvalidPhoneNumber,
    UnknownUser,
    Directory,
}

impl PhoneError {
    pub fn kind(&self) -> PhoneErrorKind {
        match self {
            PhoneError::InvalidCountryCode(_) => PhoneErrorKind::InvalidCountryCode,
            PhoneError::InvalidPhoneNumber => PhoneErrorKind::InvalidPhoneNumber,
            PhoneError::UnknownUser(_) => PhoneErrorKind::UnknownUser,
            PhoneError::Directory(_) => PhoneErrorKind::Directory,
        }
    }

    /// Translation key shown by the presentation layer.
    pub fn label(&self) -> &'static str {
        match self.kind() {
            PhoneErrorKind::InvalidCountryCode => "LBL_INVALID_COUNTRY_CODE",
            PhoneErrorKind::InvalidPhoneNumber => "LBL_INVALID_PHONE_NUMBER",
            PhoneErrorKind::UnknownUser => "LBL_USER_NOT_FOUND",
            PhoneErrorKind::Directory => "LBL_USER_DIRECTORY_ERROR",
        }
    }
}

impl From<DirectoryError> for PhoneError {
    fn from(value: DirectoryError) -> Self {
        match value {
            DirectoryError::UnknownUser(id) => PhoneError::UnknownUser(id),
            DirectoryError::Backend(message) => PhoneError::Directory(message),
        }
    }
}
