use crate::Store;
use phonefield_core::{DirectoryError, UserDirectory, UserId};

impl UserDirectory for Store {
    fn default_country(&self, user: &UserId) -> Result<Option<String>, DirectoryError> {
        match self.users().default_country(*user) {
            Ok(Some(country)) => Ok(country),
            Ok(None) => Err(DirectoryError::UnknownUser(*user)),
            Err(err) => Err(DirectoryError::Backend(err.to_string())),
        }
    }
}
