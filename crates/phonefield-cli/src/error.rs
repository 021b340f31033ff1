use anyhow::Error;
use phonefield_config::ConfigError;
use phonefield_core::{CoreError, PhoneError, PhoneErrorKind};
use phonefield_numbering::NumberingError;
use phonefield_store::error::{StoreError, StoreErrorKind};
use std::process::ExitCode;
use thiserror::Error as ThisError;

pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_INVALID_INPUT: u8 = 3;

#[derive(Debug, ThisError)]
pub enum CliError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub fn invalid_input(message: impl Into<String>) -> Error {
    CliError::InvalidInput(message.into()).into()
}

pub fn not_found(message: impl Into<String>) -> Error {
    CliError::NotFound(message.into()).into()
}

pub fn report_error(err: &Error, verbose: bool) {
    if verbose {
        eprintln!("error: {:#}", err);
    } else {
        eprintln!("error: {}", err);
    }
}

pub fn exit_code_for(err: &Error) -> ExitCode {
    for cause in err.chain() {
        if let Some(cli_err) = cause.downcast_ref::<CliError>() {
            return ExitCode::from(match cli_err {
                CliError::InvalidInput(_) => EXIT_INVALID_INPUT,
                CliError::NotFound(_) => EXIT_NOT_FOUND,
            });
        }
        if let Some(phone_err) = cause.downcast_ref::<PhoneError>() {
            return ExitCode::from(phone_exit_code(phone_err));
        }
        if let Some(store_err) = cause.downcast_ref::<StoreError>() {
            return ExitCode::from(store_exit_code(store_err));
        }
        if let Some(config_err) = cause.downcast_ref::<ConfigError>() {
            return ExitCode::from(config_exit_code(config_err));
        }
        if let Some(_numbering_err) = cause.downcast_ref::<NumberingError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
        if let Some(_core_err) = cause.downcast_ref::<CoreError>() {
            return ExitCode::from(EXIT_INVALID_INPUT);
        }
    }
    ExitCode::from(EXIT_FAILURE)
}

fn phone_exit_code(err: &PhoneError) -> u8 {
    match err.kind() {
        PhoneErrorKind::InvalidCountryCode | PhoneErrorKind::InvalidPhoneNumber => {
            EXIT_INVALID_INPUT
        }
        PhoneErrorKind::UnknownUser => EXIT_NOT_FOUND,
        PhoneErrorKind::Directory => EXIT_FAILURE,
    }
}

fn store_exit_code(err: &StoreError) -> u8 {
    match err.kind() {
        StoreErrorKind::UserNotFound => EXIT_NOT_FOUND,
        StoreErrorKind::InvalidDbPath | StoreErrorKind::Core => EXIT_INVALID_INPUT,
        StoreErrorKind::CorruptUserId
        | StoreErrorKind::MissingHomeDir
        | StoreErrorKind::Migration
        | StoreErrorKind::Sql
        | StoreErrorKind::Io => EXIT_FAILURE,
    }
}

fn config_exit_code(err: &ConfigError) -> u8 {
    match err {
        ConfigError::MissingHomeDir => EXIT_FAILURE,
        ConfigError::InvalidConfigPath(_)
        | ConfigError::MissingConfigFile(_)
        | ConfigError::InvalidUserId(_)
        | ConfigError::InvalidLanguage(_)
        | ConfigError::InvalidDataDir(_)
        | ConfigError::Read { .. }
        | ConfigError::Parse { .. } => EXIT_INVALID_INPUT,
    }
}
