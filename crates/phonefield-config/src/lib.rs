use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use phonefield_core::{Language, UserId};
use serde::Deserialize;
use thiserror::Error;

const APP_DIR: &str = "phonefield";
const CONFIG_FILENAME: &str = "config.toml";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub numbering: NumberingConfig,
}

#[derive(Debug, Clone, Default)]
pub struct SessionConfig {
    /// Acting user when `--user` is not given.
    pub user: Option<UserId>,
    pub language: Language,
}

#[derive(Debug, Clone, Default)]
pub struct NumberingConfig {
    /// Root holding `geocoding/<lang>/` and `carrier/<lang>/` prefix files.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing home directory")]
    MissingHomeDir,
    #[error("invalid config path: {0}")]
    InvalidConfigPath(PathBuf),
    #[error("config file not found: {0}")]
    MissingConfigFile(PathBuf),
    #[error("invalid session.user value: {0}")]
    InvalidUserId(String),
    #[error("invalid session.language value: {0}")]
    InvalidLanguage(String),
    #[error("invalid numbering.data_dir value: {0}")]
    InvalidDataDir(PathBuf),
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    session: Option<SessionFile>,
    numbering: Option<NumberingFile>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SessionFile {
    user: Option<String>,
    language: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct NumberingFile {
    data_dir: Option<PathBuf>,
}

pub fn load(config_path: Option<PathBuf>) -> Result<AppConfig> {
    let required = config_path.is_some();
    let path = match resolve_config_path(config_path) {
        Ok(path) => path,
        Err(ConfigError::MissingHomeDir) if !required => return Ok(AppConfig::default()),
        Err(ConfigError::InvalidConfigPath(_)) if !required => return Ok(AppConfig::default()),
        Err(err) => return Err(err),
    };
    match load_at_path(&path, required)? {
        Some(config) => Ok(config),
        None => Ok(AppConfig::default()),
    }
}

pub fn resolve_config_path(custom: Option<PathBuf>) -> Result<PathBuf> {
    match custom {
        Some(path) => {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::InvalidConfigPath(path));
            }
            Ok(path)
        }
        None => {
            let base = if let Some(dir) = env::var_os("XDG_CONFIG_HOME") {
                let path = PathBuf::from(dir);
                if path.as_os_str().is_empty() {
                    return Err(ConfigError::InvalidConfigPath(path));
                }
                path
            } else {
                let home = dirs::home_dir().ok_or(ConfigError::MissingHomeDir)?;
                home.join(".config")
            };
            Ok(base.join(APP_DIR).join(CONFIG_FILENAME))
        }
    }
}

fn load_at_path(path: &Path, required: bool) -> Result<Option<AppConfig>> {
    if !path.exists() {
        if required {
            return Err(ConfigError::MissingConfigFile(path.to_path_buf()));
        }
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config = merge_config(parsed)?;

    // Relative data dirs are anchored at the config file.
    if let Some(data_dir) = config.numbering.data_dir.take() {
        let anchored = match path.parent() {
            Some(parent) if data_dir.is_relative() => parent.join(data_dir),
            _ => data_dir,
        };
        config.numbering.data_dir = Some(anchored);
    }

    Ok(Some(config))
}

fn merge_config(parsed: ConfigFile) -> Result<AppConfig> {
    let mut config = AppConfig::default();

    if let Some(session) = parsed.session {
        if let Some(user) = session.user {
            let id = UserId::from_str(&user).map_err(|_| ConfigError::InvalidUserId(user))?;
            config.session.user = Some(id);
        }
        if let Some(language) = session.language {
            config.session.language =
                Language::new(&language).map_err(|_| ConfigError::InvalidLanguage(language))?;
        }
    }

    if let Some(numbering) = parsed.numbering {
        if let Some(data_dir) = numbering.data_dir {
            if data_dir.as_os_str().is_empty() {
                return Err(ConfigError::InvalidDataDir(data_dir));
            }
            config.numbering.data_dir = Some(data_dir);
        }
    }

    Ok(config)
}
