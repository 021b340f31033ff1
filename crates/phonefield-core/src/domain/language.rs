use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Language tag of the form `ll` or `ll-RR`.
///
/// `en_us`, `EN-us` and `en-US` all normalize to `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Language(String);

impl Language {
    pub fn new(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        let invalid = || CoreError::InvalidLanguage(raw.to_string());

        let mut parts = trimmed.split(['-', '_']);
        let lang = parts.next().ok_or_else(invalid)?;
        if !(2..=3).contains(&lang.len()) || !lang.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(invalid());
        }

        let mut out = lang.to_ascii_lowercase();
        if let Some(region) = parts.next() {
            if region.len() != 2 || !region.chars().all(|ch| ch.is_ascii_alphabetic()) {
                return Err(invalid());
            }
            out.push('-');
            out.push_str(&region.to_ascii_uppercase());
        }

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self(out))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Bare language subtag, e.g. `en` for `en-US`.
    pub fn short(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }
}

impl Default for Language {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Language {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Language {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::Language;

    #[test]
    fn language_normalizes_case_and_separator() {
        let lang = Language::new("pl_pl").unwrap();
        assert_eq!(lang.as_str(), "pl-PL");
        assert_eq!(lang.short(), "pl");
    }

    #[test]
    fn language_accepts_bare_subtag() {
        let lang = Language::new(" DE ").unwrap();
        assert_eq!(lang.as_str(), "de");
        assert_eq!(lang.short(), "de");
    }

    #[test]
    fn language_rejects_garbage() {
        assert!(Language::new("").is_err());
        assert!(Language::new("e").is_err());
        assert!(Language::new("en-USA").is_err());
        assert!(Language::new("en-US-x").is_err());
        assert!(Language::new("1n").is_err());
    }

    #[test]
    fn default_language_is_english() {
        assert_eq!(Language::default().short(), "en");
    }
}
