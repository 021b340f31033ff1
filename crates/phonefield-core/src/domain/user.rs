use crate::domain::{Language, UserId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub default_country: Option<String>,
    pub language: Option<Language>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Who is acting and in which language descriptions should be rendered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<UserId>,
    pub language: Language,
}

impl Session {
    pub fn new(user: Option<UserId>, language: Language) -> Self {
        Self { user, language }
    }
}

pub fn normalize_user_name(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
