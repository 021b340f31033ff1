use crate::error::{Result, StoreError};
use phonefield_core::domain::{normalize_user_name, Language, UserId, UserProfile};
use phonefield_core::CoreError;
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

const USER_COLUMNS: &str = "id, name, default_country, language, created_at, updated_at";

#[derive(Debug, Clone, Default)]
pub struct UserNew {
    pub name: String,
    pub default_country: Option<String>,
    pub language: Option<Language>,
}

pub struct UsersRepo<'a> {
    conn: &'a Connection,
}

impl<'a> UsersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, user: UserNew) -> Result<UserProfile> {
        let name = normalize_user_name(&user.name).ok_or(CoreError::EmptyUserName)?;
        let profile = UserProfile {
            id: UserId::new(),
            name,
            default_country: normalize_setting(user.default_country),
            language: user.language,
            created_at: now_utc,
            updated_at: now_utc,
        };

        self.conn.execute(
            "INSERT INTO users (id, name, default_country, language, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                profile.id.to_string(),
                profile.name,
                profile.default_country,
                profile.language.as_ref().map(Language::as_str),
                profile.created_at,
                profile.updated_at,
            ],
        )?;

        Ok(profile)
    }

    pub fn get(&self, id: UserId) -> Result<Option<UserProfile>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        match rows.next()? {
            Some(row) => Ok(Some(user_from_row(row)?)),
            None => Ok(None),
        }
    }

    pub fn list(&self) -> Result<Vec<UserProfile>> {
        let sql =
            format!("SELECT {USER_COLUMNS} FROM users ORDER BY name COLLATE NOCASE ASC, id ASC;");
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut users = Vec::new();
        while let Some(row) = rows.next()? {
            users.push(user_from_row(row)?);
        }
        Ok(users)
    }

    /// `Ok(None)` when the user does not exist, `Ok(Some(None))` when the
    /// user has no default country.
    pub fn default_country(&self, id: UserId) -> Result<Option<Option<String>>> {
        let country = self
            .conn
            .query_row(
                "SELECT default_country FROM users WHERE id = ?1;",
                [id.to_string()],
                |row| row.get::<_, Option<String>>(0),
            )
            .optional()?;
        Ok(country)
    }

    pub fn set_default_country(
        &self,
        now_utc: i64,
        id: UserId,
        country: Option<String>,
    ) -> Result<UserProfile> {
        let updated = self.conn.execute(
            "UPDATE users SET default_country = ?1, updated_at = ?2 WHERE id = ?3;",
            params![normalize_setting(country), now_utc, id.to_string()],
        )?;
        self.fetch_updated(updated, id)
    }

    pub fn set_language(
        &self,
        now_utc: i64,
        id: UserId,
        language: Option<Language>,
    ) -> Result<UserProfile> {
        let updated = self.conn.execute(
            "UPDATE users SET language = ?1, updated_at = ?2 WHERE id = ?3;",
            params![
                language.as_ref().map(Language::as_str),
                now_utc,
                id.to_string()
            ],
        )?;
        self.fetch_updated(updated, id)
    }

    pub fn delete(&self, id: UserId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM users WHERE id = ?1;", [id.to_string()])?;
        if deleted == 0 {
            return Err(StoreError::UserNotFound(id));
        }
        Ok(())
    }

    fn fetch_updated(&self, updated: usize, id: UserId) -> Result<UserProfile> {
        if updated == 0 {
            return Err(StoreError::UserNotFound(id));
        }
        self.get(id)?.ok_or(StoreError::UserNotFound(id))
    }
}

fn normalize_setting(value: Option<String>) -> Option<String> {
    value
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
}

fn user_from_row(row: &rusqlite::Row<'_>) -> Result<UserProfile> {
    let id_str: String = row.get(0)?;
    let id = UserId::from_str(&id_str).map_err(|_| StoreError::CorruptUserId(id_str.clone()))?;
    let language: Option<String> = row.get(3)?;
    let language = language.as_deref().map(Language::new).transpose()?;

    Ok(UserProfile {
        id,
        name: row.get(1)?,
        default_country: row.get(2)?,
        language,
        created_at: row.get(4)?,
        updated_at: row.get(5)?,
    })
}
