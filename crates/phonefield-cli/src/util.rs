use crate::error::invalid_input;
use anyhow::Result;
use chrono::{DateTime, Local, Utc};
use phonefield_core::domain::{country_code, country_name, Language, UserId};
use std::str::FromStr;

pub fn now_utc() -> i64 {
    Utc::now().timestamp()
}

pub fn format_timestamp_datetime(ts: i64) -> String {
    match DateTime::<Utc>::from_timestamp(ts, 0) {
        Some(dt) => dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        None => ts.to_string(),
    }
}

pub fn parse_user_id(raw: &str) -> Result<UserId> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(invalid_input("user id cannot be empty"));
    }
    UserId::from_str(trimmed).map_err(|_| invalid_input(format!("invalid user id: {}", trimmed)))
}

pub fn parse_language(raw: &str) -> Result<Language> {
    Ok(Language::new(raw)?)
}

/// `Name (CC)` when the country is known, the raw value otherwise.
pub fn describe_country(country: &str) -> String {
    match country_code(country) {
        Some(region) => {
            let name = country_name(&region).unwrap_or(country);
            format!("{} ({})", name, region)
        }
        None => country.to_string(),
    }
}
