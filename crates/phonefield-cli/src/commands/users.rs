use crate::commands::{print_json, Context};
use crate::error::{invalid_input, not_found};
use crate::util::{
    describe_country, format_timestamp_datetime, now_utc, parse_language, parse_user_id,
};
use anyhow::Result;
use clap::{ArgAction, Args, Subcommand};
use phonefield_core::domain::country_code;
use phonefield_core::{CoreError, Language, UserProfile};
use phonefield_store::repo::UserNew;
use serde::Serialize;

#[derive(Debug, Subcommand)]
pub enum UserCommand {
    Add(UserAddArgs),
    Show(UserShowArgs),
    Ls(UserListArgs),
    #[command(name = "set-country")]
    SetCountry(SetCountryArgs),
    #[command(name = "set-language")]
    SetLanguage(SetLanguageArgs),
    Rm(UserRemoveArgs),
}

#[derive(Debug, Args)]
pub struct UserAddArgs {
    #[arg(long)]
    pub name: String,
    /// Default country name or region code
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub language: Option<String>,
}

#[derive(Debug, Args)]
pub struct UserShowArgs {
    pub id: String,
}

#[derive(Debug, Args)]
pub struct UserListArgs {}

#[derive(Debug, Args)]
pub struct SetCountryArgs {
    pub id: String,
    pub country: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "country")]
    pub clear: bool,
}

#[derive(Debug, Args)]
pub struct SetLanguageArgs {
    pub id: String,
    pub language: Option<String>,
    #[arg(long, action = ArgAction::SetTrue, conflicts_with = "language")]
    pub clear: bool,
}

#[derive(Debug, Args)]
pub struct UserRemoveArgs {
    pub id: String,
}

#[derive(Debug, Serialize)]
struct UserDto {
    id: String,
    name: String,
    default_country: Option<String>,
    region: Option<String>,
    language: Option<Language>,
    created_at: i64,
    updated_at: i64,
}

impl From<UserProfile> for UserDto {
    fn from(user: UserProfile) -> Self {
        let region = user
            .default_country
            .as_deref()
            .and_then(country_code)
            .map(|region| region.to_string());
        Self {
            id: user.id.to_string(),
            name: user.name,
            default_country: user.default_country,
            region,
            language: user.language,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

pub fn add_user(ctx: &Context<'_>, args: UserAddArgs) -> Result<()> {
    let default_country = args.country.map(validate_country).transpose()?;
    let language = args.language.as_deref().map(parse_language).transpose()?;

    let user = ctx.store.users().create(
        now_utc(),
        UserNew {
            name: args.name,
            default_country,
            language,
        },
    )?;

    if ctx.json {
        print_json(&UserDto::from(user))?;
    } else {
        println!("created {} {}", user.id, user.name);
    }
    Ok(())
}

pub fn show_user(ctx: &Context<'_>, args: UserShowArgs) -> Result<()> {
    let id = parse_user_id(&args.id)?;
    let user = ctx
        .store
        .users()
        .get(id)?
        .ok_or_else(|| not_found(format!("user {}", id)))?;

    if ctx.json {
        return print_json(&UserDto::from(user));
    }

    println!("id: {}", user.id);
    println!("name: {}", user.name);
    match user.default_country.as_deref() {
        Some(country) => println!("default country: {}", describe_country(country)),
        None => println!("default country: -"),
    }
    match &user.language {
        Some(language) => println!("language: {}", language),
        None => println!("language: -"),
    }
    println!("created: {}", format_timestamp_datetime(user.created_at));
    println!("updated: {}", format_timestamp_datetime(user.updated_at));
    Ok(())
}

pub fn list_users(ctx: &Context<'_>, _args: UserListArgs) -> Result<()> {
    let users = ctx.store.users().list()?;
    if ctx.json {
        let items: Vec<UserDto> = users.into_iter().map(UserDto::from).collect();
        return print_json(&items);
    }

    if users.is_empty() {
        println!("no users");
        return Ok(());
    }

    for user in users {
        let country = user.default_country.as_deref().unwrap_or("-");
        println!("{}\t{}\t{}", user.id, user.name, country);
    }
    Ok(())
}

pub fn set_country(ctx: &Context<'_>, args: SetCountryArgs) -> Result<()> {
    let id = parse_user_id(&args.id)?;
    let country = match (args.country, args.clear) {
        (Some(country), false) => Some(validate_country(country)?),
        (None, true) => None,
        _ => return Err(invalid_input("provide a country or --clear")),
    };

    let user = ctx.store.users().set_default_country(now_utc(), id, country)?;
    if ctx.json {
        print_json(&UserDto::from(user))?;
    } else {
        match user.default_country.as_deref() {
            Some(country) => println!("default country of {} set to {}", user.id, country),
            None => println!("default country of {} cleared", user.id),
        }
    }
    Ok(())
}

pub fn set_language(ctx: &Context<'_>, args: SetLanguageArgs) -> Result<()> {
    let id = parse_user_id(&args.id)?;
    let language = match (args.language.as_deref(), args.clear) {
        (Some(raw), false) => Some(parse_language(raw)?),
        (None, true) => None,
        _ => return Err(invalid_input("provide a language or --clear")),
    };

    let user = ctx.store.users().set_language(now_utc(), id, language)?;
    if ctx.json {
        print_json(&UserDto::from(user))?;
    } else {
        match &user.language {
            Some(language) => println!("language of {} set to {}", user.id, language),
            None => println!("language of {} cleared", user.id),
        }
    }
    Ok(())
}

pub fn remove_user(ctx: &Context<'_>, args: UserRemoveArgs) -> Result<()> {
    let id = parse_user_id(&args.id)?;
    ctx.store.users().delete(id)?;

    if ctx.json {
        print_json(&serde_json::json!({ "id": id, "deleted": true }))?;
    } else {
        println!("deleted {}", id);
    }
    Ok(())
}

/// Keeps the value as typed but refuses countries without a region code.
fn validate_country(raw: String) -> Result<String> {
    if country_code(&raw).is_none() {
        return Err(CoreError::UnknownCountry(raw).into());
    }
    Ok(raw.trim().to_string())
}
