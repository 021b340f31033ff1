mod commands;
mod error;
mod util;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use crate::commands::{completions, phone, users, Context};
use crate::error::{exit_code_for, report_error};
use crate::util::{parse_language, parse_user_id};
use phonefield_config as config;
use phonefield_core::Session;
use phonefield_numbering::PhonenumberPlan;
use phonefield_store::{paths, Store};

#[derive(Debug, Parser)]
#[command(name = "phonefield", version, about = "phonefield CLI")]
struct Cli {
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[arg(long, global = true)]
    json: bool,
    #[arg(long, short, global = true)]
    verbose: bool,
    /// Acting user id
    #[arg(long, global = true)]
    user: Option<String>,
    /// Language for geocoding and carrier names
    #[arg(long, global = true)]
    language: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate shell completions
    Completions(completions::CompletionsArgs),
    /// Show details of a valid number
    Details(phone::DetailsArgs),
    /// Validate a number, rejecting unsupported region codes
    Verify(phone::DetailsArgs),
    /// Normalize numbers, falling back to the user's default country
    Proper(phone::ProperArgs),
    /// List supported region codes
    Regions(phone::RegionsArgs),
    /// Map a country name to its region code
    Country(phone::CountryArgs),
    #[command(subcommand)]
    User(users::UserCommand),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let verbose = cli.verbose;
    init_logging(verbose);
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            report_error(&err, verbose);
            exit_code_for(&err)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let Cli {
        db_path,
        config: config_path,
        json,
        verbose,
        user,
        language,
        command,
    } = cli;

    let command = match command {
        Command::Completions(args) => return completions::emit(args),
        command => command,
    };

    let app_config = config::load(config_path.clone()).with_context(|| "load config")?;
    if verbose {
        match config::resolve_config_path(config_path) {
            Ok(path) if path.exists() => debug!(path = %path.display(), "config resolved"),
            Ok(path) => debug!(path = %path.display(), "config missing, using defaults"),
            Err(err) => debug!(error = %err, "config unavailable"),
        }
    }

    let db_path = paths::resolve_db_path(db_path).with_context(|| "resolve database path")?;
    if verbose {
        debug!(path = %db_path.display(), "database path resolved");
    }

    let store = Store::open(&db_path)
        .with_context(|| format!("open database {}", db_path.display()))?;
    store.migrate().with_context(|| "run migrations")?;

    let plan = match &app_config.numbering.data_dir {
        Some(dir) => PhonenumberPlan::load(dir)
            .with_context(|| format!("load numbering data {}", dir.display()))?,
        None => PhonenumberPlan::new(),
    };

    let acting_user = match user.as_deref() {
        Some(raw) => Some(parse_user_id(raw)?),
        None => app_config.session.user,
    };
    let language = match language.as_deref() {
        Some(raw) => parse_language(raw)?,
        None => acting_user
            .map(|id| store.users().get(id))
            .transpose()?
            .flatten()
            .and_then(|profile| profile.language)
            .unwrap_or_else(|| app_config.session.language.clone()),
    };
    debug!(user = ?acting_user, language = %language, "session resolved");

    let ctx = Context {
        store: &store,
        plan: &plan,
        session: Session::new(acting_user, language),
        json,
    };

    match command {
        Command::Details(args) => phone::show_details(&ctx, args),
        Command::Verify(args) => phone::verify(&ctx, args),
        Command::Proper(args) => phone::proper(&ctx, args),
        Command::Regions(args) => phone::list_regions(&ctx, args),
        Command::Country(args) => phone::lookup_country(&ctx, args),
        Command::User(cmd) => match cmd {
            users::UserCommand::Add(args) => users::add_user(&ctx, args),
            users::UserCommand::Show(args) => users::show_user(&ctx, args),
            users::UserCommand::Ls(args) => users::list_users(&ctx, args),
            users::UserCommand::SetCountry(args) => users::set_country(&ctx, args),
            users::UserCommand::SetLanguage(args) => users::set_language(&ctx, args),
            users::UserCommand::Rm(args) => users::remove_user(&ctx, args),
        },
        Command::Completions(_) => {
            unreachable!("completions command handled before store initialization")
        }
    }
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();
}
