//! Command-line presentation layer over `favorites_core`.
//!
//! # Responsibility
//! - Map subcommands onto favorite service operations for one acting user.
//! - Translate service errors into stable messages and exit codes.

use clap::{Parser, Subcommand};
use favorites_core::db::{open_db, open_db_in_memory};
use favorites_core::{
    core_version, init_logging_from_config, CoreConfig, FavoriteErrorKind, FavoriteService,
    FavoriteServiceError, Recipe, RecipeId, RequestIdentity, SqliteFavoriteRepository,
    SqliteRecipeRepository, User, UserId,
};
use log::error;
use rusqlite::Connection;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Parser)]
#[command(name = "favorites", about = "Manage favorite recipes", version)]
struct CliArgs {
    /// SQLite database file. Falls back to `FAVORITES_DB_PATH`, then memory.
    #[arg(long = "db", value_name = "path", global = true)]
    db_path: Option<PathBuf>,
    /// Acting user identifier. Commands run unauthenticated when omitted.
    #[arg(long = "user", value_name = "id", global = true)]
    user_id: Option<UserId>,
    /// Log level (`trace|debug|info|warn|error`).
    #[arg(long = "log-level", value_name = "level", global = true)]
    log_level: Option<String>,
    /// Absolute directory for rolling log files.
    #[arg(long = "log-dir", value_name = "path", global = true)]
    log_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Mark a recipe as favorite.
    Add { recipe_id: RecipeId },
    /// List favorites of the acting user.
    List,
    /// Remove a recipe from favorites.
    Remove { recipe_id: RecipeId },
    /// Insert a recipe row for local runs.
    SeedRecipe { recipe_id: RecipeId, title: String },
    /// Print the core version.
    Version,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(failure) => {
            eprintln!("error[{}]: {}", failure.code, failure.message);
            ExitCode::from(failure.exit_code)
        }
    }
}

struct Failure {
    code: &'static str,
    message: String,
    exit_code: u8,
}

impl Failure {
    fn setup(message: impl Into<String>) -> Self {
        Self {
            code: "setup_failed",
            message: message.into(),
            exit_code: 1,
        }
    }
}

impl From<FavoriteServiceError> for Failure {
    fn from(err: FavoriteServiceError) -> Self {
        let exit_code = match err.kind() {
            FavoriteErrorKind::Internal => 1,
            FavoriteErrorKind::NotFound => 3,
            FavoriteErrorKind::Conflict => 4,
            FavoriteErrorKind::Unauthenticated => 5,
        };
        Self {
            code: err.code(),
            message: err.to_string(),
            exit_code,
        }
    }
}

fn run(args: CliArgs) -> Result<(), Failure> {
    let config = resolve_config(&args)?;
    init_logging_from_config(&config).map_err(Failure::setup)?;

    if let Command::Version = args.command {
        println!("favorites_core version={}", core_version());
        return Ok(());
    }

    let conn = open_connection(&config)?;
    let recipes = SqliteRecipeRepository::new(&conn);
    let favorites = SqliteFavoriteRepository::new(&conn);
    let identity = match args.user_id {
        Some(id) => RequestIdentity::authenticated(User::new(id)),
        None => RequestIdentity::anonymous(),
    };

    let service = FavoriteService::new(&recipes, &favorites);

    match args.command {
        Command::Add { recipe_id } => {
            let result = service.insert_favorite_recipe(&identity, recipe_id)?;
            print_json(&result)
        }
        Command::List => {
            let results = service.get_favorite_recipes_me(&identity)?;
            print_json(&results)
        }
        Command::Remove { recipe_id } => {
            service.delete_favorite_by_recipe_id(&identity, recipe_id)?;
            Ok(())
        }
        Command::SeedRecipe { recipe_id, title } => {
            let recipe = Recipe::new(recipe_id, title);
            recipes.insert_recipe(&recipe).map_err(|err| {
                error!("event=recipe_seed module=cli status=error recipe_id={recipe_id} error={err}");
                Failure::setup(err.to_string())
            })?;
            print_json(&recipe)
        }
        Command::Version => Ok(()),
    }
}

fn resolve_config(args: &CliArgs) -> Result<CoreConfig, Failure> {
    let mut config = CoreConfig::from_env().map_err(|err| Failure::setup(err.to_string()))?;
    if let Some(path) = &args.db_path {
        config.db_path = Some(path.clone());
    }
    if let Some(level) = &args.log_level {
        config
            .set_log_level(level)
            .map_err(|err| Failure::setup(err.to_string()))?;
    }
    if let Some(dir) = &args.log_dir {
        config.log_dir = Some(dir.clone());
    }
    Ok(config)
}

fn open_connection(config: &CoreConfig) -> Result<Connection, Failure> {
    let opened = match &config.db_path {
        Some(path) => open_db(path),
        None => open_db_in_memory(),
    };
    opened.map_err(|err| Failure::setup(format!("failed to open database: {err}")))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), Failure> {
    let rendered = serde_json::to_string_pretty(value)
        .map_err(|err| Failure::setup(format!("failed to render output: {err}")))?;
    println!("{rendered}");
    Ok(())
}
