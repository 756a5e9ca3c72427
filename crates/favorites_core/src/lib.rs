//! Core domain logic for recipe favorites.
//! This crate is the single source of truth for favoriting invariants.

pub mod config;
pub mod db;
pub mod identity;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{ConfigError, CoreConfig};
pub use identity::{AuthError, IdentityProvider, RequestIdentity};
pub use logging::{default_log_level, init_logging, init_logging_from_config, logging_status};
pub use model::favorite::{Favorite, FavoriteId};
pub use model::recipe::{Recipe, RecipeId, RecipeValidationError};
pub use model::user::{User, UserId};
pub use repo::favorite_repo::{FavoriteStore, SqliteFavoriteRepository};
pub use repo::recipe_repo::{RecipeLookup, SqliteRecipeRepository};
pub use repo::{RepoError, RepoResult};
pub use service::favorite_service::{
    FavoriteErrorKind, FavoriteRecipe, FavoriteResult, FavoriteService, FavoriteServiceError,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
