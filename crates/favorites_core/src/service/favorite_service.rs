//! Favorite-recipe use-case service.
//!
//! # Responsibility
//! - Add, list and remove favorites for the acting user.
//! - Enforce existence and uniqueness rules before touching the store.
//! - Shape store records into presentation-ready `FavoriteResult` values.
//!
//! # Invariants
//! - Every operation resolves the acting user exactly once, before any
//!   repository access.
//! - Preconditions fail fast; a failed check never reaches a write.
//! - A store-level unique violation is reported as `Conflict`, the same as a
//!   failed existence check.
//! - Listing preserves the store's order.

use crate::identity::{AuthError, IdentityProvider};
use crate::model::favorite::Favorite;
use crate::model::recipe::RecipeId;
use crate::model::user::UserId;
use crate::repo::favorite_repo::FavoriteStore;
use crate::repo::recipe_repo::RecipeLookup;
use crate::repo::RepoError;
use log::{info, warn};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Coarse error category for presentation-layer mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteErrorKind {
    NotFound,
    Conflict,
    Unauthenticated,
    Internal,
}

/// Service error for favorite use-cases.
#[derive(Debug)]
pub enum FavoriteServiceError {
    /// No acting user could be resolved.
    Unauthenticated,
    /// Referenced recipe does not exist.
    RecipeNotFound(RecipeId),
    /// Acting user has no favorite for this recipe.
    FavoriteNotFound(RecipeId),
    /// Acting user already has a favorite for this recipe.
    Conflict { user_id: UserId, recipe_id: RecipeId },
    /// Storage rejected a write on a uniqueness constraint.
    StorageConflict(String),
    /// Persistence-layer failure.
    Repo(RepoError),
}

impl FavoriteServiceError {
    pub fn kind(&self) -> FavoriteErrorKind {
        match self {
            Self::Unauthenticated => FavoriteErrorKind::Unauthenticated,
            Self::RecipeNotFound(_) | Self::FavoriteNotFound(_) => FavoriteErrorKind::NotFound,
            Self::Conflict { .. } | Self::StorageConflict(_) => FavoriteErrorKind::Conflict,
            Self::Repo(_) => FavoriteErrorKind::Internal,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::RecipeNotFound(_) => "recipe_not_found",
            Self::FavoriteNotFound(_) => "favorite_not_found",
            Self::Conflict { .. } | Self::StorageConflict(_) => "favorite_conflict",
            Self::Repo(_) => "db_error",
        }
    }
}

impl Display for FavoriteServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "authentication required"),
            Self::RecipeNotFound(id) => write!(f, "recipe not found: {id}"),
            Self::FavoriteNotFound(id) => write!(f, "favorite not found for recipe: {id}"),
            Self::Conflict { user_id, recipe_id } => write!(
                f,
                "recipe {recipe_id} is already a favorite of user {user_id}"
            ),
            Self::StorageConflict(details) => write!(f, "favorite already exists: {details}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for FavoriteServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for FavoriteServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::UniqueViolation(details) => Self::StorageConflict(details),
            other => Self::Repo(other),
        }
    }
}

impl From<AuthError> for FavoriteServiceError {
    fn from(value: AuthError) -> Self {
        match value {
            AuthError::Unauthenticated => Self::Unauthenticated,
        }
    }
}

/// Recipe fields exposed with a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteRecipe {
    pub id: RecipeId,
    pub title: String,
}

/// Externally visible shape of one favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FavoriteResult {
    pub recipe: FavoriteRecipe,
    pub user_id: UserId,
}

impl From<&Favorite> for FavoriteResult {
    fn from(favorite: &Favorite) -> Self {
        Self {
            recipe: FavoriteRecipe {
                id: favorite.recipe_id(),
                title: favorite.recipe.title.clone(),
            },
            user_id: favorite.user_id,
        }
    }
}

/// Favorite service facade over recipe lookup and favorite store.
pub struct FavoriteService<R: RecipeLookup, F: FavoriteStore> {
    recipes: R,
    favorites: F,
}

impl<R: RecipeLookup, F: FavoriteStore> FavoriteService<R, F> {
    pub fn new(recipes: R, favorites: F) -> Self {
        Self { recipes, favorites }
    }

    /// Marks `recipe_id` as a favorite of the acting user.
    ///
    /// # Errors
    /// - `Unauthenticated` when `identity` resolves no user.
    /// - `RecipeNotFound` when the recipe does not exist.
    /// - `Conflict` when the favorite already exists, including when a
    ///   concurrent insert wins the storage uniqueness constraint.
    pub fn insert_favorite_recipe(
        &self,
        identity: &impl IdentityProvider,
        recipe_id: RecipeId,
    ) -> Result<FavoriteResult, FavoriteServiceError> {
        let user = identity.current_user()?;
        let result = self.insert_for_user(user.id, recipe_id);
        log_outcome("favorite_insert", user.id, recipe_id, &result);
        result
    }

    /// Lists all favorites of the acting user in store order.
    pub fn get_favorite_recipes_me(
        &self,
        identity: &impl IdentityProvider,
    ) -> Result<Vec<FavoriteResult>, FavoriteServiceError> {
        let user = identity.current_user()?;
        let result = self
            .favorites
            .find_all_for_user(user.id)
            .map(|favorites| favorites.iter().map(FavoriteResult::from).collect::<Vec<_>>())
            .map_err(FavoriteServiceError::from);
        match &result {
            Ok(items) => info!(
                "event=favorite_list module=favorite_service status=ok user_id={} count={}",
                user.id,
                items.len()
            ),
            Err(err) => warn!(
                "event=favorite_list module=favorite_service status=error user_id={} error_code={}",
                user.id,
                err.code()
            ),
        }
        result
    }

    /// Removes the acting user's favorite for `recipe_id`.
    ///
    /// # Errors
    /// - `Unauthenticated` when `identity` resolves no user.
    /// - `FavoriteNotFound` when the user has no such favorite, or when the
    ///   row disappeared between the check and the delete.
    pub fn delete_favorite_by_recipe_id(
        &self,
        identity: &impl IdentityProvider,
        recipe_id: RecipeId,
    ) -> Result<(), FavoriteServiceError> {
        let user = identity.current_user()?;
        let result = self.delete_for_user(user.id, recipe_id);
        log_outcome("favorite_delete", user.id, recipe_id, &result);
        result
    }

    fn insert_for_user(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<FavoriteResult, FavoriteServiceError> {
        let recipe = self
            .recipes
            .find_by_id(recipe_id)?
            .ok_or(FavoriteServiceError::RecipeNotFound(recipe_id))?;

        if self
            .favorites
            .exists_for_user_and_recipe(user_id, recipe_id)?
        {
            return Err(FavoriteServiceError::Conflict { user_id, recipe_id });
        }

        let saved = self
            .favorites
            .save(&Favorite::new(user_id, recipe))
            .map_err(|err| match FavoriteServiceError::from(err) {
                FavoriteServiceError::StorageConflict(_) => {
                    FavoriteServiceError::Conflict { user_id, recipe_id }
                }
                other => other,
            })?;

        Ok(FavoriteResult::from(&saved))
    }

    fn delete_for_user(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> Result<(), FavoriteServiceError> {
        if !self
            .favorites
            .exists_for_user_and_recipe(user_id, recipe_id)?
        {
            return Err(FavoriteServiceError::FavoriteNotFound(recipe_id));
        }

        let removed = self
            .favorites
            .delete_for_user_and_recipe(recipe_id, user_id)?;
        if removed == 0 {
            return Err(FavoriteServiceError::FavoriteNotFound(recipe_id));
        }

        Ok(())
    }
}

fn log_outcome<T>(
    event: &str,
    user_id: UserId,
    recipe_id: RecipeId,
    result: &Result<T, FavoriteServiceError>,
) {
    match result {
        Ok(_) => info!(
            "event={event} module=favorite_service status=ok user_id={user_id} recipe_id={recipe_id}"
        ),
        Err(err) => warn!(
            "event={event} module=favorite_service status=error user_id={user_id} recipe_id={recipe_id} error_code={}",
            err.code()
        ),
    }
}
