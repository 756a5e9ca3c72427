//! Favorite store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist favorites keyed by `(user_id, recipe_id)`.
//! - Answer existence, listing and removal queries for one user.
//!
//! # Invariants
//! - The `favorites` table carries `UNIQUE (user_id, recipe_id)`; a racing
//!   duplicate insert fails with `RepoError::UniqueViolation`.
//! - `save` assigns a surrogate ID only when the favorite has none.
//! - Listing order is insertion order: `created_at ASC, rowid ASC`.

use crate::model::favorite::Favorite;
use crate::model::recipe::{Recipe, RecipeId};
use crate::model::user::UserId;
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, Row};
use uuid::Uuid;

/// Persistence contract for favorite records.
pub trait FavoriteStore {
    fn exists_for_user_and_recipe(&self, user_id: UserId, recipe_id: RecipeId)
        -> RepoResult<bool>;
    /// Persists a new favorite and returns it with storage-assigned fields.
    fn save(&self, favorite: &Favorite) -> RepoResult<Favorite>;
    fn find_all_for_user(&self, user_id: UserId) -> RepoResult<Vec<Favorite>>;
    /// Removes the favorite for the pair and returns the number of rows removed.
    fn delete_for_user_and_recipe(&self, recipe_id: RecipeId, user_id: UserId)
        -> RepoResult<usize>;
}

impl<T: FavoriteStore + ?Sized> FavoriteStore for &T {
    fn exists_for_user_and_recipe(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> RepoResult<bool> {
        (**self).exists_for_user_and_recipe(user_id, recipe_id)
    }

    fn save(&self, favorite: &Favorite) -> RepoResult<Favorite> {
        (**self).save(favorite)
    }

    fn find_all_for_user(&self, user_id: UserId) -> RepoResult<Vec<Favorite>> {
        (**self).find_all_for_user(user_id)
    }

    fn delete_for_user_and_recipe(
        &self,
        recipe_id: RecipeId,
        user_id: UserId,
    ) -> RepoResult<usize> {
        (**self).delete_for_user_and_recipe(recipe_id, user_id)
    }
}

/// SQLite-backed favorite store.
pub struct SqliteFavoriteRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteFavoriteRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl FavoriteStore for SqliteFavoriteRepository<'_> {
    fn exists_for_user_and_recipe(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> RepoResult<bool> {
        let exists: i64 = self.conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM favorites WHERE user_id = ?1 AND recipe_id = ?2
            );",
            params![user_id, recipe_id],
            |row| row.get(0),
        )?;
        Ok(exists == 1)
    }

    fn save(&self, favorite: &Favorite) -> RepoResult<Favorite> {
        let id = favorite.id.unwrap_or_else(Uuid::new_v4);

        let created_at: i64 = self.conn.query_row(
            "INSERT INTO favorites (uuid, user_id, recipe_id)
             VALUES (?1, ?2, ?3)
             RETURNING created_at;",
            params![id.to_string(), favorite.user_id, favorite.recipe_id()],
            |row| row.get(0),
        )?;

        Ok(Favorite {
            id: Some(id),
            user_id: favorite.user_id,
            recipe: favorite.recipe.clone(),
            created_at: Some(created_at),
        })
    }

    fn find_all_for_user(&self, user_id: UserId) -> RepoResult<Vec<Favorite>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                f.uuid,
                f.user_id,
                f.created_at,
                r.id AS recipe_id,
                r.title AS recipe_title
             FROM favorites f
             JOIN recipes r ON r.id = f.recipe_id
             WHERE f.user_id = ?1
             ORDER BY f.created_at ASC, f.rowid ASC;",
        )?;

        let mut rows = stmt.query([user_id])?;
        let mut favorites = Vec::new();
        while let Some(row) = rows.next()? {
            favorites.push(parse_favorite_row(row)?);
        }

        Ok(favorites)
    }

    fn delete_for_user_and_recipe(
        &self,
        recipe_id: RecipeId,
        user_id: UserId,
    ) -> RepoResult<usize> {
        let removed = self.conn.execute(
            "DELETE FROM favorites WHERE recipe_id = ?1 AND user_id = ?2;",
            params![recipe_id, user_id],
        )?;
        Ok(removed)
    }
}

fn parse_favorite_row(row: &Row<'_>) -> RepoResult<Favorite> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in favorites.uuid"))
    })?;

    let recipe = Recipe {
        id: row.get("recipe_id")?,
        title: row.get("recipe_title")?,
    };
    recipe
        .validate()
        .map_err(|err| RepoError::InvalidData(err.to_string()))?;

    Ok(Favorite {
        id: Some(id),
        user_id: row.get("user_id")?,
        recipe,
        created_at: Some(row.get("created_at")?),
    })
}
