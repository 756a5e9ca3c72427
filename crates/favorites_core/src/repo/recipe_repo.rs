//! Recipe lookup contract and SQLite implementation.
//!
//! # Responsibility
//! - Resolve recipes by identifier for existence checks and result shaping.
//! - Seed recipe rows for local runs and tests; recipe editing lives elsewhere.
//!
//! # Invariants
//! - Read paths reject persisted rows that fail `Recipe::validate()`.

use crate::model::recipe::{Recipe, RecipeId};
use crate::repo::{RepoError, RepoResult};
use rusqlite::{params, Connection, OptionalExtension, Row};

/// Read-only recipe access used by the favorite service.
pub trait RecipeLookup {
    fn find_by_id(&self, id: RecipeId) -> RepoResult<Option<Recipe>>;
}

impl<T: RecipeLookup + ?Sized> RecipeLookup for &T {
    fn find_by_id(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        (**self).find_by_id(id)
    }
}

/// SQLite-backed recipe lookup.
pub struct SqliteRecipeRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRecipeRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Inserts one recipe row with a caller-provided identifier.
    ///
    /// Returns `RepoError::UniqueViolation` when the identifier is taken.
    pub fn insert_recipe(&self, recipe: &Recipe) -> RepoResult<RecipeId> {
        recipe.validate()?;
        self.conn.execute(
            "INSERT INTO recipes (id, title) VALUES (?1, ?2);",
            params![recipe.id, recipe.title.as_str()],
        )?;
        Ok(recipe.id)
    }
}

impl RecipeLookup for SqliteRecipeRepository<'_> {
    fn find_by_id(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        let recipe = self
            .conn
            .query_row(
                "SELECT id, title FROM recipes WHERE id = ?1;",
                [id],
                parse_recipe_row,
            )
            .optional()?;

        match recipe {
            Some(recipe) => {
                recipe
                    .validate()
                    .map_err(|err| RepoError::InvalidData(err.to_string()))?;
                Ok(Some(recipe))
            }
            None => Ok(None),
        }
    }
}

fn parse_recipe_row(row: &Row<'_>) -> rusqlite::Result<Recipe> {
    Ok(Recipe {
        id: row.get("id")?,
        title: row.get("title")?,
    })
}

#[cfg(test)]
mod tests {
    use super::{RecipeLookup, SqliteRecipeRepository};
    use crate::db::open_db_in_memory;
    use crate::model::recipe::Recipe;
    use crate::repo::RepoError;

    #[test]
    fn insert_and_find_recipe() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteRecipeRepository::new(&conn);

        repo.insert_recipe(&Recipe::new(1, "Bolo de Fubá")).unwrap();

        let loaded = repo.find_by_id(1).unwrap().unwrap();
        assert_eq!(loaded, Recipe::new(1, "Bolo de Fubá"));
        assert!(repo.find_by_id(2).unwrap().is_none());
    }

    #[test]
    fn insert_rejects_blank_title_and_duplicate_id() {
        let conn = open_db_in_memory().unwrap();
        let repo = SqliteRecipeRepository::new(&conn);

        let err = repo.insert_recipe(&Recipe::new(1, " ")).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));

        repo.insert_recipe(&Recipe::new(1, "Cuscuz")).unwrap();
        let err = repo.insert_recipe(&Recipe::new(1, "Tapioca")).unwrap_err();
        assert!(matches!(err, RepoError::UniqueViolation(_)));
    }
}
