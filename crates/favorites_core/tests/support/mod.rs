//! Recording test doubles for the favorite service collaborators.

#![allow(dead_code)]

use favorites_core::{
    AuthError, Favorite, FavoriteStore, IdentityProvider, Recipe, RecipeId, RecipeLookup,
    RepoError, RepoResult, RequestIdentity, User, UserId,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use uuid::Uuid;

pub struct CountingIdentity {
    inner: RequestIdentity,
    pub calls: Cell<usize>,
}

impl CountingIdentity {
    pub fn user(id: UserId) -> Self {
        Self {
            inner: RequestIdentity::authenticated(User::new(id)),
            calls: Cell::new(0),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            inner: RequestIdentity::anonymous(),
            calls: Cell::new(0),
        }
    }
}

impl IdentityProvider for CountingIdentity {
    fn current_user(&self) -> Result<User, AuthError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.current_user()
    }
}

#[derive(Default)]
pub struct RecordingRecipes {
    recipes: HashMap<RecipeId, Recipe>,
    pub find_calls: Cell<usize>,
}

impl RecordingRecipes {
    pub fn with(recipes: impl IntoIterator<Item = Recipe>) -> Self {
        Self {
            recipes: recipes.into_iter().map(|r| (r.id, r)).collect(),
            find_calls: Cell::new(0),
        }
    }
}

impl RecipeLookup for RecordingRecipes {
    fn find_by_id(&self, id: RecipeId) -> RepoResult<Option<Recipe>> {
        self.find_calls.set(self.find_calls.get() + 1);
        Ok(self.recipes.get(&id).cloned())
    }
}

/// In-memory favorite store that counts every call.
///
/// Like the SQLite store it rejects a second save of the same
/// `(user, recipe)` pair with `RepoError::UniqueViolation`.
#[derive(Default)]
pub struct RecordingFavorites {
    rows: RefCell<Vec<Favorite>>,
    exists_override: Option<bool>,
    delete_removes_nothing: bool,
    pub exists_calls: Cell<usize>,
    pub save_calls: Cell<usize>,
    pub list_calls: Cell<usize>,
    pub delete_calls: Cell<usize>,
}

impl RecordingFavorites {
    pub fn with(rows: impl IntoIterator<Item = Favorite>) -> Self {
        Self {
            rows: RefCell::new(rows.into_iter().collect()),
            ..Self::default()
        }
    }

    /// Existence check passes but `existing` is already stored, as when a
    /// concurrent request inserted it between the check and the save.
    pub fn racing(existing: Favorite) -> Self {
        Self {
            exists_override: Some(false),
            ..Self::with([existing])
        }
    }

    /// Existence check passes but the delete finds no row, as when a
    /// concurrent request removed it first.
    pub fn removing_nothing() -> Self {
        Self {
            exists_override: Some(true),
            delete_removes_nothing: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.rows.borrow().len()
    }

    pub fn contains(&self, user_id: UserId, recipe_id: RecipeId) -> bool {
        self.rows
            .borrow()
            .iter()
            .any(|f| f.user_id == user_id && f.recipe_id() == recipe_id)
    }
}

impl FavoriteStore for RecordingFavorites {
    fn exists_for_user_and_recipe(
        &self,
        user_id: UserId,
        recipe_id: RecipeId,
    ) -> RepoResult<bool> {
        self.exists_calls.set(self.exists_calls.get() + 1);
        Ok(self
            .exists_override
            .unwrap_or_else(|| self.contains(user_id, recipe_id)))
    }

    fn save(&self, favorite: &Favorite) -> RepoResult<Favorite> {
        self.save_calls.set(self.save_calls.get() + 1);
        if self.rows.borrow().iter().any(|f| f.same_pair(favorite)) {
            return Err(RepoError::UniqueViolation(
                "favorites.user_id, favorites.recipe_id".to_string(),
            ));
        }
        let mut saved = favorite.clone();
        saved.id = Some(favorite.id.unwrap_or_else(Uuid::new_v4));
        saved.created_at = Some(0);
        self.rows.borrow_mut().push(saved.clone());
        Ok(saved)
    }

    fn find_all_for_user(&self, user_id: UserId) -> RepoResult<Vec<Favorite>> {
        self.list_calls.set(self.list_calls.get() + 1);
        Ok(self
            .rows
            .borrow()
            .iter()
            .filter(|f| f.user_id == user_id)
            .cloned()
            .collect())
    }

    fn delete_for_user_and_recipe(
        &self,
        recipe_id: RecipeId,
        user_id: UserId,
    ) -> RepoResult<usize> {
        self.delete_calls.set(self.delete_calls.get() + 1);
        if self.delete_removes_nothing {
            return Ok(0);
        }
        let mut rows = self.rows.borrow_mut();
        let before = rows.len();
        rows.retain(|f| !(f.user_id == user_id && f.recipe_id() == recipe_id));
        Ok(before - rows.len())
    }
}
