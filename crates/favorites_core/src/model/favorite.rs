//! Favorite domain record.
//!
//! # Responsibility
//! - Link exactly one user to exactly one recipe.
//!
//! # Invariants
//! - `(user_id, recipe.id)` is unique across all favorites.
//! - `id` is a storage surrogate; it is `None` until the first save and is
//!   never used to decide equality of favorites.

use crate::model::recipe::{Recipe, RecipeId};
use crate::model::user::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage surrogate key for a favorite row.
pub type FavoriteId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    /// Assigned by the store on first save.
    pub id: Option<FavoriteId>,
    pub user_id: UserId,
    /// Recipe reference resolved at insert time.
    pub recipe: Recipe,
    /// Unix epoch milliseconds, assigned by the store.
    pub created_at: Option<i64>,
}

impl Favorite {
    /// Creates an unsaved favorite for `user_id` and `recipe`.
    pub fn new(user_id: UserId, recipe: Recipe) -> Self {
        Self {
            id: None,
            user_id,
            recipe,
            created_at: None,
        }
    }

    pub fn recipe_id(&self) -> RecipeId {
        self.recipe.id
    }

    /// Returns whether both favorites refer to the same `(user, recipe)` pair.
    pub fn same_pair(&self, other: &Favorite) -> bool {
        self.user_id == other.user_id && self.recipe.id == other.recipe.id
    }
}
