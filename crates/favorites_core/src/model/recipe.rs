//! Recipe reference model.
//!
//! # Responsibility
//! - Carry the recipe fields favorites need: identifier and title.
//!
//! # Invariants
//! - `title` is never empty or whitespace-only.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric recipe key owned by the recipe catalogue.
pub type RecipeId = i64;

/// Read-only recipe reference embedded in favorites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: RecipeId,
    pub title: String,
}

/// Validation failures for [`Recipe`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeValidationError {
    EmptyTitle(RecipeId),
}

impl Display for RecipeValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle(id) => write!(f, "recipe {id} has an empty title"),
        }
    }
}

impl Error for RecipeValidationError {}

impl Recipe {
    pub fn new(id: RecipeId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }

    /// Checks recipe invariants before persistence or after read-back.
    pub fn validate(&self) -> Result<(), RecipeValidationError> {
        if self.title.trim().is_empty() {
            return Err(RecipeValidationError::EmptyTitle(self.id));
        }
        Ok(())
    }
}
