//! Domain model for the favorite-recipe workflow.
//!
//! # Responsibility
//! - Define the records the favorite service reads and writes.
//! - Keep user and recipe shapes minimal: both are owned elsewhere.
//!
//! # Invariants
//! - A favorite is identified by its `(user_id, recipe.id)` pair.
//! - Favorites are immutable once persisted; there is no update path.

pub mod favorite;
pub mod recipe;
pub mod user;
