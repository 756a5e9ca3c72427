//! Repository layer contracts and SQLite persistence implementations.
//!
//! # Responsibility
//! - Define the narrow data access contracts the favorite service consumes.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Recipe writes enforce `Recipe::validate()` before persistence.
//! - Storage-level uniqueness violations surface as `RepoError::UniqueViolation`
//!   instead of a raw driver error.

use crate::db::DbError;
use crate::model::recipe::RecipeValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod favorite_repo;
pub mod recipe_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error shared by recipe and favorite persistence.
#[derive(Debug)]
pub enum RepoError {
    Validation(RecipeValidationError),
    Db(DbError),
    /// A unique constraint rejected the write.
    UniqueViolation(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::UniqueViolation(details) => write!(f, "unique constraint violated: {details}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::UniqueViolation(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<RecipeValidationError> for RepoError {
    fn from(value: RecipeValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        if is_unique_violation(&value) {
            return Self::UniqueViolation(value.to_string());
        }
        Self::Db(DbError::Sqlite(value))
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(inner, _)
            if inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                || inner.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY
    )
}
