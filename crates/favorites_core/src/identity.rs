//! Acting-user resolution for one request.
//!
//! # Responsibility
//! - Define the contract the favorite service uses to resolve the acting user.
//! - Provide a request-scoped value that presentation layers fill in after
//!   validating credentials.
//!
//! # Invariants
//! - Identity is passed explicitly into every service call; core never reads
//!   ambient or global session state.
//! - An unresolvable user is reported as `AuthError::Unauthenticated`.

use crate::model::user::User;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    Unauthenticated,
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthenticated => write!(f, "no authenticated user for this request"),
        }
    }
}

impl Error for AuthError {}

/// Resolves the user acting in the current request.
pub trait IdentityProvider {
    fn current_user(&self) -> Result<User, AuthError>;
}

impl<T: IdentityProvider + ?Sized> IdentityProvider for &T {
    fn current_user(&self) -> Result<User, AuthError> {
        (**self).current_user()
    }
}

/// Identity captured by the presentation layer for a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestIdentity {
    user: Option<User>,
}

impl RequestIdentity {
    pub fn authenticated(user: User) -> Self {
        Self { user: Some(user) }
    }

    pub fn anonymous() -> Self {
        Self { user: None }
    }
}

impl IdentityProvider for RequestIdentity {
    fn current_user(&self) -> Result<User, AuthError> {
        self.user.ok_or(AuthError::Unauthenticated)
    }
}
