//! Acting user identity.

use serde::{Deserialize, Serialize};

/// Numeric user key issued by the identity provider.
pub type UserId = i64;

/// Authenticated user as resolved for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
}

impl User {
    pub fn new(id: UserId) -> Self {
        Self { id }
    }
}
