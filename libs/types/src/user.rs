//! User records

use crate::ids::UserId;
use serde::{Deserialize, Serialize};

/// A registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
}

impl User {
    /// Create a user
    ///
    /// # Panics
    /// Panics on an invalid id or an empty name; both are validated by the
    /// caller before construction.
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(id.is_valid(), "user id must be valid");
        assert!(!name.is_empty(), "user name must be non-empty");
        Self { id, name }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
