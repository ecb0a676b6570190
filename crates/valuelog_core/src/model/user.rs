//! Local profile model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a local profile.
pub type UserId = String;

/// Local profile selector. Not an authenticated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    /// Creates a profile with a freshly generated id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
        }
    }
}
