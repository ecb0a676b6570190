//! Child profile model.
//!
//! # Invariants
//! - `id` is unique within one user's child list.
//! - Children are never deleted automatically.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a child within one user's scope.
pub type ChildId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Child {
    pub id: ChildId,
    pub name: String,
    pub avatar_url: String,
}

impl Child {
    /// Creates a child with a generated id and an avatar URL seeded by that id.
    pub fn new(name: impl Into<String>) -> Self {
        let id = Uuid::new_v4().to_string();
        let avatar_url = avatar_url_for(&id);
        Self {
            id,
            name: name.into(),
            avatar_url,
        }
    }
}

/// Placeholder avatar URL derived from a stable seed.
pub fn avatar_url_for(seed: &str) -> String {
    format!("https://picsum.photos/seed/{seed}/200")
}
