//! Domain model for profiles, children and experience entries.
//!
//! # Responsibility
//! - Define the canonical records persisted by the profile store.
//! - Own the closed built-in tag vocabulary and its localized labels.
//!
//! # Invariants
//! - Every record is identified by a stable string id.
//! - Scoped records are partitioned by the owning user's id and never shared
//!   across users.

pub mod child;
pub mod entry;
pub mod locale;
pub mod tag;
pub mod user;
