//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-scoped document store contract.
//! - Isolate SQLite and JSON encoding details from session orchestration.
//!
//! # Invariants
//! - Read paths fall back to seed/default values instead of failing.
//! - Write paths surface backend failures unchanged, without retry.

pub mod kv_store;
pub mod profile_store;
pub mod seed;
