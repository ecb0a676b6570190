//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate profile store calls into session-level APIs.
//! - Keep aggregation and vocabulary rules independent of storage details.

pub mod session;
pub mod stats_service;
pub mod tag_service;
