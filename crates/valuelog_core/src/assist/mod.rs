//! Narrative assist over an external text-generation service.
//!
//! # Responsibility
//! - Define the transport seam (`TextGenerator`) for schema-constrained JSON
//!   generation.
//! - Turn raw notes into STARR fields and suggest built-in tags, absorbing
//!   every service failure into empty values.
//!
//! # Invariants
//! - Calls are single-shot: no retry, no cancellation.
//! - No state is shared between calls; callers own `AssistState`.

use anyhow::Result;
use async_trait::async_trait;

pub mod gateway;
pub mod gemini;
pub mod state;

pub use gateway::{AssistError, AssistedDraft, NarrativeAssist, TagSuggestions};
pub use gemini::GeminiClient;
pub use state::AssistState;

/// Transport for schema-constrained text generation.
///
/// Implementations return the raw JSON text produced by the service. Shape
/// checking happens in the gateway.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Sends `prompt` with the requested output `schema` and returns the
    /// generated JSON text.
    async fn generate_json(&self, prompt: &str, schema: &serde_json::Value) -> Result<String>;

    /// Provider name used in diagnostics (e.g. "gemini").
    fn name(&self) -> &str;
}
