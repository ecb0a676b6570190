//! Narrative assist gateway.
//!
//! # Responsibility
//! - Build refinement and tag-suggestion prompts with their output schemas.
//! - Decode service output into typed values.
//! - Offer absorbing variants that map any failure to empty values.
//!
//! # Invariants
//! - Absorbing variants never return an error and never return partial
//!   values: either the whole decoded value or the empty default.
//! - Only built-in tag keys are offered to the service.
//! - Decoding checks JSON shape only; tag texts are not validated locally.

use crate::assist::TextGenerator;
use crate::model::entry::Starr;
use crate::model::locale::Language;
use crate::model::tag::{builtin_keys_joined, TagCategory};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Gateway error for one assist call.
#[derive(Debug)]
pub enum AssistError {
    /// Network, HTTP status or envelope failure.
    Transport(anyhow::Error),
    /// Generated text is not JSON of the requested shape.
    MalformedResponse(serde_json::Error),
}

impl Display for AssistError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "assist transport failed: {err:#}"),
            Self::MalformedResponse(err) => write!(f, "assist response is malformed: {err}"),
        }
    }
}

impl Error for AssistError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(&**err),
            Self::MalformedResponse(err) => Some(err),
        }
    }
}

impl AssistError {
    fn code(&self) -> &'static str {
        match self {
            Self::Transport(_) => "transport_failed",
            Self::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Tag keys suggested for one narrative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagSuggestions {
    pub activity_tags: Vec<String>,
    pub competency_tags: Vec<String>,
}

impl TagSuggestions {
    pub fn is_empty(&self) -> bool {
        self.activity_tags.is_empty() && self.competency_tags.is_empty()
    }
}

/// Narrative and tags produced from one set of raw notes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssistedDraft {
    pub starr: Starr,
    pub suggestions: TagSuggestions,
}

/// Stateless gateway over a `TextGenerator`.
pub struct NarrativeAssist<G: TextGenerator> {
    generator: G,
}

impl<G: TextGenerator> NarrativeAssist<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Converts raw notes into STARR fields written in `language`.
    pub async fn try_refine_to_starr(
        &self,
        raw_notes: &str,
        language: Language,
    ) -> Result<Starr, AssistError> {
        let prompt = refine_prompt(raw_notes, language);
        let text = self
            .generator
            .generate_json(&prompt, &starr_schema())
            .await
            .map_err(AssistError::Transport)?;
        serde_json::from_str(&text).map_err(AssistError::MalformedResponse)
    }

    /// Like `try_refine_to_starr`, but any failure yields an empty STARR.
    pub async fn refine_to_starr(&self, raw_notes: &str, language: Language) -> Starr {
        match self.try_refine_to_starr(raw_notes, language).await {
            Ok(starr) => {
                info!(
                    "event=assist_refine module=assist status=ok provider={} language={}",
                    self.generator.name(),
                    language.code()
                );
                starr
            }
            Err(err) => {
                warn!(
                    "event=assist_refine module=assist status=fallback provider={} error_code={}",
                    self.generator.name(),
                    err.code()
                );
                Starr::default()
            }
        }
    }

    /// Asks the service to pick built-in tag keys for a narrative.
    pub async fn try_suggest_tags(&self, starr: &Starr) -> Result<TagSuggestions, AssistError> {
        let prompt = suggest_prompt(starr);
        let text = self
            .generator
            .generate_json(&prompt, &tag_schema())
            .await
            .map_err(AssistError::Transport)?;
        serde_json::from_str(&text).map_err(AssistError::MalformedResponse)
    }

    /// Like `try_suggest_tags`, but any failure yields two empty lists.
    pub async fn suggest_tags(&self, starr: &Starr) -> TagSuggestions {
        match self.try_suggest_tags(starr).await {
            Ok(suggestions) => {
                info!(
                    "event=assist_suggest module=assist status=ok provider={} activity={} competency={}",
                    self.generator.name(),
                    suggestions.activity_tags.len(),
                    suggestions.competency_tags.len()
                );
                suggestions
            }
            Err(err) => {
                warn!(
                    "event=assist_suggest module=assist status=fallback provider={} error_code={}",
                    self.generator.name(),
                    err.code()
                );
                TagSuggestions::default()
            }
        }
    }

    /// Refines notes, then suggests tags for the refined narrative.
    ///
    /// Returns `None` without calling the service when notes are blank.
    pub async fn assist_notes(&self, raw_notes: &str, language: Language) -> Option<AssistedDraft> {
        if raw_notes.trim().is_empty() {
            return None;
        }
        let starr = self.refine_to_starr(raw_notes, language).await;
        let suggestions = self.suggest_tags(&starr).await;
        Some(AssistedDraft { starr, suggestions })
    }
}

/// Prompt asking for a STARR object in `language`.
pub fn refine_prompt(raw_notes: &str, language: Language) -> String {
    format!(
        "Transform the following raw notes into a structured STARR (Situation, Task, Action, Result, Reflection) format.\n\
         {}\n\
         Provide the output as a JSON object.\n\n\
         Notes: {raw_notes}",
        language.refine_instruction()
    )
}

/// Prompt asking for built-in tag keys fitting `starr`.
pub fn suggest_prompt(starr: &Starr) -> String {
    format!(
        "Analyze this experience and suggest appropriate tags from these categories (Use the exact English keys):\n\
         Activities: {}\n\
         Competencies: {}\n\n\
         Experience:\n\
         Situation: {}\n\
         Task: {}\n\
         Action: {}\n\
         Result: {}\n\
         Reflection: {}\n\n\
         Return as a JSON object.",
        builtin_keys_joined(TagCategory::Activity),
        builtin_keys_joined(TagCategory::Competency),
        starr.situation,
        starr.task,
        starr.action,
        starr.result,
        starr.reflection
    )
}

/// Output schema with five required string fields.
pub fn starr_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "situation": { "type": "STRING" },
            "task": { "type": "STRING" },
            "action": { "type": "STRING" },
            "result": { "type": "STRING" },
            "reflection": { "type": "STRING" }
        },
        "required": ["situation", "task", "action", "result", "reflection"]
    })
}

/// Output schema with two required string-array fields.
pub fn tag_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "activityTags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "competencyTags": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["activityTags", "competencyTags"]
    })
}
