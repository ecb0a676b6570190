//! Tag vocabulary keys.
//!
//! # Responsibility
//! - Define the closed set of built-in tag keys for both tag axes.
//! - Model user-defined tags as an explicit escape hatch.
//!
//! # Invariants
//! - Built-in keys are language-agnostic and never change spelling; they are
//!   what gets persisted on entries and offered to the narrative assist.
//! - `Leadership` is one key shared by both axes.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Tag axis of one vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagCategory {
    Activity,
    Competency,
}

impl TagCategory {
    /// Built-in keys of this axis in display order.
    pub fn builtin_tags(self) -> &'static [BuiltinTag] {
        match self {
            Self::Activity => ACTIVITY_TAGS,
            Self::Competency => COMPETENCY_TAGS,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Activity => "activity",
            Self::Competency => "competency",
        }
    }
}

/// Closed enumeration of built-in tag keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinTag {
    Art,
    Science,
    Sports,
    Volunteering,
    Career,
    Coding,
    Music,
    Leadership,
    Language,
    Reading,
    Curiosity,
    Collaboration,
    Grit,
    ProblemSolving,
    Creativity,
    Empathy,
    Communication,
}

/// Built-in activity keys in display order.
pub const ACTIVITY_TAGS: &[BuiltinTag] = &[
    BuiltinTag::Art,
    BuiltinTag::Science,
    BuiltinTag::Sports,
    BuiltinTag::Volunteering,
    BuiltinTag::Career,
    BuiltinTag::Coding,
    BuiltinTag::Music,
    BuiltinTag::Leadership,
    BuiltinTag::Language,
    BuiltinTag::Reading,
];

/// Built-in competency keys in display order.
pub const COMPETENCY_TAGS: &[BuiltinTag] = &[
    BuiltinTag::Curiosity,
    BuiltinTag::Collaboration,
    BuiltinTag::Grit,
    BuiltinTag::Leadership,
    BuiltinTag::ProblemSolving,
    BuiltinTag::Creativity,
    BuiltinTag::Empathy,
    BuiltinTag::Communication,
];

impl BuiltinTag {
    /// Persisted key text.
    pub fn key(self) -> &'static str {
        match self {
            Self::Art => "Art",
            Self::Science => "Science",
            Self::Sports => "Sports",
            Self::Volunteering => "Volunteering",
            Self::Career => "Career",
            Self::Coding => "Coding",
            Self::Music => "Music",
            Self::Leadership => "Leadership",
            Self::Language => "Language",
            Self::Reading => "Reading",
            Self::Curiosity => "Curiosity",
            Self::Collaboration => "Collaboration",
            Self::Grit => "Grit",
            Self::ProblemSolving => "Problem Solving",
            Self::Creativity => "Creativity",
            Self::Empathy => "Empathy",
            Self::Communication => "Communication",
        }
    }

    /// Exact, case-sensitive key lookup.
    pub fn from_key(value: &str) -> Option<Self> {
        match value {
            "Art" => Some(Self::Art),
            "Science" => Some(Self::Science),
            "Sports" => Some(Self::Sports),
            "Volunteering" => Some(Self::Volunteering),
            "Career" => Some(Self::Career),
            "Coding" => Some(Self::Coding),
            "Music" => Some(Self::Music),
            "Leadership" => Some(Self::Leadership),
            "Language" => Some(Self::Language),
            "Reading" => Some(Self::Reading),
            "Curiosity" => Some(Self::Curiosity),
            "Collaboration" => Some(Self::Collaboration),
            "Grit" => Some(Self::Grit),
            "Problem Solving" => Some(Self::ProblemSolving),
            "Creativity" => Some(Self::Creativity),
            "Empathy" => Some(Self::Empathy),
            "Communication" => Some(Self::Communication),
            _ => None,
        }
    }
}

/// A tag as stored on an entry: either a built-in key or a custom string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKey<'a> {
    BuiltIn(BuiltinTag),
    Custom(&'a str),
}

impl<'a> TagKey<'a> {
    /// Classifies raw stored text.
    pub fn parse(value: &'a str) -> Self {
        match BuiltinTag::from_key(value) {
            Some(tag) => Self::BuiltIn(tag),
            None => Self::Custom(value),
        }
    }

    pub fn as_str(&self) -> &'a str {
        match self {
            Self::BuiltIn(tag) => tag.key(),
            Self::Custom(value) => value,
        }
    }
}

impl Display for TagKey<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comma-joined built-in keys of one axis, as offered to the narrative assist.
pub fn builtin_keys_joined(category: TagCategory) -> String {
    category
        .builtin_tags()
        .iter()
        .map(|tag| tag.key())
        .collect::<Vec<_>>()
        .join(", ")
}
