//! Experience entry model.
//!
//! # Responsibility
//! - Define the STARR narrative value object and the persisted entry record.
//! - Validate entry invariants before persistence.
//!
//! # Invariants
//! - `satisfaction` is within `1..=5`.
//! - `date` is a calendar-valid `YYYY-MM-DD` string, so lexical order equals
//!   chronological order.
//! - Entries are immutable once stored; removal is a full-record delete.

use crate::model::child::ChildId;
use crate::model::user::UserId;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static ISO_DATE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid iso date regex"));

pub const MIN_SATISFACTION: u8 = 1;
pub const MAX_SATISFACTION: u8 = 5;

/// Stable identifier of one experience entry.
pub type EntryId = String;

/// Situation-Task-Action-Result-Reflection narrative.
///
/// All fields are free text; emptiness is allowed at the type level.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Starr {
    pub situation: String,
    pub task: String,
    pub action: String,
    pub result: String,
    pub reflection: String,
}

impl Starr {
    /// Returns whether every field is empty.
    pub fn is_blank(&self) -> bool {
        [
            &self.situation,
            &self.task,
            &self.action,
            &self.result,
            &self.reflection,
        ]
        .iter()
        .all(|field| field.is_empty())
    }
}

/// One logged experience for a child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    pub id: EntryId,
    pub child_id: ChildId,
    pub user_id: UserId,
    pub title: String,
    /// ISO calendar date, day granularity.
    pub date: String,
    pub starr: Starr,
    pub activity_tags: Vec<String>,
    pub competency_tags: Vec<String>,
    pub satisfaction: u8,
    /// Encoded image payload (for example a data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Validation errors for experience entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    EmptyTitle,
    InvalidDate(String),
    SatisfactionOutOfRange(u8),
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "entry title cannot be empty"),
            Self::InvalidDate(value) => {
                write!(f, "entry date `{value}` is not a valid YYYY-MM-DD date")
            }
            Self::SatisfactionOutOfRange(value) => write!(
                f,
                "satisfaction {value} is outside {MIN_SATISFACTION}..={MAX_SATISFACTION}"
            ),
        }
    }
}

impl Error for EntryValidationError {}

/// Form input for a new entry. Ids and ownership are assigned on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryDraft {
    pub title: String,
    pub date: String,
    pub starr: Starr,
    pub activity_tags: Vec<String>,
    pub competency_tags: Vec<String>,
    pub satisfaction: u8,
    pub image: Option<String>,
}

impl EntryDraft {
    /// Creates a draft with empty narrative, no tags and top satisfaction.
    pub fn new(title: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date: date.into(),
            starr: Starr::default(),
            activity_tags: Vec::new(),
            competency_tags: Vec::new(),
            satisfaction: MAX_SATISFACTION,
            image: None,
        }
    }

    /// Builds a validated entry owned by `user_id` and `child_id`.
    ///
    /// Title is trimmed and tag lists are deduplicated keeping first
    /// occurrence order.
    pub fn into_entry(
        self,
        user_id: &str,
        child_id: &str,
    ) -> Result<ExperienceEntry, EntryValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(EntryValidationError::EmptyTitle);
        }

        let entry = ExperienceEntry {
            id: Uuid::new_v4().to_string(),
            child_id: child_id.to_string(),
            user_id: user_id.to_string(),
            title,
            date: self.date.trim().to_string(),
            starr: self.starr,
            activity_tags: dedupe_tags(self.activity_tags),
            competency_tags: dedupe_tags(self.competency_tags),
            satisfaction: self.satisfaction,
            image: self.image.filter(|value| !value.is_empty()),
        };
        entry.validate()?;
        Ok(entry)
    }
}

impl ExperienceEntry {
    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.title.trim().is_empty() {
            return Err(EntryValidationError::EmptyTitle);
        }
        if !is_iso_date(&self.date) {
            return Err(EntryValidationError::InvalidDate(self.date.clone()));
        }
        if !(MIN_SATISFACTION..=MAX_SATISFACTION).contains(&self.satisfaction) {
            return Err(EntryValidationError::SatisfactionOutOfRange(
                self.satisfaction,
            ));
        }
        Ok(())
    }
}

/// Returns whether `value` is a calendar-valid `YYYY-MM-DD` date.
pub fn is_iso_date(value: &str) -> bool {
    let Some(caps) = ISO_DATE_RE.captures(value) else {
        return false;
    };
    let parse = |idx: usize| caps.get(idx).and_then(|m| m.as_str().parse::<u32>().ok());
    let (Some(year), Some(month), Some(day)) = (parse(1), parse(2), parse(3)) else {
        return false;
    };
    (1..=12).contains(&month) && day >= 1 && day <= days_in_month(year, month)
}

fn days_in_month(year: u32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn dedupe_tags(tags: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let trimmed = tag.trim();
        if trimmed.is_empty() || unique.iter().any(|seen| seen == trimmed) {
            continue;
        }
        unique.push(trimmed.to_string());
    }
    unique
}
