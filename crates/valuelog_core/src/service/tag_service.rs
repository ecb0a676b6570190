//! Tag vocabulary use-cases.
//!
//! # Responsibility
//! - Merge built-in keys with per-user custom tags for each axis.
//! - Accept new custom tags only when they are non-empty and unique.
//! - Resolve display labels for stored tag keys.
//!
//! # Invariants
//! - `all_tags` lists built-ins first, then custom tags, each in stored order.
//! - Uniqueness is an exact, case-sensitive match against the combined list.
//! - A rejected or failed add leaves the vocabulary unchanged.

use crate::model::locale::LocaleTable;
use crate::model::tag::TagCategory;
use crate::repo::kv_store::{KvStore, RepoResult};
use crate::repo::profile_store::ProfileStore;
use log::info;

/// Result of one custom-tag add attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddTagOutcome {
    /// Combined vocabulary of the axis after the attempt.
    pub vocabulary: Vec<String>,
    /// Whether the tag was appended.
    pub accepted: bool,
    /// Trimmed tag text that was appended.
    pub tag: Option<String>,
}

/// In-memory custom tag lists of one user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagVocabulary {
    custom_activity: Vec<String>,
    custom_competency: Vec<String>,
}

impl TagVocabulary {
    pub fn new(custom_activity: Vec<String>, custom_competency: Vec<String>) -> Self {
        Self {
            custom_activity,
            custom_competency,
        }
    }

    /// Loads both custom lists of `user_id` from storage.
    pub fn load<S: KvStore>(store: &ProfileStore<S>, user_id: &str) -> Self {
        Self::new(
            store.get_custom_tags(user_id, TagCategory::Activity),
            store.get_custom_tags(user_id, TagCategory::Competency),
        )
    }

    pub fn custom_tags(&self, category: TagCategory) -> &[String] {
        match category {
            TagCategory::Activity => &self.custom_activity,
            TagCategory::Competency => &self.custom_competency,
        }
    }

    /// Built-in keys followed by custom tags.
    pub fn all_tags(&self, category: TagCategory) -> Vec<String> {
        category
            .builtin_tags()
            .iter()
            .map(|tag| tag.key().to_string())
            .chain(self.custom_tags(category).iter().cloned())
            .collect()
    }

    pub fn contains(&self, category: TagCategory, tag: &str) -> bool {
        category.builtin_tags().iter().any(|builtin| builtin.key() == tag)
            || self.custom_tags(category).iter().any(|custom| custom == tag)
    }

    /// Returns the trimmed candidate when it may be added to `category`.
    pub fn candidate(&self, category: TagCategory, raw_input: &str) -> Option<String> {
        let trimmed = raw_input.trim();
        if trimmed.is_empty() || self.contains(category, trimmed) {
            return None;
        }
        Some(trimmed.to_string())
    }

    /// Appends a custom tag and persists the axis list.
    ///
    /// Rejections do not touch storage. On write failure the in-memory list
    /// is left unchanged and the error is returned.
    pub fn add_custom_tag<S: KvStore>(
        &mut self,
        store: &ProfileStore<S>,
        user_id: &str,
        category: TagCategory,
        raw_input: &str,
    ) -> RepoResult<AddTagOutcome> {
        let Some(tag) = self.candidate(category, raw_input) else {
            info!(
                "event=tag_add module=service status=rejected category={}",
                category.as_str()
            );
            return Ok(AddTagOutcome {
                vocabulary: self.all_tags(category),
                accepted: false,
                tag: None,
            });
        };

        let mut updated = self.custom_tags(category).to_vec();
        updated.push(tag.clone());
        store.save_custom_tags(user_id, category, &updated)?;

        match category {
            TagCategory::Activity => self.custom_activity = updated,
            TagCategory::Competency => self.custom_competency = updated,
        }
        info!(
            "event=tag_add module=service status=ok category={} custom_count={}",
            category.as_str(),
            self.custom_tags(category).len()
        );

        Ok(AddTagOutcome {
            vocabulary: self.all_tags(category),
            accepted: true,
            tag: Some(tag),
        })
    }
}

/// Display label of a stored tag key in the given locale.
pub fn tag_label<'a>(tag_key: &'a str, table: &LocaleTable) -> &'a str {
    table.label(tag_key)
}
