//! Typed, user-scoped access to stored profile documents.
//!
//! # Responsibility
//! - Map each entity family to a namespaced storage key.
//! - Encode/decode documents as JSON.
//! - Apply seed and default values on read.
//!
//! # Invariants
//! - Reads never fail: missing, malformed or unreadable documents resolve to
//!   the family's seed/default value.
//! - Writes fully overwrite and propagate failures to the caller.
//! - Scoped keys embed the owning user id; no document is shared by users.

use crate::model::child::Child;
use crate::model::entry::ExperienceEntry;
use crate::model::locale::Language;
use crate::model::tag::TagCategory;
use crate::model::user::User;
use crate::repo::kv_store::{KvStore, RepoResult};
use crate::repo::seed::{sample_children, sample_entries};
use log::{debug, error, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Storage key for one entity family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKey<'a> {
    Users,
    ActiveUser,
    Language,
    Children(&'a str),
    Entries(&'a str),
    SelectedChild(&'a str),
    CustomTags(TagCategory, &'a str),
}

impl StoreKey<'_> {
    /// Family name without the user scope, safe for logs.
    pub fn family(&self) -> &'static str {
        match self {
            Self::Users => "valuelog_users",
            Self::ActiveUser => "valuelog_active_user",
            Self::Language => "valuelog_language",
            Self::Children(_) => "valuelog_children",
            Self::Entries(_) => "valuelog_entries",
            Self::SelectedChild(_) => "valuelog_selected_child",
            Self::CustomTags(TagCategory::Activity, _) => "valuelog_custom_activity_tags",
            Self::CustomTags(TagCategory::Competency, _) => "valuelog_custom_competency_tags",
        }
    }

    /// Full storage key.
    pub fn as_key(&self) -> String {
        match self {
            Self::Users | Self::ActiveUser | Self::Language => self.family().to_string(),
            Self::Children(user_id)
            | Self::Entries(user_id)
            | Self::SelectedChild(user_id)
            | Self::CustomTags(_, user_id) => format!("{}:{user_id}", self.family()),
        }
    }
}

/// Typed profile store over any `KvStore` backend.
pub struct ProfileStore<S: KvStore> {
    kv: S,
}

impl<S: KvStore> ProfileStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Raw backend access, mainly for diagnostics and tests.
    pub fn backend(&self) -> &S {
        &self.kv
    }

    /// Every local profile ever created, in creation order.
    pub fn get_users(&self) -> Vec<User> {
        self.read(StoreKey::Users).unwrap_or_default()
    }

    pub fn save_users(&self, users: &[User]) -> RepoResult<()> {
        self.write(StoreKey::Users, users)
    }

    pub fn get_active_user(&self) -> Option<User> {
        self.read(StoreKey::ActiveUser)
    }

    pub fn set_active_user(&self, user: &User) -> RepoResult<()> {
        self.write(StoreKey::ActiveUser, user)
    }

    /// Forgets the active profile. Scoped data of that profile is kept.
    pub fn clear_active_user(&self) -> RepoResult<()> {
        self.kv.remove(&StoreKey::ActiveUser.as_key())?;
        Ok(())
    }

    /// Children of `user_id`, or the sample children on first run.
    pub fn get_children(&self, user_id: &str) -> Vec<Child> {
        self.read(StoreKey::Children(user_id))
            .unwrap_or_else(sample_children)
    }

    pub fn save_children(&self, user_id: &str, children: &[Child]) -> RepoResult<()> {
        self.write(StoreKey::Children(user_id), children)
    }

    /// Entries of `user_id`, or the sample entries on first run.
    pub fn get_entries(&self, user_id: &str) -> Vec<ExperienceEntry> {
        self.read(StoreKey::Entries(user_id))
            .unwrap_or_else(|| sample_entries(user_id))
    }

    pub fn save_entries(&self, user_id: &str, entries: &[ExperienceEntry]) -> RepoResult<()> {
        self.write(StoreKey::Entries(user_id), entries)
    }

    pub fn get_selected_child_id(&self, user_id: &str) -> Option<String> {
        self.read(StoreKey::SelectedChild(user_id))
    }

    pub fn set_selected_child_id(&self, user_id: &str, child_id: &str) -> RepoResult<()> {
        self.write(StoreKey::SelectedChild(user_id), child_id)
    }

    /// Global UI language, `en` when unset or unknown.
    pub fn get_language(&self) -> Language {
        self.read(StoreKey::Language).unwrap_or_default()
    }

    pub fn set_language(&self, language: Language) -> RepoResult<()> {
        self.write(StoreKey::Language, &language)
    }

    /// Custom tags of one axis for `user_id`, empty when unset.
    pub fn get_custom_tags(&self, user_id: &str, category: TagCategory) -> Vec<String> {
        self.read(StoreKey::CustomTags(category, user_id))
            .unwrap_or_default()
    }

    pub fn save_custom_tags(
        &self,
        user_id: &str,
        category: TagCategory,
        tags: &[String],
    ) -> RepoResult<()> {
        self.write(StoreKey::CustomTags(category, user_id), tags)
    }

    fn read<T: DeserializeOwned>(&self, key: StoreKey<'_>) -> Option<T> {
        let raw = match self.kv.get_raw(&key.as_key()) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(
                    "event=store_read module=repo status=missing family={}",
                    key.family()
                );
                return None;
            }
            Err(err) => {
                error!(
                    "event=store_read module=repo status=error family={} error_code=backend_read_failed error={}",
                    key.family(),
                    err
                );
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(
                    "event=store_read module=repo status=fallback family={} error_code=malformed_document line={} column={}",
                    key.family(),
                    err.line(),
                    err.column()
                );
                None
            }
        }
    }

    fn write<T: Serialize + ?Sized>(&self, key: StoreKey<'_>, value: &T) -> RepoResult<()> {
        let encoded = serde_json::to_string(value)?;
        if let Err(err) = self.kv.put_raw(&key.as_key(), &encoded) {
            error!(
                "event=store_write module=repo status=error family={} bytes={} error={}",
                key.family(),
                encoded.len(),
                err
            );
            return Err(err);
        }
        debug!(
            "event=store_write module=repo status=ok family={} bytes={}",
            key.family(),
            encoded.len()
        );
        Ok(())
    }
}
