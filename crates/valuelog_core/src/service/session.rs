//! Profile session: the working copy of one user's data.
//!
//! # Responsibility
//! - Load a user's children, entries, tags and preferences once at open.
//! - Apply every mutation to storage first, then to the in-memory copy.
//! - Expose timeline and dashboard projections of the selected child.
//!
//! # Invariants
//! - In-memory state changes only after the corresponding write succeeded.
//! - New entries always reference a child owned by the session user.
//! - The selected child, when set, exists in `children`.

use crate::model::child::{Child, ChildId};
use crate::model::entry::{EntryDraft, EntryValidationError, ExperienceEntry};
use crate::model::locale::{Language, LocaleTable};
use crate::model::tag::TagCategory;
use crate::model::user::User;
use crate::repo::kv_store::{KvStore, RepoError};
use crate::repo::profile_store::ProfileStore;
use crate::service::stats_service::{compute_dashboard_stats, entries_for_child, DashboardStats};
use crate::service::tag_service::{AddTagOutcome, TagVocabulary};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Top-level view the UI is showing. Not persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AppTab {
    Dashboard,
    #[default]
    Timeline,
    Create,
    Profiles,
}

/// Session-level error for profile use-cases.
#[derive(Debug)]
pub enum SessionError {
    /// Profile or child name is blank after trimming.
    EmptyName,
    InvalidEntry(EntryValidationError),
    /// An entry was saved while no child is selected.
    NoChildSelected,
    UserNotFound(String),
    ChildNotFound(String),
    EntryNotFound(String),
    Repo(RepoError),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "name cannot be empty"),
            Self::InvalidEntry(err) => write!(f, "{err}"),
            Self::NoChildSelected => write!(f, "no child selected"),
            Self::UserNotFound(id) => write!(f, "profile not found: {id}"),
            Self::ChildNotFound(id) => write!(f, "child not found: {id}"),
            Self::EntryNotFound(id) => write!(f, "entry not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidEntry(err) => Some(err),
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for SessionError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<EntryValidationError> for SessionError {
    fn from(value: EntryValidationError) -> Self {
        Self::InvalidEntry(value)
    }
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Explicit context object for one active profile.
pub struct Session<S: KvStore> {
    store: ProfileStore<S>,
    user: User,
    children: Vec<Child>,
    entries: Vec<ExperienceEntry>,
    selected_child_id: Option<ChildId>,
    language: Language,
    active_tab: AppTab,
    vocabulary: TagVocabulary,
}

impl<S: KvStore> Session<S> {
    /// Marks the profile named `name` active and opens it.
    ///
    /// An existing profile with the same trimmed name is reused; otherwise a
    /// new one is registered first.
    pub fn sign_in(store: ProfileStore<S>, name: &str) -> SessionResult<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        let mut users = store.get_users();
        let user = match users.iter().find(|user| user.name == name) {
            Some(existing) => existing.clone(),
            None => {
                let user = User::new(name);
                users.push(user.clone());
                store.save_users(&users)?;
                info!(
                    "event=profile_create module=session status=ok profiles={}",
                    users.len()
                );
                user
            }
        };
        store.set_active_user(&user)?;
        info!("event=sign_in module=session status=ok");
        Ok(Self::open(store, user))
    }

    /// Marks the registered profile `user_id` active and opens it.
    pub fn open_by_id(store: ProfileStore<S>, user_id: &str) -> SessionResult<Self> {
        let Some(user) = store.get_users().into_iter().find(|user| user.id == user_id) else {
            return Err(SessionError::UserNotFound(user_id.to_string()));
        };
        store.set_active_user(&user)?;
        info!("event=profile_switch module=session status=ok");
        Ok(Self::open(store, user))
    }

    /// Opens the stored active profile.
    ///
    /// Hands the store back when no profile is active.
    pub fn resume(store: ProfileStore<S>) -> Result<Self, ProfileStore<S>> {
        match store.get_active_user() {
            Some(user) => Ok(Self::open(store, user)),
            None => Err(store),
        }
    }

    /// Loads all scoped data of `user`.
    ///
    /// The last selected child is restored when it still exists; otherwise
    /// the first child is selected.
    pub fn open(store: ProfileStore<S>, user: User) -> Self {
        let children = store.get_children(&user.id);
        let entries = store.get_entries(&user.id);
        let language = store.get_language();
        let vocabulary = TagVocabulary::load(&store, &user.id);

        let remembered = store.get_selected_child_id(&user.id);
        let selected_child_id = remembered
            .filter(|id| children.iter().any(|child| &child.id == id))
            .or_else(|| children.first().map(|child| child.id.clone()));

        info!(
            "event=session_open module=session status=ok children={} entries={} language={}",
            children.len(),
            entries.len(),
            language.code()
        );

        Self {
            store,
            user,
            children,
            entries,
            selected_child_id,
            language,
            active_tab: AppTab::default(),
            vocabulary,
        }
    }

    /// Forgets the active profile and returns the store.
    pub fn sign_out(self) -> SessionResult<ProfileStore<S>> {
        self.store.clear_active_user()?;
        info!("event=sign_out module=session status=ok");
        Ok(self.store)
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn store(&self) -> &ProfileStore<S> {
        &self.store
    }

    pub fn children(&self) -> &[Child] {
        &self.children
    }

    /// All entries of the profile in insertion order.
    pub fn entries(&self) -> &[ExperienceEntry] {
        &self.entries
    }

    pub fn selected_child(&self) -> Option<&Child> {
        let id = self.selected_child_id.as_deref()?;
        self.children.iter().find(|child| child.id == id)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn locale_table(&self) -> LocaleTable {
        LocaleTable::for_language(self.language)
    }

    pub fn active_tab(&self) -> AppTab {
        self.active_tab
    }

    pub fn set_active_tab(&mut self, tab: AppTab) {
        self.active_tab = tab;
    }

    /// Selects an existing child and remembers the choice.
    pub fn select_child(&mut self, child_id: &str) -> SessionResult<&Child> {
        let Some(position) = self.children.iter().position(|child| child.id == child_id) else {
            return Err(SessionError::ChildNotFound(child_id.to_string()));
        };
        self.store.set_selected_child_id(&self.user.id, child_id)?;
        self.selected_child_id = Some(child_id.to_string());
        Ok(&self.children[position])
    }

    /// Adds a child and selects it.
    pub fn add_child(&mut self, name: &str) -> SessionResult<Child> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SessionError::EmptyName);
        }

        let child = Child::new(name);
        let mut updated = self.children.clone();
        updated.push(child.clone());
        self.store.save_children(&self.user.id, &updated)?;
        self.children = updated;

        self.store.set_selected_child_id(&self.user.id, &child.id)?;
        self.selected_child_id = Some(child.id.clone());
        info!(
            "event=child_add module=session status=ok children={}",
            self.children.len()
        );
        Ok(child)
    }

    /// Saves a new entry for the selected child and returns to the timeline.
    pub fn create_entry(&mut self, draft: EntryDraft) -> SessionResult<ExperienceEntry> {
        let child_id = self
            .selected_child()
            .map(|child| child.id.clone())
            .ok_or(SessionError::NoChildSelected)?;
        let entry = draft.into_entry(&self.user.id, &child_id)?;

        let mut updated = self.entries.clone();
        updated.push(entry.clone());
        self.store.save_entries(&self.user.id, &updated)?;
        self.entries = updated;
        self.active_tab = AppTab::Timeline;

        info!(
            "event=entry_create module=session status=ok activity_tags={} competency_tags={} has_image={}",
            entry.activity_tags.len(),
            entry.competency_tags.len(),
            entry.image.is_some()
        );
        Ok(entry)
    }

    /// Deletes exactly one entry by id.
    pub fn delete_entry(&mut self, entry_id: &str) -> SessionResult<()> {
        if !self.entries.iter().any(|entry| entry.id == entry_id) {
            warn!("event=entry_delete module=session status=not_found");
            return Err(SessionError::EntryNotFound(entry_id.to_string()));
        }

        let updated: Vec<ExperienceEntry> = self
            .entries
            .iter()
            .filter(|entry| entry.id != entry_id)
            .cloned()
            .collect();
        self.store.save_entries(&self.user.id, &updated)?;
        self.entries = updated;
        info!(
            "event=entry_delete module=session status=ok remaining={}",
            self.entries.len()
        );
        Ok(())
    }

    /// Entries of the selected child, newest first.
    pub fn timeline(&self) -> Vec<&ExperienceEntry> {
        match self.selected_child_id.as_deref() {
            Some(child_id) => entries_for_child(&self.entries, child_id),
            None => Vec::new(),
        }
    }

    /// Dashboard statistics of the selected child in the active language.
    pub fn dashboard(&self) -> DashboardStats {
        compute_dashboard_stats(
            &self.entries,
            self.selected_child_id.as_deref(),
            &self.locale_table(),
        )
    }

    pub fn set_language(&mut self, language: Language) -> SessionResult<()> {
        self.store.set_language(language)?;
        self.language = language;
        Ok(())
    }

    pub fn all_tags(&self, category: TagCategory) -> Vec<String> {
        self.vocabulary.all_tags(category)
    }

    pub fn add_custom_tag(
        &mut self,
        category: TagCategory,
        raw_input: &str,
    ) -> SessionResult<AddTagOutcome> {
        let outcome = self
            .vocabulary
            .add_custom_tag(&self.store, &self.user.id, category, raw_input)?;
        Ok(outcome)
    }

    /// Display label of a tag key in the active language.
    pub fn tag_label<'a>(&self, tag_key: &'a str) -> &'a str {
        self.locale_table().label(tag_key)
    }
}
