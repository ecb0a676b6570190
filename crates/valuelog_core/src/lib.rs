//! Core domain logic for ValueLog.
//! This crate is the single source of truth for record invariants.

pub mod assist;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use assist::{
    AssistError, AssistState, AssistedDraft, GeminiClient, NarrativeAssist, TagSuggestions,
    TextGenerator,
};
pub use config::CoreConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::child::{Child, ChildId};
pub use model::entry::{EntryDraft, EntryId, EntryValidationError, ExperienceEntry, Starr};
pub use model::locale::{Language, LocaleTable};
pub use model::tag::{BuiltinTag, TagCategory, TagKey, ACTIVITY_TAGS, COMPETENCY_TAGS};
pub use model::user::{User, UserId};
pub use repo::kv_store::{KvStore, RepoError, RepoResult, SqliteKvStore};
pub use repo::profile_store::{ProfileStore, StoreKey};
pub use service::session::{AppTab, Session, SessionError, SessionResult};
pub use service::stats_service::{
    compute_dashboard_stats, entries_for_child, DashboardStats, TagCount,
};
pub use service::tag_service::{tag_label, AddTagOutcome, TagVocabulary};

