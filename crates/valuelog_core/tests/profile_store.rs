use rusqlite::Connection;
use valuelog_core::db::open_db_in_memory;
use valuelog_core::{
    Child, EntryDraft, KvStore, Language, ProfileStore, RepoError, SqliteKvStore, StoreKey,
    TagCategory, User,
};

#[test]
fn empty_store_returns_sample_children_and_entries() {
    let conn = open_db_in_memory().unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());

    let children = store.get_children("u1");
    let names: Vec<&str> = children.iter().map(|child| child.name.as_str()).collect();
    assert_eq!(names, vec!["Ji-won", "Min-soo"]);

    let entries = store.get_entries("u1");
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].id, "e1");
    assert_eq!(entries[1].id, "e2");
    assert!(entries.iter().all(|entry| entry.child_id == "1"));
    assert!(entries.iter().all(|entry| entry.user_id == "u1"));
    assert!(entries.iter().all(|entry| entry.validate().is_ok()));
}

#[test]
fn empty_store_defaults_preferences_and_tags() {
    let conn = open_db_in_memory().unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());

    assert_eq!(store.get_language(), Language::En);
    assert_eq!(store.get_selected_child_id("u1"), None);
    assert!(store.get_custom_tags("u1", TagCategory::Activity).is_empty());
    assert!(store.get_custom_tags("u1", TagCategory::Competency).is_empty());
    assert_eq!(store.get_active_user(), None);
    assert!(store.get_users().is_empty());
}

#[test]
fn saved_entries_roundtrip_in_order() {
    let conn = open_db_in_memory().unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());

    let mut first = EntryDraft::new("Chess tournament", "2025-09-01");
    first.activity_tags = vec!["Chess".to_string()];
    first.satisfaction = 3;
    let mut second = EntryDraft::new("Violin recital", "2025-08-20");
    second.image = Some("data:image/png;base64,AAAA".to_string());
    let entries = vec![
        first.into_entry("u1", "c1").unwrap(),
        second.into_entry("u1", "c1").unwrap(),
    ];

    store.save_entries("u1", &entries).unwrap();
    assert_eq!(store.get_entries("u1"), entries);
}

#[test]
fn saving_empty_collection_does_not_resurrect_seeds() {
    let conn = open_db_in_memory().unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());

    store.save_entries("u1", &[]).unwrap();
    store.save_children("u1", &[]).unwrap();

    assert!(store.get_entries("u1").is_empty());
    assert!(store.get_children("u1").is_empty());
}

#[test]
fn scoped_documents_are_isolated_per_user() {
    let conn = open_db_in_memory().unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());

    let child = Child::new("Yu-na");
    store.save_children("alice", std::slice::from_ref(&child)).unwrap();
    store
        .save_custom_tags("alice", TagCategory::Activity, &["Robotics".to_string()])
        .unwrap();

    assert_eq!(store.get_children("alice"), vec![child]);
    assert_eq!(store.get_children("bob").len(), 2);
    assert!(store.get_custom_tags("bob", TagCategory::Activity).is_empty());
    assert!(store
        .get_custom_tags("alice", TagCategory::Competency)
        .is_empty());
}

#[test]
fn malformed_documents_fall_back_to_defaults() {
    let conn = open_db_in_memory().unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());
    let kv = store.backend();

    kv.put_raw(&StoreKey::Children("u1").as_key(), "{not json")
        .unwrap();
    kv.put_raw(&StoreKey::Entries("u1").as_key(), "[{\"id\": 3}]")
        .unwrap();
    kv.put_raw(&StoreKey::Language.as_key(), "\"fr\"").unwrap();
    kv.put_raw(
        &StoreKey::CustomTags(TagCategory::Activity, "u1").as_key(),
        "42",
    )
    .unwrap();

    assert_eq!(store.get_children("u1").len(), 2);
    assert_eq!(store.get_entries("u1").len(), 2);
    assert_eq!(store.get_language(), Language::En);
    assert!(store.get_custom_tags("u1", TagCategory::Activity).is_empty());
}

#[test]
fn save_is_visible_to_next_get_and_overwrites() {
    let conn = open_db_in_memory().unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());

    store.set_language(Language::Ko).unwrap();
    assert_eq!(store.get_language(), Language::Ko);
    store.set_language(Language::Es).unwrap();
    assert_eq!(store.get_language(), Language::Es);

    store.set_selected_child_id("u1", "2").unwrap();
    assert_eq!(store.get_selected_child_id("u1").as_deref(), Some("2"));
}

#[test]
fn active_user_can_be_set_and_cleared() {
    let conn = open_db_in_memory().unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());

    let user = User::new("Parent");
    store.set_active_user(&user).unwrap();
    assert_eq!(store.get_active_user(), Some(user));

    store.clear_active_user().unwrap();
    assert_eq!(store.get_active_user(), None);
    store.clear_active_user().unwrap();
}

#[test]
fn write_failures_propagate_to_caller() {
    let conn = open_db_in_memory().unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());
    conn.execute_batch("PRAGMA query_only = ON;").unwrap();

    let err = store.save_children("u1", &[Child::new("Do-hyun")]).unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
    assert_eq!(store.get_children("u1").len(), 2);
}

#[test]
fn kv_store_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteKvStore::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("uninitialized connection must be rejected"),
    }
}

#[test]
fn kv_store_remove_reports_presence() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();

    kv.put_raw("k", "1").unwrap();
    assert!(kv.remove("k").unwrap());
    assert!(!kv.remove("k").unwrap());
    assert_eq!(kv.get_raw("k").unwrap(), None);
}
