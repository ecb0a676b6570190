use rusqlite::Connection;
use valuelog_core::db::migrations::{current_user_version, latest_version};
use valuelog_core::db::{open_db, open_db_in_memory, DbError, DbLocation};
use valuelog_core::{KvStore, Language, ProfileStore, SqliteKvStore};

#[test]
fn fresh_database_is_migrated_and_ready_for_documents() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(current_user_version(&conn).unwrap(), latest_version());
    let columns: Vec<String> = conn
        .prepare("SELECT name FROM pragma_table_info('kv_entries') ORDER BY cid;")
        .unwrap()
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert_eq!(columns, vec!["key", "value", "updated_at"]);
}

#[test]
fn upsert_keeps_one_row_per_key_and_stamps_time() {
    let conn = DbLocation::Memory.open().unwrap();
    let kv = SqliteKvStore::try_new(&conn).unwrap();

    kv.put_raw("valuelog_language", "\"ko\"").unwrap();
    kv.put_raw("valuelog_language", "\"es\"").unwrap();

    let (rows, updated_at): (i64, i64) = conn
        .query_row(
            "SELECT COUNT(*), MAX(updated_at) FROM kv_entries;",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .unwrap();
    assert_eq!(rows, 1);
    assert!(updated_at > 0);
    assert_eq!(
        kv.get_raw("valuelog_language").unwrap().as_deref(),
        Some("\"es\"")
    );
}

#[test]
fn reopening_a_profile_file_keeps_documents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("valuelog.sqlite3");

    {
        let conn = open_db(&path).unwrap();
        let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());
        store.set_language(Language::Ja).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = ProfileStore::new(SqliteKvStore::try_new(&conn).unwrap());
    assert_eq!(store.get_language(), Language::Ja);
}

#[test]
fn database_from_newer_build_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");
    Connection::open(&path)
        .unwrap()
        .execute_batch("PRAGMA user_version = 999;")
        .unwrap();

    match open_db(&path) {
        Err(DbError::UnsupportedSchemaVersion {
            db_version: 999,
            latest_supported,
        }) => assert_eq!(latest_supported, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer schema must not open"),
    }
}
