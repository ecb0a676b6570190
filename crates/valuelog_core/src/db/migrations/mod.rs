//! Schema migrations for the profile database.
//!
//! # Invariants
//! - Versions are strictly increasing, starting at 1.
//! - Pending steps run in one transaction; `PRAGMA user_version` is bumped
//!   after each step inside it.

use crate::db::{DbError, DbResult};
use log::info;
use rusqlite::Connection;

/// `(version, sql)` steps in application order.
const MIGRATIONS: &[(u32, &str)] = &[(1, include_str!("0001_init.sql"))];

/// Versions before and after one `apply_migrations` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationReport {
    pub from_version: u32,
    pub to_version: u32,
}

impl MigrationReport {
    pub fn applied_any(&self) -> bool {
        self.to_version > self.from_version
    }
}

/// Latest schema version this build can read and write.
pub fn latest_version() -> u32 {
    MIGRATIONS.last().map_or(0, |(version, _)| *version)
}

/// Brings `conn` up to `latest_version()`.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the database is ahead of this build.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<MigrationReport> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&(u32, &str)> = MIGRATIONS
        .iter()
        .filter(|(version, _)| *version > from_version)
        .collect();
    if !pending.is_empty() {
        let tx = conn.transaction()?;
        for (version, sql) in pending {
            tx.execute_batch(sql)?;
            tx.pragma_update(None, "user_version", version)?;
        }
        tx.commit()?;
        info!(
            "event=db_migrate module=db status=ok from_version={from_version} to_version={latest}"
        );
    }

    Ok(MigrationReport {
        from_version,
        to_version: latest,
    })
}

/// Reads the schema version stored in `PRAGMA user_version`.
pub fn current_user_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}
