//! Connection bootstrap for the profile database.
//!
//! # Responsibility
//! - Resolve where the profile database lives and open it.
//! - Configure pragmas and migrate before handing out a connection.
//!
//! # Invariants
//! - Returned connections have `foreign_keys=ON` and a busy timeout.
//! - Returned connections are at `migrations::latest_version()`.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where a profile database lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DbLocation {
    File(PathBuf),
    /// Throwaway database dropped with its connection.
    Memory,
}

impl DbLocation {
    fn mode(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }

    /// Opens the database, creating the file and its parent directory when
    /// missing, and migrates it.
    ///
    /// Emits one `db_open` start event and one ok/error event with duration.
    pub fn open(&self) -> DbResult<Connection> {
        let started_at = Instant::now();
        let mode = self.mode();
        info!("event=db_open module=db status=start mode={mode}");

        match self.connect().and_then(|mut conn| {
            bootstrap(&mut conn)?;
            Ok(conn)
        }) {
            Ok(conn) => {
                info!(
                    "event=db_open module=db status=ok mode={mode} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(conn)
            }
            Err(err) => {
                error!(
                    "event=db_open module=db status=error mode={mode} duration_ms={} error_code={} error={}",
                    started_at.elapsed().as_millis(),
                    error_code(&err),
                    err
                );
                Err(err)
            }
        }
    }

    fn connect(&self) -> DbResult<Connection> {
        match self {
            Self::File(path) => {
                ensure_parent_dir(path)?;
                Ok(Connection::open(path)?)
            }
            Self::Memory => Ok(Connection::open_in_memory()?),
        }
    }
}

/// Opens (or creates) the profile database at `path`.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    DbLocation::File(path.as_ref().to_path_buf()).open()
}

/// Opens a fresh in-memory profile database.
pub fn open_db_in_memory() -> DbResult<Connection> {
    DbLocation::Memory.open()
}

fn ensure_parent_dir(path: &Path) -> DbResult<()> {
    let Some(parent) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) else {
        return Ok(());
    };
    std::fs::create_dir_all(parent).map_err(|source| DbError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })
}

fn bootstrap(conn: &mut Connection) -> DbResult<()> {
    conn.pragma_update(None, "foreign_keys", true)?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}

fn error_code(err: &DbError) -> &'static str {
    match err {
        DbError::Sqlite(_) => "db_open_failed",
        DbError::CreateDir { .. } => "db_dir_unavailable",
        DbError::UnsupportedSchemaVersion { .. } => "db_schema_too_new",
    }
}
