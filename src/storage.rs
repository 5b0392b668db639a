//! Local persistence for job card drafts.
//!
//! Drafts live in a single `SQLite` file under the storage root:
//!
//! ```text
//! <root>/
//!   drafts.sqlite    # drafts(id, data, updated_at)
//! ```
//!
//! A connection is opened per operation. Each operation is one statement,
//! so readers never observe a half-written row.

mod drafts;

use std::{fs, io, path::PathBuf};

use rusqlite::Connection;
use tracing::debug;

/// Errors that can occur during storage operations.
///
/// Any of these means the local store is unavailable, full, or damaged.
/// Callers surface them to the user; nothing here retries.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("corrupt storage: {0}")]
    Corrupt(String),
}

pub type Result<T> = core::result::Result<T, StorageError>;

const DB_FILE: &str = "drafts.sqlite";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS drafts (
    id         TEXT PRIMARY KEY NOT NULL,
    data       TEXT NOT NULL,
    updated_at TEXT NOT NULL
)";

/// Local `SQLite`-backed storage for drafts.
pub struct Storage {
    root: PathBuf,
}

impl Storage {
    /// Creates a new storage instance rooted at the given directory.
    ///
    /// The directory and the drafts table are created if missing.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        let storage = Self { root };
        storage.open_db()?;
        Ok(storage)
    }

    /// Opens the drafts database, creating the schema on first use.
    fn open_db(&self) -> Result<Connection> {
        let path = self.root.join(DB_FILE);
        debug!(path = %path.display(), "opening draft store");
        let conn = Connection::open(path)?;
        conn.execute(SCHEMA, [])?;
        Ok(conn)
    }
}
