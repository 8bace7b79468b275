#![forbid(unsafe_code)]

use rusqlite::Connection;
use std::path::Path;

mod error;
mod likes;
mod reconcile;
mod regions;
mod reports;
mod rows;
mod schema;
mod seed;
mod stats;
mod users;
mod walks;

pub use error::StoreError;
pub use likes::LikeToggle;
pub use reconcile::{Drift, ReconcileReport};
pub use reports::{HistoryItem, ReportFeedItem, ReportWithAuthor};
pub use schema::SCHEMA_VERSION;
pub use seed::{SeedBatch, SeedRegion, SeedReport, SeedStage, SeedWalk};
pub use stats::{ActivitySample, CompletionOutcome};

pub const CRATE_NAME: &str = "glentrail-store";

/// Owns the SQLite connection. Mutations take `&mut self` and run inside one
/// transaction each; reads take `&self`.
#[derive(Debug)]
pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(db_path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref();
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(db_path)?;
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        schema::migrate(&conn)?;
        Ok(Self { conn })
    }

    pub fn schema_version(&self) -> Result<String, StoreError> {
        let version = self.conn.query_row(
            "SELECT value FROM meta WHERE key = 'schema_version'",
            [],
            |row| row.get::<_, String>(0),
        )?;
        Ok(version)
    }

    /// Table counts for the `inspect-db` command and smoke checks.
    pub fn inspect(&self) -> Result<DbInspection, StoreError> {
        let count = |sql: &str| -> Result<i64, StoreError> {
            Ok(self.conn.query_row(sql, [], |row| row.get(0))?)
        };
        Ok(DbInspection {
            schema_version: self.schema_version()?,
            users: count("SELECT COUNT(*) FROM users")?,
            regions: count("SELECT COUNT(*) FROM regions")?,
            walks: count("SELECT COUNT(*) FROM walks")?,
            published_walks: count("SELECT COUNT(*) FROM walks WHERE is_published = 1")?,
            stages: count("SELECT COUNT(*) FROM walk_stages")?,
            reports: count("SELECT COUNT(*) FROM walk_reports")?,
            published_reports: count("SELECT COUNT(*) FROM walk_reports WHERE is_published = 1")?,
            likes: count("SELECT COUNT(*) FROM likes")?,
            completions: count("SELECT COUNT(*) FROM completions")?,
        })
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }

    pub(crate) fn conn_mut(&mut self) -> &mut Connection {
        &mut self.conn
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DbInspection {
    pub schema_version: String,
    pub users: i64,
    pub regions: i64,
    pub walks: i64,
    pub published_walks: i64,
    pub stages: i64,
    pub reports: i64,
    pub published_reports: i64,
    pub likes: i64,
    pub completions: i64,
}
