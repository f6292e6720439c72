//! # Record Store
//!
//! Durable storage for `(id, name, value)` records.
//!
//! Two backends implement [`RecordStore`]:
//! - [`JsonFileStore`]: the whole record set in one JSON file, rewritten on
//!   every mutation
//! - [`SqliteStore`]: one row per record, ids assigned by SQLite
//!
//! Both keep ids unique and increasing, and never reuse an id after delete.

mod errors;
mod json_file;
mod record;
mod record_file;
mod sqlite;

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use errors::{StoreError, StoreResult};
pub use json_file::JsonFileStore;
pub use record::{NewRecord, Record, RecordPatch};
pub use record_file::RecordFile;
pub use sqlite::SqliteStore;

/// Which persistence strategy backs the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Json,
    Sqlite,
}

impl StoreBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Json => "json",
            StoreBackend::Sqlite => "sqlite",
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of an export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub path: PathBuf,
    pub records: usize,
}

/// The record store contract shared by both backends
pub trait RecordStore: Send + Sync + fmt::Debug {
    /// Backend kind, for logs and health output
    fn backend(&self) -> StoreBackend;

    /// All records, in insertion order
    fn list(&self) -> StoreResult<Vec<Record>>;

    /// One record by id
    fn get(&self, id: i64) -> StoreResult<Record>;

    /// Assign the next id, store the record and return it
    fn create(&self, new: NewRecord) -> StoreResult<Record>;

    /// Replace the fields set in `patch`, keep the rest
    fn update(&self, id: i64, patch: RecordPatch) -> StoreResult<Record>;

    /// Remove a record and return what it held
    fn delete(&self, id: i64) -> StoreResult<Record>;

    /// Copy the full record set to the export file
    fn export(&self) -> StoreResult<ExportSummary>;
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,

    /// JSON store file (default: "data.json")
    #[serde(default = "default_json_path")]
    pub json_path: PathBuf,

    /// SQLite database file (default: "database.db")
    #[serde(default = "default_sqlite_path")]
    pub sqlite_path: PathBuf,

    /// Where the SQLite backend exports to (default: "data.json")
    #[serde(default = "default_json_path")]
    pub export_path: PathBuf,
}

fn default_json_path() -> PathBuf {
    PathBuf::from("data.json")
}

fn default_sqlite_path() -> PathBuf {
    PathBuf::from("database.db")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            json_path: default_json_path(),
            sqlite_path: default_sqlite_path(),
            export_path: default_json_path(),
        }
    }
}

impl StoreConfig {
    /// Path of the backing resource for the configured backend
    pub fn data_path(&self) -> &Path {
        match self.backend {
            StoreBackend::Json => &self.json_path,
            StoreBackend::Sqlite => &self.sqlite_path,
        }
    }
}

/// Build the configured store
pub fn open_store(config: &StoreConfig) -> StoreResult<Arc<dyn RecordStore>> {
    let store: Arc<dyn RecordStore> = match config.backend {
        StoreBackend::Json => Arc::new(JsonFileStore::new(config.json_path.clone())),
        StoreBackend::Sqlite => Arc::new(SqliteStore::open(
            &config.sqlite_path,
            config.export_path.clone(),
        )?),
    };
    Ok(store)
}
