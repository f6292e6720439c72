//! SQLite-backed record store
//!
//! One row per record in the `objects` table. Ids come from SQLite
//! `AUTOINCREMENT`, which never hands out an id twice even after deletes.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use super::errors::{StoreError, StoreResult};
use super::record::{NewRecord, Record, RecordPatch};
use super::record_file::RecordFile;
use super::{ExportSummary, RecordStore, StoreBackend};

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS objects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    value TEXT NOT NULL
)";

/// Record store backed by a single SQLite table
#[derive(Debug)]
pub struct SqliteStore {
    conn: Mutex<Connection>,
    export_path: PathBuf,
}

impl SqliteStore {
    /// Open (or create) the database at `db_path`.
    ///
    /// # Errors
    ///
    /// Returns error if the database cannot be opened or the table cannot be created.
    pub fn open(db_path: impl AsRef<Path>, export_path: impl Into<PathBuf>) -> StoreResult<Self> {
        let conn = Connection::open(db_path.as_ref())?;
        Self::with_connection(conn, export_path)
    }

    /// In-memory database, used by tests
    pub fn open_in_memory(export_path: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::with_connection(Connection::open_in_memory()?, export_path)
    }

    fn with_connection(conn: Connection, export_path: impl Into<PathBuf>) -> StoreResult<Self> {
        conn.execute(CREATE_TABLE, [])?;
        Ok(Self {
            conn: Mutex::new(conn),
            export_path: export_path.into(),
        })
    }

    fn conn(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::Database("connection lock poisoned".to_string()))
    }
}

fn select_one(conn: &Connection, id: i64) -> StoreResult<Option<Record>> {
    let record = conn
        .query_row(
            "SELECT id, name, value FROM objects WHERE id = ?1",
            params![id],
            |row| Ok(Record::new(row.get(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)),
        )
        .optional()?;
    Ok(record)
}

fn select_all(conn: &Connection) -> StoreResult<Vec<Record>> {
    let mut stmt = conn.prepare("SELECT id, name, value FROM objects ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(Record::new(row.get(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?))
    })?;

    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Highest id AUTOINCREMENT has ever assigned, 0 before the first insert
fn latest_id(conn: &Connection) -> StoreResult<i64> {
    let seq = conn
        .query_row(
            "SELECT seq FROM sqlite_sequence WHERE name = 'objects'",
            [],
            |row| row.get::<_, i64>(0),
        )
        .optional()?;
    Ok(seq.unwrap_or(0))
}

impl RecordStore for SqliteStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Sqlite
    }

    fn list(&self) -> StoreResult<Vec<Record>> {
        let conn = self.conn()?;
        select_all(&conn)
    }

    fn get(&self, id: i64) -> StoreResult<Record> {
        let conn = self.conn()?;
        select_one(&conn, id)?.ok_or(StoreError::NotFound(id))
    }

    fn create(&self, new: NewRecord) -> StoreResult<Record> {
        let (name, value) = new.validate()?;

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO objects (name, value) VALUES (?1, ?2)",
            params![name, value],
        )?;

        Ok(Record::new(conn.last_insert_rowid(), name, value))
    }

    fn update(&self, id: i64, patch: RecordPatch) -> StoreResult<Record> {
        let conn = self.conn()?;

        // Decide-and-write in one statement so no other writer can interleave.
        let changed = conn.execute(
            "UPDATE objects
             SET name = COALESCE(?1, name), value = COALESCE(?2, value)
             WHERE id = ?3",
            params![patch.name, patch.value, id],
        )?;

        if changed == 0 {
            return Err(StoreError::NotFound(id));
        }

        select_one(&conn, id)?.ok_or(StoreError::NotFound(id))
    }

    fn delete(&self, id: i64) -> StoreResult<Record> {
        let conn = self.conn()?;

        let record = select_one(&conn, id)?.ok_or(StoreError::NotFound(id))?;
        conn.execute("DELETE FROM objects WHERE id = ?1", params![id])?;

        Ok(record)
    }

    fn export(&self) -> StoreResult<ExportSummary> {
        let conn = self.conn()?;

        let objects = select_all(&conn)?;
        let data = RecordFile::new(objects, latest_id(&conn)?);
        data.write_atomic(&self.export_path)?;

        Ok(ExportSummary {
            path: self.export_path.clone(),
            records: data.objects.len(),
        })
    }
}
