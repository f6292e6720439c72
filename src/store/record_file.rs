//! JSON record file
//!
//! On-disk layout shared by the JSON-file store and the SQLite export:
//!
//! ```json
//! {"objects": [{"id": 1, "name": "a", "value": "1"}], "latest_id": 1}
//! ```
//!
//! Writes go through a temp file that is fsynced and renamed over the target,
//! so a crash mid-write leaves either the old or the new file, never a torn one.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::errors::{StoreError, StoreResult};
use super::record::Record;

/// Contents of a record file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFile {
    #[serde(default)]
    pub objects: Vec<Record>,

    /// Highest id ever assigned. Deleted ids stay counted here.
    #[serde(default)]
    pub latest_id: i64,
}

impl RecordFile {
    pub fn new(objects: Vec<Record>, latest_id: i64) -> Self {
        Self { objects, latest_id }
    }

    /// Read a record file. A missing file is an empty store.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(StoreError::Io(format!("failed to read {:?}: {}", path, e))),
        };

        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_json::from_str(&content)
            .map_err(|e| StoreError::Corrupt(format!("{:?}: {}", path, e)))
    }

    /// Next id to hand out.
    ///
    /// Never below an id already present, even if `latest_id` was edited down.
    pub fn next_id(&self) -> StoreResult<i64> {
        let max_present = self.objects.iter().map(|r| r.id).max().unwrap_or(0);
        let highest = self.latest_id.max(max_present);
        highest
            .checked_add(1)
            .ok_or_else(|| StoreError::Corrupt(format!("id space exhausted at {}", highest)))
    }

    pub fn position(&self, id: i64) -> Option<usize> {
        self.objects.iter().position(|r| r.id == id)
    }

    /// Write the file atomically.
    ///
    /// 1. Write to `<path>.tmp`
    /// 2. fsync the temp file
    /// 3. Rename over the target
    pub fn write_atomic(&self, path: &Path) -> StoreResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| {
                StoreError::Io(format!("failed to create directory {:?}: {}", parent, e))
            })?;
        }

        let content = to_pretty_json(self)?;
        let temp_path = temp_path_for(path);

        let mut file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)
            .map_err(|e| StoreError::Io(format!("failed to create {:?}: {}", temp_path, e)))?;

        file.write_all(&content)
            .map_err(|e| StoreError::Io(format!("failed to write {:?}: {}", temp_path, e)))?;

        file.sync_all()
            .map_err(|e| StoreError::Io(format!("failed to fsync {:?}: {}", temp_path, e)))?;

        fs::rename(&temp_path, path)
            .map_err(|e| StoreError::Io(format!("failed to replace {:?}: {}", path, e)))?;

        if let Some(parent) = path.parent() {
            if let Ok(dir) = File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Pretty-print with four-space indentation
fn to_pretty_json<T: Serialize>(value: &T) -> StoreResult<Vec<u8>> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut serializer)
        .map_err(|e| StoreError::Io(format!("failed to serialize records: {}", e)))?;
    buf.push(b'\n');
    Ok(buf)
}
