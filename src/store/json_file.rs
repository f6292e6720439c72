//! # JSON File Store
//!
//! Every operation loads the whole file, works on the in-memory copy, and
//! mutating operations write the whole file back. The mutex makes each
//! load-mutate-persist cycle exclusive within the process.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::errors::{StoreError, StoreResult};
use super::record::{NewRecord, Record, RecordPatch};
use super::record_file::RecordFile;
use super::{ExportSummary, RecordStore, StoreBackend};

/// Record store backed by a single JSON file
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store over `path`. The file is created on the first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Create the backing file with an empty record set
    pub fn init(&self) -> StoreResult<()> {
        let _guard = self.guard();
        RecordFile::default().write_atomic(&self.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The lock guards no data, so a poisoned lock is still usable.
    fn guard(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn load(&self) -> StoreResult<RecordFile> {
        RecordFile::load(&self.path)
    }

    fn save(&self, data: &RecordFile) -> StoreResult<()> {
        data.write_atomic(&self.path)
    }
}

impl RecordStore for JsonFileStore {
    fn backend(&self) -> StoreBackend {
        StoreBackend::Json
    }

    fn list(&self) -> StoreResult<Vec<Record>> {
        let _guard = self.guard();
        Ok(self.load()?.objects)
    }

    fn get(&self, id: i64) -> StoreResult<Record> {
        let _guard = self.guard();
        self.load()?
            .objects
            .into_iter()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn create(&self, new: NewRecord) -> StoreResult<Record> {
        let (name, value) = new.validate()?;

        let _guard = self.guard();
        let mut data = self.load()?;

        let record = Record::new(data.next_id()?, name, value);
        data.latest_id = record.id;
        data.objects.push(record.clone());

        self.save(&data)?;
        Ok(record)
    }

    fn update(&self, id: i64, patch: RecordPatch) -> StoreResult<Record> {
        let _guard = self.guard();
        let mut data = self.load()?;

        let index = data.position(id).ok_or(StoreError::NotFound(id))?;
        data.objects[index].apply(&patch);
        let record = data.objects[index].clone();

        self.save(&data)?;
        Ok(record)
    }

    fn delete(&self, id: i64) -> StoreResult<Record> {
        let _guard = self.guard();
        let mut data = self.load()?;

        let index = data.position(id).ok_or(StoreError::NotFound(id))?;
        let record = data.objects.remove(index);

        self.save(&data)?;
        Ok(record)
    }

    fn export(&self) -> StoreResult<ExportSummary> {
        Err(StoreError::ExportUnsupported(self.backend().as_str()))
    }
}
