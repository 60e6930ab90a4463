//! JSON-file-backed baseline store.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use motion_traits::{
    BaselineStore, Frame, MotionType, ScoreCategory, SensorRecording, StoreResult,
};

use crate::error::{Result, StoreError};
use crate::memory::{MemoryStore, MotionSummary};
use crate::schema::StoreFile;

/// A `MemoryStore` loaded from, and written back to, a JSON file.
///
/// Every mutation rewrites the file (write to a sibling temp file, then
/// rename). A mutation whose write fails is rolled back, so memory and
/// file stay in step. Reads never touch the disk after `open`.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    memory: MemoryStore,
    writer: Mutex<()>,
}

impl JsonFileStore {
    /// Open `path`, or start an empty store if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let memory = if path.exists() {
            let text = fs::read_to_string(&path)?;
            let file: StoreFile = serde_json::from_str(&text)?;
            MemoryStore::from_catalog(file.into_catalog()?)
        } else {
            tracing::debug!(path = %path.display(), "store file absent; starting empty");
            MemoryStore::new()
        };
        Ok(Self {
            path,
            memory,
            writer: Mutex::new(()),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn add_motion(&self, name: &str, description: &str) -> Result<MotionType> {
        self.commit(|m| m.add_motion(name, description))
    }

    pub fn set_description(&self, name: &str, description: &str) -> Result<()> {
        self.commit(|m| m.set_description(name, description))
    }

    pub fn add_recording(
        &self,
        motion: &str,
        category: ScoreCategory,
        frames: Vec<Frame>,
    ) -> Result<u64> {
        self.commit(|m| m.add_recording(motion, category, frames))
    }

    pub fn motions(&self) -> Result<Vec<MotionSummary>> {
        self.memory.motions()
    }

    /// Apply `op` to memory and persist it; undo it if the write fails.
    fn commit<T>(&self, op: impl FnOnce(&MemoryStore) -> Result<T>) -> Result<T> {
        let _writer = self.writer.lock().map_err(|_| StoreError::Poisoned)?;
        let before = self.memory.checkpoint()?;
        let out = op(&self.memory)?;
        if let Err(e) = self.save() {
            tracing::warn!(path = %self.path.display(), error = %e, "store write failed; change rolled back");
            self.memory.restore(before)?;
            return Err(e);
        }
        Ok(out)
    }

    /// Write the current contents to disk.
    pub fn save(&self) -> Result<()> {
        let doc = StoreFile::from_entries(self.memory.snapshot()?);
        let text = serde_json::to_string_pretty(&doc)?;
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "store saved");
        Ok(())
    }
}

impl BaselineStore for JsonFileStore {
    fn get_motion(&self, name: &str) -> StoreResult<Option<MotionType>> {
        self.memory.get_motion(name)
    }

    fn get_recordings(
        &self,
        motion: &MotionType,
        category: ScoreCategory,
    ) -> StoreResult<Vec<SensorRecording>> {
        self.memory.get_recordings(motion, category)
    }
}
