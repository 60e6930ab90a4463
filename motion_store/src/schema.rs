//! On-disk JSON schema of the file-backed store.
//!
//! ```json
//! {
//!   "motions": [
//!     {
//!       "name": "fire_extinguisher_lift",
//!       "description": "lift from floor to waist",
//!       "recordings": [
//!         {
//!           "id": 1,
//!           "category": "reference",
//!           "recorded_at": "2024-05-01T09:30:00Z",
//!           "data_frames": 2,
//!           "sensor_data": [{"ax": 0.1}, {"ax": 0.2}]
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};
use motion_traits::{MotionType, ScoreCategory, SensorRecording};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::memory::{Catalog, MotionEntry, StoredRecording};

#[derive(Debug, Serialize, Deserialize, Default)]
pub struct StoreFile {
    #[serde(default)]
    pub motions: Vec<MotionDoc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MotionDoc {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub recordings: Vec<RecordingDoc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CategoryDoc {
    Reference,
    ZeroScore,
}

impl From<CategoryDoc> for ScoreCategory {
    fn from(c: CategoryDoc) -> Self {
        match c {
            CategoryDoc::Reference => ScoreCategory::Reference,
            CategoryDoc::ZeroScore => ScoreCategory::ZeroScore,
        }
    }
}

impl From<ScoreCategory> for CategoryDoc {
    fn from(c: ScoreCategory) -> Self {
        match c {
            ScoreCategory::Reference => CategoryDoc::Reference,
            ScoreCategory::ZeroScore => CategoryDoc::ZeroScore,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecordingDoc {
    pub id: u64,
    pub category: CategoryDoc,
    pub recorded_at: DateTime<Utc>,
    /// Cached frame count; must equal `sensor_data.len()`.
    pub data_frames: usize,
    pub sensor_data: Vec<BTreeMap<String, f64>>,
}

impl StoreFile {
    /// Validate and convert into the in-memory catalog.
    pub(crate) fn into_catalog(self) -> Result<Catalog> {
        let mut names = HashSet::new();
        let mut ids = HashSet::new();
        let mut max_id = 0u64;
        let mut motions = Vec::with_capacity(self.motions.len());

        for m in self.motions {
            if m.name.trim().is_empty() {
                return Err(StoreError::Corrupt("motion with blank name".into()));
            }
            if !names.insert(m.name.clone()) {
                return Err(StoreError::Corrupt(format!(
                    "motion '{}' appears more than once",
                    m.name
                )));
            }
            let mut recordings = Vec::with_capacity(m.recordings.len());
            for r in m.recordings {
                if r.data_frames != r.sensor_data.len() {
                    return Err(StoreError::Corrupt(format!(
                        "recording {} of '{}' declares {} frames but holds {}",
                        r.id,
                        m.name,
                        r.data_frames,
                        r.sensor_data.len()
                    )));
                }
                if !ids.insert(r.id) {
                    return Err(StoreError::Corrupt(format!(
                        "recording id {} is used more than once",
                        r.id
                    )));
                }
                max_id = max_id.max(r.id);
                recordings.push(StoredRecording {
                    recording: SensorRecording::new(r.id, r.category.into(), r.sensor_data),
                    recorded_at: r.recorded_at,
                });
            }
            motions.push(MotionEntry {
                motion: MotionType::new(m.name, m.description),
                recordings,
            });
        }

        let next_id = max_id.checked_add(1).ok_or_else(|| {
            StoreError::Corrupt(format!("recording id {max_id} leaves no room for new ids"))
        })?;
        Ok(Catalog { motions, next_id })
    }

    pub(crate) fn from_entries(entries: Vec<MotionEntry>) -> Self {
        Self {
            motions: entries
                .into_iter()
                .map(|e| MotionDoc {
                    name: e.motion.name,
                    description: e.motion.description,
                    recordings: e
                        .recordings
                        .into_iter()
                        .map(|s| RecordingDoc {
                            id: s.recording.id,
                            category: s.recording.category.into(),
                            recorded_at: s.recorded_at,
                            data_frames: s.recording.data_frames(),
                            sensor_data: s.recording.frames,
                        })
                        .collect(),
                })
                .collect(),
        }
    }
}
