//! In-memory baseline store.

use std::sync::RwLock;

use chrono::{DateTime, Utc};
use motion_traits::{
    BaselineStore, Frame, MotionType, ScoreCategory, SensorRecording, StoreResult,
};

use crate::error::{Result, StoreError};

/// A baseline recording plus the time it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredRecording {
    pub recording: SensorRecording,
    pub recorded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MotionEntry {
    pub motion: MotionType,
    pub recordings: Vec<StoredRecording>,
}

/// Per-motion baseline counts, for listings and health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MotionSummary {
    pub motion: MotionType,
    pub references: usize,
    pub zero_scores: usize,
}

impl MotionSummary {
    /// Both anchor sets are non-empty.
    pub fn is_evaluable(&self) -> bool {
        self.references > 0 && self.zero_scores > 0
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct Catalog {
    pub(crate) motions: Vec<MotionEntry>,
    pub(crate) next_id: u64,
}

impl Catalog {
    fn find(&self, name: &str) -> Option<&MotionEntry> {
        self.motions.iter().find(|m| m.motion.name == name)
    }

    fn find_mut(&mut self, name: &str) -> Option<&mut MotionEntry> {
        self.motions.iter_mut().find(|m| m.motion.name == name)
    }
}

/// Thread-safe store held entirely in memory. Readers get owned snapshots,
/// so writers never disturb an evaluation already in flight.
#[derive(Debug)]
pub struct MemoryStore {
    inner: RwLock<Catalog>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::from_catalog(Catalog {
            motions: Vec::new(),
            next_id: 1,
        })
    }

    pub(crate) fn from_catalog(catalog: Catalog) -> Self {
        Self {
            inner: RwLock::new(catalog),
        }
    }

    pub(crate) fn snapshot(&self) -> Result<Vec<MotionEntry>> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.motions.clone())
    }

    pub(crate) fn checkpoint(&self) -> Result<Catalog> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.clone())
    }

    pub(crate) fn restore(&self, catalog: Catalog) -> Result<()> {
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        *guard = catalog;
        Ok(())
    }

    /// Register a new motion type. Names are unique and non-blank.
    pub fn add_motion(&self, name: &str, description: &str) -> Result<MotionType> {
        if name.trim().is_empty() {
            return Err(StoreError::InvalidName("motion name must not be blank".into()));
        }
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        if guard.find(name).is_some() {
            return Err(StoreError::DuplicateMotion(name.to_string()));
        }
        let motion = MotionType::new(name, description);
        guard.motions.push(MotionEntry {
            motion: motion.clone(),
            recordings: Vec::new(),
        });
        tracing::info!(motion = name, "motion type added");
        Ok(motion)
    }

    /// Change the description of an existing motion. The name is immutable.
    pub fn set_description(&self, name: &str, description: &str) -> Result<()> {
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let entry = guard
            .find_mut(name)
            .ok_or_else(|| StoreError::UnknownMotion(name.to_string()))?;
        entry.motion.description = description.to_string();
        Ok(())
    }

    /// Store a baseline recording and return its new id.
    pub fn add_recording(
        &self,
        motion: &str,
        category: ScoreCategory,
        frames: Vec<Frame>,
    ) -> Result<u64> {
        self.add_recording_at(motion, category, frames, Utc::now())
    }

    pub(crate) fn add_recording_at(
        &self,
        motion: &str,
        category: ScoreCategory,
        frames: Vec<Frame>,
        recorded_at: DateTime<Utc>,
    ) -> Result<u64> {
        if frames.is_empty() {
            return Err(StoreError::EmptyRecording);
        }
        // JSON has no NaN/inf; such a reading would not survive a save.
        for (i, frame) in frames.iter().enumerate() {
            if let Some((ch, v)) = frame.iter().find(|(_, v)| !v.is_finite()) {
                return Err(StoreError::NonFinite(format!(
                    "channel '{ch}' at frame {i} is {v}"
                )));
            }
        }
        let mut guard = self.inner.write().map_err(|_| StoreError::Poisoned)?;
        let id = guard.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Corrupt("recording ids exhausted".to_string()))?;
        let entry = guard
            .find_mut(motion)
            .ok_or_else(|| StoreError::UnknownMotion(motion.to_string()))?;
        let data_frames = frames.len();
        entry.recordings.push(StoredRecording {
            recording: SensorRecording::new(id, category, frames),
            recorded_at,
        });
        guard.next_id = next_id;
        tracing::info!(motion, %category, id, data_frames, "baseline recording added");
        Ok(id)
    }

    /// All motions in insertion order with their baseline counts.
    pub fn motions(&self) -> Result<Vec<MotionSummary>> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard
            .motions
            .iter()
            .map(|m| {
                let count = |c: ScoreCategory| {
                    m.recordings
                        .iter()
                        .filter(|r| r.recording.category == c)
                        .count()
                };
                MotionSummary {
                    motion: m.motion.clone(),
                    references: count(ScoreCategory::Reference),
                    zero_scores: count(ScoreCategory::ZeroScore),
                }
            })
            .collect())
    }
}

impl BaselineStore for MemoryStore {
    fn get_motion(&self, name: &str) -> StoreResult<Option<MotionType>> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard.find(name).map(|m| m.motion.clone()))
    }

    fn get_recordings(
        &self,
        motion: &MotionType,
        category: ScoreCategory,
    ) -> StoreResult<Vec<SensorRecording>> {
        let guard = self.inner.read().map_err(|_| StoreError::Poisoned)?;
        let entry = guard
            .find(&motion.name)
            .ok_or_else(|| StoreError::UnknownMotion(motion.name.clone()))?;
        Ok(entry
            .recordings
            .iter()
            .filter(|r| r.recording.category == category)
            .map(|r| r.recording.clone())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xs(values: &[f64]) -> Vec<Frame> {
        values
            .iter()
            .map(|v| Frame::from([("x".to_string(), *v)]))
            .collect()
    }

    #[test]
    fn ids_are_assigned_in_order_across_motions() {
        let store = MemoryStore::new();
        store.add_motion("lift", "").unwrap();
        store.add_motion("squat", "").unwrap();
        let a = store
            .add_recording("lift", ScoreCategory::Reference, xs(&[1.0]))
            .unwrap();
        let b = store
            .add_recording("squat", ScoreCategory::ZeroScore, xs(&[1.0]))
            .unwrap();
        assert_eq!((a, b), (1, 2));
    }

    #[test]
    fn recordings_are_filtered_by_category_in_store_order() {
        let store = MemoryStore::new();
        let lift = store.add_motion("lift", "").unwrap();
        store
            .add_recording("lift", ScoreCategory::Reference, xs(&[1.0]))
            .unwrap();
        store
            .add_recording("lift", ScoreCategory::ZeroScore, xs(&[2.0]))
            .unwrap();
        store
            .add_recording("lift", ScoreCategory::Reference, xs(&[3.0, 4.0]))
            .unwrap();

        let refs = store
            .get_recordings(&lift, ScoreCategory::Reference)
            .unwrap();
        assert_eq!(refs.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(refs[1].data_frames(), 2);
    }

    #[test]
    fn rejects_duplicates_unknowns_and_empty_recordings() {
        let store = MemoryStore::new();
        store.add_motion("lift", "v1").unwrap();
        assert!(matches!(
            store.add_motion("lift", "v2"),
            Err(StoreError::DuplicateMotion(_))
        ));
        assert!(matches!(
            store.add_recording("jump", ScoreCategory::Reference, xs(&[1.0])),
            Err(StoreError::UnknownMotion(_))
        ));
        assert!(matches!(
            store.add_recording("lift", ScoreCategory::Reference, Vec::new()),
            Err(StoreError::EmptyRecording)
        ));
        assert!(matches!(
            store.add_motion("  ", ""),
            Err(StoreError::InvalidName(_))
        ));
        assert!(matches!(
            store.add_recording("lift", ScoreCategory::Reference, xs(&[0.0, f64::NAN])),
            Err(StoreError::NonFinite(_))
        ));
        assert_eq!(store.motions().unwrap()[0].references, 0);
    }

    #[test]
    fn exhausted_id_counter_is_an_error_not_a_wrap() {
        let store = MemoryStore::from_catalog(Catalog {
            motions: Vec::new(),
            next_id: u64::MAX,
        });
        store.add_motion("lift", "").unwrap();
        assert!(matches!(
            store.add_recording("lift", ScoreCategory::Reference, xs(&[1.0])),
            Err(StoreError::Corrupt(_))
        ));
        assert_eq!(store.motions().unwrap()[0].references, 0);
    }

    #[test]
    fn description_edits_keep_identity() {
        let store = MemoryStore::new();
        store.add_motion("lift", "old").unwrap();
        store.set_description("lift", "new").unwrap();
        let m = store.get_motion("lift").unwrap().unwrap();
        assert_eq!(m, MotionType::new("lift", "new"));
        assert!(store.get_motion("other").unwrap().is_none());
    }

    #[test]
    fn summary_reports_evaluability() {
        let store = MemoryStore::new();
        store.add_motion("lift", "").unwrap();
        store
            .add_recording("lift", ScoreCategory::Reference, xs(&[1.0]))
            .unwrap();
        let s = &store.motions().unwrap()[0];
        assert_eq!((s.references, s.zero_scores), (1, 0));
        assert!(!s.is_evaluable());
    }
}
