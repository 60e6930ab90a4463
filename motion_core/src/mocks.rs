//! Test and helper mocks for motion_core

use motion_traits::{BaselineStore, MotionType, ScoreCategory, SensorRecording, StoreResult};

/// A store whose backend is always down; useful for exercising the
/// collaborator-failure path.
pub struct UnavailableStore;

impl BaselineStore for UnavailableStore {
    fn get_motion(&self, _name: &str) -> StoreResult<Option<MotionType>> {
        Err(Box::new(std::io::Error::other("baseline store unavailable")))
    }

    fn get_recordings(
        &self,
        _motion: &MotionType,
        _category: ScoreCategory,
    ) -> StoreResult<Vec<SensorRecording>> {
        Err(Box::new(std::io::Error::other("baseline store unavailable")))
    }
}
