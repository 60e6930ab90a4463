pub mod recording;

pub use recording::{Frame, MotionType, ScoreCategory, SensorRecording};

/// Error type crossing the data-access boundary. Implementations are free to
/// use their own typed errors; the engine maps them to a store failure.
pub type StoreResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Read-only access to motion types and their baseline recordings.
///
/// - get_motion(): `Ok(None)` means the motion does not exist.
/// - get_recordings(): recordings of one category, in store order.
pub trait BaselineStore {
    fn get_motion(&self, name: &str) -> StoreResult<Option<MotionType>>;
    fn get_recordings(
        &self,
        motion: &MotionType,
        category: ScoreCategory,
    ) -> StoreResult<Vec<SensorRecording>>;
}

impl<T: BaselineStore + ?Sized> BaselineStore for &T {
    fn get_motion(&self, name: &str) -> StoreResult<Option<MotionType>> {
        (**self).get_motion(name)
    }

    fn get_recordings(
        &self,
        motion: &MotionType,
        category: ScoreCategory,
    ) -> StoreResult<Vec<SensorRecording>> {
        (**self).get_recordings(motion, category)
    }
}

impl<T: BaselineStore + ?Sized> BaselineStore for Box<T> {
    fn get_motion(&self, name: &str) -> StoreResult<Option<MotionType>> {
        (**self).get_motion(name)
    }

    fn get_recordings(
        &self,
        motion: &MotionType,
        category: ScoreCategory,
    ) -> StoreResult<Vec<SensorRecording>> {
        (**self).get_recordings(motion, category)
    }
}

impl<T: BaselineStore + ?Sized> BaselineStore for std::sync::Arc<T> {
    fn get_motion(&self, name: &str) -> StoreResult<Option<MotionType>> {
        (**self).get_motion(name)
    }

    fn get_recordings(
        &self,
        motion: &MotionType,
        category: ScoreCategory,
    ) -> StoreResult<Vec<SensorRecording>> {
        (**self).get_recordings(motion, category)
    }
}
