//! Custom Store Example
//!
//! Any type implementing `BaselineStore` can back the evaluator. This one
//! serves a fixed catalog and counts how often it is queried.

use std::sync::atomic::{AtomicUsize, Ordering};

use motion_core::{ChannelCfg, EngineCfg, FillPolicy, evaluate};
use motion_traits::{BaselineStore, Frame, MotionType, ScoreCategory, SensorRecording, StoreResult};

struct FixedStore {
    recordings: Vec<SensorRecording>,
    queries: AtomicUsize,
}

impl BaselineStore for FixedStore {
    fn get_motion(&self, name: &str) -> StoreResult<Option<MotionType>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok((name == "wave").then(|| MotionType::new("wave", "wave one hand")))
    }

    fn get_recordings(
        &self,
        _motion: &MotionType,
        category: ScoreCategory,
    ) -> StoreResult<Vec<SensorRecording>> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        Ok(self
            .recordings
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect())
    }
}

fn xs(values: &[f64]) -> Vec<Frame> {
    values
        .iter()
        .map(|v| Frame::from([("x".to_string(), *v)]))
        .collect()
}

fn main() -> Result<(), eyre::Report> {
    let store = FixedStore {
        recordings: vec![
            SensorRecording::new(1, ScoreCategory::Reference, xs(&[0.0, 1.0, 0.0, -1.0, 0.0])),
            SensorRecording::new(2, ScoreCategory::ZeroScore, xs(&[0.0, 0.0, 0.0])),
        ],
        queries: AtomicUsize::new(0),
    };
    let cfg = EngineCfg::new(ChannelCfg::new(["x"], FillPolicy::Zero));

    let r = evaluate(&store, "wave", &xs(&[0.0, 0.8, 0.1, -0.7, 0.0]), &cfg)?;
    println!("wave scored {:.1}", r.score);

    match evaluate(&store, "clap", &xs(&[0.0]), &cfg) {
        Ok(_) => println!("unexpected success"),
        Err(e) => println!("clap: {e} (client error: {})", e.kind().is_client_error()),
    }
    println!("store queried {} times", store.queries.load(Ordering::Relaxed));
    Ok(())
}
