//! Quick Start Example
//!
//! Seeds an in-memory store with one motion and scores three attempts.
//! Run with `cargo run -p motion_core --example quick_start`.

use motion_core::{ChannelCfg, FillPolicy, MotionEvaluator};
use motion_store::MemoryStore;
use motion_traits::{Frame, ScoreCategory};

fn trace(xs: &[f64], ys: &[f64]) -> Vec<Frame> {
    xs.iter()
        .zip(ys)
        .map(|(x, y)| Frame::from([("x".to_string(), *x), ("y".to_string(), *y)]))
        .collect()
}

fn main() -> Result<(), eyre::Report> {
    let store = MemoryStore::new();
    store.add_motion("lift", "lift the extinguisher to shoulder height")?;
    store.add_recording(
        "lift",
        ScoreCategory::Reference,
        trace(&[0.0, 0.5, 1.0, 1.5], &[0.0, 0.2, 0.4, 0.6]),
    )?;
    store.add_recording(
        "lift",
        ScoreCategory::ZeroScore,
        trace(&[0.0, 0.1, 0.1, 0.0], &[0.0, 0.0, 0.0, 0.0]),
    )?;

    let evaluator = MotionEvaluator::builder()
        .with_store(store)
        .with_channels(ChannelCfg::new(["x", "y"], FillPolicy::Reject))
        .with_weight("x", 2.0)
        .build()?;

    let attempts = [
        ("textbook", trace(&[0.0, 0.5, 1.0, 1.5], &[0.0, 0.2, 0.4, 0.6])),
        ("halfway", trace(&[0.0, 0.3, 0.6, 0.8], &[0.0, 0.1, 0.2, 0.3])),
        ("barely moved", trace(&[0.0, 0.1, 0.2], &[0.0, 0.0, 0.1])),
    ];
    for (label, frames) in &attempts {
        let r = evaluator.evaluate("lift", frames)?;
        println!("{label:<14} score {:>5.1}  (d_ref {:.3}, d_zero {:.3})", r.score, r.d_ref, r.d_zero);
    }
    Ok(())
}
