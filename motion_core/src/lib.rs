#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Motion evaluation engine (storage-agnostic).
//!
//! This crate scores a user's sensor recording of a named motion against
//! stored baselines. All storage access goes through
//! `motion_traits::BaselineStore`.
//!
//! ## Architecture
//!
//! - **Normalization**: raw channel maps to a frames × channels matrix (`normalizer`)
//! - **Alignment**: linear resampling onto a common length (`aligner`)
//! - **Scoring**: weighted mean of per-channel RMS differences (`scorer`)
//! - **Calibration**: reference = 100, zero-score = 0 (`calibrator`)
//! - **Orchestration**: `MotionEvaluator` / `evaluate` (`evaluator`)
//! - **Configuration**: runtime config structs (`config`) and `From` bridges
//!   from the TOML schema (`conversions`)
//!
//! ## Example
//!
//! ```
//! use motion_core::{ChannelCfg, FillPolicy, MotionEvaluator};
//! use motion_store::MemoryStore;
//! use motion_traits::{Frame, ScoreCategory};
//!
//! let xs = |v: &[f64]| -> Vec<Frame> {
//!     v.iter().map(|x| Frame::from([("x".to_string(), *x)])).collect()
//! };
//! let store = MemoryStore::new();
//! store.add_motion("lift", "lift the extinguisher")?;
//! store.add_recording("lift", ScoreCategory::Reference, xs(&[0.0, 1.0, 2.0]))?;
//! store.add_recording("lift", ScoreCategory::ZeroScore, xs(&[5.0, 5.0, 5.0]))?;
//!
//! let evaluator = MotionEvaluator::builder()
//!     .with_store(store)
//!     .with_channels(ChannelCfg::new(["x"], FillPolicy::Reject))
//!     .build()?;
//! let result = evaluator.evaluate("lift", &xs(&[0.0, 1.0, 2.0]))?;
//! assert_eq!(result.score, 100.0);
//! # Ok::<(), eyre::Report>(())
//! ```

pub mod aligner;
pub mod builder;
pub mod calibrator;
pub mod config;
pub mod conversions;
pub mod error;
pub mod evaluator;
pub mod matrix;
pub mod mocks;
pub mod normalizer;
pub mod scorer;
pub mod status;
pub mod util;

pub use aligner::{AlignedPair, align, resample};
pub use builder::EvaluatorBuilder;
pub use calibrator::{SCORE_MAX, SCORE_MIN, calibrate};
pub use config::{ChannelCfg, EngineCfg, FillPolicy};
pub use error::{BuildError, ErrorKind, EvalError};
pub use evaluator::{ChannelScore, EvaluationResult, MotionEvaluator, evaluate};
pub use matrix::FrameMatrix;
pub use normalizer::normalize;
pub use scorer::{ChannelWeights, Dissimilarity, dissimilarity, distance};
pub use status::Stage;
