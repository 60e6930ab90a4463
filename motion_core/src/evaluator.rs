//! Motion evaluator: the single entry point that fetches baselines, runs the
//! normalize → align → score → calibrate pipeline and assembles the result.

use motion_traits::{BaselineStore, Frame, MotionType, ScoreCategory, SensorRecording};

use crate::builder::{EvaluatorBuilder, Missing};
use crate::calibrator::calibrate;
use crate::config::EngineCfg;
use crate::error::EvalError;
use crate::matrix::FrameMatrix;
use crate::normalizer::normalize;
use crate::scorer::{ChannelWeights, Dissimilarity, dissimilarity};
use crate::status::Stage;

/// Per-channel slice of the result, computed against the same reference and
/// zero-score recordings that produced the overall score.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelScore {
    pub channel: String,
    pub d_ref: f64,
    pub d_zero: f64,
    pub score: f64,
}

/// Outcome of one successful evaluation. Owned by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationResult {
    pub motion: String,
    /// Calibrated score in `[0, 100]`.
    pub score: f64,
    /// Distance to the closest reference recording.
    pub d_ref: f64,
    /// Distance to the farthest zero-score recording.
    pub d_zero: f64,
    pub reference_id: u64,
    pub zero_score_id: u64,
    /// Frame count of the user recording before alignment.
    pub user_frames: usize,
    pub compared_references: usize,
    pub compared_zero_scores: usize,
    /// Empty when the breakdown is disabled.
    pub channels: Vec<ChannelScore>,
}

/// Stateless evaluator over a baseline store. `evaluate` takes `&self`, so one
/// instance may serve concurrent callers when `S: Sync`.
#[derive(Debug)]
pub struct MotionEvaluator<S> {
    pub(crate) store: S,
    pub(crate) cfg: EngineCfg,
    pub(crate) weights: ChannelWeights,
}

/// A baseline recording after normalization.
struct Baseline {
    id: u64,
    matrix: FrameMatrix,
}

/// Best match found for one category.
struct Pick {
    id: u64,
    distance: Dissimilarity,
}

impl<S> MotionEvaluator<S> {
    /// Start building an evaluator.
    pub fn builder() -> EvaluatorBuilder<S, Missing> {
        EvaluatorBuilder::default()
    }

    pub fn config(&self) -> &EngineCfg {
        &self.cfg
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

impl<S: BaselineStore> MotionEvaluator<S> {
    /// Evaluate `sensor_data` against the baselines stored for `motion_name`.
    pub fn evaluate(
        &self,
        motion_name: &str,
        sensor_data: &[Frame],
    ) -> Result<EvaluationResult, EvalError> {
        let mut stage = Stage::Start;
        let outcome = self.run(&mut stage, motion_name, sensor_data);
        match &outcome {
            Ok(r) => {
                stage = stage.next();
                debug_assert_eq!(stage, Stage::Done);
                tracing::info!(
                    motion = motion_name,
                    score = r.score,
                    d_ref = r.d_ref,
                    d_zero = r.d_zero,
                    reference_id = r.reference_id,
                    zero_score_id = r.zero_score_id,
                    "evaluation complete"
                );
            }
            Err(e) => {
                let failed_at = stage;
                stage = Stage::Failed;
                debug_assert!(stage.is_terminal());
                tracing::warn!(
                    motion = motion_name,
                    failed_at = %failed_at,
                    kind = e.kind().name(),
                    error = %e,
                    "evaluation failed"
                );
            }
        }
        outcome
    }

    fn enter(stage: &mut Stage, motion: &str) {
        *stage = stage.next();
        tracing::debug!(motion, stage = %stage, "evaluation stage");
    }

    fn run(
        &self,
        stage: &mut Stage,
        motion_name: &str,
        sensor_data: &[Frame],
    ) -> Result<EvaluationResult, EvalError> {
        Self::enter(stage, motion_name);
        let (motion, references, zero_scores) = self.fetch_baselines(motion_name)?;

        Self::enter(stage, motion_name);
        let user = normalize(sensor_data, &self.cfg.channels)?;
        let references = self.normalize_baselines(&references)?;
        let zero_scores = self.normalize_baselines(&zero_scores)?;

        Self::enter(stage, motion_name);
        let best_ref = self.pick(&user, &references, |cand, cur| cand < cur)?;
        let worst_zero = self.pick(&user, &zero_scores, |cand, cur| cand > cur)?;

        Self::enter(stage, motion_name);
        let score = calibrate(best_ref.distance.total, worst_zero.distance.total)?;
        let channels = if self.cfg.per_channel {
            self.breakdown(&best_ref.distance, &worst_zero.distance)?
        } else {
            Vec::new()
        };

        Ok(EvaluationResult {
            motion: motion.name,
            score,
            d_ref: best_ref.distance.total,
            d_zero: worst_zero.distance.total,
            reference_id: best_ref.id,
            zero_score_id: worst_zero.id,
            user_frames: user.len(),
            compared_references: references.len(),
            compared_zero_scores: zero_scores.len(),
            channels,
        })
    }

    fn fetch_baselines(
        &self,
        motion_name: &str,
    ) -> Result<(MotionType, Vec<SensorRecording>, Vec<SensorRecording>), EvalError> {
        let motion = self
            .store
            .get_motion(motion_name)
            .map_err(|e| EvalError::Store(e.to_string()))?
            .ok_or_else(|| EvalError::UnknownMotion(motion_name.to_string()))?;

        let mut fetched = Vec::with_capacity(2);
        for category in ScoreCategory::ALL {
            let recs = self
                .store
                .get_recordings(&motion, category)
                .map_err(|e| EvalError::Store(e.to_string()))?;
            if recs.is_empty() {
                return Err(EvalError::InsufficientBaseline {
                    motion: motion.name.clone(),
                    category,
                });
            }
            tracing::debug!(motion = %motion.name, %category, count = recs.len(), "baselines fetched");
            fetched.push(recs);
        }
        let zero_scores = fetched.pop().unwrap_or_default();
        let references = fetched.pop().unwrap_or_default();
        Ok((motion, references, zero_scores))
    }

    /// A stored baseline that does not fit the channel configuration is an
    /// administrative fault, so it is reported as `Config`, not `Schema`.
    fn normalize_baselines(&self, recs: &[SensorRecording]) -> Result<Vec<Baseline>, EvalError> {
        recs.iter()
            .map(|rec| {
                normalize(&rec.frames, &self.cfg.channels)
                    .map(|matrix| Baseline { id: rec.id, matrix })
                    .map_err(|e| {
                        let msg = match e {
                            EvalError::Schema(msg) | EvalError::Numeric(msg) => msg,
                            other => other.to_string(),
                        };
                        EvalError::Config(format!(
                            "stored {} recording {} does not fit the channel configuration: {msg}",
                            rec.category, rec.id
                        ))
                    })
            })
            .collect()
    }

    /// Keep the first baseline whose total distance beats the current pick
    /// according to `better`.
    fn pick(
        &self,
        user: &FrameMatrix,
        baselines: &[Baseline],
        better: impl Fn(f64, f64) -> bool,
    ) -> Result<Pick, EvalError> {
        let mut best: Option<Pick> = None;
        for b in baselines {
            let distance = dissimilarity(user, &b.matrix, &self.weights)?;
            tracing::trace!(recording = b.id, distance = distance.total, "scored baseline");
            let replace = match &best {
                None => true,
                Some(cur) => better(distance.total, cur.distance.total),
            };
            if replace {
                best = Some(Pick { id: b.id, distance });
            }
        }
        best.ok_or_else(|| EvalError::Alignment("no baselines to compare against".to_string()))
    }

    fn breakdown(
        &self,
        best_ref: &Dissimilarity,
        worst_zero: &Dissimilarity,
    ) -> Result<Vec<ChannelScore>, EvalError> {
        self.cfg
            .channels
            .required
            .iter()
            .zip(best_ref.per_channel.iter().zip(&worst_zero.per_channel))
            .map(|(channel, (&d_ref, &d_zero))| {
                Ok(ChannelScore {
                    channel: channel.clone(),
                    d_ref,
                    d_zero,
                    score: calibrate(d_ref, d_zero)?,
                })
            })
            .collect()
    }
}

/// One-shot evaluation: validate `cfg`, then evaluate against `store`.
///
/// Configuration problems are reported as `EvalError::Config`.
pub fn evaluate<S: BaselineStore>(
    store: &S,
    motion_name: &str,
    sensor_data: &[Frame],
    cfg: &EngineCfg,
) -> Result<EvaluationResult, EvalError> {
    let evaluator = MotionEvaluator::builder()
        .with_store(store)
        .with_config(cfg.clone())
        .build()
        .map_err(|e| EvalError::Config(e.to_string()))?;
    evaluator.evaluate(motion_name, sensor_data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ChannelCfg, FillPolicy};
    use motion_traits::StoreResult;

    /// Single-motion store for unit tests.
    struct OneMotion {
        motion: MotionType,
        recordings: Vec<SensorRecording>,
    }

    impl BaselineStore for OneMotion {
        fn get_motion(&self, name: &str) -> StoreResult<Option<MotionType>> {
            Ok((name == self.motion.name).then(|| self.motion.clone()))
        }

        fn get_recordings(
            &self,
            _motion: &MotionType,
            category: ScoreCategory,
        ) -> StoreResult<Vec<SensorRecording>> {
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

    fn evaluator(recordings: Vec<SensorRecording>) -> MotionEvaluator<OneMotion> {
        MotionEvaluator::builder()
            .with_store(OneMotion {
                motion: MotionType::new("lift", "lift the extinguisher"),
                recordings,
            })
            .with_channels(ChannelCfg::new(["x"], FillPolicy::Reject))
            .build()
            .unwrap()
    }

    #[test]
    fn closest_reference_and_farthest_zero_score_are_used() {
        let ev = evaluator(vec![
            SensorRecording::new(1, ScoreCategory::Reference, xs(&[10.0, 10.0])),
            SensorRecording::new(2, ScoreCategory::Reference, xs(&[1.0, 1.0])),
            SensorRecording::new(3, ScoreCategory::ZeroScore, xs(&[2.0, 2.0])),
            SensorRecording::new(4, ScoreCategory::ZeroScore, xs(&[4.0, 4.0])),
        ]);
        let r = ev.evaluate("lift", &xs(&[0.0, 0.0])).unwrap();
        assert_eq!(r.reference_id, 2);
        assert_eq!(r.zero_score_id, 4);
        assert_eq!(r.d_ref, 1.0);
        assert_eq!(r.d_zero, 4.0);
        assert_eq!(r.score, 80.0);
        assert_eq!(r.compared_references, 2);
        assert_eq!(r.compared_zero_scores, 2);
        assert_eq!(r.channels.len(), 1);
        assert_eq!(r.channels[0].score, 80.0);
    }

    #[test]
    fn ties_keep_first_recording_in_store_order() {
        let ev = evaluator(vec![
            SensorRecording::new(7, ScoreCategory::Reference, xs(&[1.0])),
            SensorRecording::new(8, ScoreCategory::Reference, xs(&[-1.0])),
            SensorRecording::new(9, ScoreCategory::ZeroScore, xs(&[3.0])),
            SensorRecording::new(10, ScoreCategory::ZeroScore, xs(&[-3.0])),
        ]);
        let r = ev.evaluate("lift", &xs(&[0.0])).unwrap();
        assert_eq!(r.reference_id, 7);
        assert_eq!(r.zero_score_id, 9);
    }

    #[test]
    fn bad_baseline_is_a_server_side_config_error() {
        let ev = evaluator(vec![
            SensorRecording::new(1, ScoreCategory::Reference, xs(&[0.0])),
            SensorRecording::new(
                5,
                ScoreCategory::ZeroScore,
                vec![Frame::from([("y".to_string(), 1.0)])],
            ),
        ]);
        let err = ev.evaluate("lift", &xs(&[0.0])).unwrap_err();
        assert!(!err.kind().is_client_error());
        match err {
            EvalError::Config(msg) => assert!(msg.contains("zero_score recording 5"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn free_function_reports_bad_config() {
        let store = OneMotion {
            motion: MotionType::new("lift", ""),
            recordings: Vec::new(),
        };
        let cfg = EngineCfg::new(ChannelCfg::default());
        let err = evaluate(&store, "lift", &xs(&[0.0]), &cfg).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Config);
    }
}
