//! Sensor frame normalizer: raw channel maps to a `FrameMatrix` over the
//! configured channel list.

use motion_traits::Frame;

use crate::config::{ChannelCfg, FillPolicy};
use crate::error::EvalError;
use crate::matrix::FrameMatrix;

/// Normalize `frames` onto `cfg.required`, resolving missing channels with
/// `cfg.fill_policy`. Extra channels are ignored.
///
/// Fails with `EvalError::Schema` on an empty recording, or on a missing
/// channel under `FillPolicy::Reject`.
pub fn normalize(frames: &[Frame], cfg: &ChannelCfg) -> Result<FrameMatrix, EvalError> {
    if frames.is_empty() {
        return Err(EvalError::Schema("recording has no frames".to_string()));
    }
    let width = cfg.required.len();
    let mut values = Vec::with_capacity(width * frames.len());
    let mut filled = 0usize;

    for (i, frame) in frames.iter().enumerate() {
        for (c, ch) in cfg.required.iter().enumerate() {
            let v = match frame.get(ch) {
                Some(v) => *v,
                None => {
                    filled += 1;
                    match cfg.fill_policy {
                        FillPolicy::Reject => {
                            return Err(EvalError::Schema(format!(
                                "frame {i} is missing channel '{ch}'"
                            )));
                        }
                        FillPolicy::Zero => 0.0,
                        FillPolicy::CarryForward => {
                            if i == 0 {
                                0.0
                            } else {
                                // previous row is already resolved
                                values[(i - 1) * width + c]
                            }
                        }
                    }
                }
            };
            values.push(v);
        }
    }

    if filled > 0 {
        tracing::debug!(
            filled,
            frames = frames.len(),
            policy = ?cfg.fill_policy,
            "filled missing channel readings"
        );
    }
    Ok(FrameMatrix::from_flat(
        cfg.required.clone(),
        values,
        frames.len(),
    ))
}
