//! Score calibrator: maps reference/zero-score distances onto 0..=100.
//!
//! score = 100 * d_zero / (d_ref + d_zero)
//!
//! A user sitting on a reference recording (d_ref = 0) scores 100; one
//! sitting on the farthest zero-score recording (d_zero = 0) scores 0. The
//! ratio is unit-free, so scores are comparable across motions and channel
//! sets.

use crate::error::EvalError;

pub const SCORE_MIN: f64 = 0.0;
pub const SCORE_MAX: f64 = 100.0;

/// Map `d_ref` (best reference distance) and `d_zero` (farthest zero-score
/// distance) onto `[SCORE_MIN, SCORE_MAX]`. Both zero scores `SCORE_MAX`.
pub fn calibrate(d_ref: f64, d_zero: f64) -> Result<f64, EvalError> {
    for (name, d) in [("d_ref", d_ref), ("d_zero", d_zero)] {
        if !d.is_finite() || d < 0.0 {
            return Err(EvalError::Numeric(format!(
                "{name} must be finite and >= 0, got {d}"
            )));
        }
    }
    let denom = d_ref + d_zero;
    if denom == 0.0 {
        return Ok(SCORE_MAX);
    }
    let ratio = if denom.is_finite() {
        d_zero / denom
    } else {
        // halve both to keep the sum representable
        (0.5 * d_zero) / (0.5 * d_ref + 0.5 * d_zero)
    };
    Ok((SCORE_MAX * ratio).clamp(SCORE_MIN, SCORE_MAX))
}
