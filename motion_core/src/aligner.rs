//! Sequence aligner: resamples two frame matrices onto a common length so
//! they can be compared frame by frame.
//!
//! The frame index is the time proxy; recordings carry no reliable
//! timestamps. Both inputs are stretched onto `k = max(m, n)` points with
//! linear interpolation. A single-frame input is broadcast instead.

use crate::error::EvalError;
use crate::matrix::FrameMatrix;
use crate::util::lerp;

/// Two matrices of equal length over the same channels.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedPair {
    pub a: FrameMatrix,
    pub b: FrameMatrix,
}

impl AlignedPair {
    /// Common length of both sides.
    pub fn len(&self) -> usize {
        self.a.len()
    }

    pub fn is_empty(&self) -> bool {
        self.a.is_empty()
    }
}

/// Align `a` (length m) and `b` (length n) onto `max(m, n)` frames.
pub fn align(a: &FrameMatrix, b: &FrameMatrix) -> Result<AlignedPair, EvalError> {
    if a.is_empty() || b.is_empty() {
        return Err(EvalError::Alignment(format!(
            "cannot align empty sequence (lengths {} and {})",
            a.len(),
            b.len()
        )));
    }
    if a.channels() != b.channels() {
        return Err(EvalError::Alignment(format!(
            "channel lists differ: [{}] vs [{}]",
            a.channels().join(", "),
            b.channels().join(", ")
        )));
    }
    let k = a.len().max(b.len());
    Ok(AlignedPair {
        a: resample(a, k),
        b: resample(b, k),
    })
}

/// Resample `m` onto `k` frames. `m` must be non-empty and `k >= 1`.
///
/// - `m.len() == k`: returned unchanged.
/// - `m.len() == 1`: the single frame is repeated `k` times.
/// - otherwise: output frame j sits at source position `j * (len-1) / (k-1)`,
///   interpolated between its two neighbours.
pub fn resample(m: &FrameMatrix, k: usize) -> FrameMatrix {
    let len = m.len();
    if len == k {
        return m.clone();
    }
    let width = m.channel_count();
    let mut values = Vec::with_capacity(width * k);

    if len == 1 {
        let row = m.row(0);
        for _ in 0..k {
            values.extend_from_slice(row);
        }
        return FrameMatrix::from_flat(m.channels().to_vec(), values, k);
    }

    if k == 1 {
        values.extend_from_slice(m.row(0));
        return FrameMatrix::from_flat(m.channels().to_vec(), values, 1);
    }

    let span = (len - 1) as f64;
    let steps = (k - 1) as f64;
    for j in 0..k {
        let pos = j as f64 * span / steps;
        let lo = (pos.floor() as usize).min(len - 1);
        let hi = (lo + 1).min(len - 1);
        let t = pos - lo as f64;
        let (r0, r1) = (m.row(lo), m.row(hi));
        for c in 0..width {
            values.push(lerp(r0[c], r1[c], t));
        }
    }
    FrameMatrix::from_flat(m.channels().to_vec(), values, k)
}
