//! Small numeric helpers shared by the aligner and scorer.

/// Linear interpolation between `a` and `b`. Returns `a` exactly at `t == 0`.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Root-mean-square of the element-wise differences of two equal-length
/// columns. Returns 0.0 for empty input.
///
/// Differences are scaled by their largest magnitude before squaring, so the
/// result is 0.0 only when every difference is 0.0 and stays finite whenever
/// the differences are.
pub fn rms_diff(a: impl Iterator<Item = f64>, b: impl Iterator<Item = f64>) -> f64 {
    let diffs: Vec<f64> = a.zip(b).map(|(x, y)| (x - y).abs()).collect();
    let scale = diffs.iter().copied().fold(0.0f64, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let mean = diffs.iter().map(|d| (d / scale).powi(2)).sum::<f64>() / diffs.len() as f64;
    scale * mean.sqrt()
}
