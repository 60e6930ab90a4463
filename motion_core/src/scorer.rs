//! Distance scorer: weighted mean of per-channel RMS differences between
//! two aligned sequences.

use std::collections::BTreeMap;

use crate::aligner::{AlignedPair, align};
use crate::error::{BuildError, EvalError};
use crate::matrix::FrameMatrix;
use crate::util::rms_diff;

/// Validated per-channel weights in configured channel order.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelWeights {
    weights: Vec<f64>,
    total: f64,
}

impl ChannelWeights {
    /// Every channel weighs 1.0.
    pub fn uniform(channels: usize) -> Self {
        Self {
            weights: vec![1.0; channels],
            total: channels as f64,
        }
    }

    /// Resolve a name→weight map against the channel order. Unlisted channels
    /// weigh 1.0. Weights must be finite and >= 0, at least one must be > 0,
    /// and every listed name must be a configured channel.
    pub fn resolve(
        channels: &[String],
        overrides: &BTreeMap<String, f64>,
    ) -> Result<Self, BuildError> {
        if let Some(unknown) = overrides
            .keys()
            .find(|k| !channels.iter().any(|c| c == *k))
        {
            return Err(BuildError::InvalidConfig(format!(
                "weight given for unconfigured channel '{unknown}'"
            )));
        }
        let mut weights = Vec::with_capacity(channels.len());
        for ch in channels {
            let w = overrides.get(ch).copied().unwrap_or(1.0);
            if !w.is_finite() || w < 0.0 {
                return Err(BuildError::InvalidConfig(format!(
                    "weight for channel '{ch}' must be finite and >= 0"
                )));
            }
            weights.push(w);
        }
        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(BuildError::InvalidConfig(
                "at least one channel weight must be > 0".to_string(),
            ));
        }
        Ok(Self { weights, total })
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.weights
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.weights.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// Scalar dissimilarity plus the per-channel RMS values it was built from.
#[derive(Debug, Clone, PartialEq)]
pub struct Dissimilarity {
    pub total: f64,
    /// RMS difference per channel, in configured channel order (unweighted).
    pub per_channel: Vec<f64>,
}

/// Score an aligned pair. Non-finite readings yield `EvalError::Numeric`.
pub fn distance(pair: &AlignedPair, weights: &ChannelWeights) -> Result<Dissimilarity, EvalError> {
    let (a, b) = (&pair.a, &pair.b);
    if a.len() != b.len() {
        return Err(EvalError::Alignment(format!(
            "sequences are not aligned (lengths {} and {})",
            a.len(),
            b.len()
        )));
    }
    if a.channels() != b.channels() {
        return Err(EvalError::Alignment("channel lists differ".to_string()));
    }
    if weights.len() != a.channel_count() {
        return Err(EvalError::Config(format!(
            "{} weights for {} channels",
            weights.len(),
            a.channel_count()
        )));
    }
    check_finite(a)?;
    check_finite(b)?;

    let mut per_channel = Vec::with_capacity(a.channel_count());
    let mut total = 0.0f64;
    for (c, w) in weights.as_slice().iter().enumerate() {
        let rms = rms_diff(a.column(c), b.column(c));
        per_channel.push(rms);
        total += w / weights.total * rms;
    }
    if !total.is_finite() {
        return Err(EvalError::Numeric(
            "distance overflowed to a non-finite value".to_string(),
        ));
    }
    Ok(Dissimilarity { total, per_channel })
}

/// Align then score two normalized recordings.
pub fn dissimilarity(
    a: &FrameMatrix,
    b: &FrameMatrix,
    weights: &ChannelWeights,
) -> Result<Dissimilarity, EvalError> {
    let pair = align(a, b)?;
    distance(&pair, weights)
}

fn check_finite(m: &FrameMatrix) -> Result<(), EvalError> {
    match m.first_non_finite() {
        Some((frame, c)) => Err(EvalError::Numeric(format!(
            "non-finite reading in channel '{}' at frame {frame}",
            m.channels()[c]
        ))),
        None => Ok(()),
    }
}
