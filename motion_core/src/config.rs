//! Configuration types for the evaluation engine.
//!
//! These are the runtime configuration structs used by `MotionEvaluator`.
//! They are separate from the TOML-deserialized config in `motion_config`.

use std::collections::BTreeMap;

/// How a configured channel missing from a frame is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FillPolicy {
    /// Fail normalization.
    #[default]
    Reject,
    /// Substitute 0.0.
    Zero,
    /// Repeat the previous frame's value (0.0 on the first frame).
    CarryForward,
}

/// Channel schema shared by the user recording and every baseline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChannelCfg {
    /// Ordered channel list; defines the column order of every `FrameMatrix`.
    pub required: Vec<String>,
    pub fill_policy: FillPolicy,
}

impl ChannelCfg {
    pub fn new<I, T>(required: I, fill_policy: FillPolicy) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
            fill_policy,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineCfg {
    pub channels: ChannelCfg,
    /// Per-channel weights; channels not listed weigh 1.0.
    pub weights: BTreeMap<String, f64>,
    /// Compute the per-channel score breakdown.
    pub per_channel: bool,
}

impl Default for EngineCfg {
    fn default() -> Self {
        Self {
            channels: ChannelCfg::default(),
            weights: BTreeMap::new(),
            per_channel: true,
        }
    }
}

impl EngineCfg {
    pub fn new(channels: ChannelCfg) -> Self {
        Self {
            channels,
            ..Self::default()
        }
    }

    pub fn with_weight(mut self, channel: impl Into<String>, weight: f64) -> Self {
        self.weights.insert(channel.into(), weight);
        self
    }
}
