//! Type-state builder for `MotionEvaluator`.
//!
//! The builder enforces at compile time that a store is provided before
//! `build()` is available. `try_build()` is always available for dynamic checks.

use std::collections::HashSet;
use std::marker::PhantomData;

use motion_traits::BaselineStore;

use crate::config::{ChannelCfg, EngineCfg, FillPolicy};
use crate::error::{BuildError, Result};
use crate::evaluator::MotionEvaluator;
use crate::scorer::ChannelWeights;

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for `MotionEvaluator`. All fields are validated on `build()`.
pub struct EvaluatorBuilder<S, St> {
    store: Option<S>,
    channels: Option<ChannelCfg>,
    fill_policy: Option<FillPolicy>,
    cfg: EngineCfg,
    _st: PhantomData<St>,
}

impl<S> Default for EvaluatorBuilder<S, Missing> {
    fn default() -> Self {
        Self {
            store: None,
            channels: None,
            fill_policy: None,
            cfg: EngineCfg::default(),
            _st: PhantomData,
        }
    }
}

/// Validate configuration and construct a `MotionEvaluator`.
///
/// This is the single source of truth for validation, used by
/// `EvaluatorBuilder::try_build()` and therefore by `evaluate()`.
fn validate_and_build<S>(store: S, cfg: EngineCfg) -> Result<MotionEvaluator<S>> {
    if cfg.channels.required.is_empty() {
        return Err(eyre::Report::new(BuildError::MissingChannels));
    }
    let mut seen = HashSet::new();
    for ch in &cfg.channels.required {
        if ch.trim().is_empty() {
            return Err(eyre::Report::new(BuildError::InvalidConfig(
                "channel names must not be blank".to_string(),
            )));
        }
        if !seen.insert(ch.as_str()) {
            return Err(eyre::Report::new(BuildError::InvalidConfig(format!(
                "channel '{ch}' listed more than once"
            ))));
        }
    }
    let weights =
        ChannelWeights::resolve(&cfg.channels.required, &cfg.weights).map_err(eyre::Report::new)?;

    tracing::debug!(
        channels = cfg.channels.required.len(),
        fill_policy = ?cfg.channels.fill_policy,
        per_channel = cfg.per_channel,
        "evaluator configured"
    );
    Ok(MotionEvaluator {
        store,
        cfg,
        weights,
    })
}

impl<S, St> EvaluatorBuilder<S, St> {
    /// Replace the whole engine configuration (channels, weights, breakdown).
    pub fn with_config(mut self, cfg: EngineCfg) -> Self {
        self.channels = Some(cfg.channels.clone());
        self.cfg = cfg;
        self
    }

    pub fn with_channels(mut self, channels: ChannelCfg) -> Self {
        self.channels = Some(channels);
        self
    }

    /// Set the fill policy. Takes precedence over the policy carried by
    /// `with_channels` or `with_config`, whichever order they are called in.
    pub fn with_fill_policy(mut self, policy: FillPolicy) -> Self {
        self.fill_policy = Some(policy);
        self
    }

    pub fn with_weight(mut self, channel: impl Into<String>, weight: f64) -> Self {
        self.cfg.weights.insert(channel.into(), weight);
        self
    }

    pub fn with_per_channel(mut self, enabled: bool) -> Self {
        self.cfg.per_channel = enabled;
        self
    }

    /// Validate and build, reporting a missing store as `BuildError::MissingStore`.
    pub fn try_build(self) -> Result<MotionEvaluator<S>>
    where
        S: BaselineStore,
    {
        let store = self
            .store
            .ok_or_else(|| eyre::Report::new(BuildError::MissingStore))?;
        let mut channels = self
            .channels
            .ok_or_else(|| eyre::Report::new(BuildError::MissingChannels))?;
        if let Some(policy) = self.fill_policy {
            channels.fill_policy = policy;
        }
        let cfg = EngineCfg {
            channels,
            ..self.cfg
        };
        validate_and_build(store, cfg)
    }
}

impl<S> EvaluatorBuilder<S, Missing> {
    pub fn with_store(self, store: S) -> EvaluatorBuilder<S, Set> {
        EvaluatorBuilder {
            store: Some(store),
            channels: self.channels,
            fill_policy: self.fill_policy,
            cfg: self.cfg,
            _st: PhantomData,
        }
    }
}

impl<S: BaselineStore> EvaluatorBuilder<S, Set> {
    pub fn build(self) -> Result<MotionEvaluator<S>> {
        self.try_build()
    }
}
