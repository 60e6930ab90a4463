//! `From` implementations bridging `motion_config` types to `motion_core` types.

use crate::config::{ChannelCfg, EngineCfg, FillPolicy};

// ── FillPolicy ───────────────────────────────────────────────────────────────

impl From<motion_config::FillPolicy> for FillPolicy {
    fn from(p: motion_config::FillPolicy) -> Self {
        match p {
            motion_config::FillPolicy::Reject => FillPolicy::Reject,
            motion_config::FillPolicy::Zero => FillPolicy::Zero,
            motion_config::FillPolicy::CarryForward => FillPolicy::CarryForward,
        }
    }
}

// ── ChannelCfg ───────────────────────────────────────────────────────────────

impl From<&motion_config::Channels> for ChannelCfg {
    fn from(c: &motion_config::Channels) -> Self {
        Self {
            required: c.required.clone(),
            fill_policy: c.fill_policy.into(),
        }
    }
}

// ── EngineCfg ────────────────────────────────────────────────────────────────

impl From<&motion_config::Config> for EngineCfg {
    fn from(c: &motion_config::Config) -> Self {
        Self {
            channels: (&c.channels).into(),
            weights: c.weights.clone(),
            per_channel: c.scoring.per_channel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_toml_config_onto_engine_config() {
        let cfg = motion_config::load_toml(
            r#"
[channels]
required = ["ax", "ay"]
fill_policy = "zero"

[weights]
ay = 0.5

[scoring]
per_channel = false
"#,
        )
        .unwrap();
        let engine: EngineCfg = (&cfg).into();
        assert_eq!(engine.channels.required, vec!["ax", "ay"]);
        assert_eq!(engine.channels.fill_policy, FillPolicy::Zero);
        assert_eq!(engine.weights.get("ay"), Some(&0.5));
        assert!(!engine.per_channel);
    }
}
