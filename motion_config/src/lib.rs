#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schemas and recording parsing for the motion evaluator.
//!
//! - `Config` and sub-structs are deserialized from TOML and validated.
//! - Recording loaders accept JSON (array of channel→number objects) and CSV
//!   (strict header of channel names, one frame per row).
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// A frame as read from disk, before normalization.
pub type RawFrame = BTreeMap<String, f64>;

/// How the normalizer resolves a configured channel that a frame lacks.
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FillPolicy {
    #[default]
    Reject,
    Zero,
    CarryForward,
}

#[derive(Debug, Deserialize)]
pub struct Channels {
    /// Ordered channel list every recording is normalized onto.
    pub required: Vec<String>,
    #[serde(default)]
    pub fill_policy: FillPolicy,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Scoring {
    /// Include the per-channel breakdown in evaluation results
    pub per_channel: bool,
}

impl Default for Scoring {
    fn default() -> Self {
        Self { per_channel: true }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct StoreCfg {
    /// JSON file holding motion types and baseline recordings
    pub path: PathBuf,
}

impl Default for StoreCfg {
    fn default() -> Self {
        Self {
            path: PathBuf::from("var/motions.json"),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub channels: Channels,
    /// Per-channel weights; channels not listed weigh 1.0.
    #[serde(default)]
    pub weights: BTreeMap<String, f64>,
    #[serde(default)]
    pub scoring: Scoring,
    #[serde(default)]
    pub store: StoreCfg,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

pub fn load_config(path: &Path) -> eyre::Result<Config> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("read config {:?}: {}", path, e))?;
    load_toml(&text).map_err(|e| eyre::eyre!("invalid configuration in {:?}: {}", path, e))
}

impl Config {
    /// Weight for a configured channel (1.0 when not listed).
    pub fn weight_of(&self, channel: &str) -> f64 {
        self.weights.get(channel).copied().unwrap_or(1.0)
    }

    pub fn validate(&self) -> eyre::Result<()> {
        // Channels
        if self.channels.required.is_empty() {
            eyre::bail!("channels.required must not be empty");
        }
        let mut seen = HashSet::new();
        for ch in &self.channels.required {
            if ch.trim().is_empty() {
                eyre::bail!("channels.required contains a blank channel name");
            }
            if !seen.insert(ch.as_str()) {
                eyre::bail!("channels.required lists '{ch}' more than once");
            }
        }

        // Weights
        for (ch, w) in &self.weights {
            if !seen.contains(ch.as_str()) {
                eyre::bail!("weights.{ch} refers to a channel not in channels.required");
            }
            if !w.is_finite() || *w < 0.0 {
                eyre::bail!("weights.{ch} must be a finite value >= 0.0");
            }
        }
        if self
            .channels
            .required
            .iter()
            .all(|ch| self.weight_of(ch) == 0.0)
        {
            eyre::bail!("weights must leave at least one channel with weight > 0.0");
        }

        // Logging
        if let Some(rot) = self.logging.rotation.as_deref()
            && !matches!(rot, "never" | "daily" | "hourly")
        {
            eyre::bail!("logging.rotation must be one of never, daily, hourly (got '{rot}')");
        }

        Ok(())
    }
}

/// Parse a JSON array of frames. `null` values mark a channel as missing in
/// that frame and are dropped.
pub fn parse_frames_json(s: &str) -> eyre::Result<Vec<RawFrame>> {
    let raw: Vec<BTreeMap<String, Option<f64>>> = serde_json::from_str(s)
        .map_err(|e| eyre::eyre!("sensor data must be a JSON array of objects: {}", e))?;
    Ok(raw
        .into_iter()
        .map(|frame| {
            frame
                .into_iter()
                .filter_map(|(ch, v)| v.map(|v| (ch, v)))
                .collect()
        })
        .collect())
}

pub fn load_recording_json(path: &Path) -> eyre::Result<Vec<RawFrame>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("open recording JSON {:?}: {}", path, e))?;
    parse_frames_json(&text).map_err(|e| eyre::eyre!("recording {:?}: {}", path, e))
}

/// Recording CSV schema.
///
/// Header row names the channels; each following row is one frame.
/// An empty cell means the channel is missing in that frame.
///
/// Example:
/// ax,ay,az
/// 0.01,0.98,0.10
/// 0.02,,0.11
pub fn load_recording_csv(path: &Path) -> eyre::Result<Vec<RawFrame>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| eyre::eyre!("open recording CSV {:?}: {}", path, e))?;

    let headers = rdr
        .headers()
        .map_err(|e| eyre::eyre!("read CSV headers {:?}: {}", path, e))?
        .clone();
    let names: Vec<String> = headers.iter().map(|s| s.to_string()).collect();
    if names.is_empty() || names.iter().any(|n| n.is_empty()) {
        eyre::bail!("recording CSV must have a header of non-empty channel names");
    }
    let mut seen = HashSet::new();
    for n in &names {
        if !seen.insert(n.as_str()) {
            eyre::bail!("recording CSV header repeats channel '{n}'");
        }
    }

    let mut frames = Vec::new();
    for (idx, rec) in rdr.records().enumerate() {
        let row = idx + 2;
        let rec = rec.map_err(|e| eyre::eyre!("invalid CSV row {}: {}", row, e))?;
        let mut frame = RawFrame::new();
        for (name, cell) in names.iter().zip(rec.iter()) {
            if cell.is_empty() {
                continue;
            }
            let v: f64 = cell.parse().map_err(|_| {
                eyre::eyre!("invalid CSV row {}: column '{}' is not a number: '{}'", row, name, cell)
            })?;
            frame.insert(name.clone(), v);
        }
        frames.push(frame);
    }
    Ok(frames)
}

/// Load a recording, choosing the parser by file extension (`.csv` or JSON).
pub fn load_recording(path: &Path) -> eyre::Result<Vec<RawFrame>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if is_csv {
        load_recording_csv(path)
    } else {
        load_recording_json(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_policy_defaults_to_reject() {
        let cfg = load_toml("[channels]\nrequired = [\"x\"]\n").unwrap();
        assert_eq!(cfg.channels.fill_policy, FillPolicy::Reject);
        assert!(cfg.scoring.per_channel);
        assert_eq!(cfg.weight_of("x"), 1.0);
    }

    #[test]
    fn json_nulls_are_dropped() {
        let frames = parse_frames_json(r#"[{"x": 1.0, "y": null}, {"y": 2}]"#).unwrap();
        assert_eq!(frames.len(), 2);
        assert!(!frames[0].contains_key("y"));
        assert_eq!(frames[1]["y"], 2.0);
    }

    #[test]
    fn json_rejects_non_numeric_values() {
        assert!(parse_frames_json(r#"[{"x": "fast"}]"#).is_err());
        assert!(parse_frames_json(r#"{"x": 1.0}"#).is_err());
    }
}
