//! Human-readable error descriptions and structured JSON error formatting.

use motion_core::error::{BuildError, ErrorKind, EvalError};
use motion_store::StoreError;

/// Map an eyre::Report to a human-readable explanation with likely causes and fix hints.
pub fn humanize(err: &eyre::Report) -> String {
    // Typed matches first
    if let Some(ee) = err.downcast_ref::<EvalError>() {
        return match ee {
            EvalError::UnknownMotion(name) => format!(
                "What happened: No motion named '{name}' exists.\nLikely causes: Typo in --motion, or the motion was never added to this store.\nHow to fix: Run `motion motions` to list known motions, or add it with `motion add-motion --name {name}`."
            ),
            EvalError::InsufficientBaseline { motion, category } => format!(
                "What happened: Motion '{motion}' has no {category} recordings, so scores cannot be calibrated.\nLikely causes: Baselines were only partially recorded.\nHow to fix: Record one with `motion record --motion {motion} --category {category} --data FILE`."
            ),
            EvalError::Schema(msg) => format!(
                "What happened: The recording does not match the configured channels ({msg}).\nLikely causes: Missing channel columns, an empty recording, or fill_policy = \"reject\".\nHow to fix: Check channels.required in the config against the data file, or choose a different channels.fill_policy."
            ),
            EvalError::Alignment(msg) => format!(
                "What happened: Recordings could not be aligned ({msg}).\nLikely causes: Empty sequences or inconsistent channel lists.\nHow to fix: Re-record the data and make sure it contains at least one frame."
            ),
            EvalError::Numeric(msg) => format!(
                "What happened: A reading is not a finite number ({msg}).\nLikely causes: NaN or infinite values from the sensor or the export.\nHow to fix: Clean the recording and retry."
            ),
            EvalError::Store(msg) => format!(
                "What happened: The baseline store could not be read ({msg}).\nLikely causes: Store file unreadable or corrupt.\nHow to fix: Check the --store path and its permissions, then rerun."
            ),
            EvalError::Config(msg) => format!(
                "What happened: Invalid engine configuration ({msg}).\nLikely causes: Bad [channels] or [weights] values in the TOML, or a stored baseline recorded under a different channel set.\nHow to fix: Run `motion self-check` and fix the reported key, or re-record the named baseline."
            ),
        };
    }

    if let Some(be) = err.downcast_ref::<BuildError>() {
        return match be {
            BuildError::MissingStore => {
                "What happened: No baseline store was provided to the evaluator.\nLikely causes: The store failed to open.\nHow to fix: Check the --store path or store.path in the config.".to_string()
            }
            BuildError::MissingChannels => {
                "What happened: No channels are configured.\nLikely causes: [channels] missing from the config.\nHow to fix: Set channels.required to the ordered list of sensor channels.".to_string()
            }
            BuildError::InvalidConfig(msg) => format!(
                "What happened: Invalid configuration ({msg}).\nLikely causes: Duplicate channel names or out-of-range weights in the TOML.\nHow to fix: Edit the config file, then rerun `motion self-check`."
            ),
        };
    }

    if let Some(se) = err.downcast_ref::<StoreError>() {
        return match se {
            StoreError::UnknownMotion(name) => format!(
                "What happened: No motion named '{name}' exists in the store.\nLikely causes: The motion was never added.\nHow to fix: Add it first with `motion add-motion --name {name}`."
            ),
            StoreError::DuplicateMotion(name) => format!(
                "What happened: Motion '{name}' already exists.\nLikely causes: The motion was added before.\nHow to fix: Pass --description to update its description instead."
            ),
            StoreError::EmptyRecording => {
                "What happened: The recording has no frames.\nLikely causes: Empty data file or a CSV with only a header.\nHow to fix: Record the motion again.".to_string()
            }
            StoreError::NonFinite(msg) => format!(
                "What happened: The recording contains a reading that is not a finite number ({msg}).\nLikely causes: NaN or infinite values in the exported data.\nHow to fix: Clean the recording, then record it again."
            ),
            StoreError::Corrupt(_) | StoreError::Json(_) => format!(
                "What happened: The store file is not valid ({se}).\nLikely causes: Manual edits or an interrupted write.\nHow to fix: Restore the file from a backup or fix the reported entry."
            ),
            other => format!(
                "What happened: Store operation failed ({other}).\nLikely causes: File permissions or a full disk.\nHow to fix: Check the --store path and rerun."
            ),
        };
    }

    // String-based heuristics for errors coming from config or recording loaders.
    // `{:#}` keeps the wrapped cause, e.g. the failing validation rule.
    let msg = format!("{err:#}");
    let lower = msg.to_ascii_lowercase();

    if lower.contains("read config") {
        return format!(
            "What happened: The config file could not be read.\nLikely causes: Wrong --config path.\nHow to fix: Point --config at a TOML file. Original: {msg}"
        );
    }

    if lower.contains("invalid configuration")
        || lower.contains("channels.")
        || lower.contains("weights")
        || lower.contains("logging.")
    {
        return format!(
            "What happened: Configuration is invalid or incomplete.\nLikely causes: {msg}.\nHow to fix: Edit the TOML config and try again."
        );
    }

    if lower.contains("recording") || lower.contains("csv") {
        return format!(
            "What happened: The sensor data file could not be loaded.\nLikely causes: {msg}.\nHow to fix: Provide a JSON array of frames or a CSV with a channel header."
        );
    }

    // Generic fallback
    let mut cause = String::new();
    if let Some(src) = err.source() {
        cause = format!(" Cause: {src}");
    }
    format!(
        "Something went wrong.{cause}\nHow to fix: Re-run with --log-level=debug for details. Original: {msg}"
    )
}

/// Stable exit code per evaluation failure kind; anything untyped returns 1.
pub fn exit_code_for_error(err: &eyre::Report) -> i32 {
    if let Some(ee) = err.downcast_ref::<EvalError>() {
        return exit_code_for_kind(ee.kind());
    }
    match err.downcast_ref::<StoreError>() {
        Some(StoreError::UnknownMotion(_)) => 3,
        Some(_) => 8,
        None => 1,
    }
}

fn exit_code_for_kind(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::UnknownMotion => 3,
        ErrorKind::InsufficientBaseline => 4,
        ErrorKind::Schema => 5,
        ErrorKind::Alignment => 6,
        ErrorKind::Numeric => 7,
        ErrorKind::Store => 8,
        ErrorKind::Config => 1,
    }
}

/// Structured JSON for errors when --json is enabled.
pub fn format_error_json(err: &eyre::Report) -> String {
    use serde_json::json;

    let (reason, kind, client_error) = if let Some(ee) = err.downcast_ref::<EvalError>() {
        let k = ee.kind();
        (k.name(), "evaluation", k.is_client_error())
    } else if err.downcast_ref::<BuildError>().is_some() {
        ("InvalidConfig", "build", false)
    } else if let Some(se) = err.downcast_ref::<StoreError>() {
        match se {
            StoreError::UnknownMotion(_) => ("UnknownMotion", "store", true),
            StoreError::DuplicateMotion(_) => ("DuplicateMotion", "store", true),
            StoreError::EmptyRecording => ("EmptyRecording", "store", true),
            StoreError::NonFinite(_) => ("NonFinite", "store", true),
            StoreError::InvalidName(_) => ("InvalidName", "store", true),
            _ => ("Store", "store", false),
        }
    } else {
        ("Error", "other", false)
    };

    json!({
        "reason": reason,
        "kind": kind,
        "client_error": client_error,
        "message": humanize(err),
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use motion_traits::ScoreCategory;

    #[test]
    fn eval_kinds_map_to_stable_exit_codes() {
        let cases = [
            (EvalError::UnknownMotion("jump".into()), 3),
            (
                EvalError::InsufficientBaseline {
                    motion: "squat".into(),
                    category: ScoreCategory::ZeroScore,
                },
                4,
            ),
            (EvalError::Schema("x".into()), 5),
            (EvalError::Alignment("x".into()), 6),
            (EvalError::Numeric("x".into()), 7),
            (EvalError::Store("x".into()), 8),
        ];
        for (e, code) in cases {
            assert_eq!(exit_code_for_error(&eyre::Report::new(e)), code);
        }
        assert_eq!(exit_code_for_error(&eyre::eyre!("boom")), 1);
    }

    #[test]
    fn json_error_carries_reason_and_client_flag() {
        let report = eyre::Report::new(EvalError::UnknownMotion("jump".into()));
        let v: serde_json::Value = serde_json::from_str(&format_error_json(&report)).unwrap();
        assert_eq!(v["reason"], "UnknownMotion");
        assert_eq!(v["kind"], "evaluation");
        assert_eq!(v["client_error"], true);
        assert!(v["message"].as_str().unwrap().contains("jump"));
    }

    #[test]
    fn missing_zero_score_set_is_explained() {
        let report = eyre::Report::new(EvalError::InsufficientBaseline {
            motion: "squat".into(),
            category: ScoreCategory::ZeroScore,
        });
        let text = humanize(&report);
        assert!(text.contains("no zero_score recordings"));
        assert!(text.contains("--category zero_score"));
    }
}
