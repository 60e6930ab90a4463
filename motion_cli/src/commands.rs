//! Subcommand implementations. Each returns `eyre::Result` so `main` can map
//! typed failures to exit codes.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};
use motion_config::Config;
use motion_core::{EngineCfg, EvaluationResult, MotionEvaluator};
use motion_store::{JsonFileStore, StoreError};
use motion_traits::{Frame, ScoreCategory};
use serde_json::json;

/// Everything a subcommand needs after the config has been loaded.
pub struct Ctx {
    pub cfg: Config,
    pub store_path: PathBuf,
    pub json: bool,
}

impl Ctx {
    fn open_store(&self) -> Result<JsonFileStore> {
        Ok(JsonFileStore::open(&self.store_path)?)
    }
}

pub fn evaluate(
    ctx: &Ctx,
    motion: &str,
    data: &Path,
    user: Option<&str>,
    handoff: Option<&Path>,
) -> Result<()> {
    let store = ctx.open_store()?;
    let frames = motion_config::load_recording(data)?;
    tracing::debug!(path = %data.display(), frames = frames.len(), "recording loaded");

    let evaluator = MotionEvaluator::builder()
        .with_store(store)
        .with_config(EngineCfg::from(&ctx.cfg))
        .build()?;
    let result = evaluator.evaluate(motion, &frames)?;

    if let Some(path) = handoff {
        append_handoff(path, user, &result, &frames)?;
    }

    if ctx.json {
        println!("{}", result_json(&result));
    } else {
        println!(
            "{}: score {:.1} (d_ref {:.4} vs reference #{}, d_zero {:.4} vs zero-score #{})",
            result.motion,
            result.score,
            result.d_ref,
            result.reference_id,
            result.d_zero,
            result.zero_score_id
        );
        for ch in &result.channels {
            println!(
                "  {:<12} {:>6.1}  (d_ref {:.4}, d_zero {:.4})",
                ch.channel, ch.score, ch.d_ref, ch.d_zero
            );
        }
    }
    Ok(())
}

fn result_json(r: &EvaluationResult) -> serde_json::Value {
    let channels: Vec<_> = r
        .channels
        .iter()
        .map(|c| json!({ "channel": c.channel, "score": c.score, "d_ref": c.d_ref, "d_zero": c.d_zero }))
        .collect();
    json!({
        "motion": r.motion,
        "score": r.score,
        "d_ref": r.d_ref,
        "d_zero": r.d_zero,
        "reference_id": r.reference_id,
        "zero_score_id": r.zero_score_id,
        "user_frames": r.user_frames,
        "compared_references": r.compared_references,
        "compared_zero_scores": r.compared_zero_scores,
        "channels": channels,
    })
}

/// Append the persistence hand-off record as one JSON line.
fn append_handoff(
    path: &Path,
    user: Option<&str>,
    result: &EvaluationResult,
    raw: &[Frame],
) -> Result<()> {
    let line = json!({
        "user_id": user,
        "motion_id": result.motion,
        "score": result.score,
        "raw_sensor_data": raw,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });
    let mut f = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .wrap_err_with(|| format!("open hand-off file {}", path.display()))?;
    writeln!(f, "{line}").wrap_err_with(|| format!("write hand-off file {}", path.display()))?;
    tracing::debug!(path = %path.display(), "hand-off record appended");
    Ok(())
}

pub fn record(ctx: &Ctx, motion: &str, category: ScoreCategory, data: &Path) -> Result<()> {
    let store = ctx.open_store()?;
    let frames = motion_config::load_recording(data)?;
    // A baseline that cannot be normalized would fail every later evaluation.
    let channels = motion_core::ChannelCfg::from(&ctx.cfg.channels);
    motion_core::normalize(&frames, &channels)?;

    let data_frames = frames.len();
    let id = store.add_recording(motion, category, frames)?;
    if ctx.json {
        println!(
            "{}",
            json!({ "motion": motion, "category": category.as_str(), "id": id, "data_frames": data_frames })
        );
    } else {
        println!("stored {category} recording #{id} for '{motion}' ({data_frames} frames)");
    }
    Ok(())
}

pub fn add_motion(ctx: &Ctx, name: &str, description: Option<&str>) -> Result<()> {
    let store = ctx.open_store()?;
    let action = match store.add_motion(name, description.unwrap_or_default()) {
        Ok(_) => "added",
        Err(StoreError::DuplicateMotion(_)) if description.is_some() => {
            store.set_description(name, description.unwrap_or_default())?;
            "updated"
        }
        Err(e) => return Err(e.into()),
    };
    if ctx.json {
        println!("{}", json!({ "motion": name, "action": action }));
    } else {
        println!("{action} motion '{name}'");
    }
    Ok(())
}

pub fn motions(ctx: &Ctx) -> Result<()> {
    let store = ctx.open_store()?;
    let list = store.motions()?;
    if ctx.json {
        let items: Vec<_> = list
            .iter()
            .map(|m| {
                json!({
                    "name": m.motion.name,
                    "description": m.motion.description,
                    "references": m.references,
                    "zero_scores": m.zero_scores,
                    "evaluable": m.is_evaluable(),
                })
            })
            .collect();
        println!("{}", serde_json::Value::Array(items));
        return Ok(());
    }
    if list.is_empty() {
        println!("no motions in {}", store.path().display());
    }
    for m in &list {
        println!(
            "{:<16} ref={:<3} zero={:<3} {}",
            m.motion.name, m.references, m.zero_scores, m.motion.description
        );
    }
    Ok(())
}

pub fn self_check(ctx: &Ctx) -> Result<()> {
    // Config validity was checked on load; building an evaluator re-checks
    // the engine view of it.
    let store = ctx.open_store()?;
    let list = store.motions()?;
    let evaluator = MotionEvaluator::builder()
        .with_store(store)
        .with_config(EngineCfg::from(&ctx.cfg))
        .build()?;

    let not_ready: Vec<&str> = list
        .iter()
        .filter(|m| !m.is_evaluable())
        .map(|m| m.motion.name.as_str())
        .collect();
    for name in &not_ready {
        tracing::warn!(motion = name, "motion lacks reference or zero-score baselines");
    }

    if ctx.json {
        println!(
            "{}",
            json!({
                "ok": true,
                "channels": evaluator.config().channels.required,
                "store": evaluator.store().path().display().to_string(),
                "motions": list.len(),
                "not_evaluable": not_ready,
            })
        );
    } else {
        println!(
            "config ok: {} channel(s), fill policy {:?}",
            evaluator.config().channels.required.len(),
            evaluator.config().channels.fill_policy
        );
        println!(
            "store ok: {} ({} motion(s))",
            evaluator.store().path().display(),
            list.len()
        );
        for m in &list {
            let state = if m.is_evaluable() { "ready" } else { "incomplete" };
            println!(
                "  {:<16} {state} (ref={}, zero={})",
                m.motion.name, m.references, m.zero_scores
            );
        }
        println!("OK");
    }
    Ok(())
}
