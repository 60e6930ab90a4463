#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]

mod cli;
mod commands;
mod error_fmt;

use std::path::Path;

use clap::Parser;
use eyre::{Result, WrapErr};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*};

use crate::cli::{Cli, Commands, FILE_GUARD, JSON_MODE};
use crate::commands::Ctx;
use crate::error_fmt::{exit_code_for_error, format_error_json, humanize};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

fn main() {
    let _ = color_eyre::install();
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    if let Err(e) = run(cli) {
        tracing::error!(error = %e, "command failed");
        if JSON_MODE.get().copied().unwrap_or(false) {
            eprintln!("{}", format_error_json(&e));
        } else {
            eprintln!("{}", humanize(&e));
        }
        std::process::exit(exit_code_for_error(&e));
    }
}

fn run(cli: Cli) -> Result<()> {
    let cfg = motion_config::load_config(&cli.config)?;
    cfg.validate()
        .wrap_err_with(|| format!("invalid configuration in {}", cli.config.display()))?;

    let level = cli
        .log_level
        .clone()
        .or_else(|| cfg.logging.level.clone())
        .unwrap_or_else(|| "info".to_string());
    init_tracing(cli.json, &level, &cfg.logging)?;
    tracing::debug!(config = %cli.config.display(), "configuration loaded");

    let store_path = cli.store.clone().unwrap_or_else(|| cfg.store.path.clone());
    let ctx = Ctx {
        cfg,
        store_path,
        json: cli.json,
    };

    match cli.cmd {
        Commands::Evaluate {
            motion,
            data,
            user,
            handoff,
        } => commands::evaluate(&ctx, &motion, &data, user.as_deref(), handoff.as_deref()),
        Commands::Record {
            motion,
            category,
            data,
        } => commands::record(&ctx, &motion, category.into(), &data),
        Commands::AddMotion { name, description } => {
            commands::add_motion(&ctx, &name, description.as_deref())
        }
        Commands::Motions => commands::motions(&ctx),
        Commands::SelfCheck => commands::self_check(&ctx),
    }
}

/// Console logs go to stderr (pretty or JSON); an optional JSON-lines file
/// layer follows `[logging]`. `RUST_LOG` overrides the level when set.
fn init_tracing(json: bool, level: &str, logging: &motion_config::Logging) -> Result<()> {
    if !LEVELS.contains(&level) {
        eyre::bail!("unknown log level '{level}' (expected one of {})", LEVELS.join(", "));
    }
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(level))?;

    let console = if json {
        fmt::layer().json().with_writer(std::io::stderr).boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .boxed()
    };

    let file = match logging.file.as_deref() {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|d| !d.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let name = path
                .file_name()
                .ok_or_else(|| eyre::eyre!("logging.file '{}' has no file name", path.display()))?;
            let appender = match logging.rotation.as_deref() {
                Some("daily") => tracing_appender::rolling::daily(dir, name),
                Some("hourly") => tracing_appender::rolling::hourly(dir, name),
                _ => tracing_appender::rolling::never(dir, name),
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let _ = FILE_GUARD.set(guard);
            Some(fmt::layer().json().with_ansi(false).with_writer(writer).boxed())
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .with(filter)
        .try_init()
        .wrap_err("install tracing subscriber")?;
    Ok(())
}
