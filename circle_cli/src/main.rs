mod cli;
mod error_fmt;
mod logging;
mod trace;

use clap::Parser;
use cli::{Cli, Commands, DEFAULT_CONFIG, JSON_MODE};
use error_fmt::{exit_code_for_error, format_error_json, humanize};
use eyre::{Result, WrapErr};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

/// Read and validate the TOML config. The default path may be absent, in
/// which case built-in defaults apply; an explicit path must exist.
fn load_config(path: &Path) -> Result<circle_config::Config> {
    if !path.exists() {
        if path == Path::new(DEFAULT_CONFIG) {
            return Ok(circle_config::Config::default());
        }
        eyre::bail!("config file {:?} not found", path);
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config file {path:?}"))?;
    let cfg = circle_config::load_toml(&text)
        .map_err(|e| eyre::eyre!("parse config {:?}: {}", path, e))?;
    cfg.validate()?;
    Ok(cfg)
}

fn install_ctrlc() -> Arc<AtomicBool> {
    let flag = Arc::new(AtomicBool::new(false));
    let handler_flag = flag.clone();
    if let Err(e) = ctrlc::set_handler(move || handler_flag.store(true, Ordering::Relaxed)) {
        tracing::warn!(error = %e, "failed to install Ctrl-C handler");
    }
    flag
}

fn real_main(cli: Cli) -> Result<()> {
    let cfg = load_config(&cli.config)?;
    logging::init_tracing(cli.json, &cli.log_level, &cfg.logging)?;
    tracing::debug!(config = %cli.config.display(), "config loaded");

    match cli.cmd {
        Commands::Replay { trace: path } => {
            let started = Instant::now();
            let snap = trace::run_replay(&cfg, &path)?;
            let ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            trace::report("replay", &snap, ms, cli.json);
            trace::finish(&snap)
        }
        Commands::Simulate {
            radius,
            steps,
            step_ms,
            jitter,
            stop_after,
            seed,
        } => {
            let shutdown = install_ctrlc();
            let started = Instant::now();
            let sim = trace::SimParams {
                radius,
                steps,
                step_ms,
                jitter,
                stop_after,
                seed,
            };
            let snap = trace::run_simulate(&cfg, sim, shutdown)?;
            let ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
            trace::report("simulate", &snap, ms, cli.json);
            trace::finish(&snap)
        }
        Commands::SelfCheck => {
            trace::self_check(&cfg, cli.json);
            Ok(())
        }
    }
}

fn main() {
    if let Err(e) = color_eyre::install() {
        eprintln!("failed to install error reporter: {e}");
    }
    let cli = Cli::parse();
    let _ = JSON_MODE.set(cli.json);

    let code = match real_main(cli) {
        Ok(()) => 0,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            if JSON_MODE.get().copied().unwrap_or(false) {
                eprintln!("{}", format_error_json(&err));
            } else {
                eprintln!("{}", humanize(&err));
            }
            exit_code_for_error(&err)
        }
    };
    std::process::exit(code);
}
