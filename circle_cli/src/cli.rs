//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

pub static FILE_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();
/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();
/// Effective session knobs used for the current run (for JSON details).
pub static LAST_SESSION: OnceLock<CliSession> = OnceLock::new();

pub const DEFAULT_CONFIG: &str = "etc/circle.toml";

#[derive(Copy, Clone, Debug)]
pub struct CliSession {
    pub min_radius: f64,
    pub position_change_delay_ms: u64,
    pub tick_interval_ms: u64,
}

#[derive(Parser, Debug)]
#[command(name = "circle", version, about = "Circle tracing replay and simulation harness")]
pub struct Cli {
    /// Path to config TOML (typed); defaults apply when the default path is absent
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Print results and errors as JSON lines instead of text
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "warn")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replay a recorded trace CSV (event,x,y,t_ms) deterministically
    Replay {
        /// Trace file to replay
        #[arg(long, value_name = "FILE")]
        trace: PathBuf,
    },
    /// Draw a synthetic circle through the live runner (real ticker, real time)
    Simulate {
        /// Circle radius in surface pixels
        #[arg(long, default_value_t = 100.0)]
        radius: f64,
        /// Samples per full turn
        #[arg(long, default_value_t = 36)]
        steps: usize,
        /// Delay between samples in milliseconds
        #[arg(long = "step-ms", value_name = "MS", default_value_t = 10)]
        step_ms: u64,
        /// Random radial noise, ± pixels
        #[arg(long, default_value_t = 0.0)]
        jitter: f64,
        /// Stop moving after this many samples and hold the pointer down
        #[arg(long = "stop-after", value_name = "N")]
        stop_after: Option<usize>,
        /// PRNG seed for the jitter
        #[arg(long, default_value_t = 0x5EED)]
        seed: u32,
    },
    /// Validate the config and print the effective session settings
    SelfCheck,
}
