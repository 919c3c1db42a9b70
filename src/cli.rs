use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::defaults::DEFAULT_LOG_FILENAME;
use crate::config::Config;
use crate::core::monitor::LoggerConfig;

#[derive(Parser, Debug)]
#[command(name = "wifiscope")]
#[command(version = concat!("Ver:", env!("CARGO_PKG_VERSION")))]
#[command(about = "Observe and control the host's Wi-Fi subsystem")]
pub struct Cli {
    /// Enable diagnostic logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report radio power, SSID and connectivity verdicts
    Info {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Turn the Wi-Fi radio on
    On,
    /// Turn the Wi-Fi radio off
    Off,
    /// Print the SSID of the current network
    Name,
    /// List visible networks, strongest first
    Available,
    /// Associate to a network
    Connect {
        ssid: String,
        password: Option<String>,
    },
    /// Drop the current association without powering the radio off
    Disconnect,
    /// Monitor connectivity and dispatch transition events to sinks
    Log(LogArgs),
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Sampling interval in seconds
    #[arg(long, value_name = "SECONDS", value_parser = parse_interval)]
    pub interval: Option<f64>,

    /// Append events to PATH as NDJSON; enables the file sink
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = DEFAULT_LOG_FILENAME)]
    pub file: Option<PathBuf>,

    /// Write the status feed and event markers to stdout even when another
    /// sink is enabled
    #[arg(long)]
    pub stdout: bool,

    /// Run PATH once per event with the event JSON on its stdin
    #[arg(long, value_name = "PATH")]
    pub hook: Option<PathBuf>,
}

impl LogArgs {
    /// Sink gating: stdout is the default sink and is suppressed as soon as
    /// a file or hook sink is enabled, unless `--stdout` asks for it
    /// additively. At least one sink is always on.
    pub fn logger_config(&self, config: &Config, verbose: bool) -> LoggerConfig {
        let emit_to_stdout = self.stdout || (self.file.is_none() && self.hook.is_none());
        LoggerConfig {
            interval_seconds: self
                .interval
                .unwrap_or(config.monitor.interval_seconds),
            log_file_path: self.file.clone(),
            hook_path: self.hook.clone(),
            emit_to_stdout,
            verbose,
            hook_timeout_seconds: config.monitor.hook_timeout_seconds,
        }
    }
}

fn parse_interval(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number of seconds"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err("interval must be a positive number of seconds".to_string());
    }
    Ok(value)
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
