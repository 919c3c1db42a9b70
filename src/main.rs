use std::sync::Arc;

use wifiscope::cli::{Cli, Command};
use wifiscope::config::{Config, ConfigError};
use wifiscope::core::commands;
use wifiscope::core::monitor::{EventLogger, MonitorError, StateSampler};
use wifiscope::core::os::{HostOs, OsError, WifiApi};

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Os(#[from] OsError),
    #[error(transparent)]
    Monitor(#[from] MonitorError),
}

impl AppError {
    /// 2 for configuration problems, 1 for everything else. 0 never reaches
    /// this type.
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Config(_) | AppError::Monitor(MonitorError::Config(_)) => 2,
            _ => 1,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse_args();
    if let Err(error) = run(cli).await {
        eprintln!("wifiscope: {}", error);
        std::process::exit(error.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = Config::load()?;
    let os: Arc<dyn WifiApi> = Arc::new(HostOs::detect(config.os.command_timeout())?);

    match cli.command {
        Command::Info { json } => commands::info(os, config.probes.clone(), json).await?,
        Command::On => commands::set_power(os.as_ref(), true).await?,
        Command::Off => commands::set_power(os.as_ref(), false).await?,
        Command::Name => commands::show_name(os.as_ref()).await?,
        Command::Available => commands::list_available(os.as_ref()).await?,
        Command::Connect { ssid, password } => {
            commands::connect(os.as_ref(), &ssid, password.as_deref()).await?
        }
        Command::Disconnect => commands::disconnect(os.as_ref()).await?,
        Command::Log(args) => {
            let logger_config = args.logger_config(&config, cli.verbose);
            let sampler = StateSampler::new(os, config.probes.clone());
            EventLogger::new(logger_config, sampler)?.run().await?;
        }
    }
    Ok(())
}
