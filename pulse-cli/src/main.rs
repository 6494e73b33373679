use anyhow::{Context, Result};
use clap::Parser;
use pulse_config::{ConfigLoader, LogLevel, LoggingConfig, PulseConfig};
use pulse_http::HttpManager;
use pulse_runner::{CancellationToken, TestLoopController, TriggerMessage};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};

mod cli;
mod logging;
mod sink;

use cli::{Cli, Commands};

/// Load configuration from file or the environment
fn load_config(config_path: Option<&PathBuf>) -> Result<PulseConfig> {
    let config_path = match config_path {
        Some(path) if !path.exists() => {
            warn!("Configuration file not found: {:?}. Using environment.", path);
            None
        }
        other => other,
    };

    ConfigLoader::new()
        .load(config_path)
        .context(match config_path {
            Some(path) => format!("Failed to load configuration from {:?}", path),
            None => "Failed to load configuration from environment".to_string(),
        })
}

/// Read a trigger message from a file, or from stdin for `-`
async fn read_message(source: &str) -> Result<TriggerMessage> {
    let content = if source == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .context("Failed to read trigger message from stdin")?;
        buffer
    } else {
        tokio::fs::read_to_string(source)
            .await
            .context(format!("Failed to read trigger message from {}", source))?
    };

    TriggerMessage::from_json(&content).context("Failed to decode trigger message")
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received, stopping test loop");
}

async fn run(config: PulseConfig, message: TriggerMessage) -> Result<()> {
    let (test_config, cases) = message
        .into_parts(&config.target)
        .context("Invalid test configuration")?;

    let client = HttpManager::with_config(config.http.clone().into())
        .context("Failed to build HTTP client")?;
    let sink = sink::build_sink(&config.metrics).await?;
    info!("Publishing metrics via {} backend", sink.name());

    let controller = TestLoopController::new(test_config, Arc::new(client), sink);

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        signal_token.cancel();
    });

    let report = controller.run_until_cancelled(&cases, token).await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn check(config: PulseConfig, message: TriggerMessage) -> Result<()> {
    let case_count = message.test_data.len();
    let (test_config, _) = message
        .into_parts(&config.target)
        .context("Invalid test configuration")?;

    println!(
        "OK: {} test cases for {}/{} every {}s for {}s",
        case_count,
        test_config.project_name(),
        test_config.project_stage(),
        test_config.interval_seconds(),
        test_config.duration_seconds()
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Commands::SampleConfig = cli.command {
        print!("{}", PulseConfig::generate_sample());
        return Ok(());
    }

    let config = load_config(cli.config.as_ref());

    let mut logging = config
        .as_ref()
        .map(|c| c.logging.clone())
        .unwrap_or_else(|_| LoggingConfig::default());
    if let Some(ref level) = cli.log_level {
        logging.level = LogLevel::from_str(level)
            .map_err(|e| anyhow::anyhow!("Invalid log level '{}': {}", level, e))?;
    }
    logging::init_logging(&logging)?;

    let config = config?;

    match cli.command {
        Commands::Run { message } => {
            let message = read_message(&message).await?;
            run(config, message).await
        }
        Commands::Check { message } => {
            let message = read_message(&message).await?;
            check(config, message)
        }
        Commands::SampleConfig => Ok(()),
    }
}
