//! CLI argument parsing definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Synthetic health checks for HTTP APIs", long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Set the log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the test loop described by a trigger message
    Run {
        /// Trigger message file, or `-` to read it from stdin
        #[arg(long, value_name = "PATH")]
        message: String,
    },

    /// Validate configuration and a trigger message without sending requests
    Check {
        /// Trigger message file, or `-` to read it from stdin
        #[arg(long, value_name = "PATH")]
        message: String,
    },

    /// Print a sample YAML configuration file
    SampleConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_run_with_global_flags() {
        let cli = Cli::try_parse_from([
            "pulse",
            "run",
            "--message",
            "trigger.json",
            "--log-level",
            "debug",
            "--config",
            "pulse.yaml",
        ])
        .unwrap();

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("pulse.yaml")));
        assert!(matches!(cli.command, Commands::Run { ref message } if message == "trigger.json"));
    }

    #[test]
    fn test_message_is_required() {
        assert!(Cli::try_parse_from(["pulse", "check"]).is_err());
        assert!(Cli::try_parse_from(["pulse"]).is_err());
        assert!(matches!(
            Cli::try_parse_from(["pulse", "sample-config"]).unwrap().command,
            Commands::SampleConfig
        ));
    }
}
