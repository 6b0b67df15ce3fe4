//! CLI command definitions.
//!
//! Each subcommand drives the same in-memory conversation session in a
//! different way: interactively, for a single message, for a request
//! document, or just to list the agent catalog.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use csnet_chat::{SimulationConfig, StepTimer};

pub mod agents;
pub mod ask;
pub mod chat;
pub mod handle;

/// csnet - Customer Service AI Agent Network simulator
#[derive(Parser)]
#[command(name = "csnet")]
#[command(version, about = "csnet - Customer Service AI Agent Network simulator")]
#[command(long_about = r#"
csnet simulates a multi-agent customer service network entirely offline.
Keywords in each message decide which specialized agents "take part";
their activity is replayed with simulated latency and a single reply is
synthesized by the orchestrator.

COMMANDS:
  chat    → Interactive conversation
  ask     → Run one message and print the result
  handle  → Process a request document (JSON) and print the response
  agents  → List the specialized agents

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Configuration error
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Simulation config file (TOML)
    #[arg(short, long, global = true, env = "CSNET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Skip all simulated delays
    #[arg(long, global = true)]
    pub fast: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start an interactive conversation
    Chat(chat::ChatArgs),

    /// Send one message and print the agents' activity and reply
    Ask(ask::AskArgs),

    /// Handle a request document read from a file or stdin
    Handle(handle::HandleArgs),

    /// List the specialized agents and their capabilities
    Agents(agents::AgentsArgs),
}

/// Resolve the simulation config from the global options
pub fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let config = match &cli.config {
        Some(path) => SimulationConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SimulationConfig::default(),
    };

    let config = if cli.fast {
        config.analysis_delay(0).agent_delay(0)
    } else {
        config
    };
    debug!(?config, "Resolved simulation config");
    Ok(config)
}

/// Timer for a config; zero delays never touch the tokio timer
pub fn timer_for(config: &SimulationConfig) -> StepTimer {
    if config.analysis_delay_ms == 0 && config.agent_delay_ms == 0 {
        StepTimer::instant()
    } else {
        StepTimer::realtime()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_without_flags() {
        let cli = Cli::parse_from(["csnet", "agents"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config, SimulationConfig::default());
    }

    #[test]
    fn test_fast_flag_zeroes_delays() {
        let cli = Cli::parse_from(["csnet", "--fast", "ask", "I", "need", "a", "refund"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.analysis_delay_ms, 0);
        assert_eq!(config.agent_delay_ms, 0);
        assert_eq!(config.greeting, csnet_chat::DEFAULT_GREETING);
    }

    #[test]
    fn test_config_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "agent_delay_ms = 42").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let cli = Cli::parse_from(["csnet", "--config", path.as_str(), "chat"]);
        let config = load_config(&cli).unwrap();
        assert_eq!(config.agent_delay_ms, 42);
        assert_eq!(config.analysis_delay_ms, 1000);
    }

    #[test]
    fn test_missing_config_file_errors() {
        let cli = Cli::parse_from(["csnet", "--config", "/nonexistent/csnet.toml", "agents"]);
        let err = load_config(&cli).unwrap_err();
        assert!(err
            .chain()
            .any(|cause| cause.downcast_ref::<csnet_chat::ChatError>().is_some()));
    }
}
