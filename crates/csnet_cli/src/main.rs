//! csnet CLI - Main entry point.
//!
//! Exit codes:
//! - 0: Success
//! - 1: General error
//! - 2: Invalid arguments
//! - 3: Configuration error

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

mod commands;
mod render;

use commands::{Cli, Commands};

/// CI-friendly exit codes
pub struct ExitCodes;

impl ExitCodes {
    pub const SUCCESS: u8 = 0;
    pub const GENERAL_ERROR: u8 = 1;
    pub const INVALID_ARGS: u8 = 2;
    pub const CONFIG_ERROR: u8 = 3;
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let crate_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    let mut filter = EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into());
    for krate in ["csnet_chat", "csnet"] {
        if let Ok(directive) = format!("{}={}", krate, crate_level).parse() {
            filter = filter.add_directive(directive);
        }
    }
    let log_result = tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .try_init();

    if log_result.is_err() {
        // Logging already initialized, continue
    }

    let result = match commands::load_config(&cli) {
        Ok(config) => match cli.command {
            Commands::Chat(args) => commands::chat::execute(args, config).await,
            Commands::Ask(args) => commands::ask::execute(args, config).await,
            Commands::Handle(args) => commands::handle::execute(args, config).await,
            Commands::Agents(args) => commands::agents::execute(args).await,
        },
        Err(e) => Err(e),
    };

    match result {
        Ok(()) => ExitCode::from(ExitCodes::SUCCESS),
        Err(e) => {
            let exit_code = categorize_error(&e);
            eprintln!("❌ Error: {:#}", e);
            ExitCode::from(exit_code)
        }
    }
}

/// Categorize error to determine exit code
fn categorize_error(e: &anyhow::Error) -> u8 {
    if e.chain()
        .any(|cause| cause.downcast_ref::<csnet_chat::ChatError>().is_some_and(is_config_error))
    {
        return ExitCodes::CONFIG_ERROR;
    }

    let msg = e.to_string().to_lowercase();
    if msg.contains("argument") || msg.contains("not found") || msg.contains("invalid request") {
        ExitCodes::INVALID_ARGS
    } else {
        ExitCodes::GENERAL_ERROR
    }
}

fn is_config_error(e: &csnet_chat::ChatError) -> bool {
    matches!(
        e,
        csnet_chat::ChatError::ConfigRead { .. } | csnet_chat::ChatError::ConfigParse { .. }
    )
}
