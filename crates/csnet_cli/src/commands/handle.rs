//! Handle command - Process a request document offline.
//!
//! Reads `{ "message": ..., "context": { "customer_id": ..., "session_id": ... } }`
//! from a file or stdin and writes the response document to stdout. No
//! server is started; this is the documented endpoint shape run locally.

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

use csnet_chat::{ConversationSession, HandleRequest, SimulationConfig};

use super::timer_for;

#[derive(Args)]
pub struct HandleArgs {
    /// Request document (reads stdin when omitted)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Compact JSON output
    #[arg(long)]
    compact: bool,
}

pub async fn execute(args: HandleArgs, config: SimulationConfig) -> Result<()> {
    let raw = match &args.input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Request file not found: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read request from stdin")?;
            buf
        }
    };

    let request: HandleRequest =
        serde_json::from_str(&raw).context("Invalid request document")?;
    info!(
        customer = %request.context.customer_id,
        session = %request.context.session_id,
        "Handling request"
    );

    let timer = timer_for(&config);
    let mut session = ConversationSession::new(config);
    let response = session.handle(request, &timer).await;

    let json = if args.compact {
        serde_json::to_string(&response)?
    } else {
        serde_json::to_string_pretty(&response)?
    };
    println!("{}", json);
    Ok(())
}
