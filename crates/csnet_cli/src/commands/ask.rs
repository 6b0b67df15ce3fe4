//! Ask command - Run one message through the agent network.

use anyhow::Result;
use clap::Args;
use tracing::info;

use csnet_chat::{ConversationSession, HandleRequest, RequestContext, SimulationConfig};

use super::timer_for;
use crate::render;

#[derive(Args)]
pub struct AskArgs {
    /// Message to send
    #[arg(required = true, num_args = 1..)]
    message: Vec<String>,

    /// Print the response document as JSON
    #[arg(long)]
    json: bool,
}

pub async fn execute(args: AskArgs, config: SimulationConfig) -> Result<()> {
    let input = args.message.join(" ");
    let timer = timer_for(&config);
    let mut session = ConversationSession::new(config);
    info!(session = %session.id(), "Asking the agent network");

    if args.json {
        let request = HandleRequest {
            message: input,
            context: RequestContext {
                customer_id: String::new(),
                session_id: session.id().to_string(),
            },
        };
        let response = session.handle(request, &timer).await;
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let turn = match session.run_turn(&input, &timer).await {
        Ok(turn) => turn,
        Err(reason) => anyhow::bail!("Invalid argument: {}", reason),
    };

    println!("📋 Agent Activity Log\n");
    for record in &turn.activities {
        println!("{}", render::activity(record));
    }
    println!();
    println!("{}", render::message(&turn.reply));
    Ok(())
}
