//! Agents command - List the specialized agents.

use anyhow::Result;
use clap::Args;

use csnet_chat::CATALOG;

use crate::render;

#[derive(Args)]
pub struct AgentsArgs {
    /// Print the catalog as JSON
    #[arg(long)]
    json: bool,

    /// Only show the first two capabilities per agent
    #[arg(long)]
    brief: bool,
}

pub async fn execute(args: AgentsArgs) -> Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(&CATALOG[..])?);
        return Ok(());
    }

    println!("🌐 Specialized Agents ({})\n", CATALOG.len());
    for agent in CATALOG.iter() {
        println!("{}\n", render::descriptor(agent, !args.brief));
    }
    Ok(())
}
