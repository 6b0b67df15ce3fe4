//! Chat command - Interactive conversation with the agent network.
//!
//! Each line read from stdin is submitted to the session. A turn runs in
//! its own task so the prompt stays live; lines entered while a turn is in
//! flight are dropped, matching a disabled send button.

use anyhow::Result;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use csnet_chat::{
    drive_plan, ConversationSession, IgnoreReason, SimulationConfig, StepApplied, SubmitOutcome,
    CATALOG,
};

use super::timer_for;
use crate::render;

#[derive(Args)]
pub struct ChatArgs {
    /// Print each activity record as it happens
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    live_activity: bool,
}

pub async fn execute(args: ChatArgs, config: SimulationConfig) -> Result<()> {
    let timer = timer_for(&config);
    let session = ConversationSession::new(config).shared();

    {
        let s = session.lock().await;
        info!(session = %s.id(), "Chat session started");
        println!("💬 Live Customer Service Chat (/activity, /agents, /quit)\n");
        for msg in s.messages() {
            println!("{}\n", render::message(msg));
        }
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<JoinHandle<()>> = None;

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/activity" => {
                let s = session.lock().await;
                let recent = s.recent_activity();
                if recent.is_empty() {
                    println!("No recent activity\n");
                }
                for record in recent {
                    println!("{}", render::activity(record));
                }
                println!();
                continue;
            }
            "/agents" => {
                for agent in CATALOG.iter() {
                    println!("{}", render::descriptor(agent, false));
                }
                println!();
                continue;
            }
            _ => {}
        }

        let outcome = session.lock().await.submit(&line);
        match outcome {
            SubmitOutcome::Accepted(plan) => {
                println!("⏳ AI agents are processing your request...\n");
                let session = session.clone();
                let timer = timer.clone();
                let live = args.live_activity;
                in_flight = Some(tokio::spawn(async move {
                    drive_plan(&session, plan, &timer, |applied| match applied {
                        StepApplied::Activity(record) if live => {
                            println!("{}", render::activity(record));
                        }
                        StepApplied::Activity(_) => {}
                        StepApplied::Reply(msg) => println!("\n{}\n", render::message(msg)),
                    })
                    .await;
                }));
            }
            SubmitOutcome::Ignored(IgnoreReason::AlreadyProcessing) => {
                println!("⚠️  Still processing the previous request, message dropped\n");
            }
            SubmitOutcome::Ignored(IgnoreReason::EmptyInput) => {
                debug!("Empty line");
            }
        }
    }

    // A started turn always runs to completion
    if let Some(handle) = in_flight.take() {
        handle.await?;
    }
    info!("Chat session ended");
    Ok(())
}
