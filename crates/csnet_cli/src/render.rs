//! Terminal rendering for transcript, activity and catalog.

use chrono::Local;

use csnet_chat::{ActivityStatus, AgentActivity, AgentDescriptor, Message, Sender};

fn status_icon(status: ActivityStatus) -> &'static str {
    match status {
        ActivityStatus::Running => "⏳",
        ActivityStatus::Completed => "✅",
        ActivityStatus::Failed => "❌",
    }
}

fn local_time(ts: &chrono::DateTime<chrono::Utc>) -> String {
    ts.with_timezone(&Local).format("%H:%M:%S").to_string()
}

/// One activity record as a two or three line block
pub fn activity(record: &AgentActivity) -> String {
    let mut out = format!(
        "{} {} [{}]\n     {}",
        status_icon(record.status),
        record.agent,
        local_time(&record.timestamp),
        record.action
    );
    if let Some(details) = &record.details {
        out.push_str(&format!("\n     {}", details));
    }
    out
}

/// A chat message with its action list
pub fn message(msg: &Message) -> String {
    let who = match msg.sender {
        Sender::User => "🧑 You",
        Sender::Agent => "🤖 Agent",
    };
    let mut out = format!("{} [{}]\n{}", who, local_time(&msg.timestamp), msg.content);
    if let Some(actions) = &msg.actions {
        out.push('\n');
        for action in actions {
            out.push_str(&format!("\n  ✔ {}", action));
        }
    }
    out
}

/// Catalog entry; `full` lists every capability and tool
pub fn descriptor(agent: &AgentDescriptor, full: bool) -> String {
    let mut out = format!("🔧 {}", agent.name);
    if full {
        out.push_str("\n   Capabilities:");
        for cap in agent.capabilities {
            out.push_str(&format!("\n     ✔ {}", cap));
        }
        out.push_str("\n   Tools & APIs:");
        for tool in agent.tools {
            out.push_str(&format!("\n     ⚡ {}", tool));
        }
    } else {
        for cap in agent.capability_preview() {
            out.push_str(&format!("\n   • {}", cap));
        }
    }
    out
}
