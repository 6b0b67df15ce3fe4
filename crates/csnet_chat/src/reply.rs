//! Reply synthesis.
//!
//! The orchestrator's final answer comes from an ordered decision table.
//! The first trigger that matches the lowercased input wins; when none
//! does, a summary of the involved agents is produced instead.
//!
//! The triggers here overlap with the agent-selection keywords but are not
//! the same set: "bug" pulls in the ticket agent without producing the
//! issue reply.

use serde::{Deserialize, Serialize};

use crate::agents::AgentInvocation;

const REFUND_REPLY: &str = "I've found your refund policy and processed your request. Based on our knowledge base search, you're eligible for a full refund within 30 days. I've created ticket #CS-2025-001 to track this request and retrieved your account information showing your purchase was made 15 days ago.

**Actions Taken:**
• Searched refund policies and FAQs
• Created support ticket #CS-2025-001
• Retrieved your account and purchase history
• Initiated refund process (3-5 business days)

Is there anything else you'd like to know about your refund?";

const ISSUE_REPLY: &str = "I understand you're experiencing an issue. I've analyzed your request and taken several actions to help resolve this quickly:

**What I've done:**
• Created support ticket #CS-2025-001 with all relevant details
• Retrieved your account history and recent activity
• Searched our knowledge base for similar issues and solutions
• Routed your case to our technical support team with high priority

**Next Steps:**
• You'll receive an email confirmation shortly
• A senior technical specialist will contact you within 2 hours
• We'll keep you updated on progress through SMS and email

Can you provide any additional details about when this issue first started?";

const SUMMARY_HEADER: &str =
    "I've processed your request using our multi-agent network. Here's what happened:";
const SUMMARY_FOOTER: &str =
    "Based on this analysis, I'm ready to help you further. What specific action would you like me to take next?";

/// Synthesized reply text and its action summaries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub content: String,
    pub actions: Vec<String>,
}

/// Fixed reply returned when a trigger matches
#[derive(Debug, Clone)]
pub struct ReplyTemplate {
    pub content: &'static str,
    pub actions: &'static [&'static str],
}

impl ReplyTemplate {
    fn render(&self) -> Reply {
        Reply {
            content: self.content.to_string(),
            actions: self.actions.iter().map(|a| a.to_string()).collect(),
        }
    }
}

/// One row of the decision table
#[derive(Debug, Clone)]
pub struct ReplyRule {
    /// Short name used in logs
    pub name: &'static str,
    pub keywords: &'static [&'static str],
    pub template: ReplyTemplate,
}

impl ReplyRule {
    /// `lowered` must already be lowercase
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Ordered reply decision table with an agent-summary fallback
#[derive(Debug, Clone)]
pub struct ReplySynthesizer {
    rules: Vec<ReplyRule>,
}

impl ReplySynthesizer {
    pub fn new() -> Self {
        Self {
            rules: vec![
                ReplyRule {
                    name: "refund",
                    keywords: &["refund"],
                    template: ReplyTemplate {
                        content: REFUND_REPLY,
                        actions: &["Refund initiated", "Ticket created", "Customer notified"],
                    },
                },
                ReplyRule {
                    name: "issue",
                    keywords: &["issue", "problem"],
                    template: ReplyTemplate {
                        content: ISSUE_REPLY,
                        actions: &["Ticket created", "Technical team notified", "Follow-up scheduled"],
                    },
                },
            ],
        }
    }

    pub fn rules(&self) -> &[ReplyRule] {
        &self.rules
    }

    /// Name of the rule that would answer `input`, or `None` for the summary fallback
    pub fn matching_rule(&self, input: &str) -> Option<&ReplyRule> {
        let lowered = input.to_lowercase();
        self.rules.iter().find(|rule| rule.matches(&lowered))
    }

    /// Build the reply for an input and the agents that handled it
    pub fn synthesize(&self, input: &str, agents: &[AgentInvocation]) -> Reply {
        match self.matching_rule(input) {
            Some(rule) => rule.template.render(),
            None => summarize(agents),
        }
    }
}

impl Default for ReplySynthesizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Generic reply listing each agent and its result.
///
/// Actions are only the first word of each result.
fn summarize(agents: &[AgentInvocation]) -> Reply {
    let bullets = agents
        .iter()
        .map(|agent| format!("• **{}**: {}", agent.name(), agent.result))
        .collect::<Vec<_>>()
        .join("\n");

    let actions = agents
        .iter()
        .map(|agent| {
            agent
                .result
                .split_whitespace()
                .next()
                .unwrap_or_default()
                .to_string()
        })
        .collect();

    Reply {
        content: format!("{}\n\n{}\n\n{}", SUMMARY_HEADER, bullets, SUMMARY_FOOTER),
        actions,
    }
}
