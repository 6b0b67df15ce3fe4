//! Agent catalog and routing.
//!
//! The network has a fixed set of specialized agents. None of them run;
//! each is a named source of scripted activity text. The router decides
//! which of them take part in a turn by matching keywords in the input.

use serde::Serialize;
use tracing::debug;

/// Name used for the routing/analysis step that opens every turn.
pub const ROUTER_AGENT_NAME: &str = "General Intelligence Agent";
pub const ROUTER_START_ACTION: &str = "Analyzing request and routing to specialized agents";
pub const ROUTER_DONE_ACTION: &str = "Request analysis complete";

/// Specialized agents available in the network
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    KnowledgeBase,
    TicketManagement,
    Escalation,
    FileProcessing,
    Integration,
}

impl AgentKind {
    /// All agents in catalog order
    pub const ALL: [AgentKind; 5] = [
        Self::KnowledgeBase,
        Self::TicketManagement,
        Self::Escalation,
        Self::FileProcessing,
        Self::Integration,
    ];

    /// Get the display name for this agent
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::KnowledgeBase => "Knowledge Base Agent",
            Self::TicketManagement => "Ticket Management Agent",
            Self::Escalation => "Escalation Agent",
            Self::FileProcessing => "File Processing Agent",
            Self::Integration => "Integration Agent",
        }
    }

    /// Static catalog entry for this agent
    pub fn descriptor(&self) -> &'static AgentDescriptor {
        match self {
            Self::KnowledgeBase => &CATALOG[0],
            Self::TicketManagement => &CATALOG[1],
            Self::Escalation => &CATALOG[2],
            Self::FileProcessing => &CATALOG[3],
            Self::Integration => &CATALOG[4],
        }
    }

    /// The scripted step this agent performs when invoked
    pub fn invocation(&self) -> AgentInvocation {
        let (action, result, details) = match self {
            Self::KnowledgeBase => (
                "Searching knowledge base for relevant information",
                "Retrieved 5 relevant articles and policy documents",
                "Found refund policy, FAQ entries, and step-by-step guides",
            ),
            Self::TicketManagement => (
                "Creating support ticket with extracted details",
                "Support ticket #CS-2025-001 created successfully",
                "Ticket assigned to Technical Support team with high priority",
            ),
            Self::Escalation => (
                "Analyzing urgency level and routing appropriately",
                "High priority case routed to senior support specialist",
                "Callback scheduled within 2 hours, SMS notification sent",
            ),
            Self::FileProcessing => (
                "Processing uploaded attachments and extracting information",
                "Document processed and relevant data extracted",
                "2 screenshots analyzed, error logs parsed, summary report generated",
            ),
            Self::Integration => (
                "Fetching customer data and account information",
                "Customer profile and account history retrieved",
                "Last 30 days activity, subscription status, and preferences loaded",
            ),
        };
        AgentInvocation {
            kind: *self,
            action,
            result,
            details,
        }
    }
}

/// Read-only description of an agent's capability area
#[derive(Debug, Clone, Serialize)]
pub struct AgentDescriptor {
    pub kind: AgentKind,
    pub name: &'static str,
    pub capabilities: &'static [&'static str],
    pub tools: &'static [&'static str],
}

impl AgentDescriptor {
    /// Short capability list for compact views
    pub fn capability_preview(&self) -> &'static [&'static str] {
        let end = self.capabilities.len().min(2);
        &self.capabilities[..end]
    }
}

/// The fixed agent catalog
pub static CATALOG: [AgentDescriptor; 5] = [
    AgentDescriptor {
        kind: AgentKind::KnowledgeBase,
        name: "Knowledge Base Agent",
        capabilities: &["Search documentation", "Retrieve FAQs", "Find product info", "Access policy data"],
        tools: &["Vector search", "Full-text search", "Semantic matching", "Content ranking"],
    },
    AgentDescriptor {
        kind: AgentKind::TicketManagement,
        name: "Ticket Management Agent",
        capabilities: &["Create tickets", "Update status", "Assign priority", "Track resolution"],
        tools: &["CRM API calls", "Database storage", "Notification system", "Status tracking"],
    },
    AgentDescriptor {
        kind: AgentKind::Escalation,
        name: "Escalation Agent",
        capabilities: &["Detect urgency", "Route to humans", "Schedule callbacks", "Priority handling"],
        tools: &["Sentiment analysis", "Workflow automation", "Calendar integration", "Alert system"],
    },
    AgentDescriptor {
        kind: AgentKind::FileProcessing,
        name: "File Processing Agent",
        capabilities: &["Process attachments", "Store documents", "Extract data", "Generate reports"],
        tools: &["File storage", "OCR processing", "Data extraction", "Report generation"],
    },
    AgentDescriptor {
        kind: AgentKind::Integration,
        name: "Integration Agent",
        capabilities: &["API calls", "External systems", "Data sync", "Third-party tools"],
        tools: &["REST/GraphQL APIs", "Webhooks", "Data transformation", "Error handling"],
    },
];

/// One agent's scripted participation in a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgentInvocation {
    pub kind: AgentKind,
    /// Text of the running record
    pub action: &'static str,
    /// Text of the completed record
    pub result: &'static str,
    /// Detail line on the completed record
    pub details: &'static str,
}

impl AgentInvocation {
    pub fn name(&self) -> &'static str {
        self.kind.display_name()
    }
}

/// Keyword rule that pulls an agent into a turn
#[derive(Debug, Clone)]
pub struct SelectionRule {
    pub keywords: &'static [&'static str],
    pub agent: AgentKind,
}

impl SelectionRule {
    /// `lowered` must already be lowercase
    pub fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

/// Router for agent selection
#[derive(Debug, Clone)]
pub struct AgentRouter {
    rules: Vec<SelectionRule>,
    always: AgentKind,
}

impl AgentRouter {
    /// Create the standard router
    pub fn new() -> Self {
        Self {
            rules: vec![
                SelectionRule {
                    keywords: &["refund", "policy", "how to"],
                    agent: AgentKind::KnowledgeBase,
                },
                SelectionRule {
                    keywords: &["issue", "problem", "bug"],
                    agent: AgentKind::TicketManagement,
                },
                SelectionRule {
                    keywords: &["urgent", "asap", "emergency"],
                    agent: AgentKind::Escalation,
                },
                SelectionRule {
                    keywords: &["file", "document", "screenshot"],
                    agent: AgentKind::FileProcessing,
                },
            ],
            always: AgentKind::Integration,
        }
    }

    pub fn rules(&self) -> &[SelectionRule] {
        &self.rules
    }

    /// Pick the agents for an input.
    ///
    /// Rules are independent; every matching rule contributes its agent in
    /// table order, and the always-on agent is appended last.
    pub fn select(&self, input: &str) -> Vec<AgentInvocation> {
        let lowered = input.to_lowercase();
        let mut selected: Vec<AgentInvocation> = self
            .rules
            .iter()
            .filter(|rule| rule.matches(&lowered))
            .map(|rule| rule.agent.invocation())
            .collect();
        selected.push(self.always.invocation());

        debug!(
            agents = ?selected.iter().map(|a| a.name()).collect::<Vec<_>>(),
            "Selected agents"
        );
        selected
    }
}

impl Default for AgentRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<AgentKind> {
        AgentRouter::new().select(input).iter().map(|a| a.kind).collect()
    }

    #[test]
    fn test_catalog_matches_kinds() {
        for kind in AgentKind::ALL {
            let descriptor = kind.descriptor();
            assert_eq!(descriptor.kind, kind);
            assert_eq!(descriptor.name, kind.display_name());
            assert_eq!(descriptor.capabilities.len(), 4);
            assert_eq!(descriptor.tools.len(), 4);
        }
    }

    #[test]
    fn test_capability_preview() {
        let preview = AgentKind::Escalation.descriptor().capability_preview();
        assert_eq!(preview, &["Detect urgency", "Route to humans"]);
    }

    #[test]
    fn test_integration_always_selected() {
        assert_eq!(kinds("hello there"), vec![AgentKind::Integration]);
        assert_eq!(kinds(""), vec![AgentKind::Integration]);
    }

    #[test]
    fn test_refund_selects_knowledge_base() {
        assert_eq!(
            kinds("I need a refund"),
            vec![AgentKind::KnowledgeBase, AgentKind::Integration]
        );
    }

    #[test]
    fn test_selection_is_case_insensitive() {
        assert_eq!(
            kinds("HOW TO reset my password"),
            vec![AgentKind::KnowledgeBase, AgentKind::Integration]
        );
        assert_eq!(
            kinds("EMERGENCY!!"),
            vec![AgentKind::Escalation, AgentKind::Integration]
        );
    }

    #[test]
    fn test_multiple_groups_keep_table_order() {
        assert_eq!(
            kinds("urgent bug in my account"),
            vec![
                AgentKind::TicketManagement,
                AgentKind::Escalation,
                AgentKind::Integration
            ]
        );
        assert_eq!(
            kinds("screenshot of the refund problem, asap"),
            vec![
                AgentKind::KnowledgeBase,
                AgentKind::TicketManagement,
                AgentKind::Escalation,
                AgentKind::FileProcessing,
                AgentKind::Integration
            ]
        );
    }

    #[test]
    fn test_substring_matching() {
        // "profile" contains "file"
        assert_eq!(
            kinds("update my profile"),
            vec![AgentKind::FileProcessing, AgentKind::Integration]
        );
    }

    #[test]
    fn test_invocation_text_is_fixed() {
        let a = AgentRouter::new().select("refund please");
        let b = AgentRouter::new().select("what is your policy");
        assert_eq!(a[0], b[0]);
        assert_eq!(a[0].result, "Retrieved 5 relevant articles and policy documents");
    }
}
