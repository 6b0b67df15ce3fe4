//! Core types for the conversation and activity logs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Agent type label attached to every reply produced by the network.
pub const ORCHESTRATOR_AGENT_TYPE: &str = "orchestrator";

/// Who sent a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Agent,
}

/// A single chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    /// Unique message ID (UUID)
    pub id: String,
    /// Message content
    pub content: String,
    /// Who sent the message
    pub sender: Sender,
    /// When the message was created
    pub timestamp: DateTime<Utc>,
    /// Label of the agent that produced the message
    #[serde(rename = "agentType", skip_serializing_if = "Option::is_none")]
    pub agent_type: Option<String>,
    /// Short action summaries shown under an agent reply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<String>>,
}

impl Message {
    fn new(sender: Sender, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            sender,
            timestamp: Utc::now(),
            agent_type: None,
            actions: None,
        }
    }

    /// Create a new user message
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Sender::User, content)
    }

    /// Create a new agent message
    pub fn agent(content: impl Into<String>) -> Self {
        Self::new(Sender::Agent, content)
    }

    /// Set the agent type label
    pub fn with_agent_type(mut self, agent_type: impl Into<String>) -> Self {
        self.agent_type = Some(agent_type.into());
        self
    }

    /// Attach action summaries
    pub fn with_actions(mut self, actions: Vec<String>) -> Self {
        self.actions = Some(actions);
        self
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }
}

/// Status of a single activity record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Running,
    Completed,
    Failed,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

/// One timestamped record of a simulated agent step.
///
/// Records are never updated in place: a step that starts and finishes
/// produces a `Running` record followed by a separate `Completed` one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AgentActivity {
    /// Display name of the agent
    pub agent: String,
    /// What the agent is doing or did
    pub action: String,
    /// When the record was appended
    pub timestamp: DateTime<Utc>,
    /// Step status
    pub status: ActivityStatus,
    /// Extra detail line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AgentActivity {
    pub fn new(agent: impl Into<String>, action: impl Into<String>, status: ActivityStatus) -> Self {
        Self {
            agent: agent.into(),
            action: action.into(),
            timestamp: Utc::now(),
            status,
            details: None,
        }
    }

    /// Create a running record
    pub fn running(agent: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(agent, action, ActivityStatus::Running)
    }

    /// Create a completed record
    pub fn completed(agent: impl Into<String>, action: impl Into<String>) -> Self {
        Self::new(agent, action, ActivityStatus::Completed)
    }

    pub fn with_details(mut self, details: Option<String>) -> Self {
        self.details = details;
        self
    }
}

/// Caller context carried alongside a request document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RequestContext {
    pub customer_id: String,
    pub session_id: String,
}

/// Request document for the single-endpoint shape:
///
/// ```json
/// { "message": "I need help with a refund",
///   "context": { "customer_id": "12345", "session_id": "abc-123" } }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandleRequest {
    pub message: String,
    #[serde(default)]
    pub context: RequestContext,
}

/// Response document produced for one handled request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandleResponse {
    /// Echo of the request context
    pub context: RequestContext,
    /// Names of the agents involved, in invocation order
    pub agents: Vec<String>,
    /// Activity records appended while handling the request
    pub activities: Vec<AgentActivity>,
    /// The synthesized reply, absent when the request was ignored
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply: Option<Message>,
}
