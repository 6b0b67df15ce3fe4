//! # csnet_chat - Customer Service Agent Network simulator
//!
//! This crate simulates a multi-agent customer-service chatbot entirely
//! offline:
//! - A conversation session holding the transcript and a processing flag
//! - A keyword router that picks which specialized agents "take part"
//! - A timed pipeline of scripted activity records
//! - A reply decision table producing one synthesized answer per turn
//!
//! No agent actually runs. Every turn is deterministic given its input.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐  submit   ┌─────────────────┐   plan    ┌─────────────────┐
//! │  Conversation   │──────────▶│   Agent Router  │──────────▶│ Reply Synthesis │
//! │    Session      │           └─────────────────┘           └────────┬────────┘
//! └────────▲────────┘                                                  │
//!          │ on_pipeline_step                                          ▼
//!          │                 ┌─────────────────┐            ┌─────────────────┐
//!          └─────────────────│   Step Timer    │◀───────────│  Pipeline Plan  │
//!                            │  (Clock trait)  │            │ (delay, effect) │
//!                            └─────────────────┘            └─────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use csnet_chat::{ConversationSession, SimulationConfig, StepTimer};
//!
//! let mut session = ConversationSession::new(SimulationConfig::default());
//! let turn = session.run_turn("I need a refund", &StepTimer::realtime()).await?;
//! println!("{}", turn.reply.content);
//! ```

pub mod agents;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod reply;
pub mod session;
pub mod store;
pub mod timer;
pub mod types;

pub use agents::{
    AgentDescriptor, AgentInvocation, AgentKind, AgentRouter, SelectionRule, CATALOG,
    ROUTER_AGENT_NAME,
};
pub use config::{SimulationConfig, DEFAULT_GREETING};
pub use error::{ChatError, ChatResult, IgnoreReason};
pub use pipeline::{PipelineEvent, PipelinePlan, SimulationPipeline};
pub use reply::{Reply, ReplyRule, ReplySynthesizer, ReplyTemplate};
pub use session::{drive_plan, ConversationSession, SharedSession, StepApplied, SubmitOutcome, Turn};
pub use store::{ActivityLog, ConversationStore};
pub use timer::{Clock, InstantClock, RecordingClock, StepTimer, TimedStep, TokioClock};
pub use types::*;
