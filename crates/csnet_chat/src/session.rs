//! Conversation session.
//!
//! A session owns the transcript, the activity log and the pipeline. It
//! has two mutation entry points:
//!
//! - [`ConversationSession::submit`] accepts user input and returns the
//!   timed plan for the turn (or the reason it was ignored)
//! - [`ConversationSession::on_pipeline_step`] applies one planned effect
//!
//! [`ConversationSession::run_turn`] wires the two together through a
//! [`StepTimer`]. When input has to keep flowing while a turn is in flight,
//! share the session behind a [`SharedSession`] and drive the plan with
//! [`drive_plan`], which only holds the lock while applying a step.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::agents::AgentInvocation;
use crate::config::SimulationConfig;
use crate::error::IgnoreReason;
use crate::pipeline::{PipelineEvent, PipelinePlan, SimulationPipeline};
use crate::store::{ActivityLog, ConversationStore};
use crate::timer::StepTimer;
use crate::types::{
    AgentActivity, HandleRequest, HandleResponse, Message, ORCHESTRATOR_AGENT_TYPE,
};

/// Session shared between an input loop and a running turn
pub type SharedSession = Arc<Mutex<ConversationSession>>;

/// Result of submitting user input
#[derive(Debug, Clone)]
pub enum SubmitOutcome {
    /// Input was recorded; the plan must be driven to completion
    Accepted(PipelinePlan),
    /// Nothing changed
    Ignored(IgnoreReason),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted(_))
    }
}

/// What applying one pipeline step appended
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StepApplied {
    Activity(AgentActivity),
    Reply(Message),
}

/// Everything one completed turn produced
#[derive(Debug, Clone, Serialize)]
pub struct Turn {
    pub agents: Vec<AgentInvocation>,
    pub activities: Vec<AgentActivity>,
    pub reply: Message,
}

/// One customer conversation
#[derive(Debug)]
pub struct ConversationSession {
    id: String,
    config: SimulationConfig,
    pipeline: SimulationPipeline,
    store: ConversationStore,
    activity: ActivityLog,
}

impl ConversationSession {
    /// Create a session, seeding the greeting when one is configured
    pub fn new(config: SimulationConfig) -> Self {
        let mut store = ConversationStore::new();
        if !config.greeting.is_empty() {
            store.append_message(
                Message::agent(config.greeting.clone()).with_agent_type(ORCHESTRATOR_AGENT_TYPE),
            );
        }

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            pipeline: SimulationPipeline::new(&config),
            config,
            store,
            activity: ActivityLog::new(),
        }
    }

    /// Wrap into a [`SharedSession`]
    pub fn shared(self) -> SharedSession {
        Arc::new(Mutex::new(self))
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &SimulationPipeline {
        &self.pipeline
    }

    pub fn messages(&self) -> &[Message] {
        self.store.messages()
    }

    pub fn activities(&self) -> &[AgentActivity] {
        self.activity.entries()
    }

    /// Recent activity view, newest first, capped by the configured limit
    pub fn recent_activity(&self) -> Vec<&AgentActivity> {
        self.activity
            .recent(self.config.recent_activity_limit)
            .collect()
    }

    pub fn is_processing(&self) -> bool {
        self.store.is_processing()
    }

    /// Accept user input and start a turn.
    ///
    /// Blank input and input arriving mid-turn are dropped without touching
    /// any state. The stored message keeps the input exactly as typed.
    pub fn submit(&mut self, input: &str) -> SubmitOutcome {
        if input.trim().is_empty() {
            debug!(session = %self.id, "Ignoring empty input");
            return SubmitOutcome::Ignored(IgnoreReason::EmptyInput);
        }
        if self.store.is_processing() {
            debug!(session = %self.id, "Ignoring input while processing");
            return SubmitOutcome::Ignored(IgnoreReason::AlreadyProcessing);
        }

        self.store.append_message(Message::user(input));
        self.store.set_processing(true);

        let plan = self.pipeline.plan(input);
        info!(
            session = %self.id,
            agents = ?plan.agent_names(),
            "Request accepted"
        );
        SubmitOutcome::Accepted(plan)
    }

    /// Apply one planned effect and report what was appended
    pub fn on_pipeline_step(&mut self, event: PipelineEvent) -> StepApplied {
        match event {
            PipelineEvent::Started { agent, action } => {
                debug!(session = %self.id, %agent, "Agent started");
                let record = AgentActivity::running(agent, action);
                self.activity.push(record.clone());
                StepApplied::Activity(record)
            }
            PipelineEvent::Completed {
                agent,
                action,
                details,
            } => {
                debug!(session = %self.id, %agent, "Agent completed");
                let record = AgentActivity::completed(agent, action).with_details(details);
                self.activity.push(record.clone());
                StepApplied::Activity(record)
            }
            PipelineEvent::ReplyReady(reply) => {
                let message = Message::agent(reply.content)
                    .with_agent_type(ORCHESTRATOR_AGENT_TYPE)
                    .with_actions(reply.actions);
                self.store.append_message(message.clone());
                self.store.set_processing(false);
                debug!(session = %self.id, "Reply delivered");
                StepApplied::Reply(message)
            }
        }
    }

    /// Submit `input` and run the turn to completion on `timer`.
    ///
    /// Returns `Err` with the ignore reason when the input was dropped.
    pub async fn run_turn(&mut self, input: &str, timer: &StepTimer) -> Result<Turn, IgnoreReason> {
        let plan = match self.submit(input) {
            SubmitOutcome::Accepted(plan) => plan,
            SubmitOutcome::Ignored(reason) => return Err(reason),
        };

        let mut activities = Vec::new();
        let mut reply = None;
        timer
            .run(plan.steps, |event| match self.on_pipeline_step(event) {
                StepApplied::Activity(record) => activities.push(record),
                StepApplied::Reply(message) => reply = Some(message),
            })
            .await;

        // Every plan ends with a reply step
        let reply = reply.unwrap_or_else(|| Message::agent(String::new()));
        Ok(Turn {
            agents: plan.agents,
            activities,
            reply,
        })
    }

    /// Handle one request document
    pub async fn handle(&mut self, request: HandleRequest, timer: &StepTimer) -> HandleResponse {
        match self.run_turn(&request.message, timer).await {
            Ok(turn) => HandleResponse {
                context: request.context,
                agents: turn.agents.iter().map(|a| a.name().to_string()).collect(),
                activities: turn.activities,
                reply: Some(turn.reply),
            },
            Err(reason) => {
                debug!(session = %self.id, %reason, "Request not handled");
                HandleResponse {
                    context: request.context,
                    agents: Vec::new(),
                    activities: Vec::new(),
                    reply: None,
                }
            }
        }
    }
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new(SimulationConfig::default())
    }
}

/// Drive a plan against a shared session.
///
/// The lock is taken once per step, so other tasks can submit (and be
/// turned away) while the turn waits out its delays. `observer` sees each
/// appended record as it lands.
pub async fn drive_plan<F>(session: &SharedSession, plan: PipelinePlan, timer: &StepTimer, mut observer: F)
where
    F: FnMut(&StepApplied),
{
    for step in plan.steps {
        timer.wait(step.delay).await;
        let applied = session.lock().await.on_pipeline_step(step.effect);
        observer(&applied);
    }
}
