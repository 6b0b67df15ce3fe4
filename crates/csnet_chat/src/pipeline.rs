//! Simulation pipeline.
//!
//! Turns one user input into a fixed schedule of timed effects:
//!
//! ```text
//! router running ─(analysis delay)─▶ router completed
//!   └▶ for each selected agent:
//!        agent running ─(agent delay)─▶ agent completed
//!   └▶ reply ready
//! ```
//!
//! Planning is pure; nothing is timestamped or stored until the session
//! applies each effect.

use std::time::Duration;

use serde::Serialize;

use crate::agents::{
    AgentInvocation, AgentRouter, ROUTER_AGENT_NAME, ROUTER_DONE_ACTION, ROUTER_START_ACTION,
};
use crate::config::SimulationConfig;
use crate::reply::{Reply, ReplySynthesizer};
use crate::timer::TimedStep;

/// Effect produced by one pipeline step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineEvent {
    /// Append a running activity record
    Started { agent: String, action: String },
    /// Append a completed activity record
    Completed {
        agent: String,
        action: String,
        details: Option<String>,
    },
    /// Append the reply and end the turn
    ReplyReady(Reply),
}

/// Scheduled turn for one input
#[derive(Debug, Clone)]
pub struct PipelinePlan {
    /// Agents involved, in invocation order
    pub agents: Vec<AgentInvocation>,
    /// Timed effects, in order; the last one is always `ReplyReady`
    pub steps: Vec<TimedStep<PipelineEvent>>,
}

impl PipelinePlan {
    pub fn agent_names(&self) -> Vec<String> {
        self.agents.iter().map(|a| a.name().to_string()).collect()
    }

    /// Total simulated latency of the turn
    pub fn total_delay(&self) -> Duration {
        self.steps.iter().map(|s| s.delay).sum()
    }

    /// The reply this plan ends with
    pub fn reply(&self) -> Option<&Reply> {
        self.steps.iter().rev().find_map(|s| match &s.effect {
            PipelineEvent::ReplyReady(reply) => Some(reply),
            _ => None,
        })
    }
}

/// Keyword router, reply table and delays bundled together
#[derive(Debug, Clone)]
pub struct SimulationPipeline {
    router: AgentRouter,
    synthesizer: ReplySynthesizer,
    analysis_delay: Duration,
    agent_delay: Duration,
}

impl SimulationPipeline {
    pub fn new(config: &SimulationConfig) -> Self {
        Self {
            router: AgentRouter::new(),
            synthesizer: ReplySynthesizer::new(),
            analysis_delay: config.analysis_duration(),
            agent_delay: config.agent_duration(),
        }
    }

    pub fn router(&self) -> &AgentRouter {
        &self.router
    }

    pub fn synthesizer(&self) -> &ReplySynthesizer {
        &self.synthesizer
    }

    /// Build the full schedule for `input`
    pub fn plan(&self, input: &str) -> PipelinePlan {
        let agents = self.router.select(input);
        let mut steps = Vec::with_capacity(agents.len() * 2 + 3);

        steps.push(TimedStep::immediate(PipelineEvent::Started {
            agent: ROUTER_AGENT_NAME.to_string(),
            action: ROUTER_START_ACTION.to_string(),
        }));
        steps.push(TimedStep::new(
            self.analysis_delay,
            PipelineEvent::Completed {
                agent: ROUTER_AGENT_NAME.to_string(),
                action: ROUTER_DONE_ACTION.to_string(),
                details: None,
            },
        ));

        for agent in &agents {
            steps.push(TimedStep::immediate(PipelineEvent::Started {
                agent: agent.name().to_string(),
                action: agent.action.to_string(),
            }));
            steps.push(TimedStep::new(
                self.agent_delay,
                PipelineEvent::Completed {
                    agent: agent.name().to_string(),
                    action: agent.result.to_string(),
                    details: Some(agent.details.to_string()),
                },
            ));
        }

        let reply = self.synthesizer.synthesize(input, &agents);
        steps.push(TimedStep::immediate(PipelineEvent::ReplyReady(reply)));

        PipelinePlan { agents, steps }
    }
}

impl Default for SimulationPipeline {
    fn default() -> Self {
        Self::new(&SimulationConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(step: &TimedStep<PipelineEvent>) -> Option<&str> {
        match &step.effect {
            PipelineEvent::Started { agent, .. } => Some(agent.as_str()),
            _ => None,
        }
    }

    #[test]
    fn test_plan_shape() {
        let pipeline = SimulationPipeline::default();
        let plan = pipeline.plan("urgent bug in my account");

        // router pair + 3 agent pairs + reply
        assert_eq!(plan.steps.len(), 2 + 3 * 2 + 1);
        assert_eq!(
            plan.agent_names(),
            vec!["Ticket Management Agent", "Escalation Agent", "Integration Agent"]
        );

        let started_agents: Vec<_> = plan.steps.iter().filter_map(started).collect();
        assert_eq!(
            started_agents,
            vec![
                ROUTER_AGENT_NAME,
                "Ticket Management Agent",
                "Escalation Agent",
                "Integration Agent"
            ]
        );
        assert!(matches!(
            plan.steps.last().map(|s| &s.effect),
            Some(PipelineEvent::ReplyReady(_))
        ));
    }

    #[test]
    fn test_plan_delays() {
        let pipeline = SimulationPipeline::default();
        let plan = pipeline.plan("I need a refund");

        let delays: Vec<_> = plan.steps.iter().map(|s| s.delay.as_millis()).collect();
        assert_eq!(delays, vec![0, 1000, 0, 1500, 0, 1500, 0]);
        assert_eq!(plan.total_delay(), Duration::from_millis(4000));
    }

    #[test]
    fn test_completed_records_carry_details() {
        let pipeline = SimulationPipeline::new(&SimulationConfig::instant());
        let plan = pipeline.plan("file attached");

        let completed: Vec<_> = plan
            .steps
            .iter()
            .filter_map(|s| match &s.effect {
                PipelineEvent::Completed { agent, details, .. } => Some((agent.as_str(), details.clone())),
                _ => None,
            })
            .collect();
        assert_eq!(completed[0], (ROUTER_AGENT_NAME, None));
        assert_eq!(completed[1].0, "File Processing Agent");
        assert_eq!(
            completed[1].1.as_deref(),
            Some("2 screenshots analyzed, error logs parsed, summary report generated")
        );
        assert_eq!(plan.total_delay(), Duration::ZERO);
    }

    #[test]
    fn test_plan_reply_matches_synthesizer() {
        let pipeline = SimulationPipeline::default();
        let plan = pipeline.plan("I need a refund");
        let reply = plan.reply().unwrap();
        assert_eq!(
            reply.actions,
            vec!["Refund initiated", "Ticket created", "Customer notified"]
        );
    }
}
