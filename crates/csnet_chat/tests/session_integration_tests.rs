//! Integration tests for full conversation turns.

use std::sync::Arc;
use std::time::Duration;

use csnet_chat::{
    drive_plan, ActivityStatus, AgentKind, ConversationSession, IgnoreReason, RecordingClock,
    Sender, SimulationConfig, StepApplied, StepTimer, SubmitOutcome, ROUTER_AGENT_NAME,
};

const REFUND_ACTIONS: [&str; 3] = ["Refund initiated", "Ticket created", "Customer notified"];
const ISSUE_ACTIONS: [&str; 3] = ["Ticket created", "Technical team notified", "Follow-up scheduled"];

fn session() -> ConversationSession {
    ConversationSession::new(SimulationConfig::instant().greeting(""))
}

fn actions(session: &ConversationSession) -> Vec<String> {
    session
        .messages()
        .last()
        .and_then(|m| m.actions.clone())
        .unwrap_or_default()
}

/// Refund wins regardless of the other keywords present.
#[tokio::test]
async fn test_refund_reply_for_any_case_and_mix() {
    let inputs = [
        "I need a refund",
        "REFUND now",
        "refund this issue asap",
        "There is a problem with my Refund, see the screenshot",
    ];
    let timer = StepTimer::instant();

    let mut reference = None;
    for input in inputs {
        let mut s = session();
        let turn = s.run_turn(input, &timer).await.unwrap();
        assert_eq!(actions(&s), REFUND_ACTIONS);
        match &reference {
            None => reference = Some(turn.reply.content.clone()),
            Some(content) => assert_eq!(&turn.reply.content, content),
        }
    }
}

/// Issue/problem without refund gives the issue template.
#[tokio::test]
async fn test_issue_reply_without_refund() {
    let timer = StepTimer::instant();
    for input in ["I have an issue", "big PROBLEM here", "urgent issue with my document"] {
        let mut s = session();
        let turn = s.run_turn(input, &timer).await.unwrap();
        assert_eq!(actions(&s), ISSUE_ACTIONS);
        assert!(turn
            .reply
            .content
            .starts_with("I understand you're experiencing an issue."));
    }
}

/// Generic replies list exactly the selected agents, Integration last.
#[tokio::test]
async fn test_generic_reply_lists_selected_agents() {
    let timer = StepTimer::instant();
    let cases: [(&str, &[AgentKind]); 4] = [
        ("hello", &[AgentKind::Integration]),
        ("what is your return policy", &[AgentKind::KnowledgeBase, AgentKind::Integration]),
        (
            "emergency: bug in the uploaded file",
            &[
                AgentKind::TicketManagement,
                AgentKind::Escalation,
                AgentKind::FileProcessing,
                AgentKind::Integration,
            ],
        ),
        (
            "How to attach a document asap",
            &[
                AgentKind::KnowledgeBase,
                AgentKind::Escalation,
                AgentKind::FileProcessing,
                AgentKind::Integration,
            ],
        ),
    ];

    for (input, expected) in cases {
        let mut s = session();
        let turn = s.run_turn(input, &timer).await.unwrap();

        let kinds: Vec<_> = turn.agents.iter().map(|a| a.kind).collect();
        assert_eq!(kinds, expected, "input: {}", input);

        let bullets: Vec<_> = turn
            .reply
            .content
            .lines()
            .filter(|l| l.starts_with("• **"))
            .collect();
        assert_eq!(bullets.len(), expected.len());
        for (bullet, kind) in bullets.iter().zip(expected) {
            assert!(bullet.contains(kind.display_name()));
        }
        assert_eq!(actions(&s).len(), expected.len());
    }
}

/// One router pair plus one pair per agent, in order.
#[tokio::test]
async fn test_activity_log_pairs() {
    let mut s = session();
    let turn = s
        .run_turn("urgent bug in my account", &StepTimer::instant())
        .await
        .unwrap();

    let log: Vec<_> = s
        .activities()
        .iter()
        .map(|a| (a.agent.as_str(), a.status))
        .collect();
    assert_eq!(
        log,
        vec![
            (ROUTER_AGENT_NAME, ActivityStatus::Running),
            (ROUTER_AGENT_NAME, ActivityStatus::Completed),
            ("Ticket Management Agent", ActivityStatus::Running),
            ("Ticket Management Agent", ActivityStatus::Completed),
            ("Escalation Agent", ActivityStatus::Running),
            ("Escalation Agent", ActivityStatus::Completed),
            ("Integration Agent", ActivityStatus::Running),
            ("Integration Agent", ActivityStatus::Completed),
        ]
    );

    // "bug" selects the ticket agent but does not trigger the issue reply
    assert_eq!(actions(&s), vec!["Support", "High", "Customer"]);
    assert!(turn
        .reply
        .content
        .starts_with("I've processed your request using our multi-agent network."));
    assert!(s.activities().iter().all(|a| a.status != ActivityStatus::Failed));
}

/// Activity log keeps growing across turns.
#[tokio::test]
async fn test_logs_are_append_only_across_turns() {
    let mut s = ConversationSession::new(SimulationConfig::instant());
    let timer = StepTimer::instant();

    s.run_turn("I need a refund", &timer).await.unwrap();
    let first_activities = s.activities().to_vec();
    let first_messages = s.messages().to_vec();

    s.run_turn("urgent bug", &timer).await.unwrap();

    assert_eq!(&s.activities()[..first_activities.len()], first_activities.as_slice());
    assert_eq!(&s.messages()[..first_messages.len()], first_messages.as_slice());
    assert_eq!(s.activities().len(), 6 + 8);

    let senders: Vec<_> = s.messages().iter().map(|m| m.sender).collect();
    assert_eq!(
        senders,
        vec![Sender::Agent, Sender::User, Sender::Agent, Sender::User, Sender::Agent]
    );
}

#[tokio::test]
async fn test_empty_input_is_a_no_op() {
    let mut s = ConversationSession::default();
    let before = s.messages().to_vec();

    let err = s.run_turn("", &StepTimer::instant()).await.unwrap_err();
    assert_eq!(err, IgnoreReason::EmptyInput);
    assert_eq!(s.messages(), before.as_slice());
    assert!(s.activities().is_empty());
    assert!(!s.is_processing());
}

/// The timer is asked for exactly the configured delays.
#[tokio::test]
async fn test_turn_requests_configured_delays() {
    let clock = RecordingClock::new();
    let timer = StepTimer::new(Arc::new(clock.clone()));
    let mut s = ConversationSession::new(SimulationConfig::default());

    s.run_turn("I need a refund", &timer).await.unwrap();

    assert_eq!(
        clock.requested(),
        vec![
            Duration::from_millis(1000),
            Duration::from_millis(1500),
            Duration::from_millis(1500)
        ]
    );
}

/// Input arriving mid-turn is dropped, not queued.
#[tokio::test]
async fn test_shared_session_drops_input_while_processing() {
    let config = SimulationConfig::default()
        .analysis_delay(10)
        .agent_delay(10)
        .greeting("");
    let shared = ConversationSession::new(config).shared();

    let plan = match shared.lock().await.submit("I need a refund") {
        SubmitOutcome::Accepted(plan) => plan,
        SubmitOutcome::Ignored(reason) => panic!("ignored: {}", reason),
    };

    let driver = {
        let shared = shared.clone();
        tokio::spawn(async move {
            let mut seen = Vec::new();
            drive_plan(&shared, plan, &StepTimer::realtime(), |applied| {
                seen.push(matches!(applied, StepApplied::Reply(_)));
            })
            .await;
            seen
        })
    };

    let outcome = shared.lock().await.submit("another question");
    assert!(matches!(
        outcome,
        SubmitOutcome::Ignored(IgnoreReason::AlreadyProcessing)
    ));

    let seen = driver.await.unwrap();
    assert_eq!(seen.len(), 7);
    assert_eq!(seen.last(), Some(&true));

    let s = shared.lock().await;
    assert!(!s.is_processing());
    let user_messages: Vec<_> = s
        .messages()
        .iter()
        .filter(|m| m.sender == Sender::User)
        .map(|m| m.content.as_str())
        .collect();
    assert_eq!(user_messages, vec!["I need a refund"]);
}
