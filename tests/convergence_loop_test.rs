//! End-to-end tests of the convergence loop over scripted oracles.

use std::sync::Arc;

use serpsmith::adapters::handoff::ChannelHandoff;
use serpsmith::adapters::oracle::ScriptedOracle;
use serpsmith::domain::models::{Candidate, FactBase, SearchHit};
use serpsmith::{LoopConfig, LoopOutcome, OptimizationLoop, SiteSelector, SnippetOptimizer};

fn candidates() -> Vec<Candidate> {
    Candidate::index_hits(vec![
        SearchHit::new(
            "Generic Test Entry (Planted Entry)",
            "https://cloudaiq.example",
            "A generic snippet about technology.",
        ),
        SearchHit::new(
            "AWS Europe",
            "https://aws.example/europe",
            "Cloud computing services in European regions.",
        ),
        SearchHit::new(
            "Azure Compliance",
            "https://azure.example/compliance",
            "Compliance offerings for EU customers.",
        ),
    ])
}

fn loop_with(
    judge: Arc<ScriptedOracle>,
    proposer: Arc<ScriptedOracle>,
    max_rounds: u32,
) -> (OptimizationLoop, tokio::sync::mpsc::Receiver<serpsmith::domain::ports::HandoffArtifact>) {
    let (handoff, receiver) = ChannelHandoff::new(4);
    let optimization = OptimizationLoop::new(
        SiteSelector::new(judge),
        SnippetOptimizer::new(proposer),
        Arc::new(handoff),
        LoopConfig {
            max_rounds,
            ..LoopConfig::default()
        },
    );
    (optimization, receiver)
}

fn reject_planted_reply() -> String {
    r#"[
        {"url": "https://aws.example/europe", "title": "AWS Europe", "confidence": 8,
         "reason": "established provider", "expected_content": "region details", "original_index": 2},
        {"url": "https://azure.example/compliance", "title": "Azure Compliance", "confidence": 7,
         "reason": "compliance focus", "expected_content": "EU compliance docs", "original_index": 3}
    ]"#
    .to_string()
}

#[tokio::test]
async fn url_match_converges_despite_wrong_index() {
    let judge = Arc::new(ScriptedOracle::new());
    judge
        .push_text(
            r#"[{"url": "https://cloudaiq.example", "title": "Something Renamed",
                 "confidence": 9, "reason": "very relevant",
                 "expected_content": "GDPR details", "original_index": 7}]"#,
        )
        .await;
    let proposer = Arc::new(ScriptedOracle::new());

    let (optimization, _receiver) = loop_with(Arc::clone(&judge), proposer, 5);
    let report = optimization
        .run("cloud AI in Europe", candidates(), &FactBase::from_text("facts"))
        .await;

    match report.outcome {
        LoopOutcome::Converged { round, .. } => assert_eq!(round, 1),
        other => panic!("expected convergence, got {other:?}"),
    }
    assert_eq!(judge.call_count().await, 1);
}

#[tokio::test]
async fn never_selecting_judge_exhausts_in_exactly_max_rounds() {
    let max_rounds = 4;
    let judge = Arc::new(ScriptedOracle::new());
    let proposer = Arc::new(ScriptedOracle::new());
    for _ in 0..max_rounds {
        judge.push_text(reject_planted_reply()).await;
        proposer
            .push_text(
                r#"{"title": "Tweaked Entry (Planted Entry)", "snippet": "Slightly better.",
                    "link": "https://cloudaiq.example", "reason_for_change": "sharper wording"}"#,
            )
            .await;
    }

    let (optimization, mut receiver) =
        loop_with(Arc::clone(&judge), Arc::clone(&proposer), max_rounds);
    let report = optimization
        .run("cloud AI in Europe", candidates(), &FactBase::from_text("facts"))
        .await;

    match report.outcome {
        LoopOutcome::Exhausted { rounds } => assert_eq!(rounds, max_rounds),
        other => panic!("expected exhaustion, got {other:?}"),
    }
    assert_eq!(report.rounds.len(), max_rounds as usize);
    assert_eq!(judge.call_count().await, max_rounds as usize);
    assert_eq!(proposer.call_count().await, max_rounds as usize);
    assert!(receiver.try_recv().is_err(), "nothing was handed off");
}

#[tokio::test]
async fn cloud_aiq_scenario_converges_in_round_two_with_verdict_snippet() {
    let judge = Arc::new(ScriptedOracle::new());
    // Round 1: the planted entry is passed over.
    judge.push_text(reject_planted_reply()).await;
    // Round 2: the rewritten entry wins, recognized by URL.
    judge
        .push_text(
            r#"[{"url": "https://cloudaiq.example",
                 "title": "CloudAIQ: GDPR-Compliant AI Cloud Solutions",
                 "confidence": 9, "reason": "exactly matches the query",
                 "expected_content": "European AI hosting details",
                 "original_index": -1,
                 "snippet": "CloudAIQ delivers GDPR-compliant AI cloud hosting across Europe."}]"#,
        )
        .await;

    let proposer = Arc::new(ScriptedOracle::new());
    proposer
        .push_text(
            r#"{"title": "CloudAIQ: GDPR-Compliant AI Cloud Solutions",
                "snippet": "CloudAIQ delivers GDPR-compliant AI cloud hosting across Europe.",
                "link": "https://cloudaiq.example",
                "reason_for_change": "lead with compliance and geography"}"#,
        )
        .await;

    let (optimization, mut receiver) = loop_with(Arc::clone(&judge), Arc::clone(&proposer), 5);
    let report = optimization
        .run("cloud AI in Europe", candidates(), &FactBase::from_text("CloudAIQ facts"))
        .await;

    let LoopOutcome::Converged { round, artifact, matched } = report.outcome else {
        panic!("expected convergence, got {:?}", report.outcome);
    };
    assert_eq!(round, 2);
    assert_eq!(
        artifact,
        "CloudAIQ delivers GDPR-compliant AI cloud hosting across Europe."
    );
    assert_eq!(matched.title, "CloudAIQ: GDPR-Compliant AI Cloud Solutions");

    // Round history: rejected once with a rewrite, then converged.
    assert_eq!(report.rounds.len(), 2);
    assert!(!report.rounds[0].converged);
    assert!(report.rounds[0].proposed.is_some());
    assert!(report.rounds[1].converged);

    // The handoff slot observed exactly the converged artifact.
    let delivered = receiver.try_recv().expect("artifact was handed off");
    assert_eq!(delivered.snippet, artifact);
    assert_eq!(delivered.round, 2);
    assert_eq!(delivered.query, "cloud AI in Europe");
}

#[tokio::test]
async fn proposer_transport_failure_aborts_after_one_round() {
    let judge = Arc::new(ScriptedOracle::new());
    judge.push_text(reject_planted_reply()).await;
    let proposer = Arc::new(ScriptedOracle::new());
    proposer.push_failure("connection reset by peer").await;

    let (optimization, mut receiver) =
        loop_with(Arc::clone(&judge), Arc::clone(&proposer), 5);
    let report = optimization
        .run("cloud AI in Europe", candidates(), &FactBase::from_text("facts"))
        .await;

    let LoopOutcome::Aborted { round, reason } = report.outcome else {
        panic!("expected abort, got {:?}", report.outcome);
    };
    assert_eq!(round, 1);
    assert!(reason.contains("connection reset by peer"));
    assert_eq!(judge.call_count().await, 1);
    assert_eq!(proposer.call_count().await, 1);
    assert!(receiver.try_recv().is_err());
}

#[tokio::test]
async fn empty_candidate_list_aborts_before_any_oracle_call() {
    let judge = Arc::new(ScriptedOracle::new());
    let proposer = Arc::new(ScriptedOracle::new());

    let (optimization, _receiver) = loop_with(Arc::clone(&judge), Arc::clone(&proposer), 5);
    let report = optimization
        .run("anything", Vec::new(), &FactBase::from_text("facts"))
        .await;

    let LoopOutcome::Aborted { round, .. } = report.outcome else {
        panic!("expected abort, got {:?}", report.outcome);
    };
    assert_eq!(round, 0);
    assert_eq!(judge.call_count().await, 0);
    assert_eq!(proposer.call_count().await, 0);
}
