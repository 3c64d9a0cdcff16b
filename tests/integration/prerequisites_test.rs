//! Prerequisite Gate Integration Tests
//!
//! Exercises the four concurrent checks (PIQ, OIR, PPDT, subscription), the
//! ordered failure reasons, the bypass flag and collaborator failures.

use std::sync::Arc;

use mock_interview::domain::{
    CoreError, InterviewMode, OirStatus, PiqStatus, PpdtStatus, Submission, SubscriptionStatus,
    SubscriptionTier,
};
use mock_interview::{LimitCalculator, PrerequisiteGate};

use crate::support::{piq_submission, MockLedger, MockSubmissionStore};

fn gate(
    store: MockSubmissionStore,
    ledger: MockLedger,
) -> (PrerequisiteGate, Arc<MockSubmissionStore>, Arc<MockLedger>) {
    let store = Arc::new(store);
    let ledger = Arc::new(ledger);
    let limits = Arc::new(LimitCalculator::new(ledger.clone()));
    (PrerequisiteGate::new(store.clone(), limits), store, ledger)
}

fn premium_with_quota() -> MockLedger {
    MockLedger::new(SubscriptionTier::Premium)
        .with_usage(InterviewMode::Text, 0, 2)
        .with_usage(InterviewMode::Voice, 1, 1)
}

fn store_with_oir(score: f32) -> MockSubmissionStore {
    MockSubmissionStore {
        oir: Some(Submission::new("oir-sub-1", "user-1").with_score(score)),
        ..MockSubmissionStore::complete()
    }
}

// ============================================================================
// Eligibility
// ============================================================================

#[tokio::test]
async fn test_all_prerequisites_met() {
    let (gate, _, _) = gate(MockSubmissionStore::complete(), premium_with_quota());

    let result = gate.check("user-1", InterviewMode::Voice, false).await.unwrap();

    assert!(result.is_eligible());
    assert!(result.failure_reasons().is_empty());
    assert_eq!(result.completion_progress(), 100);
    assert_eq!(result.eligibility_message(), "You are eligible to start the interview");
    assert_eq!(
        result.subscription_status(),
        &SubscriptionStatus::Available {
            tier: SubscriptionTier::Premium,
            remaining: 1,
            mode: InterviewMode::Voice,
        }
    );
    assert!(matches!(
        result.piq_status(),
        PiqStatus::Completed { submission_id, .. } if submission_id == "piq-sub-1"
    ));
}

#[tokio::test]
async fn test_failure_reasons_in_fixed_order() {
    let (gate, _, _) = gate(MockSubmissionStore::default(), MockLedger::new(SubscriptionTier::Free));

    let result = gate.check("user-1", InterviewMode::Text, false).await.unwrap();

    assert!(!result.is_eligible());
    assert_eq!(
        result.failure_reasons(),
        [
            "Complete Personal Information Questionnaire (PIQ)",
            "Complete Officer Intelligence Rating (OIR) test",
            "Complete Picture Perception & Description Test (PPDT)",
            "Upgrade your subscription to access text interviews",
        ]
    );
    assert_eq!(result.completion_progress(), 0);
    assert!(result
        .eligibility_message()
        .starts_with("You must complete the following requirements:\n• Complete Personal"));
}

#[tokio::test]
async fn test_unscored_piq_is_scoring_in_progress() {
    let store = MockSubmissionStore {
        piq: Some(piq_submission(None)),
        ..MockSubmissionStore::complete()
    };
    let (gate, _, _) = gate(store, premium_with_quota());

    let result = gate.check("user-1", InterviewMode::Text, false).await.unwrap();

    assert_eq!(result.piq_status(), &PiqStatus::ScoringInProgress);
    assert_eq!(result.failure_reasons(), ["Wait for PIQ AI scoring to complete"]);
}

// ============================================================================
// OIR threshold
// ============================================================================

#[tokio::test]
async fn test_oir_just_below_threshold() {
    let (gate, _, _) = gate(store_with_oir(49.999), premium_with_quota());

    let result = gate.check("user-1", InterviewMode::Text, false).await.unwrap();

    assert!(matches!(result.oir_status(), OirStatus::CompletedBelowThreshold { .. }));
    assert_eq!(
        result.failure_reasons(),
        ["Score at least 50% in OIR test (current: 49%)"]
    );
}

#[tokio::test]
async fn test_oir_threshold_is_inclusive() {
    let (gate, _, _) = gate(store_with_oir(50.0), premium_with_quota());

    let result = gate.check("user-1", InterviewMode::Text, false).await.unwrap();

    assert!(matches!(result.oir_status(), OirStatus::Completed { score, .. } if *score == 50.0));
    assert!(result.is_eligible());
}

#[tokio::test]
async fn test_unscored_oir_counts_as_zero() {
    let store = MockSubmissionStore {
        oir: Some(Submission::new("oir-sub-1", "user-1")),
        ..MockSubmissionStore::complete()
    };
    let (gate, _, _) = gate(store, premium_with_quota());

    let result = gate.check("user-1", InterviewMode::Text, false).await.unwrap();

    assert_eq!(result.oir_status(), &OirStatus::CompletedBelowThreshold { score: 0.0 });
}

// ============================================================================
// Subscription
// ============================================================================

#[tokio::test]
async fn test_pro_tier_voice_is_free_tier() {
    let ledger = MockLedger::new(SubscriptionTier::Pro).with_usage(InterviewMode::Voice, 0, 5);
    let (gate, _, _) = gate(MockSubmissionStore::complete(), ledger);

    let result = gate.check("user-1", InterviewMode::Voice, false).await.unwrap();

    assert_eq!(result.subscription_status(), &SubscriptionStatus::FreeTier);
    assert_eq!(
        result.failure_reasons(),
        ["Upgrade your subscription to access voice interviews"]
    );
}

#[tokio::test]
async fn test_limit_reached_reports_usage() {
    let ledger = MockLedger::new(SubscriptionTier::Premium).with_usage(InterviewMode::Text, 2, 0);
    let (gate, _, _) = gate(MockSubmissionStore::complete(), ledger);

    let result = gate.check("user-1", InterviewMode::Text, false).await.unwrap();

    assert_eq!(
        result.subscription_status(),
        &SubscriptionStatus::LimitReached {
            tier: SubscriptionTier::Premium,
            used: 2,
            limit: 2,
        }
    );
    assert_eq!(
        result.failure_reasons(),
        ["Interview limit reached for Premium tier (2/2)"]
    );
    assert_eq!(result.completion_progress(), 75);
}

#[tokio::test]
async fn test_bypass_skips_ledger_but_not_other_checks() {
    let store = MockSubmissionStore {
        ppdt: None,
        ..MockSubmissionStore::complete()
    };
    let (gate, _, ledger) = gate(store, MockLedger::failing());

    let result = gate.check("user-1", InterviewMode::Voice, true).await.unwrap();

    assert!(matches!(
        result.subscription_status(),
        SubscriptionStatus::Available { remaining: i32::MAX, mode: InterviewMode::Voice, .. }
    ));
    assert_eq!(result.ppdt_status(), &PpdtStatus::NotStarted);
    assert!(!result.is_eligible());
    assert_eq!(ledger.calls(), 0);
}

// ============================================================================
// Collaborator failures
// ============================================================================

#[tokio::test]
async fn test_blank_user_rejected_before_any_call() {
    let (gate, store, ledger) = gate(MockSubmissionStore::complete(), premium_with_quota());

    let err = gate.check("  ", InterviewMode::Text, false).await.unwrap_err();

    assert!(matches!(err, CoreError::NotAuthenticated(_)));
    assert_eq!(store.calls(), 0);
    assert_eq!(ledger.calls(), 0);
}

#[tokio::test]
async fn test_submission_store_failure_fails_closed() {
    let (gate, store, _) = gate(MockSubmissionStore::failing(), premium_with_quota());

    let result = gate.check("user-1", InterviewMode::Text, false).await.unwrap();

    assert_eq!(store.calls(), 3);
    assert_eq!(result.piq_status(), &PiqStatus::NotStarted);
    assert_eq!(result.oir_status(), &OirStatus::NotStarted);
    assert_eq!(result.ppdt_status(), &PpdtStatus::NotStarted);
    assert_eq!(result.failure_reasons().len(), 3);
}

#[tokio::test]
async fn test_ledger_failure_propagates() {
    let (gate, _, _) = gate(MockSubmissionStore::complete(), MockLedger::failing());

    let err = gate.check("user-1", InterviewMode::Text, false).await.unwrap_err();

    assert!(matches!(err, CoreError::UpstreamUnavailable { .. }));
}
