//! Limit Calculator Integration Tests

use std::sync::Arc;

use mock_interview::domain::{CoreError, InterviewMode, SubscriptionTier, UsageInfo};
use mock_interview::LimitCalculator;

use crate::support::MockLedger;

fn calculator(ledger: MockLedger) -> LimitCalculator {
    LimitCalculator::new(Arc::new(ledger))
}

#[tokio::test]
async fn test_used_count_defaults_to_zero_for_missing_mode() {
    let limits = calculator(
        MockLedger::new(SubscriptionTier::Pro).with_usage(InterviewMode::Text, 1, 1),
    );

    assert_eq!(limits.used_count("user-1", InterviewMode::Text).await.unwrap(), 1);
    assert_eq!(limits.used_count("user-1", InterviewMode::Voice).await.unwrap(), 0);
}

#[tokio::test]
async fn test_remaining_comes_from_ledger() {
    // Rolling window reset: remaining is not max - used
    let limits = calculator(
        MockLedger::new(SubscriptionTier::Premium).with_usage(InterviewMode::Text, 2, 2),
    );

    assert_eq!(limits.remaining_count("user-1", InterviewMode::Text).await.unwrap(), 2);
}

#[tokio::test]
async fn test_usage_summary_per_mode() {
    let ledger = MockLedger::new(SubscriptionTier::Premium)
        .with_usage(InterviewMode::Text, 1, 1)
        .with_usage(InterviewMode::Voice, 0, 2);
    let limits = calculator(ledger);

    let summary = limits.usage_summary("user-1").await.unwrap();

    assert_eq!(summary[&InterviewMode::Text], UsageInfo::new(1, 2, 1).unwrap());
    assert_eq!(summary[&InterviewMode::Voice], UsageInfo::new(0, 2, 2).unwrap());
    assert!(summary[&InterviewMode::Voice].can_start());
}

#[tokio::test]
async fn test_usage_summary_rejects_inconsistent_ledger() {
    let ledger = MockLedger::new(SubscriptionTier::Premium)
        .with_usage(InterviewMode::Text, 2, 1)
        .with_usage(InterviewMode::Voice, 0, 0);
    let limits = calculator(ledger);

    let err = limits.usage_summary("user-1").await.unwrap_err();
    assert!(matches!(err, CoreError::InvariantViolation(_)));
}

#[tokio::test]
async fn test_usage_summary_rejects_negative_counts() {
    let ledger = MockLedger::new(SubscriptionTier::Pro).with_usage(InterviewMode::Text, -1, 1);
    let limits = calculator(ledger);

    let err = limits.usage_summary("user-1").await.unwrap_err();
    assert!(matches!(err, CoreError::InvariantViolation(_)));
}

#[tokio::test]
async fn test_can_start() {
    let pro = calculator(
        MockLedger::new(SubscriptionTier::Pro)
            .with_usage(InterviewMode::Text, 0, 2)
            .with_usage(InterviewMode::Voice, 0, 3),
    );
    assert!(pro.can_start("user-1", InterviewMode::Text).await.unwrap());
    // Tier grants no voice access whatever the ledger says
    assert!(!pro.can_start("user-1", InterviewMode::Voice).await.unwrap());

    let exhausted = calculator(
        MockLedger::new(SubscriptionTier::Premium).with_usage(InterviewMode::Text, 2, 0),
    );
    assert!(!exhausted.can_start("user-1", InterviewMode::Text).await.unwrap());

    let free = calculator(MockLedger::new(SubscriptionTier::Free));
    assert!(!free.can_start("user-1", InterviewMode::Text).await.unwrap());
}

#[tokio::test]
async fn test_ledger_failure_is_upstream_unavailable() {
    let limits = calculator(MockLedger::failing());

    let err = limits.usage_summary("user-1").await.unwrap_err();
    assert!(matches!(err, CoreError::UpstreamUnavailable { .. }));
    let err = limits.remaining_count("user-1", InterviewMode::Text).await.unwrap_err();
    assert!(matches!(err, CoreError::UpstreamUnavailable { .. }));
}
