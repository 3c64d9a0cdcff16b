//! Interview Engine Integration Tests
//!
//! Wiring of configuration, services and the in-memory cache.

use std::sync::Arc;

use mock_interview::domain::{
    InterviewMode, QuestionSource, SubscriptionStatus, SubscriptionTier,
};
use mock_interview::{
    AppError, ConfigService, ConfigUpdate, EngineConfig, InMemoryQuestionCache, InterviewEngine,
};

use crate::support::{ctx, generic_pool, AiBehavior, MockAiGenerator, MockLedger, MockSubmissionStore};

fn engine(config: EngineConfig, ledger: MockLedger) -> InterviewEngine {
    InterviewEngine::with_in_memory_cache(
        config,
        MockAiGenerator::new(AiBehavior::Generate),
        Arc::new(MockSubmissionStore::complete()),
        Arc::new(ledger),
    )
    .unwrap()
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let config = EngineConfig {
        default_difficulty: 0,
        ..Default::default()
    };
    let result = InterviewEngine::with_in_memory_cache(
        config,
        MockAiGenerator::new(AiBehavior::Generate),
        Arc::new(MockSubmissionStore::complete()),
        Arc::new(MockLedger::new(SubscriptionTier::Free)),
    );
    assert!(matches!(result, Err(AppError::Config(_))));
}

#[tokio::test]
async fn test_generate_default_uses_configured_total() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pool_path = temp_dir.path().join("pool.json");
    std::fs::write(&pool_path, serde_json::to_string(&generic_pool(6)).unwrap()).unwrap();

    let config = EngineConfig {
        default_total_questions: 5,
        generic_pool_path: Some(pool_path),
        ..Default::default()
    };
    let engine = engine(config, MockLedger::new(SubscriptionTier::Premium));

    let questions = engine.generate_default(&ctx("piq-1")).await.unwrap();

    // 5 questions: 2 PIQ-based, 2 generic, 1 adaptive held back
    assert_eq!(questions.len(), 4);
    assert_eq!(
        questions.iter().filter(|q| q.source() == QuestionSource::Generic).count(),
        2
    );
}

#[tokio::test]
async fn test_missing_pool_file_fails_construction() {
    let config = EngineConfig {
        generic_pool_path: Some("/nonexistent/pool.json".into()),
        ..Default::default()
    };
    let result = InterviewEngine::with_in_memory_cache(
        config,
        MockAiGenerator::new(AiBehavior::Generate),
        Arc::new(MockSubmissionStore::complete()),
        Arc::new(MockLedger::new(SubscriptionTier::Free)),
    );
    assert!(matches!(result, Err(AppError::Io(_))));
}

#[tokio::test]
async fn test_check_honors_configured_bypass() {
    let engine = engine(EngineConfig::default(), MockLedger::new(SubscriptionTier::Free));

    let result = engine.check("user-1", InterviewMode::Voice).await.unwrap();
    assert_eq!(result.subscription_status(), &SubscriptionStatus::FreeTier);

    engine
        .update_config(ConfigUpdate {
            bypass_subscription_check: Some(true),
            ..Default::default()
        })
        .await
        .unwrap();

    let result = engine.check("user-1", InterviewMode::Voice).await.unwrap();
    assert!(result.is_eligible());
}

#[tokio::test]
async fn test_invalid_update_leaves_config_unchanged() {
    let engine = engine(EngineConfig::default(), MockLedger::new(SubscriptionTier::Free));

    let result = engine
        .update_config(ConfigUpdate {
            cleanup_interval_hours: Some(0),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::Config(_))));
    assert_eq!(engine.get_config().await.cleanup_interval_hours, 24);
}

#[tokio::test]
async fn test_pool_path_update_seeds_generic_pool() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pool_path = temp_dir.path().join("pool.json");
    std::fs::write(&pool_path, serde_json::to_string(&generic_pool(6)).unwrap()).unwrap();
    let engine = engine(EngineConfig::default(), MockLedger::new(SubscriptionTier::Premium));

    let before = engine.generate_default(&ctx("piq-1")).await.unwrap();
    assert_eq!(
        before.iter().filter(|q| q.source() == QuestionSource::Generic).count(),
        0
    );

    engine
        .update_config(ConfigUpdate {
            generic_pool_path: Some(pool_path.clone()),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(engine.get_config().await.generic_pool_path, Some(pool_path));
    let after = engine.generate_default(&ctx("piq-2")).await.unwrap();
    assert_eq!(
        after.iter().filter(|q| q.source() == QuestionSource::Generic).count(),
        4
    );
}

#[tokio::test]
async fn test_unreadable_pool_path_update_leaves_config_unchanged() {
    let engine = engine(EngineConfig::default(), MockLedger::new(SubscriptionTier::Free));

    let result = engine
        .update_config(ConfigUpdate {
            generic_pool_path: Some("/nonexistent/pool.json".into()),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::Io(_))));
    assert!(engine.get_config().await.generic_pool_path.is_none());
}

#[tokio::test]
async fn test_pool_path_update_rejected_for_external_cache() {
    let temp_dir = tempfile::tempdir().unwrap();
    let pool_path = temp_dir.path().join("pool.json");
    std::fs::write(&pool_path, serde_json::to_string(&generic_pool(2)).unwrap()).unwrap();
    let engine = InterviewEngine::new(
        EngineConfig::default(),
        MockAiGenerator::new(AiBehavior::Generate),
        Arc::new(InMemoryQuestionCache::new()),
        Arc::new(MockSubmissionStore::complete()),
        Arc::new(MockLedger::new(SubscriptionTier::Free)),
    )
    .unwrap();

    let result = engine
        .update_config(ConfigUpdate {
            generic_pool_path: Some(pool_path),
            ..Default::default()
        })
        .await;

    assert!(matches!(result, Err(AppError::Config(_))));
    assert!(engine.get_config().await.generic_pool_path.is_none());
}

#[tokio::test]
async fn test_engine_from_config_service() {
    let temp_dir = tempfile::tempdir().unwrap();
    let mut service = ConfigService::open(temp_dir.path().join("config.json")).unwrap();
    service
        .update_config(ConfigUpdate {
            default_total_questions: Some(3),
            ..Default::default()
        })
        .unwrap();

    let engine = InterviewEngine::from_config_service(
        &service,
        MockAiGenerator::new(AiBehavior::Generate),
        Arc::new(MockSubmissionStore::complete()),
        Arc::new(MockLedger::new(SubscriptionTier::Premium)),
    )
    .unwrap();

    assert_eq!(engine.get_config().await.default_total_questions, 3);
    let maintenance = engine.start_maintenance().await.unwrap();
    assert!(maintenance.is_running());
    maintenance.shutdown().await;
}

#[tokio::test]
async fn test_core_errors_surface_through_app_error() {
    let engine = InterviewEngine::with_in_memory_cache(
        EngineConfig::default(),
        MockAiGenerator::new(AiBehavior::Fail),
        Arc::new(MockSubmissionStore::complete()),
        Arc::new(MockLedger::new(SubscriptionTier::Premium)),
    )
    .unwrap();

    let err = engine.generate_default(&ctx("piq-1")).await.unwrap_err();
    assert!(err.as_core().is_some_and(|e| e.is_recoverable()));
}
