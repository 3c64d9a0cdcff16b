//! Engine State
//!
//! `InterviewEngine` owns the shared collaborators and configuration and
//! hands out the three services built on them.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use mock_interview_core::{
    AiGenerator, InterviewMode, InterviewQuestion, PrerequisiteCheckResult, QuestionCache,
    SessionContext, SubmissionStore, SubscriptionLedger,
};

use crate::models::settings::{ConfigUpdate, EngineConfig};
use crate::services::interview::{
    CacheMaintenance, GenerationRequest, LimitCalculator, PrerequisiteGate, QuestionOrchestrator,
};
use crate::storage::{ConfigService, InMemoryQuestionCache};
use crate::utils::error::{AppError, AppResult};

/// Wiring for the interview engine
pub struct InterviewEngine {
    /// Current configuration; updates are validated before they land
    config: Arc<RwLock<EngineConfig>>,
    cache: Arc<dyn QuestionCache>,
    /// Set when the engine owns an in-memory cache whose generic pool can be
    /// reseeded from `generic_pool_path`
    pool: Option<Arc<InMemoryQuestionCache>>,
    orchestrator: Arc<QuestionOrchestrator>,
    gate: Arc<PrerequisiteGate>,
    limits: Arc<LimitCalculator>,
}

impl InterviewEngine {
    /// Build the engine around an existing cache implementation
    pub fn new(
        config: EngineConfig,
        ai: Arc<dyn AiGenerator>,
        cache: Arc<dyn QuestionCache>,
        submissions: Arc<dyn SubmissionStore>,
        ledger: Arc<dyn SubscriptionLedger>,
    ) -> AppResult<Self> {
        config.validate().map_err(AppError::config)?;

        let limits = Arc::new(LimitCalculator::new(ledger));
        let gate = Arc::new(PrerequisiteGate::new(submissions.clone(), limits.clone()));
        let orchestrator = Arc::new(QuestionOrchestrator::new(ai, cache.clone(), submissions));

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            cache,
            pool: None,
            orchestrator,
            gate,
            limits,
        })
    }

    /// Build the engine with an in-memory cache, seeding the generic pool
    /// from `generic_pool_path` when configured
    pub fn with_in_memory_cache(
        config: EngineConfig,
        ai: Arc<dyn AiGenerator>,
        submissions: Arc<dyn SubmissionStore>,
        ledger: Arc<dyn SubscriptionLedger>,
    ) -> AppResult<Self> {
        let cache = Arc::new(InMemoryQuestionCache::new());
        if let Some(path) = &config.generic_pool_path {
            cache.load_generic_pool(path)?;
        }
        let mut engine = Self::new(config, ai, cache.clone(), submissions, ledger)?;
        engine.pool = Some(cache);
        Ok(engine)
    }

    /// Build the engine from the configuration held by a `ConfigService`
    pub fn from_config_service(
        service: &ConfigService,
        ai: Arc<dyn AiGenerator>,
        submissions: Arc<dyn SubmissionStore>,
        ledger: Arc<dyn SubscriptionLedger>,
    ) -> AppResult<Self> {
        info!(path = %service.path().display(), "building interview engine from config");
        Self::with_in_memory_cache(service.get_config_clone(), ai, submissions, ledger)
    }

    pub fn orchestrator(&self) -> Arc<QuestionOrchestrator> {
        self.orchestrator.clone()
    }

    pub fn gate(&self) -> Arc<PrerequisiteGate> {
        self.gate.clone()
    }

    pub fn limits(&self) -> Arc<LimitCalculator> {
        self.limits.clone()
    }

    pub fn cache(&self) -> Arc<dyn QuestionCache> {
        self.cache.clone()
    }

    /// Get a clone of the current configuration
    pub async fn get_config(&self) -> EngineConfig {
        self.config.read().await.clone()
    }

    /// Apply a partial update. Invalid updates leave the config unchanged.
    ///
    /// A new `generic_pool_path` is loaded into the in-memory pool before the
    /// update lands; questions already pooled stay in place.
    pub async fn update_config(&self, update: ConfigUpdate) -> AppResult<EngineConfig> {
        let mut guard = self.config.write().await;
        let mut candidate = guard.clone();
        candidate.apply_update(update);
        candidate.validate().map_err(AppError::config)?;

        if candidate.generic_pool_path != guard.generic_pool_path {
            if let Some(path) = &candidate.generic_pool_path {
                let pool = self.pool.as_ref().ok_or_else(|| {
                    AppError::config("generic_pool_path requires the in-memory question cache")
                })?;
                pool.load_generic_pool(path)?;
            }
        }

        *guard = candidate;
        Ok(guard.clone())
    }

    /// Start the periodic expired-cache sweep at the configured interval
    pub async fn start_maintenance(&self) -> AppResult<CacheMaintenance> {
        let interval = self.config.read().await.cleanup_interval();
        Ok(CacheMaintenance::spawn(self.cache.clone(), interval)?)
    }

    /// Generate a session's questions using the configured defaults
    pub async fn generate_default(&self, ctx: &SessionContext) -> AppResult<Vec<InterviewQuestion>> {
        let request = {
            let config = self.config.read().await;
            GenerationRequest::new(config.default_total_questions)
                .with_difficulty(config.default_difficulty)
        };
        Ok(self.orchestrator.generate(ctx, &request).await?)
    }

    /// Check prerequisites, honoring the configured subscription bypass
    pub async fn check(
        &self,
        user_id: &str,
        mode: InterviewMode,
    ) -> AppResult<PrerequisiteCheckResult> {
        let bypass = self.config.read().await.bypass_subscription_check;
        Ok(self.gate.check(user_id, mode, bypass).await?)
    }
}

impl std::fmt::Debug for InterviewEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterviewEngine")
            .field("config", &self.config)
            .finish()
    }
}
