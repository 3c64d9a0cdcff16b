//! Question Orchestrator
//!
//! Blends PIQ-based, generic and adaptive questions under the 40/40/20 split
//! while keeping AI generator calls to a minimum:
//!
//! 1. PIQ-based questions come from the owner's cache; only the shortfall is
//!    generated, then cached for [`PIQ_CACHE_EXPIRATION_DAYS`] days.
//! 2. Generic questions come from the curated pool. There is no AI fallback.
//! 3. Adaptive questions are generated mid-session by a separate call.
//!
//! Partial failures degrade with a warning. `generate` fails only when the PIQ
//! path fails and the owner has nothing cached.

use std::collections::HashSet;
use std::sync::Arc;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use mock_interview_core::{
    AiGenerator, CoreError, CoreResult, GenericQuestionFilter, InterviewMode, InterviewQuestion,
    Olq, QuestionCache, QuestionCacheStats, QuestionCacheType, QuestionDistribution,
    ResponseAnalysis, SessionContext, Submission, SubmissionStore, PIQ_CACHE_EXPIRATION_DAYS,
};

use crate::models::settings::MAX_TOTAL_QUESTIONS;

/// Parameters for one `generate` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub total_questions: usize,
    /// Focus OLQs; `None` for a balanced mix
    #[serde(default)]
    pub target_olqs: Option<Vec<Olq>>,
    /// 1-5
    pub difficulty: u8,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            total_questions: 10,
            target_olqs: None,
            difficulty: 3,
        }
    }
}

impl GenerationRequest {
    pub fn new(total_questions: usize) -> Self {
        Self {
            total_questions,
            ..Default::default()
        }
    }

    pub fn with_target_olqs(mut self, olqs: Vec<Olq>) -> Self {
        self.target_olqs = Some(olqs);
        self
    }

    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn validate(&self) -> CoreResult<()> {
        if self.total_questions > MAX_TOTAL_QUESTIONS {
            return Err(CoreError::validation(format!(
                "total questions must be at most {}, got {}",
                MAX_TOTAL_QUESTIONS, self.total_questions
            )));
        }
        if !(1..=5).contains(&self.difficulty) {
            return Err(CoreError::validation(format!(
                "difficulty must be between 1 and 5, got {}",
                self.difficulty
            )));
        }
        Ok(())
    }

    pub fn distribution(&self) -> QuestionDistribution {
        QuestionDistribution::for_total(self.total_questions)
    }

    fn generic_filter(&self) -> GenericQuestionFilter {
        GenericQuestionFilter {
            target_olqs: self.target_olqs.clone(),
            difficulty: Some(self.difficulty),
        }
    }
}

/// Result of the PIQ-based read: questions already cached plus freshly
/// generated ones still to be persisted.
#[derive(Debug, Default)]
struct PiqFetch {
    cached: Vec<InterviewQuestion>,
    generated: Vec<InterviewQuestion>,
}

const AI_GENERATOR: &str = "AiGenerator";

/// Hybrid question orchestrator.
pub struct QuestionOrchestrator {
    ai: Arc<dyn AiGenerator>,
    cache: Arc<dyn QuestionCache>,
    submissions: Arc<dyn SubmissionStore>,
}

impl QuestionOrchestrator {
    pub fn new(
        ai: Arc<dyn AiGenerator>,
        cache: Arc<dyn QuestionCache>,
        submissions: Arc<dyn SubmissionStore>,
    ) -> Self {
        Self {
            ai,
            cache,
            submissions,
        }
    }

    /// Produce the up-front PIQ-based and generic questions for a session.
    ///
    /// Returned questions are shuffled, unique by id and already marked used
    /// for the context's owner.
    pub async fn generate(
        &self,
        ctx: &SessionContext,
        request: &GenerationRequest,
    ) -> CoreResult<Vec<InterviewQuestion>> {
        request.validate()?;
        let distribution = request.distribution();
        debug!(
            owner_id = ctx.owner_id(),
            piq = distribution.piq,
            generic = distribution.generic,
            adaptive = distribution.adaptive,
            "generating interview questions"
        );

        let (piq, generic) = tokio::join!(
            self.fetch_piq(ctx, request, distribution.piq),
            self.fetch_generic(ctx, request, distribution.generic),
        );
        let PiqFetch { cached, generated } = piq?;
        let generated = rekey_collisions(generated, &generic, ctx.owner_id());

        if !generated.is_empty() {
            if let Err(e) = self
                .cache
                .cache_piq_questions(ctx, &generated, PIQ_CACHE_EXPIRATION_DAYS)
                .await
            {
                warn!(
                    owner_id = ctx.owner_id(),
                    error = %e,
                    "failed to cache generated PIQ questions"
                );
            }
        }

        let piq_served = cached
            .into_iter()
            .chain(generated)
            .map(|q| (QuestionCacheType::PiqBased, q));
        let generic_served = generic.into_iter().map(|q| (QuestionCacheType::Generic, q));
        let mut served = dedupe(piq_served.chain(generic_served));
        served.shuffle(&mut rand::thread_rng());

        for (cache_type, question) in &served {
            if let Err(e) = self
                .cache
                .mark_question_used(ctx, question.id(), *cache_type)
                .await
            {
                warn!(
                    question_id = question.id(),
                    error = %e,
                    "failed to mark question used"
                );
            }
        }

        info!(
            owner_id = ctx.owner_id(),
            session_id = ctx.session_id(),
            count = served.len(),
            "interview questions ready"
        );
        Ok(served.into_iter().map(|(_, q)| q).collect())
    }

    async fn fetch_piq(
        &self,
        ctx: &SessionContext,
        request: &GenerationRequest,
        count: usize,
    ) -> CoreResult<PiqFetch> {
        if count == 0 {
            return Ok(PiqFetch::default());
        }

        let cached = match self.cache.get_piq_questions(ctx, count, true).await {
            Ok(questions) => questions,
            Err(e) => {
                warn!(owner_id = ctx.owner_id(), error = %e, "PIQ cache read failed");
                Vec::new()
            }
        };
        if cached.len() >= count {
            debug!(owner_id = ctx.owner_id(), count, "PIQ questions served from cache");
            return Ok(PiqFetch {
                cached,
                generated: Vec::new(),
            });
        }

        let shortfall = count - cached.len();
        match self.generate_piq(ctx, request, shortfall).await {
            Ok(mut generated) => {
                generated.truncate(shortfall);
                debug!(
                    owner_id = ctx.owner_id(),
                    cached = cached.len(),
                    generated = generated.len(),
                    "PIQ cache topped up from AI generator"
                );
                Ok(PiqFetch { cached, generated })
            }
            Err(e) if !cached.is_empty() => {
                warn!(
                    owner_id = ctx.owner_id(),
                    cached = cached.len(),
                    shortfall,
                    error = %e,
                    "PIQ generation failed, using cached questions only"
                );
                Ok(PiqFetch {
                    cached,
                    generated: Vec::new(),
                })
            }
            Err(e) => {
                warn!(owner_id = ctx.owner_id(), error = %e, "PIQ generation failed with empty cache");
                Err(e)
            }
        }
    }

    async fn generate_piq(
        &self,
        ctx: &SessionContext,
        request: &GenerationRequest,
        count: usize,
    ) -> CoreResult<Vec<InterviewQuestion>> {
        if !self.ai.is_available().await {
            return Err(CoreError::upstream(AI_GENERATOR, "generator reported unavailable"));
        }
        let profile_text = self.profile_text(ctx.user_id()).await?;
        self.ai
            .generate_piq_based_questions(
                &profile_text,
                request.target_olqs.as_deref(),
                count,
                request.difficulty,
            )
            .await
    }

    async fn fetch_generic(
        &self,
        ctx: &SessionContext,
        request: &GenerationRequest,
        count: usize,
    ) -> Vec<InterviewQuestion> {
        if count == 0 {
            return Vec::new();
        }
        match self
            .cache
            .get_generic_questions(ctx, &request.generic_filter(), count, true)
            .await
        {
            Ok(mut questions) => {
                questions.truncate(count);
                questions
            }
            Err(e) => {
                warn!(owner_id = ctx.owner_id(), error = %e, "generic question read failed");
                Vec::new()
            }
        }
    }

    /// Profile text for the user's latest PIQ submission.
    pub async fn profile_text(&self, user_id: &str) -> CoreResult<String> {
        let submission = self
            .submissions
            .latest_piq_submission(user_id)
            .await?
            .ok_or_else(|| {
                CoreError::data_missing(format!("no PIQ submission for user {}", user_id))
            })?;
        Ok(format_profile(&submission))
    }

    /// Mid-session questions aimed at the weakest OLQs (the 20% share).
    pub async fn generate_adaptive_questions(
        &self,
        prior_questions: &[InterviewQuestion],
        prior_responses: &[String],
        weak_olqs: &[Olq],
        count: usize,
    ) -> CoreResult<Vec<InterviewQuestion>> {
        if count == 0 {
            return Ok(Vec::new());
        }
        if !self.ai.is_available().await {
            return Err(CoreError::upstream(AI_GENERATOR, "generator reported unavailable"));
        }
        let mut questions = self
            .ai
            .generate_adaptive_questions(prior_questions, prior_responses, weak_olqs, count)
            .await?;
        questions.truncate(count);
        Ok(questions)
    }

    pub async fn analyze_response(
        &self,
        question: &InterviewQuestion,
        response_text: &str,
        mode: InterviewMode,
    ) -> CoreResult<ResponseAnalysis> {
        if response_text.trim().is_empty() {
            return Err(CoreError::validation("response text cannot be blank"));
        }
        self.ai.analyze_response(question, response_text, mode).await
    }

    /// Drop the owner's cached PIQ questions, e.g. after the PIQ is edited.
    pub async fn invalidate_owner_cache(&self, owner_id: &str) -> CoreResult<usize> {
        self.cache.invalidate_owner_cache(owner_id).await
    }

    pub async fn cache_stats(&self, user_id: Option<&str>) -> CoreResult<QuestionCacheStats> {
        self.cache.get_cache_stats(user_id).await
    }

    pub async fn cleanup_expired_cache(&self) -> CoreResult<usize> {
        self.cache.cleanup_expired().await
    }
}

/// Keep the first occurrence of each question id.
fn dedupe(
    questions: impl IntoIterator<Item = (QuestionCacheType, InterviewQuestion)>,
) -> Vec<(QuestionCacheType, InterviewQuestion)> {
    let mut seen = HashSet::new();
    questions
        .into_iter()
        .filter(|(_, q)| seen.insert(q.id().to_string()))
        .collect()
}

/// Give generated questions whose id clashes with a served generic question
/// an owner-scoped id, so neither copy is dropped.
fn rekey_collisions(
    generated: Vec<InterviewQuestion>,
    generic: &[InterviewQuestion],
    owner_id: &str,
) -> Vec<InterviewQuestion> {
    let taken: HashSet<&str> = generic.iter().map(|q| q.id()).collect();
    generated
        .into_iter()
        .map(|question| {
            if !taken.contains(question.id()) {
                return question;
            }
            let mut id = format!("{}:{}", owner_id, question.id());
            let mut suffix = 1;
            while taken.contains(id.as_str()) {
                suffix += 1;
                id = format!("{}:{}:{}", owner_id, question.id(), suffix);
            }
            debug!(
                original_id = question.id(),
                new_id = %id,
                "re-keyed generated question clashing with generic pool"
            );
            question.with_id(id)
        })
        .collect()
}

/// Render a PIQ submission as the profile text handed to the generator.
pub fn format_profile(submission: &Submission) -> String {
    let mut text = String::from("CANDIDATE PROFILE:\n");
    text.push_str(&format!("Submission ID: {}\n", submission.id));
    text.push_str(&format!("Submitted At: {}\n", submission.submitted_at.to_rfc3339()));

    if let Value::Object(fields) = &submission.profile {
        for (key, value) in fields {
            let rendered = match value {
                Value::Null => continue,
                Value::String(s) if s.trim().is_empty() => continue,
                Value::String(s) => s.trim().to_string(),
                other => other.to_string(),
            };
            text.push_str(&format!("{}: {}\n", key, rendered));
        }
    }
    text
}
