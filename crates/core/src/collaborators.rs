//! Collaborator Traits
//!
//! Async interfaces for the external systems the engine consumes. Each is
//! object-safe (`Send + Sync`) so services hold them as `Arc<dyn Trait>` and
//! tests substitute hand-written mocks.

use std::collections::HashMap;

use async_trait::async_trait;

use crate::analysis::ResponseAnalysis;
use crate::cache::{GenericQuestionFilter, QuestionCacheStats, QuestionCacheType};
use crate::context::SessionContext;
use crate::error::CoreResult;
use crate::olq::Olq;
use crate::question::InterviewQuestion;
use crate::submission::Submission;
use crate::subscription::{InterviewMode, SubscriptionTier};

/// Latest PIQ / OIR / PPDT submissions per user.
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    async fn latest_piq_submission(&self, user_id: &str) -> CoreResult<Option<Submission>>;

    async fn latest_oir_submission(&self, user_id: &str) -> CoreResult<Option<Submission>>;

    async fn latest_ppdt_submission(&self, user_id: &str) -> CoreResult<Option<Submission>>;
}

/// Subscription tier and per-mode interview usage.
#[async_trait]
pub trait SubscriptionLedger: Send + Sync {
    async fn tier(&self, user_id: &str) -> CoreResult<SubscriptionTier>;

    /// Interviews the user may still start in `mode`. Authoritative: the
    /// ledger may reset usage on its own rolling window.
    async fn remaining(&self, user_id: &str, mode: InterviewMode) -> CoreResult<i32>;

    /// Interviews used per mode in the current window.
    async fn stats(&self, user_id: &str) -> CoreResult<HashMap<InterviewMode, i32>>;
}

/// The expensive external question generator and answer analyzer.
#[async_trait]
pub trait AiGenerator: Send + Sync {
    /// Personalized questions from the candidate's profile text.
    async fn generate_piq_based_questions(
        &self,
        profile_text: &str,
        target_olqs: Option<&[Olq]>,
        count: usize,
        difficulty: u8,
    ) -> CoreResult<Vec<InterviewQuestion>>;

    /// Mid-session questions aimed at the weakest OLQs so far.
    async fn generate_adaptive_questions(
        &self,
        prior_questions: &[InterviewQuestion],
        prior_responses: &[String],
        weak_olqs: &[Olq],
        count: usize,
    ) -> CoreResult<Vec<InterviewQuestion>>;

    async fn analyze_response(
        &self,
        question: &InterviewQuestion,
        response_text: &str,
        mode: InterviewMode,
    ) -> CoreResult<ResponseAnalysis>;

    /// Cheap availability probe; callers skip generation when false.
    async fn is_available(&self) -> bool {
        true
    }
}

/// Store of generated and curated questions.
///
/// `exclude_used` is scoped to the context's owner. Re-caching a question an
/// owner already holds and re-marking a question used are no-ops.
#[async_trait]
pub trait QuestionCache: Send + Sync {
    /// Up to `limit` unexpired PIQ-based questions owned by `ctx`.
    async fn get_piq_questions(
        &self,
        ctx: &SessionContext,
        limit: usize,
        exclude_used: bool,
    ) -> CoreResult<Vec<InterviewQuestion>>;

    /// Up to `limit` curated questions matching `filter`.
    async fn get_generic_questions(
        &self,
        ctx: &SessionContext,
        filter: &GenericQuestionFilter,
        limit: usize,
        exclude_used: bool,
    ) -> CoreResult<Vec<InterviewQuestion>>;

    async fn cache_piq_questions(
        &self,
        ctx: &SessionContext,
        questions: &[InterviewQuestion],
        expiration_days: u32,
    ) -> CoreResult<()>;

    /// Record that the owner was served `question_id` from the `cache_type`
    /// bucket. Only that bucket's entry is marked; re-marking is a no-op.
    async fn mark_question_used(
        &self,
        ctx: &SessionContext,
        question_id: &str,
        cache_type: QuestionCacheType,
    ) -> CoreResult<()>;

    /// Drop every entry owned by `owner_id` (e.g. after a PIQ edit).
    /// Returns the number of removed entries.
    async fn invalidate_owner_cache(&self, owner_id: &str) -> CoreResult<usize>;

    /// Remove expired entries. Idempotent; returns the number removed.
    async fn cleanup_expired(&self) -> CoreResult<usize>;

    async fn get_cache_stats(&self, user_id: Option<&str>) -> CoreResult<QuestionCacheStats>;
}
