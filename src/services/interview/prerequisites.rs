//! Prerequisite Gate
//!
//! Decides whether a user may start an interview. Four independent checks run
//! concurrently: PIQ, OIR, PPDT and subscription. Submission reads fail
//! closed (the check reports its not-started variant); ledger failures
//! propagate because no correct degraded answer exists.

use std::sync::Arc;

use tracing::{debug, info, warn};

use mock_interview_core::{
    CoreError, CoreResult, InterviewMode, OirStatus, PiqStatus, PpdtStatus,
    PrerequisiteCheckResult, SubmissionStore, SubscriptionStatus, SubscriptionTier,
};

use super::limits::LimitCalculator;

pub struct PrerequisiteGate {
    submissions: Arc<dyn SubmissionStore>,
    limits: Arc<LimitCalculator>,
}

impl PrerequisiteGate {
    pub fn new(submissions: Arc<dyn SubmissionStore>, limits: Arc<LimitCalculator>) -> Self {
        Self {
            submissions,
            limits,
        }
    }

    /// Check every prerequisite for `mode`.
    ///
    /// With `bypass` the subscription check reports `Available` with an
    /// unlimited count and the ledger is never contacted; the other three
    /// checks still run against real data.
    pub async fn check(
        &self,
        user_id: &str,
        mode: InterviewMode,
        bypass: bool,
    ) -> CoreResult<PrerequisiteCheckResult> {
        if user_id.trim().is_empty() {
            return Err(CoreError::not_authenticated(
                "a signed-in user is required to start an interview",
            ));
        }

        let (piq, oir, ppdt, subscription) = tokio::join!(
            self.piq_status(user_id),
            self.oir_status(user_id),
            self.ppdt_status(user_id),
            self.subscription_status(user_id, mode, bypass),
        );
        let result = PrerequisiteCheckResult::from_statuses(mode, piq, oir, ppdt, subscription?);

        info!(
            user_id,
            mode = %mode,
            eligible = result.is_eligible(),
            failures = result.failure_reasons().len(),
            "prerequisite check complete"
        );
        Ok(result)
    }

    async fn piq_status(&self, user_id: &str) -> PiqStatus {
        match self.submissions.latest_piq_submission(user_id).await {
            Ok(None) => PiqStatus::NotStarted,
            Ok(Some(submission)) => match submission.score {
                Some(score) => PiqStatus::Completed {
                    submission_id: submission.id,
                    score,
                },
                None => PiqStatus::ScoringInProgress,
            },
            Err(e) => {
                warn!(user_id, error = %e, "PIQ status read failed, treating as not started");
                PiqStatus::NotStarted
            }
        }
    }

    async fn oir_status(&self, user_id: &str) -> OirStatus {
        match self.submissions.latest_oir_submission(user_id).await {
            Ok(None) => OirStatus::NotStarted,
            Ok(Some(submission)) => {
                OirStatus::from_score(submission.id, submission.score.unwrap_or(0.0))
            }
            Err(e) => {
                warn!(user_id, error = %e, "OIR status read failed, treating as not started");
                OirStatus::NotStarted
            }
        }
    }

    async fn ppdt_status(&self, user_id: &str) -> PpdtStatus {
        match self.submissions.latest_ppdt_submission(user_id).await {
            Ok(None) => PpdtStatus::NotStarted,
            Ok(Some(submission)) => PpdtStatus::Completed {
                submission_id: submission.id,
            },
            Err(e) => {
                warn!(user_id, error = %e, "PPDT status read failed, treating as not started");
                PpdtStatus::NotStarted
            }
        }
    }

    async fn subscription_status(
        &self,
        user_id: &str,
        mode: InterviewMode,
        bypass: bool,
    ) -> CoreResult<SubscriptionStatus> {
        if bypass {
            debug!(user_id, mode = %mode, "subscription check bypassed");
            return Ok(SubscriptionStatus::Available {
                tier: SubscriptionTier::Premium,
                remaining: i32::MAX,
                mode,
            });
        }

        let tier = self.limits.tier(user_id).await?;
        let limit = LimitCalculator::max_limit(tier, mode);
        if limit == 0 {
            return Ok(SubscriptionStatus::FreeTier);
        }

        let remaining = self.limits.remaining_count(user_id, mode).await?;
        if remaining > 0 {
            return Ok(SubscriptionStatus::Available {
                tier,
                remaining,
                mode,
            });
        }

        let used = self.limits.used_count(user_id, mode).await?;
        Ok(SubscriptionStatus::LimitReached { tier, used, limit })
    }
}
