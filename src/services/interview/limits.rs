//! Interview Limit Calculator
//!
//! Per-tier, per-mode interview quotas. The ledger's `remaining` count is
//! authoritative: it may reset usage on a rolling window, so it is not
//! required to equal `max_limit - used`.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tracing::debug;

use mock_interview_core::{
    CoreError, CoreResult, InterviewMode, SubscriptionLedger, SubscriptionTier, UsageInfo,
};

const LEDGER: &str = "SubscriptionLedger";

/// Ledger failures always surface as `UpstreamUnavailable`.
fn ledger_error(err: CoreError) -> CoreError {
    match err {
        CoreError::UpstreamUnavailable { .. } => err,
        other => CoreError::upstream(LEDGER, other.to_string()),
    }
}

pub struct LimitCalculator {
    ledger: Arc<dyn SubscriptionLedger>,
}

impl LimitCalculator {
    pub fn new(ledger: Arc<dyn SubscriptionLedger>) -> Self {
        Self { ledger }
    }

    /// Interviews allowed per window for `tier` in `mode`.
    pub fn max_limit(tier: SubscriptionTier, mode: InterviewMode) -> i32 {
        match (tier, mode) {
            (SubscriptionTier::Free, _) => 0,
            (SubscriptionTier::Pro, InterviewMode::Text) => 2,
            (SubscriptionTier::Pro, InterviewMode::Voice) => 0,
            (SubscriptionTier::Premium, _) => 2,
        }
    }

    pub async fn tier(&self, user_id: &str) -> CoreResult<SubscriptionTier> {
        self.ledger.tier(user_id).await.map_err(ledger_error)
    }

    async fn stats(&self, user_id: &str) -> CoreResult<HashMap<InterviewMode, i32>> {
        self.ledger.stats(user_id).await.map_err(ledger_error)
    }

    /// Interviews used in `mode`; a mode missing from the ledger stats is 0.
    pub async fn used_count(&self, user_id: &str, mode: InterviewMode) -> CoreResult<i32> {
        let stats = self.stats(user_id).await?;
        Ok(stats.get(&mode).copied().unwrap_or(0))
    }

    pub async fn remaining_count(&self, user_id: &str, mode: InterviewMode) -> CoreResult<i32> {
        self.ledger
            .remaining(user_id, mode)
            .await
            .map_err(ledger_error)
    }

    /// Usage for every mode. Ledger numbers that break the `UsageInfo`
    /// invariants surface as `InvariantViolation`.
    pub async fn usage_summary(
        &self,
        user_id: &str,
    ) -> CoreResult<BTreeMap<InterviewMode, UsageInfo>> {
        let (tier, stats) = tokio::try_join!(self.tier(user_id), self.stats(user_id))?;

        let mut summary = BTreeMap::new();
        for mode in InterviewMode::ALL {
            let remaining = self.remaining_count(user_id, mode).await?;
            let used = stats.get(&mode).copied().unwrap_or(0);
            let usage = UsageInfo::new(used, Self::max_limit(tier, mode), remaining)?;
            summary.insert(mode, usage);
        }
        debug!(user_id, tier = %tier, "computed usage summary");
        Ok(summary)
    }

    /// Whether the tier allows `mode` and the ledger reports quota left.
    pub async fn can_start(&self, user_id: &str, mode: InterviewMode) -> CoreResult<bool> {
        let tier = self.tier(user_id).await?;
        if Self::max_limit(tier, mode) == 0 {
            return Ok(false);
        }
        Ok(self.remaining_count(user_id, mode).await? > 0)
    }
}
