//! Question Cache Types
//!
//! Cache entry, query filter, statistics and the 40/40/20 distribution used by
//! the hybrid question strategy.
//!
//! - **PIQ-based (40%)**: generated from the candidate's PIQ, cached per owner
//!   for [`PIQ_CACHE_EXPIRATION_DAYS`] days or until the PIQ changes.
//! - **Generic (40%)**: curated pool, never expires.
//! - **Adaptive (20%)**: generated mid-session, never cached.

use std::collections::BTreeSet;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::olq::Olq;
use crate::question::InterviewQuestion;

/// Lifetime of cached PIQ-based questions.
pub const PIQ_CACHE_EXPIRATION_DAYS: u32 = 30;

/// Number of entries reported in [`QuestionCacheStats::most_used`].
pub const MOST_USED_LIMIT: usize = 5;

/// Question bucket in the hybrid strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionCacheType {
    PiqBased,
    Generic,
    Adaptive,
}

impl QuestionCacheType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PiqBased => "PIQ-Based Questions",
            Self::Generic => "Generic Questions",
            Self::Adaptive => "Adaptive Questions",
        }
    }

    /// Share of a session's questions, in percent.
    pub fn percentage(&self) -> usize {
        match self {
            Self::PiqBased => 40,
            Self::Generic => 40,
            Self::Adaptive => 20,
        }
    }
}

/// Per-bucket question counts for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDistribution {
    pub piq: usize,
    pub generic: usize,
    pub adaptive: usize,
}

impl QuestionDistribution {
    /// Split `total` into PIQ / generic / adaptive counts.
    ///
    /// PIQ and generic shares are rounded up; the generic share is capped so
    /// the three buckets never exceed `total`, and adaptive takes the rest.
    pub fn for_total(total: usize) -> Self {
        let piq = ceil_share(total, QuestionCacheType::PiqBased.percentage());
        let generic =
            ceil_share(total, QuestionCacheType::Generic.percentage()).min(total - piq);
        Self {
            piq,
            generic,
            adaptive: total - piq - generic,
        }
    }

    /// Questions produced up front (everything except adaptive).
    pub fn upfront(&self) -> usize {
        self.piq + self.generic
    }
}

/// `ceil(total * percent / 100)` without overflowing for large totals.
fn ceil_share(total: usize, percent: usize) -> usize {
    total / 100 * percent + (total % 100 * percent).div_ceil(100)
}

/// A cached question plus its ownership, expiry and consumption record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedQuestionEntry {
    id: String,
    question: InterviewQuestion,
    /// PIQ snapshot id; `None` for the generic pool
    owner_id: Option<String>,
    user_id: Option<String>,
    created_at: DateTime<Utc>,
    /// `None` for the non-expiring generic pool
    expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    consumed_by: BTreeSet<String>,
    #[serde(default)]
    usage_count: u32,
    #[serde(default)]
    last_used_at: Option<DateTime<Utc>>,
}

impl CachedQuestionEntry {
    /// Entry for a PIQ-based question owned by `owner_id`.
    pub fn piq(
        id: impl Into<String>,
        question: InterviewQuestion,
        owner_id: impl Into<String>,
        user_id: Option<String>,
        created_at: DateTime<Utc>,
        expiration_days: u32,
    ) -> CoreResult<Self> {
        let owner_id = owner_id.into();
        if owner_id.trim().is_empty() {
            return Err(CoreError::validation("cache owner id cannot be blank"));
        }
        if expiration_days == 0 {
            return Err(CoreError::validation(
                "PIQ-based questions must expire after at least one day",
            ));
        }
        Ok(Self {
            id: id.into(),
            question,
            owner_id: Some(owner_id),
            user_id,
            created_at,
            expires_at: Some(created_at + Duration::days(i64::from(expiration_days))),
            consumed_by: BTreeSet::new(),
            usage_count: 0,
            last_used_at: None,
        })
    }

    /// Entry for the curated generic pool. Never expires.
    pub fn generic(
        id: impl Into<String>,
        question: InterviewQuestion,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            question,
            owner_id: None,
            user_id: None,
            created_at,
            expires_at: None,
            consumed_by: BTreeSet::new(),
            usage_count: 0,
            last_used_at: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question(&self) -> &InterviewQuestion {
        &self.question
    }

    pub fn owner_id(&self) -> Option<&str> {
        self.owner_id.as_deref()
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn usage_count(&self) -> u32 {
        self.usage_count
    }

    pub fn last_used_at(&self) -> Option<DateTime<Utc>> {
        self.last_used_at
    }

    pub fn cache_type(&self) -> QuestionCacheType {
        if self.owner_id.is_some() {
            QuestionCacheType::PiqBased
        } else {
            QuestionCacheType::Generic
        }
    }

    /// Expired once `now` reaches the expiration timestamp.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| now >= expires_at)
    }

    pub fn is_consumed_by(&self, usage_key: &str) -> bool {
        self.consumed_by.contains(usage_key)
    }

    /// Record a consumer. Returns false (and changes nothing) when the key
    /// was already recorded.
    pub fn record_use(&mut self, usage_key: &str, at: DateTime<Utc>) -> bool {
        if !self.consumed_by.insert(usage_key.to_string()) {
            return false;
        }
        self.usage_count += 1;
        self.last_used_at = Some(at);
        true
    }
}

/// Filter for generic-pool lookups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenericQuestionFilter {
    /// Match questions targeting any of these OLQs; `None` for a balanced mix
    pub target_olqs: Option<Vec<Olq>>,
    /// Exact difficulty; questions without a difficulty match any level
    pub difficulty: Option<u8>,
}

impl GenericQuestionFilter {
    pub fn matches(&self, question: &InterviewQuestion) -> bool {
        let olq_match = match &self.target_olqs {
            Some(olqs) => question.targets_any(olqs),
            None => true,
        };
        let difficulty_match = match (self.difficulty, question.difficulty()) {
            (Some(wanted), Some(actual)) => wanted == actual,
            _ => true,
        };
        olq_match && difficulty_match
    }
}

/// Cache statistics for monitoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionCacheStats {
    pub total_cached: usize,
    pub piq_based_count: usize,
    pub generic_count: usize,
    pub expired_count: usize,
    pub most_used: Vec<CachedQuestionEntry>,
    /// Served / requested PIQ lookups, 0-100
    pub cache_hit_rate: f32,
}

impl QuestionCacheStats {
    pub fn new(
        piq_based_count: usize,
        generic_count: usize,
        expired_count: usize,
        most_used: Vec<CachedQuestionEntry>,
        cache_hit_rate: f32,
    ) -> CoreResult<Self> {
        if most_used.len() > MOST_USED_LIMIT {
            return Err(CoreError::invariant(format!(
                "most used questions limited to top {}",
                MOST_USED_LIMIT
            )));
        }
        if !(0.0..=100.0).contains(&cache_hit_rate) {
            return Err(CoreError::invariant(format!(
                "cache hit rate {} outside 0-100",
                cache_hit_rate
            )));
        }
        Ok(Self {
            total_cached: piq_based_count + generic_count,
            piq_based_count,
            generic_count,
            expired_count,
            most_used,
            cache_hit_rate,
        })
    }
}
