//! Subscription and Usage Types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Subscription tier reported by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionTier {
    Free,
    Pro,
    Premium,
}

impl SubscriptionTier {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Free => "Free",
            Self::Pro => "Pro",
            Self::Premium => "Premium",
        }
    }
}

impl fmt::Display for SubscriptionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// How the interview is conducted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterviewMode {
    Text,
    Voice,
}

impl InterviewMode {
    pub const ALL: [InterviewMode; 2] = [InterviewMode::Text, InterviewMode::Voice];

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Voice => "voice",
        }
    }
}

impl fmt::Display for InterviewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Used / limit / remaining interview counts for one mode.
///
/// All three are non-negative and `used + remaining <= limit`. Ledger numbers
/// that break this are rejected, never clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageInfo {
    used: i32,
    limit: i32,
    remaining: i32,
}

impl UsageInfo {
    pub fn new(used: i32, limit: i32, remaining: i32) -> CoreResult<Self> {
        if used < 0 || limit < 0 || remaining < 0 {
            return Err(CoreError::invariant(format!(
                "usage counts must be non-negative (used={}, limit={}, remaining={})",
                used, limit, remaining
            )));
        }
        let consumed = i64::from(used) + i64::from(remaining);
        if consumed > i64::from(limit) {
            return Err(CoreError::invariant(format!(
                "used ({}) + remaining ({}) exceeds limit ({})",
                used, remaining, limit
            )));
        }
        Ok(Self {
            used,
            limit,
            remaining,
        })
    }

    pub fn used(&self) -> i32 {
        self.used
    }

    pub fn limit(&self) -> i32 {
        self.limit
    }

    pub fn remaining(&self) -> i32 {
        self.remaining
    }

    pub fn can_start(&self) -> bool {
        self.remaining > 0
    }
}
