//! Prerequisite Check Result
//!
//! Closed status unions for the four independent interview prerequisites and
//! the aggregated eligibility result built from them.

use serde::{Deserialize, Serialize};

use crate::subscription::{InterviewMode, SubscriptionTier};

/// Minimum OIR percentage (inclusive) required for interview eligibility.
pub const OIR_PASS_THRESHOLD: f32 = 50.0;

/// PIQ completion and AI scoring status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PiqStatus {
    NotStarted,
    /// Submitted, AI score not yet available
    ScoringInProgress,
    Completed { submission_id: String, score: f32 },
}

impl PiqStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::ScoringInProgress => "Scoring in Progress",
            Self::Completed { .. } => "Completed",
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// OIR completion and score status.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OirStatus {
    NotStarted,
    CompletedBelowThreshold { score: f32 },
    Completed { submission_id: String, score: f32 },
}

impl OirStatus {
    /// Classify a scored OIR submission against [`OIR_PASS_THRESHOLD`].
    pub fn from_score(submission_id: impl Into<String>, score: f32) -> Self {
        if score >= OIR_PASS_THRESHOLD {
            Self::Completed {
                submission_id: submission_id.into(),
                score,
            }
        } else {
            Self::CompletedBelowThreshold { score }
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::CompletedBelowThreshold { .. } => "Score Below 50%",
            Self::Completed { .. } => "Completed",
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// PPDT completion status. Binary, no score threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PpdtStatus {
    NotStarted,
    Completed { submission_id: String },
}

impl PpdtStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Completed { .. } => "Completed",
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Subscription tier and interview quota status for the desired mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// The tier grants no access to the desired mode
    FreeTier,
    LimitReached {
        tier: SubscriptionTier,
        used: i32,
        limit: i32,
    },
    Available {
        tier: SubscriptionTier,
        remaining: i32,
        mode: InterviewMode,
    },
}

impl SubscriptionStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::FreeTier => "Free Tier",
            Self::LimitReached { .. } => "Limit Reached",
            Self::Available { .. } => "Available",
        }
    }

    pub fn is_satisfied(&self) -> bool {
        matches!(self, Self::Available { .. })
    }
}

/// Aggregated prerequisite validation for interview eligibility.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrerequisiteCheckResult {
    is_eligible: bool,
    mode: InterviewMode,
    piq_status: PiqStatus,
    oir_status: OirStatus,
    ppdt_status: PpdtStatus,
    subscription_status: SubscriptionStatus,
    failure_reasons: Vec<String>,
}

impl PrerequisiteCheckResult {
    /// Derive eligibility and the ordered failure reasons (PIQ, OIR, PPDT,
    /// subscription) from the four statuses.
    pub fn from_statuses(
        mode: InterviewMode,
        piq_status: PiqStatus,
        oir_status: OirStatus,
        ppdt_status: PpdtStatus,
        subscription_status: SubscriptionStatus,
    ) -> Self {
        let mut failure_reasons = Vec::new();

        match &piq_status {
            PiqStatus::NotStarted => {
                failure_reasons.push("Complete Personal Information Questionnaire (PIQ)".to_string())
            }
            PiqStatus::ScoringInProgress => {
                failure_reasons.push("Wait for PIQ AI scoring to complete".to_string())
            }
            PiqStatus::Completed { .. } => {}
        }

        match &oir_status {
            OirStatus::NotStarted => {
                failure_reasons.push("Complete Officer Intelligence Rating (OIR) test".to_string())
            }
            OirStatus::CompletedBelowThreshold { score } => failure_reasons.push(format!(
                "Score at least {}% in OIR test (current: {}%)",
                OIR_PASS_THRESHOLD as i32,
                score.floor() as i32
            )),
            OirStatus::Completed { .. } => {}
        }

        match &ppdt_status {
            PpdtStatus::NotStarted => failure_reasons
                .push("Complete Picture Perception & Description Test (PPDT)".to_string()),
            PpdtStatus::Completed { .. } => {}
        }

        match &subscription_status {
            SubscriptionStatus::FreeTier => failure_reasons.push(format!(
                "Upgrade your subscription to access {} interviews",
                mode
            )),
            SubscriptionStatus::LimitReached { tier, used, limit } => failure_reasons.push(
                format!("Interview limit reached for {} tier ({}/{})", tier, used, limit),
            ),
            SubscriptionStatus::Available { .. } => {}
        }

        Self {
            is_eligible: failure_reasons.is_empty(),
            mode,
            piq_status,
            oir_status,
            ppdt_status,
            subscription_status,
            failure_reasons,
        }
    }

    pub fn is_eligible(&self) -> bool {
        self.is_eligible
    }

    pub fn mode(&self) -> InterviewMode {
        self.mode
    }

    pub fn piq_status(&self) -> &PiqStatus {
        &self.piq_status
    }

    pub fn oir_status(&self) -> &OirStatus {
        &self.oir_status
    }

    pub fn ppdt_status(&self) -> &PpdtStatus {
        &self.ppdt_status
    }

    pub fn subscription_status(&self) -> &SubscriptionStatus {
        &self.subscription_status
    }

    pub fn failure_reasons(&self) -> &[String] {
        &self.failure_reasons
    }

    /// User-facing summary: the eligible message or a bulleted checklist.
    pub fn eligibility_message(&self) -> String {
        if self.is_eligible {
            "You are eligible to start the interview".to_string()
        } else {
            let items: Vec<String> = self
                .failure_reasons
                .iter()
                .map(|reason| format!("• {}", reason))
                .collect();
            format!(
                "You must complete the following requirements:\n{}",
                items.join("\n")
            )
        }
    }

    /// Share of satisfied prerequisites, 0-100.
    pub fn completion_progress(&self) -> u8 {
        let satisfied = [
            self.piq_status.is_satisfied(),
            self.oir_status.is_satisfied(),
            self.ppdt_status.is_satisfied(),
            self.subscription_status.is_satisfied(),
        ]
        .iter()
        .filter(|done| **done)
        .count();
        (satisfied * 25) as u8
    }
}
