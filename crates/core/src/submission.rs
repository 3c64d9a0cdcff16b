//! Test Submissions
//!
//! The latest PIQ, OIR or PPDT submission as reported by the submission store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmissionStatus {
    Submitted,
    UnderReview,
    Graded,
}

impl SubmissionStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Submitted => "Submitted",
            Self::UnderReview => "Under Review",
            Self::Graded => "Graded",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub user_id: String,
    pub status: SubmissionStatus,
    /// AI score for PIQ, percentage score for OIR; absent until scored
    #[serde(default)]
    pub score: Option<f32>,
    /// Opaque form payload (PIQ answers etc.)
    #[serde(default)]
    pub profile: Value,
    pub submitted_at: DateTime<Utc>,
}

impl Submission {
    pub fn new(id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            status: SubmissionStatus::Submitted,
            score: None,
            profile: Value::Null,
            submitted_at: Utc::now(),
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self.status = SubmissionStatus::Graded;
        self
    }

    pub fn with_profile(mut self, profile: Value) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_status(mut self, status: SubmissionStatus) -> Self {
        self.status = status;
        self
    }
}
