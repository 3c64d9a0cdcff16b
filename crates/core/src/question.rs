//! Interview Questions
//!
//! The immutable question value shared between the cache, the AI generator
//! and the orchestrator.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::olq::Olq;

/// Where a question came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionSource {
    /// Personalized from the candidate's PIQ
    PiqBased,
    /// Curated generic pool
    Generic,
    /// Generated mid-session from prior responses
    Adaptive,
    /// Free-form AI output not tied to a PIQ
    AiGenerated,
}

impl QuestionSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::PiqBased => "PIQ-Based",
            Self::Generic => "Generic",
            Self::Adaptive => "Adaptive",
            Self::AiGenerated => "AI-Generated",
        }
    }
}

/// A single interview question.
///
/// Fields are private: a question is assembled with the `with_*` builders and
/// is read-only once handed to the cache or the orchestrator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestion {
    id: String,
    question_text: String,
    #[serde(default)]
    target_olqs: BTreeSet<Olq>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difficulty: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    context: Option<String>,
    source: QuestionSource,
}

impl InterviewQuestion {
    /// Create a question; blank ids or texts are rejected.
    pub fn new(
        id: impl Into<String>,
        question_text: impl Into<String>,
        source: QuestionSource,
    ) -> CoreResult<Self> {
        let id = id.into();
        let question_text = question_text.into();
        if id.trim().is_empty() {
            return Err(CoreError::validation("question id cannot be blank"));
        }
        if question_text.trim().is_empty() {
            return Err(CoreError::validation("question text cannot be blank"));
        }
        Ok(Self {
            id,
            question_text,
            target_olqs: BTreeSet::new(),
            difficulty: None,
            context: None,
            source,
        })
    }

    /// Replace the id. A blank id leaves the question unchanged.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        if !id.trim().is_empty() {
            self.id = id;
        }
        self
    }

    pub fn with_target_olqs(mut self, olqs: impl IntoIterator<Item = Olq>) -> Self {
        self.target_olqs = olqs.into_iter().collect();
        self
    }

    /// Difficulty on the 1-5 scale.
    pub fn with_difficulty(mut self, difficulty: u8) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Re-check the invariants `new` enforces plus the difficulty range, for
    /// questions that arrived through deserialization.
    pub fn validate(&self) -> CoreResult<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::validation("question id cannot be blank"));
        }
        if self.question_text.trim().is_empty() {
            return Err(CoreError::validation(format!(
                "question {} has blank text",
                self.id
            )));
        }
        if let Some(difficulty) = self.difficulty {
            if !(1..=5).contains(&difficulty) {
                return Err(CoreError::validation(format!(
                    "question {} difficulty must be between 1 and 5, got {}",
                    self.id, difficulty
                )));
            }
        }
        Ok(())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn question_text(&self) -> &str {
        &self.question_text
    }

    pub fn target_olqs(&self) -> &BTreeSet<Olq> {
        &self.target_olqs
    }

    pub fn difficulty(&self) -> Option<u8> {
        self.difficulty
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    pub fn source(&self) -> QuestionSource {
        self.source
    }

    /// True when the question targets at least one of `olqs`.
    ///
    /// An empty filter matches every question.
    pub fn targets_any(&self, olqs: &[Olq]) -> bool {
        olqs.is_empty() || olqs.iter().any(|olq| self.target_olqs.contains(olq))
    }
}
