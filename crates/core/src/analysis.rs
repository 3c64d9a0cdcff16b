//! Response Analysis
//!
//! Result of AI analysis of a candidate's free-text answer.
//!
//! OLQ scores use the SSB convention: 1-10 where LOWER is better.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::olq::Olq;

/// Score for one OLQ with the model's confidence and supporting evidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OlqScore {
    score: u8,
    confidence: u8,
    reasoning: String,
    #[serde(default)]
    evidence: Vec<String>,
}

impl OlqScore {
    pub fn new(
        score: u8,
        confidence: u8,
        reasoning: impl Into<String>,
        evidence: Vec<String>,
    ) -> CoreResult<Self> {
        if !(1..=10).contains(&score) {
            return Err(CoreError::validation(format!(
                "OLQ score must be between 1 and 10, got {}",
                score
            )));
        }
        if confidence > 100 {
            return Err(CoreError::validation(format!(
                "confidence must be between 0 and 100, got {}",
                confidence
            )));
        }
        Ok(Self {
            score,
            confidence,
            reasoning: reasoning.into(),
            evidence,
        })
    }

    pub fn score(&self) -> u8 {
        self.score
    }

    pub fn confidence(&self) -> u8 {
        self.confidence
    }

    pub fn reasoning(&self) -> &str {
        &self.reasoning
    }

    pub fn evidence(&self) -> &[String] {
        &self.evidence
    }

    pub fn rating(&self) -> &'static str {
        match self.score {
            1..=3 => "Exceptional",
            4 => "Excellent",
            5 => "Very Good",
            6 => "Good",
            7 => "Average",
            8 => "Below Average",
            _ => "Poor",
        }
    }
}

/// Analysis of one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseAnalysis {
    question_id: String,
    olq_scores: BTreeMap<Olq, OlqScore>,
    overall_confidence: u8,
    #[serde(default)]
    key_insights: Vec<String>,
    #[serde(default)]
    suggested_follow_up: Option<String>,
}

impl ResponseAnalysis {
    pub fn new(
        question_id: impl Into<String>,
        olq_scores: BTreeMap<Olq, OlqScore>,
        overall_confidence: u8,
        key_insights: Vec<String>,
        suggested_follow_up: Option<String>,
    ) -> CoreResult<Self> {
        if overall_confidence > 100 {
            return Err(CoreError::validation(format!(
                "overall confidence must be between 0 and 100, got {}",
                overall_confidence
            )));
        }
        Ok(Self {
            question_id: question_id.into(),
            olq_scores,
            overall_confidence,
            key_insights,
            suggested_follow_up,
        })
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn olq_scores(&self) -> &BTreeMap<Olq, OlqScore> {
        &self.olq_scores
    }

    pub fn overall_confidence(&self) -> u8 {
        self.overall_confidence
    }

    pub fn key_insights(&self) -> &[String] {
        &self.key_insights
    }

    pub fn suggested_follow_up(&self) -> Option<&str> {
        self.suggested_follow_up.as_deref()
    }

    /// OLQs scoring at or worse than `threshold`, worst first.
    ///
    /// Feeds `weak_olqs` for adaptive question generation.
    pub fn weak_olqs(&self, threshold: u8) -> Vec<Olq> {
        let mut weak: Vec<(Olq, u8)> = self
            .olq_scores
            .iter()
            .filter(|(_, score)| score.score() >= threshold)
            .map(|(olq, score)| (*olq, score.score()))
            .collect();
        weak.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        weak.into_iter().map(|(olq, _)| olq).collect()
    }
}
