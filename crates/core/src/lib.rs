//! Mock Interview Core
//!
//! Domain model, error taxonomy and collaborator traits for the mock interview
//! engine. This crate has no dependency on service code, storage or any
//! runtime.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `olq` - Officer-Like Quality taxonomy
//! - `question` - Immutable interview question value
//! - `cache` - Cache entries, filters, stats and the 40/40/20 distribution
//! - `subscription` - Tiers, modes and validated usage counts
//! - `prerequisite` - Status unions and the aggregated eligibility result
//! - `submission` - PIQ / OIR / PPDT submission records
//! - `analysis` - AI response analysis
//! - `context` - Explicit session context threaded through cache calls
//! - `collaborators` - Async traits for the external systems

pub mod analysis;
pub mod cache;
pub mod collaborators;
pub mod context;
pub mod error;
pub mod olq;
pub mod prerequisite;
pub mod question;
pub mod submission;
pub mod subscription;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Domain Model ───────────────────────────────────────────────────────
pub use analysis::{OlqScore, ResponseAnalysis};
pub use cache::{
    CachedQuestionEntry, GenericQuestionFilter, QuestionCacheStats, QuestionCacheType,
    QuestionDistribution, PIQ_CACHE_EXPIRATION_DAYS,
};
pub use olq::{Olq, OlqCategory};
pub use prerequisite::{
    OirStatus, PiqStatus, PpdtStatus, PrerequisiteCheckResult, SubscriptionStatus,
    OIR_PASS_THRESHOLD,
};
pub use question::{InterviewQuestion, QuestionSource};
pub use submission::{Submission, SubmissionStatus};
pub use subscription::{InterviewMode, SubscriptionTier, UsageInfo};

// ── Session Context ────────────────────────────────────────────────────
pub use context::SessionContext;

// ── Collaborators ──────────────────────────────────────────────────────
pub use collaborators::{AiGenerator, QuestionCache, SubmissionStore, SubscriptionLedger};
