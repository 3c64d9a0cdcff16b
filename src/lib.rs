//! Mock Interview Engine
//!
//! Hybrid question generation and eligibility gating for SSB mock interviews.
//! It includes:
//! - Question orchestration (PIQ-based / generic / adaptive, 40/40/20)
//! - Prerequisite gating and subscription limits
//! - In-memory question cache with periodic maintenance
//! - JSON configuration and application wiring
//!
//! Domain types and collaborator traits live in `mock_interview_core` and are
//! re-exported as `domain`.

pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

pub use mock_interview_core as domain;

pub use models::settings::{ConfigUpdate, EngineConfig};
pub use services::interview::{
    CacheMaintenance, GenerationRequest, LimitCalculator, PrerequisiteGate, QuestionOrchestrator,
};
pub use state::InterviewEngine;
pub use storage::{Clock, ConfigService, InMemoryQuestionCache, SystemClock};
pub use utils::error::{AppError, AppResult};
