//! Services
//!
//! Business logic services for the interview engine.

pub mod interview;

pub use interview::{
    CacheMaintenance, GenerationRequest, LimitCalculator, PrerequisiteGate, QuestionOrchestrator,
};
