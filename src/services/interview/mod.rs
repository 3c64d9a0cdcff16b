//! Interview Services
//!
//! Question orchestration and eligibility gating for mock interviews.
//!
//! ## Architecture
//! - `orchestrator.rs` - Hybrid 40/40/20 question blending with cache-first PIQ generation
//! - `prerequisites.rs` - Concurrent PIQ / OIR / PPDT / subscription checks
//! - `limits.rs` - Per-tier, per-mode interview quotas
//! - `maintenance.rs` - Periodic expired-cache sweep

pub mod limits;
pub mod maintenance;
pub mod orchestrator;
pub mod prerequisites;

pub use limits::LimitCalculator;
pub use maintenance::CacheMaintenance;
pub use orchestrator::{format_profile, GenerationRequest, QuestionOrchestrator};
pub use prerequisites::PrerequisiteGate;
