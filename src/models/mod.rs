//! Data Models
//!
//! Engine configuration models. Domain types live in `mock_interview_core`.

pub mod settings;

pub use settings::{ConfigUpdate, EngineConfig};
