//! Storage Layer
//!
//! JSON config persistence and the in-memory question cache.

pub mod config;
pub mod question_cache;

pub use config::*;
pub use question_cache::*;
