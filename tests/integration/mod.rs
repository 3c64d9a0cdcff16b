//! Integration Tests Module
//!
//! End-to-end tests for the mock interview engine against hand-written mock
//! collaborators and the in-memory question cache.



// Prerequisite gating
mod prerequisites_test;

// Interview limits
mod limits_test;


// Engine wiring and configuration
mod engine_test;
