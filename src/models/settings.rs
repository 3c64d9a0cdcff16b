//! Settings Models
//!
//! Engine configuration stored in config.json.

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Upper bound for a single session's question count
pub const MAX_TOTAL_QUESTIONS: usize = 50;

/// Engine configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Questions per session when the caller does not specify
    pub default_total_questions: usize,
    /// Difficulty (1-5) for generated questions
    pub default_difficulty: u8,
    /// Hours between expired-cache sweeps
    pub cleanup_interval_hours: u64,
    /// Skip the subscription ledger in eligibility checks (testing only)
    #[serde(default)]
    pub bypass_subscription_check: bool,
    /// JSON file seeding the curated generic question pool
    #[serde(default)]
    pub generic_pool_path: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_total_questions: 10,
            default_difficulty: 3,
            cleanup_interval_hours: 24,
            bypass_subscription_check: false,
            generic_pool_path: None,
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigUpdate {
    pub default_total_questions: Option<usize>,
    pub default_difficulty: Option<u8>,
    pub cleanup_interval_hours: Option<u64>,
    pub bypass_subscription_check: Option<bool>,
    pub generic_pool_path: Option<PathBuf>,
}

impl EngineConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: ConfigUpdate) {
        if let Some(total) = update.default_total_questions {
            self.default_total_questions = total;
        }
        if let Some(difficulty) = update.default_difficulty {
            self.default_difficulty = difficulty;
        }
        if let Some(hours) = update.cleanup_interval_hours {
            self.cleanup_interval_hours = hours;
        }
        if let Some(bypass) = update.bypass_subscription_check {
            self.bypass_subscription_check = bypass;
        }
        if let Some(path) = update.generic_pool_path {
            self.generic_pool_path = Some(path);
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.default_total_questions == 0 || self.default_total_questions > MAX_TOTAL_QUESTIONS {
            return Err(format!(
                "default_total_questions must be between 1 and {}, got {}",
                MAX_TOTAL_QUESTIONS, self.default_total_questions
            ));
        }

        if !(1..=5).contains(&self.default_difficulty) {
            return Err(format!(
                "default_difficulty must be between 1 and 5, got {}",
                self.default_difficulty
            ));
        }

        // At most one sweep per hour, at least one per 30 days
        if !(1..=720).contains(&self.cleanup_interval_hours) {
            return Err(format!(
                "cleanup_interval_hours must be between 1 and 720, got {}",
                self.cleanup_interval_hours
            ));
        }

        Ok(())
    }

    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_hours * 60 * 60)
    }
}
