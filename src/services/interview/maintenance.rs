//! Cache Maintenance
//!
//! Background sweep of expired question-cache entries. The sweep is a pure
//! timestamp comparison, so it runs alongside reads without coordination.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use mock_interview_core::{CoreError, CoreResult, QuestionCache};

/// Handle to the periodic cleanup task.
pub struct CacheMaintenance {
    cancel_token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl CacheMaintenance {
    /// Sweep once now, then every `interval` until stopped.
    pub fn spawn(cache: Arc<dyn QuestionCache>, interval: Duration) -> CoreResult<Self> {
        if interval.is_zero() {
            return Err(CoreError::validation("cleanup interval must be positive"));
        }

        let cancel_token = CancellationToken::new();
        let cancel = cancel_token.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = Self::run_once(cache.as_ref()).await {
                            warn!(error = %e, "question cache sweep failed");
                        }
                    }
                    _ = cancel.cancelled() => {
                        debug!("question cache maintenance stopped");
                        break;
                    }
                }
            }
        });

        info!(interval_secs = interval.as_secs(), "question cache maintenance started");
        Ok(Self {
            cancel_token,
            handle: Some(handle),
        })
    }

    /// Remove expired entries once. Returns the number removed.
    pub async fn run_once(cache: &dyn QuestionCache) -> CoreResult<usize> {
        let removed = cache.cleanup_expired().await?;
        if removed > 0 {
            info!(removed, "removed expired cached questions");
        } else {
            debug!("no expired cached questions");
        }
        Ok(removed)
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signal the task to stop without waiting for it.
    pub fn stop(&self) {
        self.cancel_token.cancel();
    }

    /// Stop the task and wait for it to exit.
    pub async fn shutdown(mut self) {
        self.cancel_token.cancel();
        if let Some(handle) = self.handle.take() {
            if let Err(e) = handle.await {
                warn!(error = %e, "question cache maintenance task ended abnormally");
            }
        }
    }
}

impl Drop for CacheMaintenance {
    fn drop(&mut self) {
        self.cancel_token.cancel();
    }
}
