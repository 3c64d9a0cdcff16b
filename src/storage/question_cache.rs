//! In-Memory Question Cache
//!
//! Thread-safe `QuestionCache` holding PIQ-based entries per owner plus the
//! curated generic pool. Critical sections are short `std::sync::RwLock`
//! sections with no awaits inside them.

use std::cmp::Reverse;
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use mock_interview_core::cache::MOST_USED_LIMIT;
use mock_interview_core::{
    CachedQuestionEntry, CoreError, CoreResult, GenericQuestionFilter, InterviewQuestion,
    QuestionCache, QuestionCacheStats, QuestionCacheType, SessionContext,
};

use crate::utils::error::{AppError, AppResult};

/// Time source for expiry decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Default)]
struct CacheState {
    entries: HashMap<String, CachedQuestionEntry>,
    piq_requested: u64,
    piq_served: u64,
}

impl CacheState {
    fn holds(&self, owner_id: &str, question_id: &str) -> bool {
        self.entries
            .values()
            .any(|e| e.owner_id() == Some(owner_id) && e.question().id() == question_id)
    }

    fn hit_rate(&self) -> f32 {
        if self.piq_requested == 0 {
            return 0.0;
        }
        let rate = self.piq_served as f64 / self.piq_requested as f64 * 100.0;
        rate.min(100.0) as f32
    }
}

/// `QuestionCache` backed by process memory.
pub struct InMemoryQuestionCache {
    state: RwLock<CacheState>,
    clock: Arc<dyn Clock>,
}

impl InMemoryQuestionCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: RwLock::new(CacheState::default()),
            clock,
        }
    }

    /// Add curated questions to the generic pool. Questions whose id is
    /// already pooled are skipped. Returns the number added.
    pub fn seed_generic_pool(
        &self,
        questions: impl IntoIterator<Item = InterviewQuestion>,
    ) -> CoreResult<usize> {
        let now = self.clock.now();
        let mut state = self.write()?;
        let mut added = 0;
        for question in questions {
            let entry_id = generic_entry_id(question.id());
            if state.entries.contains_key(&entry_id) {
                continue;
            }
            let entry = CachedQuestionEntry::generic(entry_id.clone(), question, now);
            state.entries.insert(entry_id, entry);
            added += 1;
        }
        Ok(added)
    }

    /// Seed the generic pool from a JSON array of questions.
    pub fn load_generic_pool(&self, path: &Path) -> AppResult<usize> {
        let content = fs::read_to_string(path)?;
        let questions: Vec<InterviewQuestion> = serde_json::from_str(&content)?;
        for question in &questions {
            question.validate().map_err(|e| {
                AppError::validation(format!("generic pool {}: {}", path.display(), e))
            })?;
        }
        let added = self.seed_generic_pool(questions)?;
        info!(path = %path.display(), added, "loaded generic question pool");
        Ok(added)
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.read().map(|s| s.entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Snapshot of the entries owned by `owner_id`.
    pub fn owner_entries(&self, owner_id: &str) -> CoreResult<Vec<CachedQuestionEntry>> {
        let state = self.read()?;
        Ok(state
            .entries
            .values()
            .filter(|e| e.owner_id() == Some(owner_id))
            .cloned()
            .collect())
    }

    fn read(&self) -> CoreResult<RwLockReadGuard<'_, CacheState>> {
        self.state
            .read()
            .map_err(|_| CoreError::internal("question cache lock poisoned"))
    }

    fn write(&self) -> CoreResult<RwLockWriteGuard<'_, CacheState>> {
        self.state
            .write()
            .map_err(|_| CoreError::internal("question cache lock poisoned"))
    }
}

impl Default for InMemoryQuestionCache {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryQuestionCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryQuestionCache")
            .field("entries", &self.len())
            .finish()
    }
}

fn generic_entry_id(question_id: &str) -> String {
    format!("generic:{}", question_id)
}

fn piq_entry_id(owner_id: &str, question_id: &str) -> String {
    format!("piq:{}:{}", owner_id, question_id)
}

/// Least-used first, newest first among equals.
fn take_ordered(mut entries: Vec<&CachedQuestionEntry>, limit: usize) -> Vec<InterviewQuestion> {
    entries.sort_by_key(|e| (e.usage_count(), Reverse(e.created_at()), e.id().to_string()));
    entries
        .into_iter()
        .take(limit)
        .map(|e| e.question().clone())
        .collect()
}

#[async_trait]
impl QuestionCache for InMemoryQuestionCache {
    async fn get_piq_questions(
        &self,
        ctx: &SessionContext,
        limit: usize,
        exclude_used: bool,
    ) -> CoreResult<Vec<InterviewQuestion>> {
        let now = self.clock.now();
        let mut state = self.write()?;
        let candidates: Vec<&CachedQuestionEntry> = state
            .entries
            .values()
            .filter(|e| e.owner_id() == Some(ctx.owner_id()))
            .filter(|e| !e.is_expired(now))
            .filter(|e| !exclude_used || !e.is_consumed_by(ctx.usage_key()))
            .collect();
        let questions = take_ordered(candidates, limit);

        state.piq_requested += limit as u64;
        state.piq_served += questions.len() as u64;
        debug!(
            owner_id = ctx.owner_id(),
            requested = limit,
            served = questions.len(),
            "PIQ cache lookup"
        );
        Ok(questions)
    }

    async fn get_generic_questions(
        &self,
        ctx: &SessionContext,
        filter: &GenericQuestionFilter,
        limit: usize,
        exclude_used: bool,
    ) -> CoreResult<Vec<InterviewQuestion>> {
        let state = self.read()?;
        let candidates: Vec<&CachedQuestionEntry> = state
            .entries
            .values()
            .filter(|e| e.cache_type() == QuestionCacheType::Generic)
            .filter(|e| filter.matches(e.question()))
            .filter(|e| !exclude_used || !e.is_consumed_by(ctx.usage_key()))
            .collect();
        Ok(take_ordered(candidates, limit))
    }

    async fn cache_piq_questions(
        &self,
        ctx: &SessionContext,
        questions: &[InterviewQuestion],
        expiration_days: u32,
    ) -> CoreResult<()> {
        let now = self.clock.now();
        let mut state = self.write()?;
        let mut stored = 0;
        for question in questions {
            if state.holds(ctx.owner_id(), question.id()) {
                continue;
            }
            let entry_id = piq_entry_id(ctx.owner_id(), question.id());
            let entry = CachedQuestionEntry::piq(
                entry_id.clone(),
                question.clone(),
                ctx.owner_id(),
                Some(ctx.user_id().to_string()),
                now,
                expiration_days,
            )?;
            state.entries.insert(entry_id, entry);
            stored += 1;
        }
        debug!(
            owner_id = ctx.owner_id(),
            stored,
            skipped = questions.len() - stored,
            expiration_days,
            "cached PIQ-based questions"
        );
        Ok(())
    }

    async fn mark_question_used(
        &self,
        ctx: &SessionContext,
        question_id: &str,
        cache_type: QuestionCacheType,
    ) -> CoreResult<()> {
        let now = self.clock.now();
        let mut state = self.write()?;
        let key = match cache_type {
            QuestionCacheType::PiqBased => piq_entry_id(ctx.owner_id(), question_id),
            QuestionCacheType::Generic => generic_entry_id(question_id),
            // adaptive questions are never cached
            QuestionCacheType::Adaptive => return Ok(()),
        };
        if let Some(entry) = state.entries.get_mut(&key) {
            entry.record_use(ctx.usage_key(), now);
        }
        Ok(())
    }

    async fn invalidate_owner_cache(&self, owner_id: &str) -> CoreResult<usize> {
        let mut state = self.write()?;
        let before = state.entries.len();
        state.entries.retain(|_, e| e.owner_id() != Some(owner_id));
        let removed = before - state.entries.len();
        info!(owner_id, removed, "invalidated owner question cache");
        Ok(removed)
    }

    async fn cleanup_expired(&self) -> CoreResult<usize> {
        let now = self.clock.now();
        let mut state = self.write()?;
        let before = state.entries.len();
        state.entries.retain(|_, e| !e.is_expired(now));
        Ok(before - state.entries.len())
    }

    async fn get_cache_stats(&self, user_id: Option<&str>) -> CoreResult<QuestionCacheStats> {
        let now = self.clock.now();
        let state = self.read()?;
        let in_scope: Vec<&CachedQuestionEntry> = state
            .entries
            .values()
            .filter(|e| match (user_id, e.cache_type()) {
                (Some(user), QuestionCacheType::PiqBased) => e.user_id() == Some(user),
                _ => true,
            })
            .collect();

        let piq_based_count = in_scope
            .iter()
            .filter(|e| e.cache_type() == QuestionCacheType::PiqBased)
            .count();
        let generic_count = in_scope.len() - piq_based_count;
        let expired_count = in_scope.iter().filter(|e| e.is_expired(now)).count();

        let mut most_used: Vec<&CachedQuestionEntry> =
            in_scope.iter().copied().filter(|e| e.usage_count() > 0).collect();
        most_used.sort_by_key(|e| (Reverse(e.usage_count()), e.id().to_string()));
        let most_used = most_used
            .into_iter()
            .take(MOST_USED_LIMIT)
            .cloned()
            .collect();

        QuestionCacheStats::new(
            piq_based_count,
            generic_count,
            expired_count,
            most_used,
            state.hit_rate(),
        )
    }
}
