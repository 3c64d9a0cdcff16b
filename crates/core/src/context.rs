//! Session Context
//!
//! Every cache call receives an explicit `SessionContext` instead of reading
//! an ambient "current session". It carries three identifiers:
//!
//! 1. `user_id` - the authenticated candidate
//! 2. `owner_id` - the PIQ snapshot that owns personalized cache entries
//! 3. `session_id` - the interview session consuming questions
//!
//! Usage exclusion is keyed on the owner, so questions consumed under one PIQ
//! snapshot can still be served to a different owner.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    user_id: String,
    owner_id: String,
    session_id: String,
}

impl SessionContext {
    /// Create a context whose session id defaults to the owner id.
    ///
    /// Fails with `NotAuthenticated` when either identifier is blank.
    pub fn new(user_id: impl Into<String>, owner_id: impl Into<String>) -> CoreResult<Self> {
        let user_id = user_id.into();
        let owner_id = owner_id.into();
        if user_id.trim().is_empty() {
            return Err(CoreError::not_authenticated("user id is missing"));
        }
        if owner_id.trim().is_empty() {
            return Err(CoreError::not_authenticated("PIQ owner id is missing"));
        }
        Ok(Self {
            session_id: owner_id.clone(),
            user_id,
            owner_id,
        })
    }

    /// Attach a distinct interview session id.
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        let session_id = session_id.into();
        if !session_id.trim().is_empty() {
            self.session_id = session_id;
        }
        self
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Key recorded on cache entries when a question is consumed.
    pub fn usage_key(&self) -> &str {
        &self.owner_id
    }
}
