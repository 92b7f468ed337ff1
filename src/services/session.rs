// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Server-side sessions.

use crate::db::{collections, Commit, JsonStore};
use crate::error::AppError;
use crate::models::Session;
use chrono::{Duration, Utc};
use uuid::Uuid;

/// Sessions stay valid for 7 days and are never renewed.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Session manager over the `sessions` collection.
#[derive(Clone)]
pub struct SessionService {
    store: JsonStore,
    ttl: Duration,
}

impl SessionService {
    pub fn new(store: JsonStore) -> Self {
        Self::with_ttl(store, Duration::days(SESSION_TTL_DAYS))
    }

    pub fn with_ttl(store: JsonStore, ttl: Duration) -> Self {
        Self { store, ttl }
    }

    /// Start a session for `user_id`, pruning every expired session first.
    pub async fn create(&self, user_id: Uuid) -> Result<Session, AppError> {
        let now = Utc::now();
        let session = Session {
            id: Uuid::new_v4(),
            user_id,
            expires_at: now + self.ttl,
        };

        let pruned = self
            .store
            .update(collections::SESSIONS, |sessions: &mut Vec<Session>| {
                let before = sessions.len();
                sessions.retain(|s| s.is_valid_at(now));
                let pruned = before - sessions.len();
                sessions.push(session.clone());
                Ok(Commit::Write(pruned))
            })
            .await?;

        tracing::debug!(user_id = %user_id, pruned, "Session created");
        Ok(session)
    }

    /// Look up a session; expired ones are reported as absent but left in
    /// storage until the next prune.
    pub async fn get(&self, id: Uuid) -> Result<Option<Session>, AppError> {
        let now = Utc::now();
        let sessions: Vec<Session> = self.store.read(collections::SESSIONS).await?;
        Ok(sessions
            .into_iter()
            .find(|s| s.id == id && s.is_valid_at(now)))
    }

    /// Remove a session regardless of expiry. Returns whether it existed.
    pub async fn delete(&self, id: Uuid) -> Result<bool, AppError> {
        self.store
            .update(collections::SESSIONS, |sessions: &mut Vec<Session>| {
                let before = sessions.len();
                sessions.retain(|s| s.id != id);
                if sessions.len() == before {
                    Ok(Commit::Discard(false))
                } else {
                    Ok(Commit::Write(true))
                }
            })
            .await
    }
}
