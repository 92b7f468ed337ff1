// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Invite issuance and redemption.
//!
//! Invites never expire on their own; a pending invite stays redeemable
//! until it is used.

use crate::db::{collections, Commit, JsonStore};
use crate::error::AppError;
use crate::models::{Invite, NewUser, User};
use crate::services::identity::{build_user, hash_password_blocking, insert_unique, same_email};
use chrono::Utc;
use subtle::ConstantTimeEq;
use uuid::Uuid;

fn token_matches(invite: &Invite, token: &str) -> bool {
    invite.token.as_bytes().ct_eq(token.as_bytes()).into()
}

/// Invite manager over the `invites` collection.
#[derive(Clone)]
pub struct InviteService {
    store: JsonStore,
}

impl InviteService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Invite>, AppError> {
        self.store.read(collections::INVITES).await
    }

    /// Issue an invite for `email`. Rejected with a conflict carrying the
    /// existing invite when one is still pending for the same address.
    pub async fn create(&self, email: &str, created_by: Uuid) -> Result<Invite, AppError> {
        let invite = Invite {
            id: Uuid::new_v4(),
            token: Uuid::new_v4().to_string(),
            email: email.trim().to_string(),
            created_by,
            created_at: Utc::now(),
            used_at: None,
            used_by: None,
        };

        let created = self
            .store
            .update(collections::INVITES, |invites: &mut Vec<Invite>| {
                if let Some(existing) = invites
                    .iter()
                    .find(|i| i.is_pending() && same_email(&i.email, &invite.email))
                {
                    return Err(AppError::Conflict {
                        message: "An invite for this email already exists".to_string(),
                        existing: serde_json::to_value(existing).ok(),
                    });
                }
                invites.push(invite.clone());
                Ok(Commit::Write(invite))
            })
            .await?;

        tracing::info!(invite_id = %created.id, created_by = %created_by, "Invite created");
        Ok(created)
    }

    /// Pending invite for `token`; used invites are invisible.
    pub async fn get_by_token(&self, token: &str) -> Result<Option<Invite>, AppError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|i| i.is_pending() && token_matches(i, token)))
    }

    /// Stamp the pending invite for `token` as used by `user_id`.
    /// `Ok(None)` when no pending invite matches.
    pub async fn mark_used(&self, token: &str, user_id: Uuid) -> Result<Option<Invite>, AppError> {
        self.store
            .update(collections::INVITES, |invites: &mut Vec<Invite>| {
                match invites
                    .iter_mut()
                    .find(|i| i.is_pending() && token_matches(i, token))
                {
                    Some(invite) => {
                        invite.used_at = Some(Utc::now());
                        invite.used_by = Some(user_id);
                        Ok(Commit::Write(Some(invite.clone())))
                    }
                    None => Ok(Commit::Discard(None)),
                }
            })
            .await
    }

    /// Register an account through an invite.
    ///
    /// The invite and users collections are held together, so the token is
    /// consumed exactly once and only when the account is written. `Ok(None)`
    /// means the token is unknown or already used.
    ///
    /// Unknown tokens are turned away before the password is hashed; the
    /// token is checked again under the lock.
    pub async fn redeem(
        &self,
        token: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
    ) -> Result<Option<(User, Invite)>, AppError> {
        if self.get_by_token(token).await?.is_none() {
            return Ok(None);
        }
        let password_hash = hash_password_blocking(password).await?;

        let invites_guard = self.store.lock(collections::INVITES).await?;
        let mut invites: Vec<Invite> = invites_guard.load().await?;
        let Some(invite) = invites
            .iter_mut()
            .find(|i| i.is_pending() && token_matches(i, token))
        else {
            return Ok(None);
        };

        let users_guard = self.store.lock(collections::USERS).await?;
        let mut users: Vec<User> = users_guard.load().await?;
        let user = build_user(
            NewUser::member(invite.email.clone(), first_name, last_name),
            password_hash,
        );
        insert_unique(&mut users, user.clone())?;
        users_guard.save(&users).await?;
        drop(users_guard);

        invite.used_at = Some(Utc::now());
        invite.used_by = Some(user.id);
        let invite = invite.clone();
        invites_guard.save(&invites).await?;

        tracing::info!(invite_id = %invite.id, user_id = %user.id, "Invite redeemed");
        Ok(Some((user, invite)))
    }
}
