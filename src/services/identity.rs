// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! User accounts and credentials.

use crate::db::{collections, Commit, JsonStore};
use crate::error::AppError;
use crate::models::{NewUser, ProfileUpdate, Role, User};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use uuid::Uuid;

/// Case-insensitive email comparison used for every account lookup.
pub fn same_email(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        tracing::error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

/// Hash off the async runtime; argon2 is deliberately expensive.
pub async fn hash_password_blocking(plain: &str) -> Result<String, AppError> {
    let plain = plain.to_string();
    let hash = tokio::task::spawn_blocking(move || hash_password(&plain))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {}", e)))??;
    Ok(hash)
}

/// Build a fresh record from creation fields and an already-computed hash.
pub(crate) fn build_user(fields: NewUser, password_hash: String) -> User {
    User {
        id: Uuid::new_v4(),
        email: fields.email.trim().to_string(),
        password_hash,
        first_name: fields.first_name,
        last_name: fields.last_name,
        role: fields.role,
        age: fields.age,
        weight: fields.weight,
        height: fields.height,
        gender: fields.gender,
        created_at: Utc::now(),
        onboarding_complete: fields.onboarding_complete,
    }
}

/// Append `user` unless its email is already taken.
pub(crate) fn insert_unique(users: &mut Vec<User>, user: User) -> Result<(), AppError> {
    if users.iter().any(|u| same_email(&u.email, &user.email)) {
        return Err(AppError::conflict("An account with this email already exists"));
    }
    users.push(user);
    Ok(())
}

/// Display name of the seeded administrator.
pub const ADMIN_FIRST_NAME: &str = "Vibrantly";
pub const ADMIN_LAST_NAME: &str = "Admin";

/// Identity and credential manager over the `users` collection.
#[derive(Clone)]
pub struct UserService {
    store: JsonStore,
}

impl UserService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.store.read(collections::USERS).await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        Ok(self.list().await?.into_iter().find(|u| u.id == id))
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .find(|u| same_email(&u.email, email)))
    }

    /// Create a user with a freshly hashed password.
    ///
    /// Email uniqueness is checked under the collection lock, so two
    /// concurrent registrations for one address cannot both succeed.
    pub async fn create(&self, fields: NewUser, password: &str) -> Result<User, AppError> {
        let password_hash = hash_password_blocking(password).await?;
        let user = build_user(fields, password_hash);

        let created = self
            .store
            .update(collections::USERS, |users: &mut Vec<User>| {
                insert_unique(users, user.clone())?;
                Ok(Commit::Write(user))
            })
            .await?;

        tracing::info!(user_id = %created.id, role = ?created.role, "User created");
        Ok(created)
    }

    /// Merge allowed profile fields. `Ok(None)` when the id is unknown, in
    /// which case nothing is written.
    pub async fn update(&self, id: Uuid, update: ProfileUpdate) -> Result<Option<User>, AppError> {
        self.store
            .update(collections::USERS, |users: &mut Vec<User>| {
                match users.iter_mut().find(|u| u.id == id) {
                    Some(user) => {
                        update.apply_to(user);
                        Ok(Commit::Write(Some(user.clone())))
                    }
                    None => Ok(Commit::Discard(None)),
                }
            })
            .await
    }

    /// Check `password` against the stored hash. A malformed stored hash
    /// counts as a mismatch.
    pub async fn verify_password(&self, user: &User, password: &str) -> Result<bool, AppError> {
        let plain = password.to_string();
        let hash = user.password_hash.clone();
        let user_id = user.id;

        let outcome = tokio::task::spawn_blocking(move || verify_password(&plain, &hash))
            .await
            .map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Password verification task failed: {}", e))
            })?;

        match outcome {
            Ok(valid) => Ok(valid),
            Err(e) => {
                tracing::warn!(user_id = %user_id, error = %e, "Stored password hash is unreadable");
                Ok(false)
            }
        }
    }

    /// Ensure the administrative account exists. Returns `true` when it was
    /// created by this call.
    pub async fn seed_admin(&self, email: &str, password: &str) -> Result<bool, AppError> {
        if self.get_by_email(email).await?.is_some() {
            tracing::debug!("Admin account already present");
            return Ok(false);
        }

        let fields = NewUser {
            email: email.to_string(),
            first_name: ADMIN_FIRST_NAME.to_string(),
            last_name: ADMIN_LAST_NAME.to_string(),
            role: Role::Admin,
            age: None,
            weight: None,
            height: None,
            gender: None,
            onboarding_complete: true,
        };

        match self.create(fields, password).await {
            Ok(user) => {
                tracing::info!(user_id = %user.id, "Admin user created");
                Ok(true)
            }
            Err(AppError::Conflict { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let hash = hash_password("longenough1").expect("hashing should succeed");
        assert!(verify_password("longenough1", &hash).expect("verify should succeed"));
        assert!(!verify_password("longenough2", &hash).expect("verify should not error"));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("same password").unwrap();
        let b = hash_password("same password").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify_password("anything", "not-a-valid-hash").is_err());
    }

    #[test]
    fn email_comparison_ignores_case() {
        assert!(same_email("A@B.com", "a@b.com"));
        assert!(same_email(" a@b.com", "A@B.COM "));
        assert!(!same_email("a@b.com", "a@c.com"));
    }
}
