// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Per-user health payload storage.

use crate::db::{collections, Commit, JsonStore};
use crate::error::AppError;
use crate::models::{HealthData, HealthDataUpdate};
use uuid::Uuid;

#[derive(Clone)]
pub struct HealthDataService {
    store: JsonStore,
}

impl HealthDataService {
    pub fn new(store: JsonStore) -> Self {
        Self { store }
    }

    pub async fn get(&self, user_id: Uuid) -> Result<Option<HealthData>, AppError> {
        let all: Vec<HealthData> = self.store.read(collections::HEALTH_DATA).await?;
        Ok(all.into_iter().find(|d| d.user_id == user_id))
    }

    /// Create the user's record on first save, shallow-merge afterwards.
    pub async fn save(
        &self,
        user_id: Uuid,
        update: HealthDataUpdate,
    ) -> Result<HealthData, AppError> {
        self.store
            .update(collections::HEALTH_DATA, |all: &mut Vec<HealthData>| {
                let index = match all.iter().position(|d| d.user_id == user_id) {
                    Some(index) => index,
                    None => {
                        all.push(HealthData::empty(user_id));
                        all.len() - 1
                    }
                };
                let record = &mut all[index];
                record.merge(update);
                Ok(Commit::Write(record.clone()))
            })
            .await
    }
}
