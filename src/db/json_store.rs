// SPDX-License-Identifier: MIT
// Copyright 2026 Vibrantly contributors

//! Flat-file JSON record store.
//!
//! Every collection lives in its own file holding a pretty-printed JSON array.
//! Reads load the whole array; writes replace the whole file. Two properties
//! keep this usable for a single process:
//! - read-modify-write cycles on a collection are serialized by a
//!   per-collection async mutex, so concurrent requests never lose updates;
//! - writes go to a sibling temp file which is then renamed over the target,
//!   so readers see either the old or the new array, never a torn file.
//!
//! A missing file is an empty collection. A file that fails to parse is a
//! storage error; corrupt data is never silently treated as empty.

use crate::db::collections;
use crate::error::AppError;
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};

/// Outcome of an [`JsonStore::update`] closure.
pub enum Commit<R> {
    /// Persist the mutated collection, then return the value.
    Write(R),
    /// Leave the file untouched.
    Discard(R),
}

/// Handle to the data directory. Cheap to clone.
#[derive(Clone)]
pub struct JsonStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    data_dir: PathBuf,
    locks: HashMap<&'static str, Mutex<()>>,
}

impl JsonStore {
    /// Open (and create if needed) the data directory.
    pub async fn open(data_dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let data_dir = data_dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&data_dir).await.map_err(|e| {
            AppError::Storage(format!(
                "Failed to create data directory {}: {}",
                data_dir.display(),
                e
            ))
        })?;

        let locks = collections::ALL
            .iter()
            .map(|name| (*name, Mutex::new(())))
            .collect();

        tracing::info!(data_dir = %data_dir.display(), "Opened JSON record store");

        Ok(Self {
            inner: Arc::new(StoreInner { data_dir, locks }),
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.inner.data_dir
    }

    /// File backing `collection`.
    pub fn path(&self, collection: &str) -> PathBuf {
        self.inner.data_dir.join(format!("{collection}.json"))
    }

    /// Read a whole collection without taking its lock.
    pub async fn read<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>, AppError> {
        read_collection(&self.path(collection)).await
    }

    /// Replace a whole collection.
    pub async fn write<T: Serialize>(
        &self,
        collection: &'static str,
        records: &[T],
    ) -> Result<(), AppError> {
        self.lock(collection).await?.save(records).await
    }

    /// Take exclusive ownership of a collection for a read-modify-write cycle.
    ///
    /// Callers holding more than one guard must acquire them in the order
    /// invites, users.
    pub async fn lock(&self, collection: &'static str) -> Result<CollectionGuard<'_>, AppError> {
        let lock = self
            .inner
            .locks
            .get(collection)
            .ok_or_else(|| AppError::Storage(format!("Unknown collection: {collection}")))?;

        Ok(CollectionGuard {
            _guard: lock.lock().await,
            path: self.path(collection),
            collection,
        })
    }

    /// Load a collection under its lock, let `f` mutate it, and persist the
    /// result if `f` asks for it. Errors from `f` abort without writing.
    pub async fn update<T, R, F>(&self, collection: &'static str, f: F) -> Result<R, AppError>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&mut Vec<T>) -> Result<Commit<R>, AppError>,
    {
        let guard = self.lock(collection).await?;
        let mut records = guard.load().await?;

        match f(&mut records)? {
            Commit::Write(value) => {
                guard.save(&records).await?;
                Ok(value)
            }
            Commit::Discard(value) => Ok(value),
        }
    }
}

/// Exclusive access to one collection, released on drop.
pub struct CollectionGuard<'a> {
    _guard: MutexGuard<'a, ()>,
    path: PathBuf,
    collection: &'static str,
}

impl CollectionGuard<'_> {
    pub async fn load<T: DeserializeOwned>(&self) -> Result<Vec<T>, AppError> {
        read_collection(&self.path).await
    }

    pub async fn save<T: Serialize>(&self, records: &[T]) -> Result<(), AppError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|e| {
            AppError::Storage(format!("Failed to serialize {}: {}", self.collection, e))
        })?;

        let tmp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp_path, &bytes).await.map_err(|e| {
            AppError::Storage(format!("Failed to write {}: {}", tmp_path.display(), e))
        })?;
        tokio::fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            AppError::Storage(format!("Failed to replace {}: {}", self.path.display(), e))
        })?;

        tracing::debug!(
            collection = self.collection,
            records = records.len(),
            "Collection written"
        );
        Ok(())
    }
}

async fn read_collection<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => {
            return Err(AppError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }

    serde_json::from_slice(&bytes).map_err(|e| {
        tracing::error!(path = %path.display(), error = %e, "Corrupt collection file");
        AppError::Storage(format!("Corrupt collection file {}: {}", path.display(), e))
    })
}
