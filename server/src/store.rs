//! The record store: one collection of exercise records behind a lock.
//!
//! # Design
//! `RecordStore` is a cheap-to-clone handle. It is opened once at startup,
//! injected into the router state, and closed on shutdown. After `close`,
//! every operation fails with [`StoreError::Unavailable`].
//!
//! Records are kept in insertion order. When a data file is configured, the
//! whole collection is rewritten after each successful mutation; if that
//! write fails the in-memory change is rolled back so memory and disk agree.
//! Every mutation holds the write lock from id assignment through the flush.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::StorageConfig;
use crate::model::{ExerciseRecord, NewExercise};

/// Failures surfaced by the record store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record has the requested id.
    #[error("exercise {id} not found")]
    NotFound { id: Uuid },

    /// The store is closed or its backing file cannot be used.
    #[error("record store unavailable: {reason}")]
    Unavailable { reason: String },
}

impl StoreError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug)]
struct Inner {
    /// `None` once the store has been closed.
    records: Option<Vec<ExerciseRecord>>,
    data_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct RecordStore {
    inner: Arc<RwLock<Inner>>,
}

impl RecordStore {
    /// An open, empty store that never touches the filesystem.
    pub fn in_memory() -> Self {
        Self::from_parts(Vec::new(), None)
    }

    /// Open the store described by `config`.
    ///
    /// With a data file configured, previously saved records are loaded; a
    /// file that does not exist yet means an empty collection.
    pub async fn open(config: &StorageConfig) -> Result<Self> {
        let Some(path) = config.data_file.clone() else {
            debug!("opening in-memory record store");
            return Ok(Self::in_memory());
        };

        let records = load(&path).await?;
        info!(path = %path.display(), records = records.len(), "record store opened");
        Ok(Self::from_parts(records, Some(path)))
    }

    fn from_parts(records: Vec<ExerciseRecord>, data_file: Option<PathBuf>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                records: Some(records),
                data_file,
            })),
        }
    }

    /// Flush and close. Later calls on any clone of this handle fail.
    pub async fn close(&self) -> Result<()> {
        let mut inner = self.inner.write().await;
        let Some(records) = inner.records.take() else {
            return Ok(());
        };
        if let Some(path) = &inner.data_file {
            persist(path, &records).await?;
        }
        info!(records = records.len(), "record store closed");
        Ok(())
    }

    pub async fn list(&self) -> Result<Vec<ExerciseRecord>> {
        let inner = self.inner.read().await;
        Ok(inner.records()?.clone())
    }

    pub async fn len(&self) -> Result<usize> {
        let inner = self.inner.read().await;
        Ok(inner.records()?.len())
    }

    pub async fn create(&self, input: NewExercise) -> Result<ExerciseRecord> {
        let mut inner = self.inner.write().await;
        let records = inner.records_mut()?;

        let mut id = Uuid::new_v4();
        while records.iter().any(|r| r.id == id) {
            id = Uuid::new_v4();
        }
        let record = ExerciseRecord::new(id, input);
        records.push(record.clone());

        if let Err(err) = inner.flush().await {
            inner.records_mut()?.pop();
            return Err(err);
        }
        debug!(%id, "stored new exercise");
        Ok(record)
    }

    pub async fn update(&self, id: Uuid, input: NewExercise) -> Result<ExerciseRecord> {
        let mut inner = self.inner.write().await;
        let record = inner
            .records_mut()?
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound { id })?;

        let previous = record.clone();
        record.apply(input);
        let updated = record.clone();

        if let Err(err) = inner.flush().await {
            if let Some(slot) = inner.records_mut()?.iter_mut().find(|r| r.id == id) {
                *slot = previous;
            }
            return Err(err);
        }
        debug!(%id, "updated exercise");
        Ok(updated)
    }

    /// Remove a record, returning what was removed.
    pub async fn delete(&self, id: Uuid) -> Result<ExerciseRecord> {
        let mut inner = self.inner.write().await;
        let records = inner.records_mut()?;
        let index = records
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound { id })?;
        let removed = records.remove(index);

        if let Err(err) = inner.flush().await {
            inner.records_mut()?.insert(index, removed);
            return Err(err);
        }
        debug!(%id, "deleted exercise");
        Ok(removed)
    }
}

impl Inner {
    fn records(&self) -> Result<&Vec<ExerciseRecord>> {
        self.records
            .as_ref()
            .ok_or_else(|| StoreError::unavailable("store is closed"))
    }

    fn records_mut(&mut self) -> Result<&mut Vec<ExerciseRecord>> {
        self.records
            .as_mut()
            .ok_or_else(|| StoreError::unavailable("store is closed"))
    }

    async fn flush(&self) -> Result<()> {
        match (&self.data_file, &self.records) {
            (Some(path), Some(records)) => persist(path, records).await,
            _ => Ok(()),
        }
    }
}

async fn load(path: &Path) -> Result<Vec<ExerciseRecord>> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file does not exist yet");
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(StoreError::unavailable(format!(
                "cannot read {}: {err}",
                path.display()
            )))
        }
    };
    serde_json::from_slice(&bytes).map_err(|err| {
        StoreError::unavailable(format!("cannot parse {}: {err}", path.display()))
    })
}

/// Write to a sibling temp file, then rename over the target.
async fn persist(path: &Path, records: &[ExerciseRecord]) -> Result<()> {
    let json = serde_json::to_vec_pretty(records)
        .map_err(|err| StoreError::unavailable(format!("cannot encode records: {err}")))?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    let result: std::io::Result<()> = async {
        tokio::fs::write(&tmp, &json).await?;
        tokio::fs::rename(&tmp, path).await
    }
    .await;

    result.map_err(|err| {
        warn!(path = %path.display(), error = %err, "failed to persist records");
        StoreError::unavailable(format!("cannot write {}: {err}", path.display()))
    })
}
