//! Course Store - typed persistence adapter over a key-value backend
//!
//! Courses are stored as JSON values under their generated UUID key.
//! The backend sees only opaque bytes; this adapter owns the id
//! assignment, the serialization, and the not-found signalling.

use uuid::Uuid;

use crate::course::{CourseDraft, CourseRecord};
use crate::kv::KvStore;
use crate::{Error, Result};

/// Typed course store over any [`KvStore`] backend.
///
/// ## Design
///
/// The key-value store has no secondary indexing, so `list` is the
/// only bulk operation: enumerate keys, then point-read each one.
/// Aggregation callers use `list` to materialize the snapshot the
/// engine consumes.
pub struct CourseStore<S> {
    kv: S,
}

impl<S: KvStore> CourseStore<S> {
    /// Create a course store over the given backend.
    #[must_use]
    pub const fn new(kv: S) -> Self {
        Self { kv }
    }

    /// Create a course from a draft, assigning a fresh UUID id.
    ///
    /// Returns the assigned id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an invalid draft, or
    /// [`Error::Storage`]/[`Error::Serialization`] on backend faults.
    pub async fn create(&self, draft: &CourseDraft) -> Result<String> {
        draft.validate()?;
        let id = Uuid::new_v4().to_string();
        let value = serde_json::to_vec(draft)?;
        self.kv.set(&id, value).await?;
        tracing::debug!(%id, name = draft.name(), "course created");
        Ok(id)
    }

    /// Fetch one course by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the id is absent.
    pub async fn get(&self, id: &str) -> Result<CourseRecord> {
        let bytes = self
            .kv
            .get(id)
            .await?
            .ok_or_else(|| Error::RecordNotFound(id.to_string()))?;
        let draft: CourseDraft = serde_json::from_slice(&bytes)?;
        Ok(CourseRecord::from_draft(id, draft))
    }

    /// Replace every field of an existing course.
    ///
    /// The id is immutable and must already exist: updating a missing
    /// id is a not-found error, never an implicit create.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the id is absent, or a
    /// validation error for an invalid draft.
    pub async fn update(&self, id: &str, draft: &CourseDraft) -> Result<()> {
        draft.validate()?;
        if !self.kv.exists(id).await? {
            return Err(Error::RecordNotFound(id.to_string()));
        }
        let value = serde_json::to_vec(draft)?;
        self.kv.set(id, value).await?;
        tracing::debug!(%id, "course updated");
        Ok(())
    }

    /// Delete a course permanently.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if the id is absent.
    pub async fn remove(&self, id: &str) -> Result<()> {
        if !self.kv.exists(id).await? {
            return Err(Error::RecordNotFound(id.to_string()));
        }
        self.kv.delete(id).await?;
        tracing::debug!(%id, "course deleted");
        Ok(())
    }

    /// Materialize a snapshot of every stored course.
    ///
    /// Keys that vanish between the key listing and the point read are
    /// skipped rather than treated as a fault.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Storage`]/[`Error::Serialization`] on backend
    /// faults.
    pub async fn list(&self) -> Result<Vec<CourseRecord>> {
        let keys = self.kv.keys().await?;
        let values = self.kv.batch_get(&keys).await?;
        let mut records = Vec::with_capacity(keys.len());
        for (id, value) in keys.into_iter().zip(values) {
            let Some(bytes) = value else { continue };
            let draft: CourseDraft = serde_json::from_slice(&bytes)?;
            records.push(CourseRecord::from_draft(id, draft));
        }
        Ok(records)
    }
}
