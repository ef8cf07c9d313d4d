//! Driven port for the remote guest record collection.
//!
//! The store owns persistence, identifier assignment and insertion
//! timestamps. Adapters translate these calls into the store's own query
//! language; the domain only ever sees validated submissions going in and
//! [`GuestRecord`]s coming out.

use async_trait::async_trait;

use crate::domain::{GuestId, GuestRecord, GuestSubmission};

use super::define_port_error;

define_port_error! {
    /// Errors raised by guest store adapters.
    pub enum GuestStoreError {
        /// The store could not be reached or timed out.
        Connection { message: String } =>
            "guest store connection failed: {message}",
        /// The store rejected or failed to execute the request.
        Query { message: String } =>
            "guest store query failed: {message}",
        /// No record exists with the requested identifier.
        NotFound { id: String } =>
            "guest {id} not found",
    }
}

/// Port for reading and mutating stored guest records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestStore: Send + Sync {
    /// Every record, newest insertion first.
    async fn list_all(&self) -> Result<Vec<GuestRecord>, GuestStoreError>;

    /// Look up one record by identifier.
    async fn find_by_id(&self, id: &GuestId) -> Result<Option<GuestRecord>, GuestStoreError>;

    /// Insert a validated submission and return the stored record.
    async fn insert(&self, guest: &GuestSubmission) -> Result<GuestRecord, GuestStoreError>;

    /// Replace every editable field of record `id`.
    ///
    /// Returns [`GuestStoreError::NotFound`] when no record matched.
    async fn update_by_id(
        &self,
        id: &GuestId,
        guest: &GuestSubmission,
    ) -> Result<GuestRecord, GuestStoreError>;

    /// Remove record `id`.
    ///
    /// Returns [`GuestStoreError::NotFound`] when no record matched.
    async fn delete_by_id(&self, id: &GuestId) -> Result<(), GuestStoreError>;
}

/// Fixture store that holds no records and accepts nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGuestStore;

#[async_trait]
impl GuestStore for FixtureGuestStore {
    async fn list_all(&self) -> Result<Vec<GuestRecord>, GuestStoreError> {
        Ok(Vec::new())
    }

    async fn find_by_id(&self, _id: &GuestId) -> Result<Option<GuestRecord>, GuestStoreError> {
        Ok(None)
    }

    async fn insert(&self, _guest: &GuestSubmission) -> Result<GuestRecord, GuestStoreError> {
        Err(GuestStoreError::query("fixture store is read-only"))
    }

    async fn update_by_id(
        &self,
        id: &GuestId,
        _guest: &GuestSubmission,
    ) -> Result<GuestRecord, GuestStoreError> {
        Err(GuestStoreError::not_found(id.to_string()))
    }

    async fn delete_by_id(&self, id: &GuestId) -> Result<(), GuestStoreError> {
        Err(GuestStoreError::not_found(id.to_string()))
    }
}
