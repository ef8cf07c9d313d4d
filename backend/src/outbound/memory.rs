//! In-process guest store used when no hosted store is configured.
//!
//! Records live in insertion order behind a lock and are listed newest
//! first, as the hosted store orders them. Identifiers are sequential.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use mockable::Clock;

use crate::domain::ports::{GuestStore, GuestStoreError};
use crate::domain::{GuestId, GuestRecord, GuestRecordPayload, GuestSubmission};

#[derive(Debug, Default)]
struct Rows {
    next_id: u64,
    records: Vec<GuestRecord>,
}

/// Guest store held entirely in memory.
pub struct InMemoryGuestStore {
    rows: RwLock<Rows>,
    clock: Arc<dyn Clock>,
}

impl InMemoryGuestStore {
    /// Empty store stamping inserts with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            rows: RwLock::new(Rows {
                next_id: 1,
                records: Vec::new(),
            }),
            clock,
        }
    }

    /// Store pre-loaded with `records`, oldest first.
    pub fn with_records(clock: Arc<dyn Clock>, records: Vec<GuestRecord>) -> Self {
        let next_id = records
            .iter()
            .filter_map(|r| r.id().as_ref().parse::<u64>().ok())
            .max()
            .map_or(1, |max| max.saturating_add(1));
        Self {
            rows: RwLock::new(Rows { next_id, records }),
            clock,
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Rows>, GuestStoreError> {
        self.rows
            .read()
            .map_err(|_| GuestStoreError::query("in-memory store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Rows>, GuestStoreError> {
        self.rows
            .write()
            .map_err(|_| GuestStoreError::query("in-memory store lock poisoned"))
    }
}

#[async_trait]
impl GuestStore for InMemoryGuestStore {
    async fn list_all(&self) -> Result<Vec<GuestRecord>, GuestStoreError> {
        Ok(self.read()?.records.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: &GuestId) -> Result<Option<GuestRecord>, GuestStoreError> {
        Ok(self.read()?.records.iter().find(|r| r.id() == id).cloned())
    }

    async fn insert(&self, guest: &GuestSubmission) -> Result<GuestRecord, GuestStoreError> {
        let created_at = self.clock.utc();
        let mut rows = self.write()?;
        let id = GuestId::new(rows.next_id.to_string())
            .map_err(|err| GuestStoreError::query(err.to_string()))?;
        rows.next_id = rows.next_id.saturating_add(1);

        let record = GuestRecord::new(GuestRecordPayload {
            id,
            full_name: guest.full_name().to_owned(),
            address: guest.address().to_owned(),
            phone: guest.phone().map(str::to_owned),
            purpose: guest.purpose().to_owned(),
            visit_date: guest.visit_date().to_string(),
            created_at,
        });
        rows.records.push(record.clone());
        Ok(record)
    }

    async fn update_by_id(
        &self,
        id: &GuestId,
        guest: &GuestSubmission,
    ) -> Result<GuestRecord, GuestStoreError> {
        let mut rows = self.write()?;
        let slot = rows
            .records
            .iter_mut()
            .find(|r| r.id() == id)
            .ok_or_else(|| GuestStoreError::not_found(id.to_string()))?;
        *slot = slot.with_submission(guest);
        Ok(slot.clone())
    }

    async fn delete_by_id(&self, id: &GuestId) -> Result<(), GuestStoreError> {
        let mut rows = self.write()?;
        let before = rows.records.len();
        rows.records.retain(|r| r.id() != id);
        if rows.records.len() == before {
            return Err(GuestStoreError::not_found(id.to_string()));
        }
        Ok(())
    }
}
