//! Driving port for guest record mutations.
//!
//! Every mutation validates its form before any store call, so a rejected
//! payload never reaches the network.

use async_trait::async_trait;

use crate::domain::{Error, GuestForm, GuestId, GuestRecord};

/// Driving port for creating, editing and deleting guest records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GuestCommand: Send + Sync {
    /// Validate `form` and insert it, returning the stored record.
    async fn create_guest(&self, form: GuestForm) -> Result<GuestRecord, Error>;

    /// Validate `form` and replace the editable fields of record `id`.
    async fn update_guest(&self, id: GuestId, form: GuestForm) -> Result<GuestRecord, Error>;

    /// Delete record `id`.
    async fn delete_guest(&self, id: GuestId) -> Result<(), Error>;
}

/// Fixture command that validates input and echoes it back without storing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureGuestCommand;

#[async_trait]
impl GuestCommand for FixtureGuestCommand {
    async fn create_guest(&self, form: GuestForm) -> Result<GuestRecord, Error> {
        let submission = form.validate()?;
        let id = GuestId::new("1").map_err(|err| Error::internal(err.to_string()))?;
        Ok(GuestRecord::new(crate::domain::GuestRecordPayload {
            id,
            full_name: submission.full_name().to_owned(),
            address: submission.address().to_owned(),
            phone: submission.phone().map(str::to_owned),
            purpose: submission.purpose().to_owned(),
            visit_date: submission.visit_date().to_string(),
            created_at: chrono::DateTime::UNIX_EPOCH,
        }))
    }

    async fn update_guest(&self, id: GuestId, form: GuestForm) -> Result<GuestRecord, Error> {
        form.validate()?;
        Err(Error::not_found(format!("Data tamu {id} tidak ditemukan")))
    }

    async fn delete_guest(&self, id: GuestId) -> Result<(), Error> {
        Err(Error::not_found(format!("Data tamu {id} tidak ditemukan")))
    }
}
