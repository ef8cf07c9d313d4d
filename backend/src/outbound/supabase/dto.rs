//! Row and auth DTOs for the hosted store's JSON APIs.
//!
//! Rows are snake_case and decode into domain records in one pass. The `id`
//! column may arrive as a number or a string.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AdminIdentity, AdminProfileUpdate, GuestId, GuestRecord, GuestRecordPayload, GuestSubmission,
};

#[derive(Debug, Deserialize)]
pub(super) struct GuestRowDto {
    pub(super) id: GuestId,
    pub(super) full_name: String,
    pub(super) address: String,
    #[serde(default)]
    pub(super) phone: Option<String>,
    pub(super) purpose: String,
    #[serde(default)]
    pub(super) visit_date: Option<String>,
    pub(super) created_at: DateTime<Utc>,
}

impl GuestRowDto {
    pub(super) fn into_record(self) -> GuestRecord {
        GuestRecord::new(GuestRecordPayload {
            id: self.id,
            full_name: self.full_name,
            address: self.address,
            phone: self.phone,
            purpose: self.purpose,
            visit_date: self.visit_date.unwrap_or_default(),
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct GuestRowWriteDto<'a> {
    full_name: &'a str,
    address: &'a str,
    phone: Option<&'a str>,
    purpose: &'a str,
    visit_date: String,
}

impl<'a> From<&'a GuestSubmission> for GuestRowWriteDto<'a> {
    fn from(value: &'a GuestSubmission) -> Self {
        Self {
            full_name: value.full_name(),
            address: value.address(),
            phone: value.phone(),
            purpose: value.purpose(),
            visit_date: value.visit_date().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthUserDto {
    pub(super) id: String,
    #[serde(default)]
    pub(super) email: Option<String>,
}

impl AuthUserDto {
    pub(super) fn into_identity(self) -> AdminIdentity {
        AdminIdentity::new(self.id, self.email.unwrap_or_default())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct AuthUserListDto {
    #[serde(default)]
    pub(super) users: Vec<AuthUserDto>,
}

#[derive(Debug, Serialize)]
pub(super) struct UserMetadataDto<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
pub(super) struct AuthUserUpdateDto<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    user_metadata: UserMetadataDto<'a>,
}

impl<'a> From<&'a AdminProfileUpdate> for AuthUserUpdateDto<'a> {
    fn from(value: &'a AdminProfileUpdate) -> Self {
        Self {
            email: value.email(),
            password: value.new_password(),
            user_metadata: UserMetadataDto { name: value.name() },
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;
    use crate::domain::GuestForm;

    #[rstest]
    fn numeric_ids_and_missing_phone_decode() {
        let row: GuestRowDto = serde_json::from_value(json!({
            "id": 7,
            "full_name": "Budi Santoso",
            "address": "Dusun Krajan",
            "phone": null,
            "purpose": "Mengurus surat",
            "visit_date": "2025-03-12",
            "created_at": "2025-03-12T02:15:00.123456+00:00"
        }))
        .expect("row decodes");

        let record = row.into_record();
        assert_eq!(record.id().as_ref(), "7");
        assert_eq!(record.phone(), None);
        assert_eq!(record.visit_date().map(|d| d.day()), Some(12));
    }

    #[rstest]
    fn malformed_visit_date_is_kept_raw() {
        let row: GuestRowDto = serde_json::from_value(json!({
            "id": "a1",
            "full_name": "Siti",
            "address": "Dusun Kulon",
            "purpose": "Rapat desa",
            "visit_date": "12/03/2025",
            "created_at": "2025-03-12T02:15:00Z"
        }))
        .expect("row decodes");

        let record = row.into_record();
        assert!(record.visit_date().is_none());
        assert_eq!(record.raw_visit_date(), "12/03/2025");
    }

    #[rstest]
    fn submission_serialises_as_snake_case_row() {
        let submission = GuestForm {
            full_name: "Budi Santoso".into(),
            address: "Jl. Merdeka No. 1".into(),
            phone: Some(String::new()),
            purpose: "Mengurus surat".into(),
            visit_date: "2025-03-12".into(),
        }
        .validate()
        .expect("valid form");

        let body = serde_json::to_value(GuestRowWriteDto::from(&submission)).expect("serialises");
        assert_eq!(
            body,
            json!({
                "full_name": "Budi Santoso",
                "address": "Jl. Merdeka No. 1",
                "phone": null,
                "purpose": "Mengurus surat",
                "visit_date": "2025-03-12"
            })
        );
    }

    #[rstest]
    fn unchanged_password_is_omitted() {
        let update =
            AdminProfileUpdate::new("Admin Desa", "admin@desa.id", None).expect("valid update");
        let body = serde_json::to_value(AuthUserUpdateDto::from(&update)).expect("serialises");
        assert_eq!(
            body,
            json!({ "email": "admin@desa.id", "user_metadata": { "name": "Admin Desa" } })
        );
    }
}
