//! Guest record data model and submission validation.
//!
//! A [`GuestForm`] is the raw payload typed by a visitor or an admin. It is
//! validated into a [`GuestSubmission`] before any store call. Stored rows
//! come back as [`GuestRecord`]s, which keep their raw `visit_date` text so a
//! malformed legacy row stays searchable while never matching a date filter.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::domain::{Error, VisitDate, VisitDateError};

/// Minimum length of a visitor's full name.
pub const FULL_NAME_MIN: usize = 2;
/// Minimum length of an address.
pub const ADDRESS_MIN: usize = 5;
/// Minimum number of phone digits.
pub const PHONE_MIN: usize = 10;
/// Maximum number of phone digits.
pub const PHONE_MAX: usize = 15;
/// Minimum length of a visit purpose.
pub const PURPOSE_MIN: usize = 5;

/// Opaque store-assigned record identifier.
///
/// Stores may hand out numeric or textual ids; both are kept as text and
/// always rendered as a JSON string.
///
/// # Examples
/// ```
/// use guestbook::domain::GuestId;
///
/// let id: GuestId = serde_json::from_str("7").expect("numeric id");
/// assert_eq!(id.as_ref(), "7");
/// assert_eq!(serde_json::to_string(&id).expect("serialise"), "\"7\"");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(into = "String")]
pub struct GuestId(String);

/// Errors raised when constructing a [`GuestId`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestIdError {
    /// The identifier was blank.
    #[error("guest id must not be empty")]
    Empty,
}

impl GuestId {
    /// Validate and wrap an identifier.
    ///
    /// # Errors
    /// Returns [`GuestIdError::Empty`] for blank input.
    pub fn new(id: impl Into<String>) -> Result<Self, GuestIdError> {
        let id = id.into();
        let trimmed = id.trim();
        if trimmed.is_empty() {
            return Err(GuestIdError::Empty);
        }
        if trimmed.len() == id.len() {
            Ok(Self(id))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }
}

impl AsRef<str> for GuestId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for GuestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<GuestId> for String {
    fn from(value: GuestId) -> Self {
        value.0
    }
}

impl TryFrom<String> for GuestId {
    type Error = GuestIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawGuestId {
    Text(String),
    Signed(i64),
    Unsigned(u64),
}

impl<'de> Deserialize<'de> for GuestId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match RawGuestId::deserialize(deserializer)? {
            RawGuestId::Text(text) => text,
            RawGuestId::Signed(number) => number.to_string(),
            RawGuestId::Unsigned(number) => number.to_string(),
        };
        Self::new(raw).map_err(de::Error::custom)
    }
}

/// Fields of a guest submission, named as they appear on the public API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GuestField {
    /// `fullName`
    FullName,
    /// `address`
    Address,
    /// `phone`
    Phone,
    /// `purpose`
    Purpose,
    /// `visitDate`
    VisitDate,
}

impl GuestField {
    /// camelCase name used in payloads and error details.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Purpose => "purpose",
            Self::VisitDate => "visitDate",
        }
    }
}

/// A single failed validation rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuestValidationError {
    /// Full name shorter than the minimum.
    #[error("Nama lengkap minimal {min} karakter.")]
    FullNameTooShort {
        /// Required minimum.
        min: usize,
    },
    /// Address shorter than the minimum.
    #[error("Alamat minimal {min} karakter.")]
    AddressTooShort {
        /// Required minimum.
        min: usize,
    },
    /// Phone contains something other than ASCII digits.
    #[error("Nomor HP hanya boleh berisi angka.")]
    PhoneNotDigits,
    /// Phone has too few digits.
    #[error("Nomor HP minimal {min} digit.")]
    PhoneTooShort {
        /// Required minimum.
        min: usize,
    },
    /// Phone has too many digits.
    #[error("Nomor HP maksimal {max} digit.")]
    PhoneTooLong {
        /// Allowed maximum.
        max: usize,
    },
    /// Purpose shorter than the minimum.
    #[error("Tujuan kunjungan minimal {min} karakter.")]
    PurposeTooShort {
        /// Required minimum.
        min: usize,
    },
    /// Visit date missing.
    #[error("Tanggal kunjungan wajib diisi.")]
    VisitDateMissing,
    /// Visit date present but not a calendar date.
    #[error("Tanggal kunjungan tidak valid.")]
    VisitDateInvalid,
}

impl GuestValidationError {
    /// Field the failed rule belongs to.
    pub fn field(&self) -> GuestField {
        match self {
            Self::FullNameTooShort { .. } => GuestField::FullName,
            Self::AddressTooShort { .. } => GuestField::Address,
            Self::PhoneNotDigits | Self::PhoneTooShort { .. } | Self::PhoneTooLong { .. } => {
                GuestField::Phone
            }
            Self::PurposeTooShort { .. } => GuestField::Purpose,
            Self::VisitDateMissing | Self::VisitDateInvalid => GuestField::VisitDate,
        }
    }
}

impl From<VisitDateError> for GuestValidationError {
    fn from(value: VisitDateError) -> Self {
        match value {
            VisitDateError::Empty => Self::VisitDateMissing,
            VisitDateError::Invalid(_) => Self::VisitDateInvalid,
        }
    }
}

/// Every rule a [`GuestForm`] failed, at most one per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestValidationErrors(Vec<GuestValidationError>);

impl GuestValidationErrors {
    /// Failed rules in field order.
    pub fn errors(&self) -> &[GuestValidationError] {
        &self.0
    }

    /// Fields that failed validation.
    pub fn fields(&self) -> Vec<GuestField> {
        self.0.iter().map(GuestValidationError::field).collect()
    }

    /// Field → message map used as error details.
    pub fn to_details(&self) -> Value {
        let map: Map<String, Value> = self
            .0
            .iter()
            .map(|err| (err.field().wire_name().to_owned(), Value::String(err.to_string())))
            .collect();
        Value::Object(map)
    }
}

impl fmt::Display for GuestValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&messages.join(" "))
    }
}

impl std::error::Error for GuestValidationErrors {}

impl From<GuestValidationErrors> for Error {
    fn from(value: GuestValidationErrors) -> Self {
        Error::invalid_request("Data tidak valid").with_details(value.to_details())
    }
}

/// Raw guest payload as typed into the form.
///
/// Missing fields deserialise as empty strings so that every failing field is
/// reported together instead of failing on the first absent key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct GuestForm {
    /// Visitor's full name.
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    /// Visitor's address.
    #[schema(example = "Jl. Merdeka No. 1, Gunungwangi")]
    pub address: String,
    /// Optional phone number, digits only.
    #[schema(example = "081234567890")]
    pub phone: Option<String>,
    /// Purpose of the visit.
    #[schema(example = "Mengurus surat domisili")]
    pub purpose: String,
    /// Visit date as `YYYY-MM-DD`.
    #[schema(example = "2025-03-12")]
    pub visit_date: String,
}

impl GuestForm {
    /// Check every rule and return the validated submission.
    ///
    /// # Errors
    /// Returns all failing rules, at most one per field.
    ///
    /// # Examples
    /// ```
    /// use guestbook::domain::{GuestField, GuestForm};
    ///
    /// let form = GuestForm {
    ///     full_name: "Budi Santoso".into(),
    ///     address: "Jl. Merdeka No. 1".into(),
    ///     phone: Some("12345".into()),
    ///     purpose: "Mengurus surat".into(),
    ///     visit_date: "2025-03-12".into(),
    /// };
    /// let errors = form.validate().expect_err("phone too short");
    /// assert_eq!(errors.fields(), vec![GuestField::Phone]);
    /// ```
    pub fn validate(&self) -> Result<GuestSubmission, GuestValidationErrors> {
        let mut errors = Vec::new();

        if self.full_name.chars().count() < FULL_NAME_MIN {
            errors.push(GuestValidationError::FullNameTooShort { min: FULL_NAME_MIN });
        }
        if self.address.chars().count() < ADDRESS_MIN {
            errors.push(GuestValidationError::AddressTooShort { min: ADDRESS_MIN });
        }
        let phone = normalise_phone(self.phone.as_deref());
        if let Some(Err(err)) = phone.as_deref().map(check_phone) {
            errors.push(err);
        }
        if self.purpose.chars().count() < PURPOSE_MIN {
            errors.push(GuestValidationError::PurposeTooShort { min: PURPOSE_MIN });
        }
        let visit_date = VisitDate::parse(&self.visit_date).map_err(GuestValidationError::from);
        if let Err(err) = &visit_date {
            errors.push(err.clone());
        }

        match visit_date {
            Ok(visit_date) if errors.is_empty() => Ok(GuestSubmission {
                full_name: self.full_name.clone(),
                address: self.address.clone(),
                phone,
                purpose: self.purpose.clone(),
                visit_date,
            }),
            _ => Err(GuestValidationErrors(errors)),
        }
    }

    /// Form pre-filled from a stored record, as the edit dialog opens it.
    pub fn from_record(record: &GuestRecord) -> Self {
        Self {
            full_name: record.full_name().to_owned(),
            address: record.address().to_owned(),
            phone: record.phone().map(str::to_owned),
            purpose: record.purpose().to_owned(),
            visit_date: record
                .visit_date()
                .map_or_else(|| record.raw_visit_date().to_owned(), |date| date.to_string()),
        }
    }

    /// Whether saving this form would change `record`.
    ///
    /// An empty phone equals an absent one, and dates compare as calendar
    /// dates when both sides parse.
    pub fn differs_from(&self, record: &GuestRecord) -> bool {
        if self.full_name != record.full_name()
            || self.address != record.address()
            || self.purpose != record.purpose()
        {
            return true;
        }
        if normalise_phone(self.phone.as_deref()).as_deref() != record.phone() {
            return true;
        }
        match (VisitDate::parse(&self.visit_date), record.visit_date()) {
            (Ok(form_date), Some(record_date)) => form_date != record_date,
            _ => self.visit_date.trim() != record.raw_visit_date().trim(),
        }
    }
}

fn normalise_phone(phone: Option<&str>) -> Option<String> {
    phone.filter(|value| !value.is_empty()).map(str::to_owned)
}

fn check_phone(phone: &str) -> Result<(), GuestValidationError> {
    if !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(GuestValidationError::PhoneNotDigits);
    }
    let digits = phone.len();
    if digits < PHONE_MIN {
        return Err(GuestValidationError::PhoneTooShort { min: PHONE_MIN });
    }
    if digits > PHONE_MAX {
        return Err(GuestValidationError::PhoneTooLong { max: PHONE_MAX });
    }
    Ok(())
}

/// Guest payload that passed validation and may be sent to the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestSubmission {
    full_name: String,
    address: String,
    phone: Option<String>,
    purpose: String,
    visit_date: VisitDate,
}

impl GuestSubmission {
    /// Visitor's full name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Visitor's address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Phone digits, `None` when left blank.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Purpose of the visit.
    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Calendar date of the visit.
    pub fn visit_date(&self) -> VisitDate {
        self.visit_date
    }
}

/// Stored guest record.
///
/// ## Invariants
/// - `id` and `created_at` never change after the store assigns them.
/// - `visit_date` is `Some` exactly when `raw_visit_date` parses as a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GuestRecordPayload", into = "GuestRecordPayload")]
pub struct GuestRecord {
    id: GuestId,
    full_name: String,
    address: String,
    phone: Option<String>,
    purpose: String,
    raw_visit_date: String,
    visit_date: Option<VisitDate>,
    created_at: DateTime<Utc>,
}

impl GuestRecord {
    /// Build a record from stored column values.
    pub fn new(payload: GuestRecordPayload) -> Self {
        let visit_date = VisitDate::parse(&payload.visit_date).ok();
        Self {
            id: payload.id,
            full_name: payload.full_name,
            address: payload.address,
            phone: normalise_phone(payload.phone.as_deref()),
            purpose: payload.purpose,
            raw_visit_date: payload.visit_date,
            visit_date,
            created_at: payload.created_at,
        }
    }

    /// Copy of this record with every editable field replaced.
    pub fn with_submission(&self, submission: &GuestSubmission) -> Self {
        Self {
            id: self.id.clone(),
            full_name: submission.full_name.clone(),
            address: submission.address.clone(),
            phone: submission.phone.clone(),
            purpose: submission.purpose.clone(),
            raw_visit_date: submission.visit_date.to_string(),
            visit_date: Some(submission.visit_date),
            created_at: self.created_at,
        }
    }

    /// Store identifier.
    pub fn id(&self) -> &GuestId {
        &self.id
    }

    /// Visitor's full name.
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Visitor's address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Phone digits, if recorded.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Purpose of the visit.
    pub fn purpose(&self) -> &str {
        &self.purpose
    }

    /// Parsed visit date, `None` for malformed stored text.
    pub fn visit_date(&self) -> Option<VisitDate> {
        self.visit_date
    }

    /// Visit date exactly as stored.
    pub fn raw_visit_date(&self) -> &str {
        &self.raw_visit_date
    }

    /// Store-assigned insertion timestamp.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

/// Public wire shape of a [`GuestRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecordPayload {
    /// Store identifier, always rendered as a string.
    #[schema(value_type = String, example = "7")]
    pub id: GuestId,
    /// Visitor's full name.
    #[schema(example = "Budi Santoso")]
    pub full_name: String,
    /// Visitor's address.
    pub address: String,
    /// Phone digits, if recorded.
    pub phone: Option<String>,
    /// Purpose of the visit.
    pub purpose: String,
    /// Visit date as `YYYY-MM-DD`.
    #[schema(example = "2025-03-12")]
    pub visit_date: String,
    /// Insertion timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<GuestRecordPayload> for GuestRecord {
    fn from(value: GuestRecordPayload) -> Self {
        Self::new(value)
    }
}

impl From<GuestRecord> for GuestRecordPayload {
    fn from(value: GuestRecord) -> Self {
        Self {
            id: value.id,
            full_name: value.full_name,
            address: value.address,
            phone: value.phone,
            purpose: value.purpose,
            visit_date: value.raw_visit_date,
            created_at: value.created_at,
        }
    }
}

#[cfg(test)]
mod tests;
