//! Administrator identity and account settings.
//!
//! Admin accounts live in the store's auth service. The dashboard only ever
//! changes the signed-in admin's display name, email and password.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use zeroize::Zeroizing;

use crate::domain::Error;
use crate::domain::ports::{AdminAccountCommand, AdminDirectory, AdminDirectoryError};

/// Minimum admin display name length.
pub const ADMIN_NAME_MIN: usize = 2;
/// Minimum password length accepted by the auth service.
pub const PASSWORD_MIN: usize = 6;

/// Authenticated administrator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdminIdentity {
    id: String,
    email: String,
}

impl AdminIdentity {
    /// Identity as reported by the auth service.
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
        }
    }

    /// Auth service user id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sign-in email.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Validated settings change for the signed-in admin.
#[derive(Clone, PartialEq, Eq)]
pub struct AdminProfileUpdate {
    name: String,
    email: String,
    new_password: Option<Zeroizing<String>>,
}

impl fmt::Debug for AdminProfileUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdminProfileUpdate")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("new_password", &self.new_password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl AdminProfileUpdate {
    /// Validate a settings form. A blank password means "unchanged".
    ///
    /// # Errors
    /// Returns an invalid-request error with a field → message map.
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        new_password: Option<String>,
    ) -> Result<Self, Error> {
        let name = name.into().trim().to_owned();
        let email = email.into().trim().to_owned();
        let new_password = new_password.filter(|p| !p.is_empty()).map(Zeroizing::new);

        let mut details = serde_json::Map::new();
        if name.chars().count() < ADMIN_NAME_MIN {
            details.insert(
                "name".to_owned(),
                json!(format!("Nama minimal {ADMIN_NAME_MIN} karakter.")),
            );
        }
        if !looks_like_email(&email) {
            details.insert("email".to_owned(), json!("Email tidak valid."));
        }
        if new_password
            .as_ref()
            .is_some_and(|p| p.chars().count() < PASSWORD_MIN)
        {
            details.insert(
                "newPassword".to_owned(),
                json!(format!("Password minimal {PASSWORD_MIN} karakter.")),
            );
        }
        if !details.is_empty() {
            return Err(Error::invalid_request("Data tidak valid")
                .with_details(serde_json::Value::Object(details)));
        }

        Ok(Self {
            name,
            email,
            new_password,
        })
    }

    /// New display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// New sign-in email.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// New password, if one was entered.
    pub fn new_password(&self) -> Option<&str> {
        self.new_password.as_ref().map(|p| p.as_str())
    }
}

fn looks_like_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

fn map_directory_error(error: AdminDirectoryError) -> Error {
    match error {
        AdminDirectoryError::NotFound { .. } => Error::not_found("Pengguna tidak ditemukan"),
        AdminDirectoryError::Connection { message } => {
            Error::service_unavailable(format!("admin directory unavailable: {message}"))
        }
        AdminDirectoryError::EmailTaken { .. } => {
            Error::conflict("Email sudah digunakan akun lain").with_details(json!({
                "email": "Email sudah digunakan.",
            }))
        }
        AdminDirectoryError::Denied { message } => {
            Error::forbidden(format!("Akses admin ditolak: {message}"))
        }
        AdminDirectoryError::Request { message } => {
            Error::internal(format!("Gagal memperbarui data admin: {message}"))
        }
    }
}

/// Admin settings service implementing [`AdminAccountCommand`].
#[derive(Clone)]
pub struct AdminAccountService<D> {
    directory: Arc<D>,
}

impl<D> AdminAccountService<D> {
    /// Create the service over an account directory.
    pub fn new(directory: Arc<D>) -> Self {
        Self { directory }
    }
}

#[async_trait]
impl<D> AdminAccountCommand for AdminAccountService<D>
where
    D: AdminDirectory,
{
    async fn update_profile(
        &self,
        caller: AdminIdentity,
        update: AdminProfileUpdate,
    ) -> Result<(), Error> {
        let account = self
            .directory
            .find_by_email(caller.email())
            .await
            .map_err(map_directory_error)?;

        self.directory
            .update_account(&account, &update)
            .await
            .map_err(map_directory_error)?;

        info!(
            admin_id = account.id(),
            password_changed = update.new_password().is_some(),
            "admin profile updated"
        );
        Ok(())
    }
}
