//! Ports for administrator authentication and account management.
//!
//! Both are backed by the store's auth service: bearer tokens are verified
//! with the public key, account changes go through the elevated
//! user-administration API.

use async_trait::async_trait;

use crate::domain::{AdminIdentity, AdminProfileUpdate, Error};

use super::define_port_error;

define_port_error! {
    /// Errors raised while verifying an admin bearer token.
    pub enum AdminAuthError {
        /// The token is missing, expired or was rejected.
        InvalidToken { message: String } =>
            "admin token rejected: {message}",
        /// The auth service could not be reached.
        Connection { message: String } =>
            "admin auth service unavailable: {message}",
    }
}

define_port_error! {
    /// Errors raised by the admin account directory.
    pub enum AdminDirectoryError {
        /// No account exists with the requested email.
        NotFound { email: String } =>
            "admin account {email} not found",
        /// The directory could not be reached.
        Connection { message: String } =>
            "admin directory unavailable: {message}",
        /// Another account already uses the requested email.
        EmailTaken { email: String } =>
            "email {email} is already registered",
        /// The service role key lacks admin rights.
        Denied { message: String } =>
            "admin directory denied the request: {message}",
        /// The directory rejected or failed the request.
        Request { message: String } =>
            "admin directory request failed: {message}",
    }
}

/// Driven port verifying `Authorization: Bearer` tokens.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminAuthenticator: Send + Sync {
    /// Resolve the admin behind `token`.
    async fn verify(&self, token: &str) -> Result<AdminIdentity, AdminAuthError>;
}

/// Driven port over the store's user-administration API.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminDirectory: Send + Sync {
    /// Find the account registered under `email`.
    async fn find_by_email(&self, email: &str) -> Result<AdminIdentity, AdminDirectoryError>;

    /// Apply a validated profile update to account `admin`.
    async fn update_account(
        &self,
        admin: &AdminIdentity,
        update: &AdminProfileUpdate,
    ) -> Result<(), AdminDirectoryError>;
}

/// Driving port for the "update admin" settings form.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminAccountCommand: Send + Sync {
    /// Validate and apply a name/email/password change.
    async fn update_profile(
        &self,
        caller: AdminIdentity,
        update: AdminProfileUpdate,
    ) -> Result<(), Error>;
}

/// Fixture authenticator that rejects every token.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminAuthenticator;

#[async_trait]
impl AdminAuthenticator for FixtureAdminAuthenticator {
    async fn verify(&self, _token: &str) -> Result<AdminIdentity, AdminAuthError> {
        Err(AdminAuthError::invalid_token("no auth service configured"))
    }
}

/// Fixture directory that knows no accounts.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAdminDirectory;

#[async_trait]
impl AdminDirectory for FixtureAdminDirectory {
    async fn find_by_email(&self, email: &str) -> Result<AdminIdentity, AdminDirectoryError> {
        Err(AdminDirectoryError::not_found(email))
    }

    async fn update_account(
        &self,
        admin: &AdminIdentity,
        _update: &AdminProfileUpdate,
    ) -> Result<(), AdminDirectoryError> {
        Err(AdminDirectoryError::not_found(admin.email()))
    }
}
