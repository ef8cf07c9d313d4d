//! Auth-service adapters: bearer token verification and admin accounts.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode, Url};
use tracing::debug;

use super::client::{KeyRole, RawResponse, SupabaseClient, is_unavailable, send, status_message};
use super::dto::{AuthUserDto, AuthUserListDto, AuthUserUpdateDto};
use crate::domain::ports::{AdminAuthError, AdminAuthenticator, AdminDirectory, AdminDirectoryError};
use crate::domain::{AdminIdentity, AdminProfileUpdate};

const USER_PATH: &str = "/auth/v1/user";
const ADMIN_USERS_PATH: &str = "/auth/v1/admin/users";
const ADMIN_PAGE_SIZE: &str = "1000";

/// Verifies admin bearer tokens against the auth service.
#[derive(Debug, Clone)]
pub struct SupabaseAdminAuthenticator {
    client: Arc<SupabaseClient>,
}

impl SupabaseAdminAuthenticator {
    /// Adapter sharing `client`'s connection pool.
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AdminAuthenticator for SupabaseAdminAuthenticator {
    async fn verify(&self, token: &str) -> Result<AdminIdentity, AdminAuthError> {
        let url = self
            .client
            .endpoint(USER_PATH)
            .map_err(|err| AdminAuthError::connection(format!("invalid auth URL: {err}")))?;
        let RawResponse { status, body } = send(self.client.user_request(Method::GET, url, token))
            .await
            .map_err(|err| AdminAuthError::connection(err.to_string()))?;

        if !status.is_success() {
            return Err(map_auth_status(status, &body));
        }
        let user: AuthUserDto = serde_json::from_slice(&body)
            .map_err(|err| AdminAuthError::connection(format!("invalid user payload: {err}")))?;
        Ok(user.into_identity())
    }
}

fn map_auth_status(status: StatusCode, body: &[u8]) -> AdminAuthError {
    let message = status_message(status, body);
    if is_unavailable(status) || status.is_server_error() {
        AdminAuthError::connection(message)
    } else {
        AdminAuthError::invalid_token(message)
    }
}

/// User-administration API behind the elevated key.
#[derive(Debug, Clone)]
pub struct SupabaseAdminDirectory {
    client: Arc<SupabaseClient>,
}

impl SupabaseAdminDirectory {
    /// Adapter sharing `client`'s connection pool.
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    fn endpoint(&self, path: &str) -> Result<Url, AdminDirectoryError> {
        self.client
            .endpoint(path)
            .map_err(|err| AdminDirectoryError::request(format!("invalid auth URL: {err}")))
    }

    async fn call(
        &self,
        method: Method,
        url: Url,
        body: Option<&AuthUserUpdateDto<'_>>,
    ) -> Result<RawResponse, AdminDirectoryError> {
        let mut request = self
            .client
            .request(method, url, KeyRole::ServiceRole)
            .ok_or_else(|| AdminDirectoryError::request("service role key not configured"))?;
        if let Some(body) = body {
            request = request.header(CONTENT_TYPE, "application/json").json(body);
        }
        send(request)
            .await
            .map_err(|err| AdminDirectoryError::connection(err.to_string()))
    }
}

#[async_trait]
impl AdminDirectory for SupabaseAdminDirectory {
    async fn find_by_email(&self, email: &str) -> Result<AdminIdentity, AdminDirectoryError> {
        let mut url = self.endpoint(ADMIN_USERS_PATH)?;
        url.query_pairs_mut()
            .append_pair("page", "1")
            .append_pair("per_page", ADMIN_PAGE_SIZE);

        let RawResponse { status, body } = self.call(Method::GET, url, None).await?;
        if !status.is_success() {
            return Err(map_directory_status(status, &body, email));
        }
        let listing: AuthUserListDto = serde_json::from_slice(&body)
            .map_err(|err| AdminDirectoryError::request(format!("invalid user list: {err}")))?;
        debug!(count = listing.users.len(), "listed auth users");
        find_user(listing, email)
    }

    async fn update_account(
        &self,
        admin: &AdminIdentity,
        update: &AdminProfileUpdate,
    ) -> Result<(), AdminDirectoryError> {
        let url = self.endpoint(&format!("{ADMIN_USERS_PATH}/{}", admin.id()))?;
        let payload = AuthUserUpdateDto::from(update);
        let RawResponse { status, body } = self.call(Method::PUT, url, Some(&payload)).await?;
        if !status.is_success() {
            return Err(map_directory_status(status, &body, admin.email()));
        }
        Ok(())
    }
}

fn find_user(listing: AuthUserListDto, email: &str) -> Result<AdminIdentity, AdminDirectoryError> {
    listing
        .users
        .into_iter()
        .find(|user| {
            user.email
                .as_deref()
                .is_some_and(|candidate| candidate.eq_ignore_ascii_case(email))
        })
        .map(AuthUserDto::into_identity)
        .ok_or_else(|| AdminDirectoryError::not_found(email))
}

fn map_directory_status(status: StatusCode, body: &[u8], email: &str) -> AdminDirectoryError {
    let message = status_message(status, body);
    match status {
        StatusCode::NOT_FOUND => AdminDirectoryError::not_found(email),
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            AdminDirectoryError::email_taken(email)
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AdminDirectoryError::denied(message),
        _ if is_unavailable(status) => AdminDirectoryError::connection(message),
        _ => AdminDirectoryError::request(message),
    }
}
