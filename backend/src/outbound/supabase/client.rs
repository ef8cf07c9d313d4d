//! Shared transport for the hosted store's REST and auth APIs.
//!
//! One pooled `reqwest::Client` with a request timeout is shared by every
//! adapter. API keys are held in zeroising buffers and only ever logged as
//! fingerprints.

use std::fmt;
use std::time::Duration;

use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderValue};
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

/// Header carrying the project API key on every request.
pub(super) const API_KEY_HEADER: &str = "apikey";
/// PostgREST preference asking mutations to echo the affected rows.
pub(super) const RETURN_REPRESENTATION: &str = "return=representation";

/// Store API key; wiped on drop and redacted from `Debug`.
#[derive(Clone)]
pub struct SupabaseKey(Zeroizing<String>);

impl SupabaseKey {
    /// Wrap a raw key.
    pub fn new(key: impl Into<String>) -> Self {
        Self(Zeroizing::new(key.into()))
    }

    /// Short SHA-256 fingerprint safe to log.
    ///
    /// # Examples
    /// ```
    /// use guestbook::outbound::supabase::SupabaseKey;
    ///
    /// let key = SupabaseKey::new("anon-key");
    /// assert_eq!(key.fingerprint().len(), 16);
    /// assert!(!key.fingerprint().contains("anon"));
    /// ```
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        hex::encode(digest.get(..8).unwrap_or_default())
    }

    fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SupabaseKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SupabaseKey({})", self.fingerprint())
    }
}

/// Connection settings for one hosted store project.
#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    /// Project base URL, e.g. `https://abc.supabase.co`.
    pub base_url: Url,
    /// Public key used for row access and token verification.
    pub anon_key: SupabaseKey,
    /// Elevated key for the user-administration API.
    pub service_role_key: Option<SupabaseKey>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Which key authorises a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum KeyRole {
    Anon,
    ServiceRole,
}

/// Outcome of a request that reached the server.
pub(super) struct RawResponse {
    pub(super) status: StatusCode,
    pub(super) body: Vec<u8>,
}

/// Shared HTTP client for one store project.
#[derive(Debug)]
pub struct SupabaseClient {
    http: Client,
    base_url: Url,
    anon_key: SupabaseKey,
    service_role_key: Option<SupabaseKey>,
}

impl SupabaseClient {
    /// Build the shared client.
    ///
    /// # Errors
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(config: SupabaseConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url,
            anon_key: config.anon_key,
            service_role_key: config.service_role_key,
        })
    }

    /// Whether user administration is available.
    pub fn has_service_role(&self) -> bool {
        self.service_role_key.is_some()
    }

    /// Project base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub(super) fn endpoint(&self, path: &str) -> Result<Url, url::ParseError> {
        self.base_url.join(path)
    }

    /// Key for data access: the elevated key when configured.
    pub(super) fn data_role(&self) -> KeyRole {
        if self.has_service_role() {
            KeyRole::ServiceRole
        } else {
            KeyRole::Anon
        }
    }

    fn key(&self, role: KeyRole) -> Option<&SupabaseKey> {
        match role {
            KeyRole::Anon => Some(&self.anon_key),
            KeyRole::ServiceRole => self.service_role_key.as_ref(),
        }
    }

    /// Request carrying the project key as both `apikey` and bearer token.
    ///
    /// Returns `None` when `role` has no configured key.
    pub(super) fn request(&self, method: Method, url: Url, role: KeyRole) -> Option<RequestBuilder> {
        let key = self.key(role)?;
        Some(
            self.http
                .request(method, url)
                .header(API_KEY_HEADER, key.expose())
                .bearer_auth(key.expose())
                .header(ACCEPT, HeaderValue::from_static("application/json")),
        )
    }

    /// Request authorised by a caller's own access token.
    pub(super) fn user_request(&self, method: Method, url: Url, token: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header(API_KEY_HEADER, self.anon_key.expose())
            .header(AUTHORIZATION, format!("Bearer {token}"))
            .header(ACCEPT, HeaderValue::from_static("application/json"))
    }
}

pub(super) async fn send(request: RequestBuilder) -> Result<RawResponse, reqwest::Error> {
    let response = request.send().await?;
    let status = response.status();
    let body = response.bytes().await?.to_vec();
    Ok(RawResponse { status, body })
}

/// Whether `status` means the store itself is unavailable.
pub(super) fn is_unavailable(status: StatusCode) -> bool {
    matches!(
        status,
        StatusCode::REQUEST_TIMEOUT
            | StatusCode::TOO_MANY_REQUESTS
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    )
}

pub(super) fn status_message(status: StatusCode, body: &[u8]) -> String {
    let preview = body_preview(body);
    if preview.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {preview}", status.as_u16())
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        let preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
        format!("{preview}...")
    } else {
        compact
    }
}
