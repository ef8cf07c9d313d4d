//! Runtime settings loaded via OrthoConfig.
//!
//! Values come from `GUESTBOOK_*` environment variables, an optional config
//! file and CLI flags, in increasing precedence.

use std::net::SocketAddr;
use std::time::Duration;

use chrono::FixedOffset;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::domain::ReportSettings;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
/// Western Indonesian Time, UTC+7.
const DEFAULT_UTC_OFFSET_MINUTES: i32 = 420;
const DEFAULT_REPORT_TITLE: &str = "Buku Tamu Digital";
const DEFAULT_REPORT_SUBTITLE: &str = "Desa Gunungwangi";

/// Errors raised while validating loaded settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SettingsError {
    #[error("invalid bind address `{value}`: {message}")]
    BindAddr { value: String, message: String },
    #[error("invalid store URL `{value}`: {message}")]
    StoreUrl { value: String, message: String },
    #[error("GUESTBOOK_STORE_ANON_KEY is required when a store URL is set")]
    MissingAnonKey,
    #[error("UTC offset of {minutes} minutes is out of range")]
    UtcOffset { minutes: i32 },
    #[error("request timeout must be at least one second")]
    ZeroTimeout,
}

/// Guestbook server settings.
#[derive(Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GUESTBOOK")]
pub struct GuestbookSettings {
    /// Socket address for the HTTP listener.
    pub bind_addr: Option<String>,
    /// Base URL of the hosted store; unset runs against the in-memory store.
    pub store_url: Option<String>,
    /// Public key for data and token verification.
    pub store_anon_key: Option<String>,
    /// Elevated key for admin account changes.
    pub store_service_role_key: Option<String>,
    /// Per-request timeout for store calls.
    #[ortho_config(default = 10)]
    pub request_timeout_secs: u64,
    /// Offset used for "today" and export timestamps.
    #[ortho_config(default = 420)]
    pub utc_offset_minutes: i32,
    /// Export title line.
    pub report_title: Option<String>,
    /// Export subtitle line.
    pub report_subtitle: Option<String>,
}

impl std::fmt::Debug for GuestbookSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |key: &Option<String>| key.as_ref().map(|_| "<redacted>");
        f.debug_struct("GuestbookSettings")
            .field("bind_addr", &self.bind_addr)
            .field("store_url", &self.store_url)
            .field("store_anon_key", &redact(&self.store_anon_key))
            .field("store_service_role_key", &redact(&self.store_service_role_key))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("utc_offset_minutes", &self.utc_offset_minutes)
            .field("report_title", &self.report_title)
            .field("report_subtitle", &self.report_subtitle)
            .finish()
    }
}

/// Store connection details, present only when a URL is configured.
#[derive(Clone)]
pub struct StoreSettings {
    pub base_url: Url,
    pub anon_key: String,
    pub service_role_key: Option<String>,
    pub timeout: Duration,
}

impl GuestbookSettings {
    /// Listener address, falling back to `0.0.0.0:8080`.
    ///
    /// # Errors
    /// Returns [`SettingsError::BindAddr`] when the value does not parse.
    pub fn bind_addr(&self) -> Result<SocketAddr, SettingsError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.parse().map_err(|err: std::net::AddrParseError| SettingsError::BindAddr {
            value: raw.to_owned(),
            message: err.to_string(),
        })
    }

    /// Per-request store timeout.
    ///
    /// # Errors
    /// Returns [`SettingsError::ZeroTimeout`] for `0`.
    pub fn request_timeout(&self) -> Result<Duration, SettingsError> {
        if self.request_timeout_secs == 0 {
            return Err(SettingsError::ZeroTimeout);
        }
        Ok(Duration::from_secs(self.request_timeout_secs))
    }

    /// Local offset for dates shown to people.
    ///
    /// # Errors
    /// Returns [`SettingsError::UtcOffset`] beyond ±24 hours.
    pub fn utc_offset(&self) -> Result<FixedOffset, SettingsError> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or(SettingsError::UtcOffset {
                minutes: self.utc_offset_minutes,
            })
    }

    /// Title, subtitle and offset for rendered exports.
    ///
    /// # Errors
    /// Propagates [`GuestbookSettings::utc_offset`] failures.
    pub fn report(&self) -> Result<ReportSettings, SettingsError> {
        Ok(ReportSettings {
            title: non_blank(self.report_title.as_deref())
                .unwrap_or(DEFAULT_REPORT_TITLE)
                .to_owned(),
            subtitle: non_blank(self.report_subtitle.as_deref())
                .unwrap_or(DEFAULT_REPORT_SUBTITLE)
                .to_owned(),
            offset: self.utc_offset()?,
        })
    }

    /// Hosted store settings, or `None` for the in-memory store.
    ///
    /// # Errors
    /// Returns an error for a malformed URL or a URL without an anon key.
    pub fn store(&self) -> Result<Option<StoreSettings>, SettingsError> {
        let Some(raw) = non_blank(self.store_url.as_deref()) else {
            return Ok(None);
        };
        let base_url = Url::parse(raw).map_err(|err| SettingsError::StoreUrl {
            value: raw.to_owned(),
            message: err.to_string(),
        })?;
        let anon_key = non_blank(self.store_anon_key.as_deref())
            .ok_or(SettingsError::MissingAnonKey)?
            .to_owned();
        Ok(Some(StoreSettings {
            base_url,
            anon_key,
            service_role_key: non_blank(self.store_service_role_key.as_deref())
                .map(str::to_owned),
            timeout: self.request_timeout()?,
        }))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
