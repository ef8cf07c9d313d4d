//! PostgREST-backed guest store adapter.
//!
//! This adapter owns transport details only: query construction, key
//! headers, HTTP error mapping, and decoding rows into domain records.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder, StatusCode, Url};
use tracing::debug;

use super::client::{
    RETURN_REPRESENTATION, RawResponse, SupabaseClient, is_unavailable, send, status_message,
};
use super::dto::{GuestRowDto, GuestRowWriteDto};
use crate::domain::ports::{GuestStore, GuestStoreError};
use crate::domain::{GuestId, GuestRecord, GuestSubmission};

const GUESTS_PATH: &str = "/rest/v1/guests";

/// Guest store over the hosted project's `guests` table.
#[derive(Debug, Clone)]
pub struct SupabaseGuestStore {
    client: Arc<SupabaseClient>,
}

impl SupabaseGuestStore {
    /// Adapter sharing `client`'s connection pool.
    pub fn new(client: Arc<SupabaseClient>) -> Self {
        Self { client }
    }

    fn guests_url(&self, id: Option<&GuestId>) -> Result<Url, GuestStoreError> {
        let mut url = self
            .client
            .endpoint(GUESTS_PATH)
            .map_err(|err| GuestStoreError::query(format!("invalid store URL: {err}")))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("select", "*");
            match id {
                Some(id) => {
                    pairs.append_pair("id", &format!("eq.{id}"));
                }
                None => {
                    pairs.append_pair("order", "created_at.desc");
                }
            }
        }
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> Result<RequestBuilder, GuestStoreError> {
        self.client
            .request(method, url, self.client.data_role())
            .ok_or_else(|| GuestStoreError::connection("no store key configured"))
    }

    async fn rows(&self, request: RequestBuilder) -> Result<Vec<GuestRecord>, GuestStoreError> {
        let RawResponse { status, body } = send(request).await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, &body));
        }
        parse_rows(&body)
    }
}

#[async_trait]
impl GuestStore for SupabaseGuestStore {
    async fn list_all(&self) -> Result<Vec<GuestRecord>, GuestStoreError> {
        let url = self.guests_url(None)?;
        let records = self.rows(self.request(Method::GET, url)?).await?;
        debug!(count = records.len(), "fetched guest rows");
        Ok(records)
    }

    async fn find_by_id(&self, id: &GuestId) -> Result<Option<GuestRecord>, GuestStoreError> {
        let url = self.guests_url(Some(id))?;
        let records = self.rows(self.request(Method::GET, url)?).await?;
        Ok(records.into_iter().next())
    }

    async fn insert(&self, guest: &GuestSubmission) -> Result<GuestRecord, GuestStoreError> {
        let url = self
            .client
            .endpoint(GUESTS_PATH)
            .map_err(|err| GuestStoreError::query(format!("invalid store URL: {err}")))?;
        let request = self
            .request(Method::POST, url)?
            .header("Prefer", RETURN_REPRESENTATION)
            .header(CONTENT_TYPE, "application/json")
            .json(&GuestRowWriteDto::from(guest));

        self.rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GuestStoreError::query("insert returned no rows"))
    }

    async fn update_by_id(
        &self,
        id: &GuestId,
        guest: &GuestSubmission,
    ) -> Result<GuestRecord, GuestStoreError> {
        let url = self.guests_url(Some(id))?;
        let request = self
            .request(Method::PATCH, url)?
            .header("Prefer", RETURN_REPRESENTATION)
            .header(CONTENT_TYPE, "application/json")
            .json(&GuestRowWriteDto::from(guest));

        self.rows(request)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GuestStoreError::not_found(id.to_string()))
    }

    async fn delete_by_id(&self, id: &GuestId) -> Result<(), GuestStoreError> {
        let url = self.guests_url(Some(id))?;
        let request = self
            .request(Method::DELETE, url)?
            .header("Prefer", RETURN_REPRESENTATION);

        if self.rows(request).await?.is_empty() {
            return Err(GuestStoreError::not_found(id.to_string()));
        }
        Ok(())
    }
}

fn parse_rows(body: &[u8]) -> Result<Vec<GuestRecord>, GuestStoreError> {
    let rows: Vec<GuestRowDto> = serde_json::from_slice(body)
        .map_err(|err| GuestStoreError::query(format!("invalid guest rows: {err}")))?;
    Ok(rows.into_iter().map(GuestRowDto::into_record).collect())
}

fn map_transport_error(error: reqwest::Error) -> GuestStoreError {
    GuestStoreError::connection(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> GuestStoreError {
    let message = status_message(status, body);
    if is_unavailable(status) {
        GuestStoreError::connection(message)
    } else {
        GuestStoreError::query(message)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.

    use std::time::Duration;

    use rstest::{fixture, rstest};

    use super::*;
    use crate::outbound::supabase::{SupabaseConfig, SupabaseKey};

    #[fixture]
    fn store() -> SupabaseGuestStore {
        let client = SupabaseClient::new(SupabaseConfig {
            base_url: Url::parse("https://desa.supabase.co").expect("valid url"),
            anon_key: SupabaseKey::new("anon"),
            service_role_key: None,
            timeout: Duration::from_secs(5),
        })
        .expect("client builds");
        SupabaseGuestStore::new(Arc::new(client))
    }

    #[rstest]
    fn listing_orders_newest_first(store: SupabaseGuestStore) {
        let url = store.guests_url(None).expect("url builds");
        assert_eq!(url.path(), GUESTS_PATH);
        assert_eq!(url.query(), Some("select=*&order=created_at.desc"));
    }

    #[rstest]
    fn single_row_queries_filter_by_id(store: SupabaseGuestStore) {
        let id = GuestId::new("7").expect("valid id");
        let url = store.guests_url(Some(&id)).expect("url builds");
        assert_eq!(url.query(), Some("select=*&id=eq.7"));
    }

    #[rstest]
    #[case(StatusCode::SERVICE_UNAVAILABLE, true)]
    #[case(StatusCode::BAD_GATEWAY, true)]
    #[case(StatusCode::BAD_REQUEST, false)]
    #[case(StatusCode::INTERNAL_SERVER_ERROR, false)]
    fn maps_statuses_to_store_errors(#[case] status: StatusCode, #[case] unavailable: bool) {
        let error = map_status_error(status, br#"{"message":"relation does not exist"}"#);
        assert_eq!(
            matches!(error, GuestStoreError::Connection { .. }),
            unavailable
        );
        assert!(error.to_string().contains(&status.as_u16().to_string()));
    }

    #[rstest]
    fn parses_row_arrays() {
        let body = br#"[
            {"id": 1, "full_name": "Budi", "address": "Dusun Krajan", "phone": "081234567890",
             "purpose": "Mengurus surat", "visit_date": "2025-03-12",
             "created_at": "2025-03-12T02:00:00+00:00"},
            {"id": 2, "full_name": "Siti", "address": "Dusun Kulon", "phone": null,
             "purpose": "Rapat desa", "visit_date": "2025-03-11",
             "created_at": "2025-03-11T02:00:00+00:00"}
        ]"#;
        let records = parse_rows(body).expect("rows decode");
        let ids: Vec<&str> = records.iter().map(|r| r.id().as_ref()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[rstest]
    fn rejects_non_array_payloads() {
        let error = parse_rows(br#"{"message":"oops"}"#).expect_err("not rows");
        assert!(matches!(error, GuestStoreError::Query { .. }));
    }
}
