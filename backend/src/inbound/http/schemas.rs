//! Response envelopes for the guest API.
//!
//! Domain types that already derive `ToSchema` are used directly. This module
//! covers the HTTP-only shapes: acknowledgement messages and the listing
//! envelope that combines a page of records with the year dropdown.

use pagination::Page;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{GuestRecord, GuestRecordPayload};

/// Acknowledgement returned by mutations that do not echo a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MessageResponse {
    /// User-facing confirmation.
    #[schema(example = "Data berhasil disimpan")]
    pub message: String,
}

impl MessageResponse {
    /// Wrap a confirmation message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// One page of filtered guest records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuestPageResponse {
    /// Records on this page, newest first.
    #[schema(value_type = Vec<GuestRecordPayload>)]
    pub items: Vec<GuestRecord>,
    /// Current 1-indexed page after clamping.
    pub page: usize,
    /// Records per page.
    pub page_size: usize,
    /// Number of pages; at least 1.
    pub page_count: usize,
    /// Records matching the filter across all pages.
    pub total: usize,
    /// Whether a previous page exists.
    pub has_previous: bool,
    /// Whether a next page exists.
    pub has_next: bool,
    /// Distinct visit years across all records, newest first.
    pub years: Vec<i32>,
}

impl GuestPageResponse {
    /// Combine a page with the year dropdown values.
    pub fn new(page: Page<GuestRecord>, years: Vec<i32>) -> Self {
        let Page {
            items,
            page,
            page_size,
            page_count,
            total,
            has_previous,
            has_next,
        } = page;
        Self {
            items,
            page,
            page_size,
            page_count,
            total,
            has_previous,
            has_next,
            years,
        }
    }
}
