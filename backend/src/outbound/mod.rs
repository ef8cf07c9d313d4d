//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **supabase**: guest store and admin auth over the hosted project's REST
//!   and auth APIs (reqwest)
//! - **memory**: in-process guest store for local runs and tests
//! - **export**: CSV, XLSX and PDF report renderers
//!
//! Adapters are thin translators between domain types and wire or file
//! formats. They contain no business logic.

pub mod export;
pub mod memory;
pub mod supabase;
