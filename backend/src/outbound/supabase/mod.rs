//! Hosted store outbound adapters.
//!
//! Thin HTTP implementations of the guest store and admin auth ports over
//! the project's PostgREST and auth endpoints.

mod auth;
mod client;
mod dto;
mod guest_store;

pub use auth::{SupabaseAdminAuthenticator, SupabaseAdminDirectory};
pub use client::{SupabaseClient, SupabaseConfig, SupabaseKey};
pub use guest_store::SupabaseGuestStore;
