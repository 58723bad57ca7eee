// --- File: crates/slotify_gcal/src/lib.rs ---
//! Google Calendar provider.
//!
//! Events are written on behalf of the organizing authority with that
//! authority's own OAuth tokens, so a hub is built per call.

pub mod auth;
pub mod error;
pub mod service;

pub use error::GcalServiceError;
pub use service::GoogleCalendarService;
