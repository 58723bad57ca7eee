// --- File: crates/slotify_chainsync/src/lib.rs ---
//! ChainSync: turns external alerts into emergency meetings.
//!
//! An alert is matched to a severity policy, the responsible authorities are
//! looked up, a slot is picked, a calendar event is created best-effort on
//! the first authority with a connected calendar, and the meeting record is
//! stored either way.
//!
//! # API Endpoints (mounted under `/api/chainsync`)
//!
//! - `POST /schedule-meeting` - Schedule a meeting for an alert
//! - `GET /meetings/{alertId}` - Meetings scheduled for an alert
//! - `GET /meetings` - Filtered meeting list
//! - `PATCH /meetings/{meetingId}/status` - Update a meeting's status
//! - `POST /meetings/{meetingId}/notes` - Append a note
//! - `POST|GET /authorities`, `DELETE /authorities/{email}` - Authority directory
//! - `POST|GET /config` - Per-alert-type policies
//! - `GET /health` - Service and database health

#[cfg(feature = "openapi")]
pub mod doc;
pub mod error;
pub mod handlers;
pub mod logic;
#[cfg(test)]
mod logic_proptest;
#[cfg(test)]
mod logic_test;
pub mod routes;
#[cfg(test)]
mod test_support;

pub use error::{CalendarError, ChainsyncError};
pub use handlers::ChainsyncState;
pub use routes::routes;

#[cfg(feature = "openapi")]
pub mod openapi {
    pub use crate::doc::ChainsyncApiDoc;
}
