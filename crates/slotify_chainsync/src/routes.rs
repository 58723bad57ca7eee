// --- File: crates/slotify_chainsync/src/routes.rs ---

use crate::handlers::{
    add_note_handler, deactivate_authority_handler, health_handler, list_authorities_handler,
    list_configs_handler, list_meetings_handler, meetings_for_alert_handler,
    schedule_meeting_handler, update_status_handler, upsert_authority_handler,
    upsert_config_handler, ChainsyncState,
};
use axum::{
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tracing::info;

/// Creates a router containing all routes for the ChainSync feature.
///
/// Mounted by the backend under `/api/chainsync`. Tables must already exist,
/// see [`ChainsyncState::init_schema`].
pub fn routes(state: Arc<ChainsyncState>) -> Router {
    info!(
        "ChainSync routes initialized (enabled: {}, calendar provider: {})",
        state.is_enabled(),
        state.calendar_service.is_some()
    );

    // `{id}` is an alert id on the plain path and a meeting id below it;
    // the router needs one parameter name per segment.
    Router::new()
        .route("/schedule-meeting", post(schedule_meeting_handler))
        .route("/meetings", get(list_meetings_handler))
        .route("/meetings/{id}", get(meetings_for_alert_handler))
        .route("/meetings/{id}/status", patch(update_status_handler))
        .route("/meetings/{id}/notes", post(add_note_handler))
        .route(
            "/authorities",
            post(upsert_authority_handler).get(list_authorities_handler),
        )
        .route("/authorities/{email}", delete(deactivate_authority_handler))
        .route("/config", post(upsert_config_handler).get(list_configs_handler))
        .route("/health", get(health_handler))
        .with_state(state)
}
