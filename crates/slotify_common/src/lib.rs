// --- File: crates/slotify_common/src/lib.rs ---

pub mod error; // Error handling
pub mod features; // Feature flag handling
pub mod http; // HTTP envelope and error rendering
pub mod logging; // Logging utilities
pub mod models; // Shared domain records
pub mod services; // Service abstractions

// Re-export error types and utilities for easier access
pub use error::{
    config_error, conflict, external_service_error, internal_error, not_found, validation_error,
    Context, HttpStatusCode, SlotifyError,
};

pub use http::{configure_error_details, panic_response, ApiResponse, IntoHttpResponse};

pub use logging::{init, init_from_config, init_with_level, log_error, log_result};

pub use features::is_feature_enabled;

#[cfg(feature = "gcal")]
pub use features::is_gcal_enabled;

#[cfg(feature = "chainsync")]
pub use features::is_chainsync_enabled;
