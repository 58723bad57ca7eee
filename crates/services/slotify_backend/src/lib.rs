// File: services/slotify_backend/src/lib.rs
//! Slotify backend: wires configuration, storage and providers into one router.

pub mod app;
pub mod app_state;
pub mod service_factory;

pub use app::build_app;
pub use app_state::AppState;
