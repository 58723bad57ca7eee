//! Database integration for Slotify
//!
//! Stores authorities, per-alert-type policies and scheduled alert meetings.
//! The client sits on `sqlx::Any`, so the same repositories run on SQLite
//! (the default) or PostgreSQL, picked by the URL scheme and feature flags.
//!
//! # Example
//!
//! ```rust,no_run
//! use slotify_db::{AuthorityRepository, AuthorityRepositoryFactory, DbClient, RepositoryFactory};
//!
//! async fn setup() -> Result<(), slotify_db::DbError> {
//!     let db_client = DbClient::from_url("sqlite::memory:").await?;
//!     let authorities = AuthorityRepositoryFactory::new().create_repository(db_client);
//!     authorities.init_schema().await?;
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod repositories;
pub mod repository;

pub use client::{DbClient, DbTransaction};
pub use error::DbError;
pub use factory::DbClientFactory;
pub use repository::RepositoryFactory;

pub use repositories::{
    AlertConfig, AlertConfigRepository, AlertConfigRepositoryFactory, AlertMeeting,
    AlertMeetingRepository, AlertMeetingRepositoryFactory, Authority, AuthorityFilter,
    AuthorityRepository, AuthorityRepositoryFactory, MeetingFilter, MeetingUpdate,
    SqlAlertConfigRepository, SqlAlertMeetingRepository, SqlAuthorityRepository,
};
