//! Repository modules for database access
//!
//! One trait, one SQL implementation and one factory per stored record.

pub mod alert_config;
pub mod alert_config_factory;
pub mod alert_config_sql;
pub mod alert_meeting;
pub mod alert_meeting_factory;
pub mod alert_meeting_sql;
pub mod authority;
pub mod authority_factory;
pub mod authority_sql;
pub mod codec;


pub use alert_config::{AlertConfig, AlertConfigRepository};
pub use alert_config_factory::AlertConfigRepositoryFactory;
pub use alert_config_sql::SqlAlertConfigRepository;
pub use alert_meeting::{AlertMeeting, AlertMeetingRepository, MeetingFilter, MeetingUpdate};
pub use alert_meeting_factory::AlertMeetingRepositoryFactory;
pub use alert_meeting_sql::SqlAlertMeetingRepository;
pub use authority::{Authority, AuthorityFilter, AuthorityRepository};
pub use authority_factory::AuthorityRepositoryFactory;
pub use authority_sql::SqlAuthorityRepository;
