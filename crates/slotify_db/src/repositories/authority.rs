//! Repository for authorities
//!
//! Authorities are keyed by email. Removal is a soft delete through
//! `is_active`, so meetings keep pointing at real people.

use crate::error::DbError;

pub use slotify_common::models::Authority;

/// Filters for listing authorities. Empty filter lists active authorities.
#[derive(Debug, Clone, Default)]
pub struct AuthorityFilter {
    pub department: Option<String>,
    pub region: Option<String>,
    pub alert_type: Option<String>,
    pub include_inactive: bool,
}

impl AuthorityFilter {
    /// Exact match on every field that is set. Region means the
    /// jurisdiction's region, sub-regions are not consulted.
    pub fn matches(&self, authority: &Authority) -> bool {
        (self.include_inactive || authority.is_active)
            && self
                .department
                .as_ref()
                .map_or(true, |d| authority.department == *d)
            && self
                .region
                .as_ref()
                .map_or(true, |r| authority.jurisdiction.region == *r)
            && self
                .alert_type
                .as_ref()
                .map_or(true, |t| authority.alert_types.contains(t))
    }
}

/// Repository for authorities
pub trait AuthorityRepository {
    /// Create the `authorities` table if it doesn't exist.
    fn init_schema(&self) -> impl std::future::Future<Output = Result<(), DbError>> + Send;

    /// Insert or update by email and return the stored record.
    ///
    /// An update keeps the original `id` and `created_at` and reactivates a
    /// soft-deleted authority.
    fn upsert_authority(
        &self,
        authority: Authority,
    ) -> impl std::future::Future<Output = Result<Authority, DbError>> + Send;

    fn find_by_email(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<Option<Authority>, DbError>> + Send;

    /// Active authorities responsible for an alert, by ascending priority.
    ///
    /// Responsible means tagged for `alert_type` or working in one of
    /// `required_departments`. A `region` narrows the result to authorities
    /// whose jurisdiction region is exactly that region. All comparisons are
    /// exact.
    fn find_responsible(
        &self,
        alert_type: &str,
        required_departments: &[String],
        region: Option<&str>,
    ) -> impl std::future::Future<Output = Result<Vec<Authority>, DbError>> + Send;

    /// Authorities matching `filter`, by ascending priority.
    fn list(
        &self,
        filter: &AuthorityFilter,
    ) -> impl std::future::Future<Output = Result<Vec<Authority>, DbError>> + Send;

    /// Soft delete. `false` when no authority has this email.
    fn deactivate(
        &self,
        email: &str,
    ) -> impl std::future::Future<Output = Result<bool, DbError>> + Send;
}
