//! Factory trait shared by the repositories
//!
//! Repositories themselves have entity-specific traits in
//! [`crate::repositories`]; this only abstracts how they are built.

/// A factory for repository instances.
///
/// Generic over the repository type and whatever it is built from,
/// usually a [`crate::DbClient`].
pub trait RepositoryFactory<R, C> {
    /// Create a new repository instance
    fn create_repository(&self, config: C) -> R;
}
