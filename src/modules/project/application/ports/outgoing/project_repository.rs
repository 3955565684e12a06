use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{ProjectBase, ProjectSettings};
use crate::store::Revision;

/// Domain-error alphabet a [`ProjectRepository`] translates [`crate::store::StoreError`]
/// into at its boundary (spec.md §4.2's translation table). Nothing
/// above this layer ever sees a store-specific error.
#[derive(Debug, Clone, thiserror::Error)]
pub enum RepositoryError {
    #[error("project not found")]
    NotFound,

    #[error("slug already exists")]
    SlugExists,

    #[error("revision mismatch")]
    RevisionMismatch,

    #[error("stored record could not be decoded: {0}")]
    Unmarshal(String),

    #[error("internal repository error: {0}")]
    Internal(String),
}

/// Base and settings persisted independently, each with its own
/// revision (spec.md §3 "Lifecycle").
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Atomically (best-effort, see spec.md §4.2) writes the slug
    /// index, the base record, and the settings record for a brand
    /// new project.
    async fn create_project(
        &self,
        base: &ProjectBase,
        settings: &ProjectSettings,
    ) -> Result<(), RepositoryError>;

    async fn get_base(&self, uid: Uuid) -> Result<ProjectBase, RepositoryError>;

    async fn get_base_with_revision(
        &self,
        uid: Uuid,
    ) -> Result<(ProjectBase, Revision), RepositoryError>;

    async fn get_settings(&self, uid: Uuid) -> Result<ProjectSettings, RepositoryError>;

    async fn get_settings_with_revision(
        &self,
        uid: Uuid,
    ) -> Result<(ProjectSettings, Revision), RepositoryError>;

    async fn project_exists(&self, uid: Uuid) -> Result<bool, RepositoryError>;

    async fn slug_to_uid(&self, slug: &str) -> Result<Uuid, RepositoryError>;

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError>;

    /// Full replacement of the base record. Handles the slug-index
    /// rewrite when `base.slug` differs from the stored slug
    /// (spec.md §4.2).
    async fn update_base(
        &self,
        base: &ProjectBase,
        expected_revision: Revision,
    ) -> Result<Revision, RepositoryError>;

    async fn update_settings(
        &self,
        settings: &ProjectSettings,
        expected_revision: Revision,
    ) -> Result<Revision, RepositoryError>;

    /// Removes base, settings, and the slug-index entry. The base
    /// delete is the consistency gate; settings and slug-index removal
    /// are best-effort afterward (spec.md §4.2).
    async fn delete_project(
        &self,
        uid: Uuid,
        expected_revision: Revision,
    ) -> Result<(), RepositoryError>;

    async fn list_all_base(&self) -> Result<Vec<ProjectBase>, RepositoryError>;

    async fn list_all_settings(&self) -> Result<Vec<ProjectSettings>, RepositoryError>;

    /// Pairs each base with its settings record (falling back to
    /// `ProjectSettings::empty(uid)` when settings are briefly absent
    /// right after create, per I2).
    async fn list_all_projects(
        &self,
    ) -> Result<Vec<(ProjectBase, ProjectSettings)>, RepositoryError>;
}
