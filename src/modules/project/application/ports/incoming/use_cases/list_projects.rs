use async_trait::async_trait;

use crate::modules::project::application::dto::ProjectRecord;
use crate::shared::AppError;

/// Backs `GET /projects` (spec.md §6) and the downstream
/// reconciliation surface the glossary's "list_all_*" operations exist
/// for (spec.md §7 "Recovery").
#[async_trait]
pub trait ListProjectsUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<ProjectRecord>, AppError>;
}
