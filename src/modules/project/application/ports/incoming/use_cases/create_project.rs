use async_trait::async_trait;

use crate::modules::project::application::dto::{CreateProjectRequest, ProjectRecord};
use crate::request_context::RequestMetadata;
use crate::shared::AppError;

/// Backs `POST /projects` (spec.md §4.4.2): validate, generate uid,
/// persist base+settings, fan out to indexer and access topics.
#[async_trait]
pub trait CreateProjectUseCase: Send + Sync {
    async fn execute(
        &self,
        request: CreateProjectRequest,
        meta: RequestMetadata,
    ) -> Result<ProjectRecord, AppError>;
}
