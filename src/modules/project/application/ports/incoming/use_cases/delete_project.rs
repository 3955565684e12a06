use async_trait::async_trait;

use crate::modules::project::application::dto::DeleteProjectInput;
use crate::request_context::RequestMetadata;
use crate::shared::AppError;

/// Backs `DELETE /projects/{uid}` (spec.md §4.4.6).
#[async_trait]
pub trait DeleteProjectUseCase: Send + Sync {
    async fn execute(&self, input: DeleteProjectInput, meta: RequestMetadata) -> Result<(), AppError>;
}
