use async_trait::async_trait;

use crate::modules::project::application::dto::UpdateProjectBaseInput;
use crate::request_context::RequestMetadata;
use crate::store::Revision;
use crate::shared::AppError;

/// Backs `PUT /projects/{uid}` (spec.md §4.4.4): full-replacement
/// update with slug-rewrite and parent cycle checks.
#[async_trait]
pub trait UpdateProjectBaseUseCase: Send + Sync {
    async fn execute(
        &self,
        input: UpdateProjectBaseInput,
        meta: RequestMetadata,
    ) -> Result<Revision, AppError>;
}
