use async_trait::async_trait;

use crate::modules::project::application::dto::UpdateProjectSettingsInput;
use crate::request_context::RequestMetadata;
use crate::store::Revision;
use crate::shared::AppError;

/// Backs `PUT /projects/{uid}/settings` (spec.md §4.4.5). Additionally
/// publishes `lfx.project.settings_updated` carrying old and new
/// settings so downstream consumers can diff role membership.
#[async_trait]
pub trait UpdateProjectSettingsUseCase: Send + Sync {
    async fn execute(
        &self,
        input: UpdateProjectSettingsInput,
        meta: RequestMetadata,
    ) -> Result<Revision, AppError>;
}
