use async_trait::async_trait;

use crate::domain::ProjectSettings;
use crate::store::Revision;
use crate::shared::AppError;

/// Backs `GET /projects/{uid}/settings` (spec.md §4.4.3).
#[async_trait]
pub trait GetProjectSettingsUseCase: Send + Sync {
    async fn execute(&self, uid: &str) -> Result<(ProjectSettings, Revision), AppError>;
}
