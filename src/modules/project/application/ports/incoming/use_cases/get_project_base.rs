use async_trait::async_trait;

use crate::domain::ProjectBase;
use crate::store::Revision;
use crate::shared::AppError;

/// Backs `GET /projects/{uid}` (spec.md §4.4.3). `uid` is accepted as
/// a raw string so malformed UUIDs surface as `ValidationFailed`
/// rather than `NotFound` (spec.md §8).
#[async_trait]
pub trait GetProjectBaseUseCase: Send + Sync {
    async fn execute(&self, uid: &str) -> Result<(ProjectBase, Revision), AppError>;
}
