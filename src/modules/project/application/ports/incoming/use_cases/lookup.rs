use async_trait::async_trait;

use crate::shared::AppError;

/// The five request/reply lookups a peer service can make over the
/// bus (spec.md §4.4.7). Each takes the raw wire string (a uid or a
/// slug, depending on the subject) and replies with a single string —
/// the router is the one that turns the trait's `Result` into reply
/// bytes or an error marker.
#[async_trait]
pub trait GetProjectNameUseCase: Send + Sync {
    async fn execute(&self, uid: &str) -> Result<String, AppError>;
}

#[async_trait]
pub trait GetProjectSlugUseCase: Send + Sync {
    async fn execute(&self, uid: &str) -> Result<String, AppError>;
}

#[async_trait]
pub trait GetProjectLogoUseCase: Send + Sync {
    async fn execute(&self, uid: &str) -> Result<String, AppError>;
}

/// Empty string reply means "root project" (spec.md §4.4.7's table).
#[async_trait]
pub trait GetProjectParentUidUseCase: Send + Sync {
    async fn execute(&self, uid: &str) -> Result<String, AppError>;
}

#[async_trait]
pub trait SlugToUidUseCase: Send + Sync {
    async fn execute(&self, slug: &str) -> Result<String, AppError>;
}
