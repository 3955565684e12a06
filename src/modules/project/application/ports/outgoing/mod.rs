pub mod project_repository;
pub mod publisher;

pub use project_repository::{ProjectRepository, RepositoryError};
pub use publisher::{Envelope, PublishError, Publisher};
