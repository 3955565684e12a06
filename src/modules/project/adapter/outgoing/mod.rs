pub mod project_repository_store;
pub mod publisher_nats;

pub use project_repository_store::ProjectRepositoryStore;
pub use publisher_nats::NatsPublisher;
