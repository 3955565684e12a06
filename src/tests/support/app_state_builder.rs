use std::sync::Arc;
use std::time::Duration;

use actix_web::web;

use crate::app_state::AppState;
use crate::modules::project::adapter::outgoing::ProjectRepositoryStore;
use crate::modules::project::application::service::{ProjectService, ServiceConfig};
use crate::modules::project::application::ports::outgoing::{ProjectRepository, Publisher};
use crate::modules::project::application::ProjectUseCases;
use crate::store::MemoryKvStore;
use crate::tests::support::fake_publisher::RecordingPublisher;

/// Builds an [`AppState`] wired to an in-memory [`MemoryKvStore`] pair
/// and a [`RecordingPublisher`], mirroring the teacher's
/// `TestAppStateBuilder` (`tests/support/app_state_builder.rs`) used to
/// stand up route-handler tests without a real backend.
pub struct TestAppStateBuilder {
    repository: Arc<dyn ProjectRepository>,
    publisher: Arc<RecordingPublisher>,
    config: ServiceConfig,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        let projects = Arc::new(MemoryKvStore::new());
        let settings = Arc::new(MemoryKvStore::new());
        Self {
            repository: Arc::new(ProjectRepositoryStore::new(projects, settings)),
            publisher: Arc::new(RecordingPublisher::new()),
            config: ServiceConfig {
                sync_publish_timeout: Duration::from_secs(1),
                skip_etag_validation: false,
            },
        }
    }
}

impl TestAppStateBuilder {
    pub fn not_ready(mut self) -> Self {
        self.publisher = Arc::new(RecordingPublisher::disconnected());
        self
    }

    pub fn failing_on(mut self, subject: &str) -> Self {
        self.publisher = Arc::new(RecordingPublisher::failing_on(subject));
        self
    }

    pub fn skip_etag_validation(mut self) -> Self {
        self.config.skip_etag_validation = true;
        self
    }

    pub fn publisher(&self) -> Arc<RecordingPublisher> {
        self.publisher.clone()
    }

    pub fn repository(&self) -> Arc<dyn ProjectRepository> {
        self.repository.clone()
    }

    pub fn build(self) -> web::Data<AppState> {
        let skip_etag_validation = self.config.skip_etag_validation;
        let publisher: Arc<dyn Publisher> = self.publisher;
        let service = Arc::new(ProjectService::new(self.repository, publisher, self.config));
        web::Data::new(AppState {
            project: ProjectUseCases::new(service),
            skip_etag_validation,
        })
    }
}
