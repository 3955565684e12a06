pub mod app_state;
pub mod config;
pub mod domain;
pub mod health;
pub mod modules;
pub mod request_context;
pub mod shared;
pub mod store;
pub mod telemetry;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::app_state::AppState;
use crate::config::Config;
use crate::modules::project::adapter::incoming::bus::BusRouter;
use crate::modules::project::adapter::outgoing::{NatsPublisher, ProjectRepositoryStore};
use crate::modules::project::application::ports::outgoing::{ProjectRepository, Publisher};
use crate::modules::project::application::service::{ProjectService, ServiceConfig};
use crate::modules::project::application::ProjectUseCases;
use crate::store::NatsKvStore;

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    telemetry::init();

    dotenvy::dotenv().ok();
    let config = Config::from_env();

    info!(bind = %config.bind_addr(), nats = %config.nats_url, "starting project registry service");

    let nats_client = async_nats::connect(&config.nats_url)
        .await
        .expect("failed to connect to NATS");

    let projects_store = NatsKvStore::connect(nats_client.clone(), &config.projects_bucket)
        .await
        .expect("failed to open projects bucket");
    let settings_store =
        NatsKvStore::connect(nats_client.clone(), &config.project_settings_bucket)
            .await
            .expect("failed to open project-settings bucket");

    let repository: Arc<dyn ProjectRepository> =
        Arc::new(ProjectRepositoryStore::new(Arc::new(projects_store), Arc::new(settings_store)));
    let publisher: Arc<dyn Publisher> = Arc::new(NatsPublisher::new(nats_client.clone()));

    let service_config = ServiceConfig {
        sync_publish_timeout: config.sync_publish_timeout,
        skip_etag_validation: config.skip_etag_validation,
    };
    let service = Arc::new(ProjectService::new(repository, publisher, service_config));
    let use_cases = Arc::new(ProjectUseCases::new(service));

    BusRouter::new(nats_client, use_cases.clone()).spawn();

    let state = AppState {
        project: (*use_cases).clone(),
        skip_etag_validation: config.skip_etag_validation,
    };

    let bind_addr = config.bind_addr();
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(crate::shared::api::custom_json_config())
            .configure(init_routes)
    })
    .bind(bind_addr)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    use crate::modules::project::adapter::incoming::web::routes;

    cfg.service(health::livez);
    cfg.service(health::readyz);
    cfg.service(routes::get_projects_handler);
    cfg.service(routes::create_project_handler);
    cfg.service(routes::get_project_by_id_handler);
    cfg.service(routes::get_project_settings_handler);
    cfg.service(routes::update_project_base_handler);
    cfg.service(routes::update_project_settings_handler);
    cfg.service(routes::hard_delete_project_handler);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
    }
}
