use actix_web::{get, web, Responder, ResponseError};

use crate::app_state::AppState;
use crate::modules::project::adapter::incoming::web::extractors::AuthenticatedRequest;
use crate::shared::api::ApiResponse;

/// `GET /projects` (spec.md §6): list base∪settings for every live
/// project.
#[get("/projects")]
pub async fn get_projects_handler(
    _auth: AuthenticatedRequest,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.project.list.execute().await {
        Ok(records) => ApiResponse::success(records),
        Err(err) => err.error_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value as JsonValue;

    use crate::modules::project::application::dto::CreateProjectRequest;
    use crate::request_context::RequestMetadata;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    #[actix_web::test]
    async fn lists_created_projects() {
        let state = TestAppStateBuilder::default().build();

        state
            .project
            .create
            .execute(
                CreateProjectRequest {
                    slug: "alpha".to_string(),
                    name: "Alpha".to_string(),
                    description: "d".to_string(),
                    parent_uid: String::new(),
                    public: false,
                    stage: crate::domain::Stage::Active,
                    category: crate::domain::Category::Active,
                    legal_entity_type: Default::default(),
                    legal_entity_name: String::new(),
                    legal_parent_uid: String::new(),
                    funding_model: vec![],
                    entity_dissolution_date: None,
                    entity_formation_document_url: String::new(),
                    formation_date: None,
                    autojoin_enabled: false,
                    charter_url: String::new(),
                    logo_url: String::new(),
                    website_url: String::new(),
                    repository_url: String::new(),
                    mission_statement: String::new(),
                    announcement_date: None,
                    writers: vec![],
                    auditors: vec![],
                    meeting_coordinators: vec![],
                },
                RequestMetadata::default(),
            )
            .await
            .expect("create project");

        let app = test::init_service(App::new().app_data(state).service(get_projects_handler)).await;

        let req = test::TestRequest::get().uri("/projects?v=1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: JsonValue = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);
        assert_eq!(body["data"][0]["slug"], "alpha");
    }

    #[actix_web::test]
    async fn rejects_missing_api_version() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(get_projects_handler)).await;

        let req = test::TestRequest::get().uri("/projects").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
