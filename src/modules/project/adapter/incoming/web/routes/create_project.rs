use actix_web::{post, web, Responder, ResponseError};

use crate::app_state::AppState;
use crate::modules::project::adapter::incoming::web::extractors::AuthenticatedRequest;
use crate::modules::project::application::dto::CreateProjectRequest;
use crate::shared::api::ApiResponse;

/// `POST /projects` (spec.md §4.4.2, §6): validate, persist, fan out.
#[post("/projects")]
pub async fn create_project_handler(
    auth: AuthenticatedRequest,
    body: web::Json<CreateProjectRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.project.create.execute(body.into_inner(), auth.0).await {
        Ok(record) => ApiResponse::created(record),
        Err(err) => err.error_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value as JsonValue};

    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    fn sample_body(slug: &str) -> JsonValue {
        json!({
            "slug": slug,
            "name": "Alpha",
            "description": "d",
            "parent_uid": "",
            "stage": "Active",
            "category": "Active"
        })
    }

    #[actix_web::test]
    async fn creates_and_returns_201_with_uid() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(create_project_handler)).await;

        let req = test::TestRequest::post()
            .uri("/projects?v=1")
            .set_json(sample_body("alpha"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: JsonValue = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert!(body["data"]["uid"].is_string());
        assert_eq!(body["data"]["slug"], "alpha");
    }

    #[actix_web::test]
    async fn duplicate_slug_is_conflict() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(create_project_handler)).await;

        let first = test::TestRequest::post()
            .uri("/projects?v=1")
            .set_json(sample_body("beta"))
            .to_request();
        assert_eq!(test::call_service(&app, first).await.status(), StatusCode::CREATED);

        let second = test::TestRequest::post()
            .uri("/projects?v=1")
            .set_json(sample_body("beta"))
            .to_request();
        let resp = test::call_service(&app, second).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);
    }
}
