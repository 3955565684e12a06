use actix_web::{get, web, HttpResponse, Responder, ResponseError};

use crate::app_state::AppState;
use crate::modules::project::adapter::incoming::web::extractors::AuthenticatedRequest;
use crate::shared::api::ApiResponse;

/// `GET /projects/{uid}/settings` (spec.md §4.4.3, §6).
#[get("/projects/{uid}/settings")]
pub async fn get_project_settings_handler(
    _auth: AuthenticatedRequest,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.project.get_settings.execute(&path.into_inner()).await {
        Ok((settings, revision)) => HttpResponse::Ok()
            .insert_header(("ETag", revision.to_string()))
            .json(ApiResponse {
                success: true,
                data: Some(settings),
                error: None,
            }),
        Err(err) => err.error_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value as JsonValue};

    use crate::modules::project::adapter::incoming::web::routes::create_project::create_project_handler;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    #[actix_web::test]
    async fn reads_settings_for_created_project() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_project_handler)
                .service(get_project_settings_handler),
        )
        .await;

        let create_req = test::TestRequest::post()
            .uri("/projects?v=1")
            .set_json(json!({
                "slug": "alpha", "name": "Alpha", "description": "d",
                "parent_uid": "", "stage": "Active", "category": "Active",
                "mission_statement": "to boldly go"
            }))
            .to_request();
        let created: JsonValue = test::call_and_read_body_json(&app, create_req).await;
        let uid = created["data"]["uid"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri(&format!("/projects/{uid}/settings?v=1"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: JsonValue = test::read_body_json(resp).await;
        assert_eq!(body["data"]["mission_statement"], "to boldly go");
    }

    #[actix_web::test]
    async fn unknown_uid_is_not_found() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(get_project_settings_handler)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/projects/{}/settings?v=1", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
