use actix_web::{get, web, HttpResponse, Responder, ResponseError};

use crate::app_state::AppState;
use crate::modules::project::adapter::incoming::web::extractors::AuthenticatedRequest;
use crate::shared::api::ApiResponse;

/// `GET /projects/{uid}` (spec.md §4.4.3, §6): read base, revision
/// surfaced as `ETag`.
#[get("/projects/{uid}")]
pub async fn get_project_by_id_handler(
    _auth: AuthenticatedRequest,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.project.get_base.execute(&path.into_inner()).await {
        Ok((base, revision)) => HttpResponse::Ok()
            .insert_header(("ETag", revision.to_string()))
            .json(ApiResponse {
                success: true,
                data: Some(base),
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
    async fn reads_created_project_with_etag() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_project_handler)
                .service(get_project_by_id_handler),
        )
        .await;

        let create_req = test::TestRequest::post()
            .uri("/projects?v=1")
            .set_json(json!({
                "slug": "alpha", "name": "Alpha", "description": "d",
                "parent_uid": "", "stage": "Active", "category": "Active"
            }))
            .to_request();
        let created: JsonValue = test::call_and_read_body_json(&app, create_req).await;
        let uid = created["data"]["uid"].as_str().unwrap().to_string();

        let get_req = test::TestRequest::get()
            .uri(&format!("/projects/{uid}?v=1"))
            .to_request();
        let resp = test::call_service(&app, get_req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("ETag").unwrap(), "1");

        let body: JsonValue = test::read_body_json(resp).await;
        assert_eq!(body["data"]["slug"], "alpha");
    }

    #[actix_web::test]
    async fn malformed_uid_is_bad_request_not_not_found() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(get_project_by_id_handler)).await;

        let req = test::TestRequest::get()
            .uri("/projects/not-a-uuid?v=1")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn unknown_uid_is_not_found() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(App::new().app_data(state).service(get_project_by_id_handler)).await;

        let req = test::TestRequest::get()
            .uri(&format!("/projects/{}?v=1", uuid::Uuid::new_v4()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
