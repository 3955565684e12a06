use actix_web::{put, web, HttpRequest, HttpResponse, Responder, ResponseError};
use serde_json::json;

use crate::app_state::AppState;
use crate::modules::project::adapter::incoming::web::extractors::AuthenticatedRequest;
use crate::modules::project::adapter::incoming::web::if_match::expected_revision;
use crate::modules::project::application::dto::{UpdateProjectSettingsInput, UpdateProjectSettingsRequest};
use crate::shared::api::ApiResponse;

/// `PUT /projects/{uid}/settings` (spec.md §4.4.5, §6). Also publishes
/// `lfx.project.settings_updated` carrying old and new settings.
#[put("/projects/{uid}/settings")]
pub async fn update_project_settings_handler(
    auth: AuthenticatedRequest,
    http_req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpdateProjectSettingsRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected_revision = match expected_revision(&http_req, data.skip_etag_validation) {
        Ok(rev) => rev,
        Err(err) => return err.error_response(),
    };

    let input = UpdateProjectSettingsInput {
        uid: path.into_inner(),
        request: body.into_inner(),
        expected_revision,
        sync: auth.0.sync,
    };

    match data.project.update_settings.execute(input, auth.0).await {
        Ok(revision) => HttpResponse::Ok()
            .insert_header(("ETag", revision.to_string()))
            .json(ApiResponse {
                success: true,
                data: Some(json!({ "revision": revision })),
                error: None,
            }),
        Err(err) => err.error_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value as JsonValue;

    use crate::modules::project::adapter::incoming::web::routes::create_project::create_project_handler;
    use crate::modules::project::adapter::incoming::web::routes::get_project_settings::get_project_settings_handler;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    #[actix_web::test]
    async fn updates_settings_and_emits_event() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_project_handler)
                .service(get_project_settings_handler)
                .service(update_project_settings_handler),
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

        let put_req = test::TestRequest::put()
            .uri(&format!("/projects/{uid}/settings?v=1"))
            .insert_header(("If-Match", "1"))
            .set_json(json!({ "mission_statement": "new mission" }))
            .to_request();
        let resp = test::call_service(&app, put_req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let get_req = test::TestRequest::get()
            .uri(&format!("/projects/{uid}/settings?v=1"))
            .to_request();
        let body: JsonValue = test::call_and_read_body_json(&app, get_req).await;
        assert_eq!(body["data"]["mission_statement"], "new mission");
    }
}
