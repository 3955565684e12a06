use actix_web::{delete, web, HttpRequest, Responder, ResponseError};

use crate::app_state::AppState;
use crate::modules::project::adapter::incoming::web::extractors::AuthenticatedRequest;
use crate::modules::project::adapter::incoming::web::if_match::expected_revision;
use crate::modules::project::application::dto::DeleteProjectInput;
use crate::shared::api::ApiResponse;

/// `DELETE /projects/{uid}` (spec.md §4.4.6, §6): cascades base,
/// settings and the slug index.
#[delete("/projects/{uid}")]
pub async fn hard_delete_project_handler(
    auth: AuthenticatedRequest,
    http_req: HttpRequest,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected_revision = match expected_revision(&http_req, data.skip_etag_validation) {
        Ok(rev) => rev,
        Err(err) => return err.error_response(),
    };

    let input = DeleteProjectInput {
        uid: path.into_inner(),
        expected_revision,
        sync: auth.0.sync,
    };

    match data.project.delete.execute(input, auth.0).await {
        Ok(()) => ApiResponse::no_content(),
        Err(err) => err.error_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::{json, Value as JsonValue};

    use crate::modules::project::adapter::incoming::web::routes::create_project::create_project_handler;
    use crate::modules::project::adapter::incoming::web::routes::get_single_project::get_project_by_id_handler;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;

    #[actix_web::test]
    async fn deletes_then_subsequent_get_is_not_found() {
        let state = TestAppStateBuilder::default().build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .service(create_project_handler)
                .service(get_project_by_id_handler)
                .service(hard_delete_project_handler),
        )
        .await;

        let create_req = test::TestRequest::post()
            .uri("/projects?v=1")
            .set_json(json!({
                "slug": "epsilon", "name": "E", "description": "d",
                "parent_uid": "", "stage": "Active", "category": "Active"
            }))
            .to_request();
        let created: JsonValue = test::call_and_read_body_json(&app, create_req).await;
        let uid = created["data"]["uid"].as_str().unwrap().to_string();

        let del_req = test::TestRequest::delete()
            .uri(&format!("/projects/{uid}?v=1"))
            .insert_header(("If-Match", "1"))
            .to_request();
        let resp = test::call_service(&app, del_req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let get_req = test::TestRequest::get()
            .uri(&format!("/projects/{uid}?v=1"))
            .to_request();
        let resp = test::call_service(&app, get_req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
