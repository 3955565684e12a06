use actix_web::{put, web, HttpRequest, HttpResponse, Responder, ResponseError};
use serde_json::json;

use crate::app_state::AppState;
use crate::modules::project::adapter::incoming::web::extractors::AuthenticatedRequest;
use crate::modules::project::adapter::incoming::web::if_match::expected_revision;
use crate::modules::project::application::dto::{UpdateProjectBaseInput, UpdateProjectBaseRequest};
use crate::shared::api::ApiResponse;

/// `PUT /projects/{uid}` (spec.md §4.4.4, §6): full-replacement update
/// of the base record, gated by `If-Match`.
#[put("/projects/{uid}")]
pub async fn update_project_base_handler(
    auth: AuthenticatedRequest,
    http_req: HttpRequest,
    path: web::Path<String>,
    body: web::Json<UpdateProjectBaseRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let expected_revision = match expected_revision(&http_req, data.skip_etag_validation) {
        Ok(rev) => rev,
        Err(err) => return err.error_response(),
    };

    let input = UpdateProjectBaseInput {
        uid: path.into_inner(),
        request: body.into_inner(),
        expected_revision,
        sync: auth.0.sync,
    };

    match data.project.update_base.execute(input, auth.0).await {
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
