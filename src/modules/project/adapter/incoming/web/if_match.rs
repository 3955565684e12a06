use actix_web::HttpRequest;

use crate::modules::project::application::dto::ExpectedRevision;
use crate::shared::AppError;

/// Reads `If-Match` off the wire into an [`ExpectedRevision`]. A
/// missing header is only tolerated when the deployment's
/// `skip_etag_validation` flag is set (spec.md §6.1 boundary case:
/// "If-Match absent with ETag validation enabled → ValidationFailed").
pub fn expected_revision(req: &HttpRequest, skip_etag_validation: bool) -> Result<ExpectedRevision, AppError> {
    match req.headers().get("If-Match").and_then(|v| v.to_str().ok()) {
        Some(value) => Ok(ExpectedRevision::IfMatch(value.to_string())),
        None if skip_etag_validation => Ok(ExpectedRevision::SkipValidation),
        None => Err(AppError::ValidationFailed(
            "If-Match header is required".to_string(),
        )),
    }
}
