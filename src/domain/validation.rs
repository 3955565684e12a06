use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

use crate::shared::error::AppError;

/// `^[a-z][a-z0-9_\-]*[a-z0-9]$` — spec.md §3 / §8.
static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_\-]*[a-z0-9]$").expect("static slug regex is valid"));

pub fn validate_slug(slug: &str) -> Result<(), AppError> {
    if SLUG_RE.is_match(slug) {
        Ok(())
    } else {
        Err(AppError::ValidationFailed(format!(
            "slug '{slug}' does not match ^[a-z][a-z0-9_-]*[a-z0-9]$"
        )))
    }
}

/// Parses a UUID path/body parameter, surfacing `ValidationFailed` (not
/// `ProjectNotFound`) on malformed input per spec.md §8.
pub fn parse_uuid(raw: &str, field: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::ValidationFailed(format!("'{field}' is not a valid UUID: {raw}")))
}

/// `parent_uid` empty string means "no parent"; anything else must parse
/// as a UUID or the write is rejected (spec.md §8).
pub fn parse_optional_parent_uid(raw: &str) -> Result<Option<Uuid>, AppError> {
    if raw.is_empty() {
        Ok(None)
    } else {
        parse_uuid(raw, "parent_uid").map(Some)
    }
}

/// Parses an `If-Match` header value as the opaque revision it wraps.
pub fn parse_revision(raw: &str) -> Result<u64, AppError> {
    raw.parse::<u64>()
        .map_err(|_| AppError::ValidationFailed(format!("If-Match revision is not numeric: {raw}")))
}
