use crate::modules::project::application::ProjectUseCases;

/// Shared application state handed to every route handler, mirroring
/// the teacher's `AppState` (one `Arc` per use case) but collapsed to
/// the single [`ProjectUseCases`] bundle this crate's one module owns.
#[derive(Clone)]
pub struct AppState {
    pub project: ProjectUseCases,
    /// Mirrors [`crate::config::Config::skip_etag_validation`] so route
    /// handlers can decide whether a missing `If-Match` header is a
    /// validation error or an instruction to use "last write wins"
    /// (spec.md §6.1, §9's skip-etag open question).
    pub skip_etag_validation: bool,
}
