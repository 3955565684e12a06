use std::sync::Arc;

use crate::modules::project::application::ports::incoming::use_cases::{
    CreateProjectUseCase, DeleteProjectUseCase, GetProjectBaseUseCase, GetProjectLogoUseCase,
    GetProjectNameUseCase, GetProjectParentUidUseCase, GetProjectSettingsUseCase,
    GetProjectSlugUseCase, ListProjectsUseCase, ReadinessUseCase, SlugToUidUseCase,
    UpdateProjectBaseUseCase, UpdateProjectSettingsUseCase,
};
use crate::modules::project::application::service::ProjectService;

/// One `Arc` per operation, all pointing at the same [`ProjectService`]
/// instance coerced to each narrow trait — mirrors the teacher's
/// `AppState` holding one use-case `Arc` per field, just gathered here
/// instead of inline in `AppState` since this module owns thirteen of
/// them.
#[derive(Clone)]
pub struct ProjectUseCases {
    pub list: Arc<dyn ListProjectsUseCase>,
    pub create: Arc<dyn CreateProjectUseCase>,
    pub get_base: Arc<dyn GetProjectBaseUseCase>,
    pub get_settings: Arc<dyn GetProjectSettingsUseCase>,
    pub update_base: Arc<dyn UpdateProjectBaseUseCase>,
    pub update_settings: Arc<dyn UpdateProjectSettingsUseCase>,
    pub delete: Arc<dyn DeleteProjectUseCase>,
    pub get_name: Arc<dyn GetProjectNameUseCase>,
    pub get_slug: Arc<dyn GetProjectSlugUseCase>,
    pub get_logo: Arc<dyn GetProjectLogoUseCase>,
    pub get_parent_uid: Arc<dyn GetProjectParentUidUseCase>,
    pub slug_to_uid: Arc<dyn SlugToUidUseCase>,
    pub readiness: Arc<dyn ReadinessUseCase>,
}

impl ProjectUseCases {
    pub fn new(service: Arc<ProjectService>) -> Self {
        Self {
            list: service.clone(),
            create: service.clone(),
            get_base: service.clone(),
            get_settings: service.clone(),
            update_base: service.clone(),
            update_settings: service.clone(),
            delete: service.clone(),
            get_name: service.clone(),
            get_slug: service.clone(),
            get_logo: service.clone(),
            get_parent_uid: service.clone(),
            slug_to_uid: service.clone(),
            readiness: service,
        }
    }
}
