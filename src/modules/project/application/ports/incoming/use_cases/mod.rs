mod create_project;
mod delete_project;
mod get_project_base;
mod get_project_settings;
mod list_projects;
mod lookup;
mod readiness;
mod update_project_base;
mod update_project_settings;

pub use create_project::CreateProjectUseCase;
pub use delete_project::DeleteProjectUseCase;
pub use get_project_base::GetProjectBaseUseCase;
pub use get_project_settings::GetProjectSettingsUseCase;
pub use list_projects::ListProjectsUseCase;
pub use lookup::{
    GetProjectLogoUseCase, GetProjectNameUseCase, GetProjectParentUidUseCase,
    GetProjectSlugUseCase, SlugToUidUseCase,
};
pub use readiness::ReadinessUseCase;
pub use update_project_base::UpdateProjectBaseUseCase;
pub use update_project_settings::UpdateProjectSettingsUseCase;
