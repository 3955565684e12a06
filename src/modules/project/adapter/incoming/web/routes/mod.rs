pub mod create_project;
pub mod get_project_settings;
pub mod get_projects;
pub mod get_single_project;
pub mod hard_delete_project;
pub mod patch_project;
pub mod update_project_settings;

pub use create_project::create_project_handler;
pub use get_project_settings::get_project_settings_handler;
pub use get_projects::get_projects_handler;
pub use get_single_project::get_project_by_id_handler;
pub use hard_delete_project::hard_delete_project_handler;
pub use patch_project::update_project_base_handler;
pub use update_project_settings::update_project_settings_handler;
