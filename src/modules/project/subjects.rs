//! Wire-visible bus subjects (spec.md §6 "Messaging subjects"). Kept
//! as constants shared by the Service's fan-out calls and the incoming
//! bus router so the two sides can never drift.

pub const INDEXER_PROJECT: &str = "lfx.index.project";
pub const INDEXER_PROJECT_SETTINGS: &str = "lfx.index.project_settings";

pub const FGA_SYNC_UPDATE_ACCESS: &str = "lfx.fga_sync.update_access";
pub const FGA_SYNC_DELETE_ACCESS: &str = "lfx.fga_sync.delete_access";

pub const PROJECT_SETTINGS_UPDATED: &str = "lfx.project.settings_updated";

pub const RPC_GET_NAME: &str = "lfx.projects_api.get_name";
pub const RPC_GET_SLUG: &str = "lfx.projects_api.get_slug";
pub const RPC_GET_LOGO: &str = "lfx.projects_api.get_logo";
pub const RPC_GET_PARENT_UID: &str = "lfx.projects_api.get_parent_uid";
pub const RPC_SLUG_TO_UID: &str = "lfx.projects_api.slug_to_uid";
