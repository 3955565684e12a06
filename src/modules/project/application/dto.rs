use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    Category, FundingModelElement, LegalEntityType, ProjectBase, ProjectSettings, Stage,
    UserDescriptor,
};

/// Base and settings merged into the single "full project" shape the
/// HTTP API returns for create and list (spec.md §6, §4.4.2 step 7).
#[derive(Debug, Clone, Serialize)]
pub struct ProjectRecord {
    #[serde(flatten)]
    pub base: ProjectBase,
    pub mission_statement: String,
    pub announcement_date: Option<NaiveDate>,
    pub writers: Vec<UserDescriptor>,
    pub auditors: Vec<UserDescriptor>,
    pub meeting_coordinators: Vec<UserDescriptor>,
}

impl ProjectRecord {
    pub fn new(base: ProjectBase, settings: ProjectSettings) -> Self {
        Self {
            base,
            mission_statement: settings.mission_statement,
            announcement_date: settings.announcement_date,
            writers: settings.writers,
            auditors: settings.auditors,
            meeting_coordinators: settings.meeting_coordinators,
        }
    }
}

/// Wire shape of `POST /projects` (spec.md §4.4.2). Only `slug`,
/// `name`, `description` and `parent_uid` are mandated by the spec;
/// everything else defaults the way a freshly-formed project would.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parent_uid: String,
    #[serde(default)]
    pub public: bool,
    pub stage: Stage,
    pub category: Category,
    #[serde(default)]
    pub legal_entity_type: LegalEntityType,
    #[serde(default)]
    pub legal_entity_name: String,
    #[serde(default)]
    pub legal_parent_uid: String,
    #[serde(default)]
    pub funding_model: Vec<FundingModelElement>,
    #[serde(default)]
    pub entity_dissolution_date: Option<NaiveDate>,
    #[serde(default)]
    pub entity_formation_document_url: String,
    #[serde(default)]
    pub formation_date: Option<NaiveDate>,
    #[serde(default)]
    pub autojoin_enabled: bool,
    #[serde(default)]
    pub charter_url: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub repository_url: String,
    #[serde(default)]
    pub mission_statement: String,
    #[serde(default)]
    pub announcement_date: Option<NaiveDate>,
    #[serde(default)]
    pub writers: Vec<UserDescriptor>,
    #[serde(default)]
    pub auditors: Vec<UserDescriptor>,
    #[serde(default)]
    pub meeting_coordinators: Vec<UserDescriptor>,
}

/// Wire shape of `PUT /projects/{uid}` — a full replacement of the
/// base record; `uid` comes from the path, not the body.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectBaseRequest {
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub parent_uid: String,
    #[serde(default)]
    pub public: bool,
    pub stage: Stage,
    pub category: Category,
    #[serde(default)]
    pub legal_entity_type: LegalEntityType,
    #[serde(default)]
    pub legal_entity_name: String,
    #[serde(default)]
    pub legal_parent_uid: String,
    #[serde(default)]
    pub funding_model: Vec<FundingModelElement>,
    #[serde(default)]
    pub entity_dissolution_date: Option<NaiveDate>,
    #[serde(default)]
    pub entity_formation_document_url: String,
    #[serde(default)]
    pub formation_date: Option<NaiveDate>,
    #[serde(default)]
    pub autojoin_enabled: bool,
    #[serde(default)]
    pub charter_url: String,
    #[serde(default)]
    pub logo_url: String,
    #[serde(default)]
    pub website_url: String,
    #[serde(default)]
    pub repository_url: String,
}

/// Wire shape of `PUT /projects/{uid}/settings`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProjectSettingsRequest {
    #[serde(default)]
    pub mission_statement: String,
    #[serde(default)]
    pub announcement_date: Option<NaiveDate>,
    #[serde(default)]
    pub writers: Vec<UserDescriptor>,
    #[serde(default)]
    pub auditors: Vec<UserDescriptor>,
    #[serde(default)]
    pub meeting_coordinators: Vec<UserDescriptor>,
}

/// Expected-revision source for a write: either an `If-Match` value
/// parsed off the wire, or an explicit instruction to skip the check
/// and look up the current revision instead (spec.md §6.1's
/// `SKIP_ETAG_VALIDATION`, §9's "last write wins" open question).
#[derive(Debug, Clone)]
pub enum ExpectedRevision {
    IfMatch(String),
    SkipValidation,
}

#[derive(Debug, Clone)]
pub struct UpdateProjectBaseInput {
    pub uid: String,
    pub request: UpdateProjectBaseRequest,
    pub expected_revision: ExpectedRevision,
    pub sync: bool,
}

#[derive(Debug, Clone)]
pub struct UpdateProjectSettingsInput {
    pub uid: String,
    pub request: UpdateProjectSettingsRequest,
    pub expected_revision: ExpectedRevision,
    pub sync: bool,
}

#[derive(Debug, Clone)]
pub struct DeleteProjectInput {
    pub uid: String,
    pub expected_revision: ExpectedRevision,
    pub sync: bool,
}
