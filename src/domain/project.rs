use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity, legal, and branding attributes for a project. Shares its
/// `uid` with a [`super::ProjectSettings`] record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectBase {
    pub uid: Uuid,
    pub slug: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub public: bool,
    /// Empty string means "no parent".
    #[serde(default)]
    pub parent_uid: String,
    pub stage: Stage,
    pub category: Category,
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
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ProjectBase {
    pub fn has_parent(&self) -> bool {
        !self.parent_uid.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    #[serde(rename = "Formation - Exploratory")]
    FormationExploratory,
    #[serde(rename = "Formation - Engaged")]
    FormationEngaged,
    Active,
    Archived,
    #[serde(rename = "Formation - On Hold")]
    FormationOnHold,
    #[serde(rename = "Formation - Disengaged")]
    FormationDisengaged,
    #[serde(rename = "Formation - Confidential")]
    FormationConfidential,
    Prospect,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Active,
    Adopted,
    Archived,
    #[serde(rename = "At-Large")]
    AtLarge,
    #[serde(rename = "Early Adoption")]
    EarlyAdoption,
    Emeritus,
    Graduated,
    Growth,
    Idle,
    Impact,
    Incubating,
    Kanister,
    Mature,
    #[serde(rename = "Pre-LFESS")]
    PreLfess,
    Sandbox,
    #[serde(rename = "SIG")]
    Sig,
    Standards,
    #[serde(rename = "TAC")]
    Tac,
    #[serde(rename = "Working Group")]
    WorkingGroup,
    #[serde(rename = "TAG")]
    Tag,
    #[serde(rename = "NONE")]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegalEntityType {
    Subproject,
    #[serde(rename = "Incorporated Entity")]
    IncorporatedEntity,
    #[serde(rename = "Series LLC")]
    SeriesLlc,
    #[serde(rename = "Unofficial Subproject")]
    UnofficialSubproject,
    #[serde(rename = "Internal Allocation")]
    InternalAllocation,
    None,
}

impl Default for LegalEntityType {
    fn default() -> Self {
        LegalEntityType::None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FundingModelElement {
    Crowdfunding,
    Membership,
    #[serde(rename = "Alternate Funding")]
    AlternateFunding,
}
