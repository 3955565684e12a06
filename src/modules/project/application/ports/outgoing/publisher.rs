use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::request_context::RequestMetadata;

/// Tagged-variant replacement for the source's reflection-like type
/// switch (spec.md §9): each outbound message shape is a distinct
/// variant carrying its own typed payload, so the Publisher matches on
/// the tag instead of dispatching over a runtime type.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Envelope {
    Indexer(IndexerEnvelope),
    Access(AccessEnvelope),
    Event(EventEnvelope),
}

#[derive(Debug, Clone, Serialize)]
pub struct IndexerEnvelope {
    pub action: IndexerAction,
    pub headers: IndexerHeaders,
    /// A JSON object for `created`/`updated`, a bare UID string for
    /// `deleted` — round-tripped through `serde_json::Value` so
    /// downstream schema drift cannot break serialization (spec.md
    /// §4.3).
    pub data: Value,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IndexerAction {
    Created,
    Updated,
    Deleted,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct IndexerHeaders {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authorization: Option<String>,
    #[serde(rename = "x-on-behalf-of", skip_serializing_if = "Option::is_none")]
    pub on_behalf_of: Option<String>,
}

impl From<&RequestMetadata> for IndexerHeaders {
    fn from(meta: &RequestMetadata) -> Self {
        Self {
            authorization: meta.authorization.clone(),
            on_behalf_of: meta.on_behalf_of.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AccessEnvelope {
    Update {
        object_type: &'static str,
        operation: &'static str,
        data: AccessUpdateData,
    },
    Delete {
        object_type: &'static str,
        operation: &'static str,
        data: AccessDeleteData,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessUpdateData {
    pub uid: String,
    pub public: bool,
    pub relations: AccessRelations,
    pub references: AccessReferences,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessRelations {
    pub writer: Vec<String>,
    pub auditor: Vec<String>,
    pub meeting_coordinator: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AccessReferences {
    pub parent: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AccessDeleteData {
    pub uid: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EventEnvelope {
    pub project_uid: String,
    pub old_settings: Value,
    pub new_settings: Value,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum PublishError {
    #[error("publish timed out")]
    Timeout,
    #[error("bus unavailable: {0}")]
    Unavailable(String),
}

/// Thin wrapper over a pub/sub + request/reply bus, offering the two
/// fan-out primitives the Service orchestrates (spec.md §4.3). Subjects
/// are supplied by the caller; the Publisher does not interpret them.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Fire-and-forget: returns once the bus acknowledges local
    /// handoff, with no guarantee downstream has processed the message.
    async fn publish_async(&self, subject: &str, envelope: &Envelope) -> Result<(), PublishError>;

    /// Request/reply with a bounded timeout. Ok iff a non-error reply
    /// arrives before `timeout` elapses.
    async fn publish_sync(
        &self,
        subject: &str,
        envelope: &Envelope,
        timeout: Duration,
    ) -> Result<(), PublishError>;

    /// True iff the underlying bus connection reports connected
    /// (backs `Service::service_ready`, spec.md §4.4.1).
    fn is_connected(&self) -> bool;
}

/// Builds the `relations`/`references` shape for an `update_access`
/// envelope from settings + the base's `parent_uid` (spec.md §4.3).
pub fn access_relations(
    writers: &[crate::domain::UserDescriptor],
    auditors: &[crate::domain::UserDescriptor],
    meeting_coordinators: &[crate::domain::UserDescriptor],
) -> AccessRelations {
    let usernames = |people: &[crate::domain::UserDescriptor]| {
        people.iter().map(|p| p.username.clone()).collect()
    };
    AccessRelations {
        writer: usernames(writers),
        auditor: usernames(auditors),
        meeting_coordinator: usernames(meeting_coordinators),
    }
}

pub fn access_references(parent_uid: &str) -> AccessReferences {
    AccessReferences {
        parent: if parent_uid.is_empty() {
            Vec::new()
        } else {
            vec![format!("project:{parent_uid}")]
        },
    }
}

/// Derives search tags from a project payload: name, slug, category,
/// and stage, lowercased — a fixed, non-templated scheme (spec.md §9's
/// resolved open question on tag generation).
pub fn tags_for_base(base: &crate::domain::ProjectBase) -> Vec<String> {
    let mut tags = vec![
        base.name.to_lowercase(),
        base.slug.to_lowercase(),
        format!("{:?}", base.category).to_lowercase(),
        format!("{:?}", base.stage).to_lowercase(),
    ];
    tags.dedup();
    tags
}
