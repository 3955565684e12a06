use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use futures::future::join_all;
use serde_json::Value;
use uuid::Uuid;

use crate::domain::validation::{parse_optional_parent_uid, parse_revision, parse_uuid, validate_slug};
use crate::domain::{ProjectBase, ProjectSettings};
use crate::modules::project::application::dto::{
    CreateProjectRequest, DeleteProjectInput, ExpectedRevision, ProjectRecord,
    UpdateProjectBaseInput, UpdateProjectSettingsInput,
};
use crate::modules::project::application::ports::incoming::use_cases::{
    CreateProjectUseCase, DeleteProjectUseCase, GetProjectBaseUseCase, GetProjectLogoUseCase,
    GetProjectNameUseCase, GetProjectParentUidUseCase, GetProjectSettingsUseCase,
    GetProjectSlugUseCase, ListProjectsUseCase, ReadinessUseCase, SlugToUidUseCase,
    UpdateProjectBaseUseCase, UpdateProjectSettingsUseCase,
};
use crate::modules::project::application::ports::outgoing::project_repository::RepositoryError;
use crate::modules::project::application::ports::outgoing::publisher::{
    access_references, access_relations, tags_for_base, AccessDeleteData, AccessEnvelope,
    AccessUpdateData, Envelope, EventEnvelope, IndexerAction, IndexerEnvelope,
};
use crate::modules::project::application::ports::outgoing::{ProjectRepository, Publisher};
use crate::modules::project::subjects;
use crate::request_context::RequestMetadata;
use crate::store::Revision;
use crate::shared::AppError;

/// Process-wide knobs threaded explicitly into the Service rather than
/// read from a global at call sites (spec.md §9's "global mutable
/// state" redesign flag).
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub sync_publish_timeout: Duration,
    pub skip_etag_validation: bool,
}

fn map_repo_err(err: RepositoryError) -> AppError {
    match err {
        RepositoryError::NotFound => AppError::ProjectNotFound,
        RepositoryError::SlugExists => AppError::SlugExists,
        RepositoryError::RevisionMismatch => AppError::RevisionMismatch,
        RepositoryError::Unmarshal(msg) => AppError::Unmarshal(msg),
        RepositoryError::Internal(msg) => AppError::Internal(msg),
    }
}

fn to_value<T: serde::Serialize>(value: &T) -> Result<Value, AppError> {
    serde_json::to_value(value).map_err(|e| AppError::Internal(e.to_string()))
}

/// The orchestrator (spec.md §2, §4.4): sequences validation →
/// repository mutation → parallel fan-out for every business
/// operation. Holds its collaborators as trait objects rather than as
/// generic parameters — with thirteen operations implemented on one
/// component, a generic `ProjectService<R, P>` would repeat the same
/// two bounds on every impl block for no benefit, since every concrete
/// wiring in this crate uses exactly one repository and one publisher.
pub struct ProjectService {
    repository: Arc<dyn ProjectRepository>,
    publisher: Arc<dyn Publisher>,
    config: ServiceConfig,
}

impl ProjectService {
    pub fn new(
        repository: Arc<dyn ProjectRepository>,
        publisher: Arc<dyn Publisher>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            repository,
            publisher,
            config,
        }
    }

    fn service_ready(&self) -> bool {
        self.publisher.is_connected()
    }

    async fn require_ready(&self) -> Result<(), AppError> {
        if self.service_ready() {
            Ok(())
        } else {
            Err(AppError::ServiceUnavailable)
        }
    }

    /// Publishes every `(subject, envelope)` pair concurrently and
    /// waits for all of them, surfacing `Internal` iff any failed
    /// (spec.md §4.4.2 step 6, §5's "first-error wins").
    async fn fan_out(&self, sync: bool, messages: Vec<(&str, Envelope)>) -> Result<(), AppError> {
        let timeout = self.config.sync_publish_timeout;
        let futures: Vec<Pin<Box<dyn Future<Output = Result<(), crate::modules::project::application::ports::outgoing::publisher::PublishError>> + Send>>> =
            messages
                .into_iter()
                .map(|(subject, envelope)| {
                    let publisher = Arc::clone(&self.publisher);
                    let subject = subject.to_string();
                    let fut: Pin<Box<dyn Future<Output = _> + Send>> = Box::pin(async move {
                        if sync {
                            publisher.publish_sync(&subject, &envelope, timeout).await
                        } else {
                            publisher.publish_async(&subject, &envelope).await
                        }
                    });
                    fut
                })
                .collect();

        let results = join_all(futures).await;
        if results.iter().any(|r| r.is_err()) {
            return Err(AppError::Internal("fan-out publish failed".to_string()));
        }
        Ok(())
    }

    fn build_base_from_create(request: &CreateProjectRequest, uid: Uuid, now: chrono::DateTime<Utc>) -> ProjectBase {
        ProjectBase {
            uid,
            slug: request.slug.clone(),
            name: request.name.clone(),
            description: request.description.clone(),
            public: request.public,
            parent_uid: request.parent_uid.clone(),
            stage: request.stage,
            category: request.category,
            legal_entity_type: request.legal_entity_type,
            legal_entity_name: request.legal_entity_name.clone(),
            legal_parent_uid: request.legal_parent_uid.clone(),
            funding_model: request.funding_model.clone(),
            entity_dissolution_date: request.entity_dissolution_date,
            entity_formation_document_url: request.entity_formation_document_url.clone(),
            formation_date: request.formation_date,
            autojoin_enabled: request.autojoin_enabled,
            charter_url: request.charter_url.clone(),
            logo_url: request.logo_url.clone(),
            website_url: request.website_url.clone(),
            repository_url: request.repository_url.clone(),
            created_at: now,
            updated_at: now,
        }
    }

    fn access_update_envelope(base: &ProjectBase, settings: &ProjectSettings) -> Envelope {
        Envelope::Access(AccessEnvelope::Update {
            object_type: "project",
            operation: "update_access",
            data: AccessUpdateData {
                uid: base.uid.to_string(),
                public: base.public,
                relations: access_relations(&settings.writers, &settings.auditors, &settings.meeting_coordinators),
                references: access_references(&base.parent_uid),
            },
        })
    }

    /// Walks the parent chain looking for `uid` itself, bounded to the
    /// depth spec.md §9 suggests (32). Reaching the depth limit without
    /// finding a cycle is treated as "no cycle detected", not an error.
    async fn check_no_parent_cycle(&self, uid: Uuid, parent_uid: Uuid) -> Result<(), AppError> {
        if parent_uid == uid {
            return Err(AppError::ValidationFailed(
                "a project cannot be its own parent".to_string(),
            ));
        }
        let mut current = parent_uid;
        for _ in 0..32 {
            let base = self.repository.get_base(current).await.map_err(map_repo_err)?;
            if !base.has_parent() {
                return Ok(());
            }
            let next = parse_uuid(&base.parent_uid, "parent_uid")?;
            if next == uid {
                return Err(AppError::ValidationFailed(
                    "parent_uid introduces an ancestor cycle".to_string(),
                ));
            }
            current = next;
        }
        Ok(())
    }

    async fn resolve_expected_revision_base(
        &self,
        uid: Uuid,
        expected: &ExpectedRevision,
    ) -> Result<Revision, AppError> {
        match expected {
            ExpectedRevision::IfMatch(raw) => parse_revision(raw),
            ExpectedRevision::SkipValidation => {
                let (_, rev) = self.repository.get_base_with_revision(uid).await.map_err(map_repo_err)?;
                Ok(rev)
            }
        }
    }

    async fn resolve_expected_revision_settings(
        &self,
        uid: Uuid,
        expected: &ExpectedRevision,
    ) -> Result<Revision, AppError> {
        match expected {
            ExpectedRevision::IfMatch(raw) => parse_revision(raw),
            ExpectedRevision::SkipValidation => {
                let (_, rev) = self
                    .repository
                    .get_settings_with_revision(uid)
                    .await
                    .map_err(map_repo_err)?;
                Ok(rev)
            }
        }
    }
}

#[async_trait]
impl ListProjectsUseCase for ProjectService {
    async fn execute(&self) -> Result<Vec<ProjectRecord>, AppError> {
        self.require_ready().await?;
        let pairs = self.repository.list_all_projects().await.map_err(map_repo_err)?;
        Ok(pairs
            .into_iter()
            .map(|(base, settings)| ProjectRecord::new(base, settings))
            .collect())
    }
}

#[async_trait]
impl CreateProjectUseCase for ProjectService {
    async fn execute(
        &self,
        request: CreateProjectRequest,
        meta: RequestMetadata,
    ) -> Result<ProjectRecord, AppError> {
        self.require_ready().await?;
        validate_slug(&request.slug)?;

        if self.repository.slug_exists(&request.slug).await.map_err(map_repo_err)? {
            return Err(AppError::SlugExists);
        }

        if let Some(parent_uid) = parse_optional_parent_uid(&request.parent_uid)? {
            if !self.repository.project_exists(parent_uid).await.map_err(map_repo_err)? {
                return Err(AppError::InvalidParentProject);
            }
        }

        let uid = Uuid::new_v4();
        let now = Utc::now();
        let base = Self::build_base_from_create(&request, uid, now);
        let settings = ProjectSettings {
            uid,
            mission_statement: request.mission_statement,
            announcement_date: request.announcement_date,
            writers: request.writers,
            auditors: request.auditors,
            meeting_coordinators: request.meeting_coordinators,
            created_at: now,
            updated_at: now,
        };

        self.repository.create_project(&base, &settings).await.map_err(map_repo_err)?;

        let indexer_project = Envelope::Indexer(IndexerEnvelope {
            action: IndexerAction::Created,
            headers: (&meta).into(),
            data: to_value(&base)?,
            tags: tags_for_base(&base),
        });
        let indexer_settings = Envelope::Indexer(IndexerEnvelope {
            action: IndexerAction::Created,
            headers: (&meta).into(),
            data: to_value(&settings)?,
            tags: tags_for_base(&base),
        });
        let access = Self::access_update_envelope(&base, &settings);

        self.fan_out(
            meta.sync,
            vec![
                (subjects::INDEXER_PROJECT, indexer_project),
                (subjects::INDEXER_PROJECT_SETTINGS, indexer_settings),
                (subjects::FGA_SYNC_UPDATE_ACCESS, access),
            ],
        )
        .await?;

        Ok(ProjectRecord::new(base, settings))
    }
}

#[async_trait]
impl GetProjectBaseUseCase for ProjectService {
    async fn execute(&self, uid: &str) -> Result<(ProjectBase, Revision), AppError> {
        self.require_ready().await?;
        let uid = parse_uuid(uid, "uid")?;
        self.repository.get_base_with_revision(uid).await.map_err(map_repo_err)
    }
}

#[async_trait]
impl GetProjectSettingsUseCase for ProjectService {
    async fn execute(&self, uid: &str) -> Result<(ProjectSettings, Revision), AppError> {
        self.require_ready().await?;
        let uid = parse_uuid(uid, "uid")?;
        self.repository
            .get_settings_with_revision(uid)
            .await
            .map_err(map_repo_err)
    }
}

#[async_trait]
impl UpdateProjectBaseUseCase for ProjectService {
    async fn execute(
        &self,
        input: UpdateProjectBaseInput,
        meta: RequestMetadata,
    ) -> Result<Revision, AppError> {
        self.require_ready().await?;
        let uid = parse_uuid(&input.uid, "uid")?;
        let expected_revision = self.resolve_expected_revision_base(uid, &input.expected_revision).await?;

        let existing = self.repository.get_base(uid).await.map_err(map_repo_err)?;

        if input.request.slug != existing.slug {
            validate_slug(&input.request.slug)?;
            if self.repository.slug_exists(&input.request.slug).await.map_err(map_repo_err)? {
                return Err(AppError::SlugExists);
            }
        }

        if let Some(parent_uid) = parse_optional_parent_uid(&input.request.parent_uid)? {
            if !self.repository.project_exists(parent_uid).await.map_err(map_repo_err)? {
                return Err(AppError::ProjectNotFound);
            }
            self.check_no_parent_cycle(uid, parent_uid).await?;
        }

        let now = Utc::now();
        let base = ProjectBase {
            uid,
            created_at: existing.created_at,
            updated_at: now,
            slug: input.request.slug,
            name: input.request.name,
            description: input.request.description,
            public: input.request.public,
            parent_uid: input.request.parent_uid,
            stage: input.request.stage,
            category: input.request.category,
            legal_entity_type: input.request.legal_entity_type,
            legal_entity_name: input.request.legal_entity_name,
            legal_parent_uid: input.request.legal_parent_uid,
            funding_model: input.request.funding_model,
            entity_dissolution_date: input.request.entity_dissolution_date,
            entity_formation_document_url: input.request.entity_formation_document_url,
            formation_date: input.request.formation_date,
            autojoin_enabled: input.request.autojoin_enabled,
            charter_url: input.request.charter_url,
            logo_url: input.request.logo_url,
            website_url: input.request.website_url,
            repository_url: input.request.repository_url,
        };

        let new_revision = self
            .repository
            .update_base(&base, expected_revision)
            .await
            .map_err(map_repo_err)?;

        let settings = self.repository.get_settings(uid).await.unwrap_or_else(|_| ProjectSettings::empty(uid, now));

        let indexer_project = Envelope::Indexer(IndexerEnvelope {
            action: IndexerAction::Updated,
            headers: (&meta).into(),
            data: to_value(&base)?,
            tags: tags_for_base(&base),
        });
        let access = Self::access_update_envelope(&base, &settings);

        self.fan_out(
            input.sync,
            vec![
                (subjects::INDEXER_PROJECT, indexer_project),
                (subjects::FGA_SYNC_UPDATE_ACCESS, access),
            ],
        )
        .await?;

        Ok(new_revision)
    }
}

#[async_trait]
impl UpdateProjectSettingsUseCase for ProjectService {
    async fn execute(
        &self,
        input: UpdateProjectSettingsInput,
        meta: RequestMetadata,
    ) -> Result<Revision, AppError> {
        self.require_ready().await?;
        let uid = parse_uuid(&input.uid, "uid")?;
        let expected_revision = self
            .resolve_expected_revision_settings(uid, &input.expected_revision)
            .await?;

        let old_settings = self.repository.get_settings(uid).await.map_err(map_repo_err)?;
        let now = Utc::now();
        let settings = ProjectSettings {
            uid,
            created_at: old_settings.created_at,
            updated_at: now,
            mission_statement: input.request.mission_statement,
            announcement_date: input.request.announcement_date,
            writers: input.request.writers,
            auditors: input.request.auditors,
            meeting_coordinators: input.request.meeting_coordinators,
        };

        let new_revision = self
            .repository
            .update_settings(&settings, expected_revision)
            .await
            .map_err(map_repo_err)?;

        let base = self.repository.get_base(uid).await.map_err(map_repo_err)?;

        let indexer_settings = Envelope::Indexer(IndexerEnvelope {
            action: IndexerAction::Updated,
            headers: (&meta).into(),
            data: to_value(&settings)?,
            tags: tags_for_base(&base),
        });
        let access = Self::access_update_envelope(&base, &settings);
        let event = Envelope::Event(EventEnvelope {
            project_uid: uid.to_string(),
            old_settings: to_value(&old_settings)?,
            new_settings: to_value(&settings)?,
        });

        self.fan_out(
            input.sync,
            vec![
                (subjects::INDEXER_PROJECT_SETTINGS, indexer_settings),
                (subjects::FGA_SYNC_UPDATE_ACCESS, access),
                (subjects::PROJECT_SETTINGS_UPDATED, event),
            ],
        )
        .await?;

        Ok(new_revision)
    }
}

#[async_trait]
impl DeleteProjectUseCase for ProjectService {
    async fn execute(&self, input: DeleteProjectInput, meta: RequestMetadata) -> Result<(), AppError> {
        self.require_ready().await?;
        let uid = parse_uuid(&input.uid, "uid")?;
        let expected_revision = self.resolve_expected_revision_base(uid, &input.expected_revision).await?;

        self.repository.delete_project(uid, expected_revision).await.map_err(map_repo_err)?;

        let uid_str = Value::String(uid.to_string());
        let indexer_project = Envelope::Indexer(IndexerEnvelope {
            action: IndexerAction::Deleted,
            headers: (&meta).into(),
            data: uid_str.clone(),
            tags: Vec::new(),
        });
        let indexer_settings = Envelope::Indexer(IndexerEnvelope {
            action: IndexerAction::Deleted,
            headers: (&meta).into(),
            data: uid_str,
            tags: Vec::new(),
        });
        let access = Envelope::Access(AccessEnvelope::Delete {
            object_type: "project",
            operation: "delete_access",
            data: AccessDeleteData { uid: uid.to_string() },
        });

        self.fan_out(
            input.sync,
            vec![
                (subjects::INDEXER_PROJECT, indexer_project),
                (subjects::INDEXER_PROJECT_SETTINGS, indexer_settings),
                (subjects::FGA_SYNC_DELETE_ACCESS, access),
            ],
        )
        .await
    }
}

#[async_trait]
impl GetProjectNameUseCase for ProjectService {
    async fn execute(&self, uid: &str) -> Result<String, AppError> {
        let uid = parse_uuid(uid, "uid")?;
        Ok(self.repository.get_base(uid).await.map_err(map_repo_err)?.name)
    }
}

#[async_trait]
impl GetProjectSlugUseCase for ProjectService {
    async fn execute(&self, uid: &str) -> Result<String, AppError> {
        let uid = parse_uuid(uid, "uid")?;
        Ok(self.repository.get_base(uid).await.map_err(map_repo_err)?.slug)
    }
}

#[async_trait]
impl GetProjectLogoUseCase for ProjectService {
    async fn execute(&self, uid: &str) -> Result<String, AppError> {
        let uid = parse_uuid(uid, "uid")?;
        Ok(self.repository.get_base(uid).await.map_err(map_repo_err)?.logo_url)
    }
}

#[async_trait]
impl GetProjectParentUidUseCase for ProjectService {
    async fn execute(&self, uid: &str) -> Result<String, AppError> {
        let uid = parse_uuid(uid, "uid")?;
        Ok(self.repository.get_base(uid).await.map_err(map_repo_err)?.parent_uid)
    }
}

#[async_trait]
impl SlugToUidUseCase for ProjectService {
    async fn execute(&self, slug: &str) -> Result<String, AppError> {
        Ok(self
            .repository
            .slug_to_uid(slug)
            .await
            .map_err(map_repo_err)?
            .to_string())
    }
}

#[async_trait]
impl ReadinessUseCase for ProjectService {
    async fn is_ready(&self) -> bool {
        self.service_ready()
    }
}
