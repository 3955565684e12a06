use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use tracing::warn;
use uuid::Uuid;

use crate::domain::{ProjectBase, ProjectSettings};
use crate::modules::project::application::ports::outgoing::project_repository::{
    ProjectRepository, RepositoryError,
};
use crate::store::{KvStore, Revision, StoreError};

fn slug_key(slug: &str) -> String {
    format!("slug/{slug}")
}

fn map_store_err_on_uid_lookup(err: StoreError) -> RepositoryError {
    match err {
        StoreError::NotFound => RepositoryError::NotFound,
        StoreError::AlreadyExists => RepositoryError::SlugExists,
        StoreError::RevisionMismatch => RepositoryError::RevisionMismatch,
        StoreError::Unavailable(msg) => RepositoryError::Internal(msg),
    }
}

fn decode<T: serde::de::DeserializeOwned>(bytes: &Bytes) -> Result<T, RepositoryError> {
    serde_json::from_slice(bytes).map_err(|e| RepositoryError::Unmarshal(e.to_string()))
}

fn encode<T: serde::Serialize>(value: &T) -> Result<Bytes, RepositoryError> {
    serde_json::to_vec(value)
        .map(Bytes::from)
        .map_err(|e| RepositoryError::Internal(e.to_string()))
}

/// [`ProjectRepository`] over two [`KvStore`] bucket handles, owning
/// the slug-index invariant (I1) across both (spec.md §4.2).
pub struct ProjectRepositoryStore {
    projects: Arc<dyn KvStore>,
    settings: Arc<dyn KvStore>,
}

impl ProjectRepositoryStore {
    pub fn new(projects: Arc<dyn KvStore>, settings: Arc<dyn KvStore>) -> Self {
        Self { projects, settings }
    }

    async fn read_base(&self, uid: Uuid) -> Result<(ProjectBase, Revision), RepositoryError> {
        let (bytes, rev) = self
            .projects
            .get(&uid.to_string())
            .await
            .map_err(map_store_err_on_uid_lookup)?;
        Ok((decode(&bytes)?, rev))
    }

    async fn read_settings(&self, uid: Uuid) -> Result<(ProjectSettings, Revision), RepositoryError> {
        let (bytes, rev) = self
            .settings
            .get(&uid.to_string())
            .await
            .map_err(map_store_err_on_uid_lookup)?;
        Ok((decode(&bytes)?, rev))
    }
}

#[async_trait]
impl ProjectRepository for ProjectRepositoryStore {
    async fn create_project(
        &self,
        base: &ProjectBase,
        settings: &ProjectSettings,
    ) -> Result<(), RepositoryError> {
        let uid_str = base.uid.to_string();

        self.projects
            .put(&slug_key(&base.slug), Bytes::from(uid_str.clone().into_bytes()))
            .await
            .map_err(|e| match e {
                StoreError::AlreadyExists => RepositoryError::SlugExists,
                other => RepositoryError::Internal(other.to_string()),
            })?;

        let compensate_slug = || {
            let projects = Arc::clone(&self.projects);
            let slug = base.slug.clone();
            async move {
                // Best-effort: the slug-index entry has no revision the
                // caller tracked, so read-then-delete using whatever
                // revision is currently live.
                if let Ok((_, rev)) = projects.get(&slug_key(&slug)).await {
                    if let Err(e) = projects.delete(&slug_key(&slug), rev).await {
                        warn!(slug, error = %e, "failed to compensate orphaned slug-index entry");
                    }
                }
            }
        };

        if let Err(e) = self.projects.put(&uid_str, encode(base)?).await {
            compensate_slug().await;
            return Err(RepositoryError::Internal(e.to_string()));
        }

        if let Err(e) = self.settings.put(&uid_str, encode(settings)?).await {
            compensate_slug().await;
            return Err(RepositoryError::Internal(e.to_string()));
        }

        Ok(())
    }

    async fn get_base(&self, uid: Uuid) -> Result<ProjectBase, RepositoryError> {
        Ok(self.read_base(uid).await?.0)
    }

    async fn get_base_with_revision(&self, uid: Uuid) -> Result<(ProjectBase, Revision), RepositoryError> {
        self.read_base(uid).await
    }

    async fn get_settings(&self, uid: Uuid) -> Result<ProjectSettings, RepositoryError> {
        Ok(self.read_settings(uid).await?.0)
    }

    async fn get_settings_with_revision(
        &self,
        uid: Uuid,
    ) -> Result<(ProjectSettings, Revision), RepositoryError> {
        self.read_settings(uid).await
    }

    async fn project_exists(&self, uid: Uuid) -> Result<bool, RepositoryError> {
        match self.projects.get(&uid.to_string()).await {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound) => Ok(false),
            Err(e) => Err(RepositoryError::Internal(e.to_string())),
        }
    }

    async fn slug_to_uid(&self, slug: &str) -> Result<Uuid, RepositoryError> {
        let (bytes, _) = self
            .projects
            .get(&slug_key(slug))
            .await
            .map_err(map_store_err_on_uid_lookup)?;
        let raw = std::str::from_utf8(&bytes)
            .map_err(|e| RepositoryError::Unmarshal(e.to_string()))?;
        Uuid::parse_str(raw).map_err(|e| RepositoryError::Unmarshal(e.to_string()))
    }

    async fn slug_exists(&self, slug: &str) -> Result<bool, RepositoryError> {
        match self.slug_to_uid(slug).await {
            Ok(_) => Ok(true),
            Err(RepositoryError::NotFound) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn update_base(
        &self,
        base: &ProjectBase,
        expected_revision: Revision,
    ) -> Result<Revision, RepositoryError> {
        let (existing, _) = self.read_base(base.uid).await?;

        let mut rewrote_slug = false;
        if existing.slug != base.slug {
            if self.slug_exists(&base.slug).await? {
                return Err(RepositoryError::SlugExists);
            }
            // Detect conflicts cheaply before touching the base CAS
            // (spec.md §4.2's ordering rationale).
            if let Ok((_, rev)) = self.projects.get(&slug_key(&existing.slug)).await {
                self.projects
                    .delete(&slug_key(&existing.slug), rev)
                    .await
                    .map_err(|e| RepositoryError::Internal(e.to_string()))?;
            }
            self.projects
                .put(&slug_key(&base.slug), Bytes::from(base.uid.to_string().into_bytes()))
                .await
                .map_err(|e| match e {
                    StoreError::AlreadyExists => RepositoryError::SlugExists,
                    other => RepositoryError::Internal(other.to_string()),
                })?;
            rewrote_slug = true;
        }

        match self
            .projects
            .update(&base.uid.to_string(), encode(base)?, expected_revision)
            .await
        {
            Ok(rev) => Ok(rev),
            Err(e) => {
                if rewrote_slug {
                    // Compensate: restore the old slug index so a failed
                    // base CAS doesn't leave the new slug dangling.
                    if let Ok((_, rev)) = self.projects.get(&slug_key(&base.slug)).await {
                        let _ = self.projects.delete(&slug_key(&base.slug), rev).await;
                    }
                    let _ = self
                        .projects
                        .put(&slug_key(&existing.slug), Bytes::from(base.uid.to_string().into_bytes()))
                        .await;
                }
                Err(map_store_err_on_uid_lookup(e))
            }
        }
    }

    async fn update_settings(
        &self,
        settings: &ProjectSettings,
        expected_revision: Revision,
    ) -> Result<Revision, RepositoryError> {
        self.settings
            .update(&settings.uid.to_string(), encode(settings)?, expected_revision)
            .await
            .map_err(map_store_err_on_uid_lookup)
    }

    async fn delete_project(&self, uid: Uuid, expected_revision: Revision) -> Result<(), RepositoryError> {
        let (base, _) = self.read_base(uid).await?;

        self.projects
            .delete(&uid.to_string(), expected_revision)
            .await
            .map_err(map_store_err_on_uid_lookup)?;

        if let Ok((_, rev)) = self.projects.get(&slug_key(&base.slug)).await {
            if let Err(e) = self.projects.delete(&slug_key(&base.slug), rev).await {
                warn!(slug = %base.slug, error = %e, "failed to remove slug-index entry after delete");
            }
        }

        if let Ok((_, rev)) = self.settings.get(&uid.to_string()).await {
            if let Err(e) = self.settings.delete(&uid.to_string(), rev).await {
                warn!(%uid, error = %e, "failed to remove settings after base delete");
            }
        }

        Ok(())
    }

    async fn list_all_base(&self) -> Result<Vec<ProjectBase>, RepositoryError> {
        let keys = self
            .projects
            .list_keys()
            .await
            .map_err(|e| RepositoryError::Internal(e.to_string()))?;

        let mut out = Vec::new();
        for key in keys {
            if key.starts_with("slug/") {
                continue;
            }
            let (bytes, _) = self
                .projects
                .get(&key)
                .await
                .map_err(|e| RepositoryError::Internal(e.to_string()))?;
            out.push(decode(&bytes)?);
        }
        Ok(out)
    }

    async fn list_all_settings(&self) -> Result<Vec<ProjectSettings>, RepositoryError> {
        let keys = self
            .settings
            .list_keys()
            .await
            .map_err(|e| RepositoryError::Internal(e.to_string()))?;

        let mut out = Vec::new();
        for key in keys {
            let (bytes, _) = self
                .settings
                .get(&key)
                .await
                .map_err(|e| RepositoryError::Internal(e.to_string()))?;
            out.push(decode(&bytes)?);
        }
        Ok(out)
    }

    async fn list_all_projects(&self) -> Result<Vec<(ProjectBase, ProjectSettings)>, RepositoryError> {
        let bases = self.list_all_base().await?;
        let mut out = Vec::with_capacity(bases.len());
        for base in bases {
            let settings = match self.get_settings(base.uid).await {
                Ok(s) => s,
                Err(RepositoryError::NotFound) => ProjectSettings::empty(base.uid, base.updated_at),
                Err(e) => return Err(e),
            };
            out.push((base, settings));
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Category, LegalEntityType, Stage};
    use crate::store::MemoryKvStore;
    use chrono::Utc;

    fn repo() -> ProjectRepositoryStore {
        ProjectRepositoryStore::new(Arc::new(MemoryKvStore::new()), Arc::new(MemoryKvStore::new()))
    }

    fn sample_base(slug: &str) -> ProjectBase {
        let now = Utc::now();
        ProjectBase {
            uid: Uuid::new_v4(),
            slug: slug.to_string(),
            name: "Name".to_string(),
            description: "Desc".to_string(),
            public: true,
            parent_uid: String::new(),
            stage: Stage::Active,
            category: Category::Active,
            legal_entity_type: LegalEntityType::None,
            legal_entity_name: String::new(),
            legal_parent_uid: String::new(),
            funding_model: Vec::new(),
            entity_dissolution_date: None,
            entity_formation_document_url: String::new(),
            formation_date: None,
            autojoin_enabled: false,
            charter_url: String::new(),
            logo_url: String::new(),
            website_url: String::new(),
            repository_url: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_then_slug_to_uid_round_trips() {
        let repo = repo();
        let base = sample_base("alpha");
        let settings = ProjectSettings::empty(base.uid, base.created_at);

        repo.create_project(&base, &settings).await.unwrap();

        assert_eq!(repo.slug_to_uid("alpha").await.unwrap(), base.uid);
        assert!(repo.project_exists(base.uid).await.unwrap());
    }

    #[tokio::test]
    async fn create_rejects_duplicate_slug() {
        let repo = repo();
        let a = sample_base("beta");
        let b = sample_base("beta");
        let settings_a = ProjectSettings::empty(a.uid, a.created_at);
        let settings_b = ProjectSettings::empty(b.uid, b.created_at);

        repo.create_project(&a, &settings_a).await.unwrap();
        let err = repo.create_project(&b, &settings_b).await.unwrap_err();
        assert!(matches!(err, RepositoryError::SlugExists));
    }

    #[tokio::test]
    async fn rename_slug_updates_index_both_ways() {
        let repo = repo();
        let mut base = sample_base("gamma");
        let settings = ProjectSettings::empty(base.uid, base.created_at);
        repo.create_project(&base, &settings).await.unwrap();

        base.slug = "gamma-2".to_string();
        repo.update_base(&base, 1).await.unwrap();

        assert!(matches!(
            repo.slug_to_uid("gamma").await.unwrap_err(),
            RepositoryError::NotFound
        ));
        assert_eq!(repo.slug_to_uid("gamma-2").await.unwrap(), base.uid);
    }

    #[tokio::test]
    async fn delete_cascades_base_settings_and_slug_index() {
        let repo = repo();
        let base = sample_base("delta");
        let settings = ProjectSettings::empty(base.uid, base.created_at);
        repo.create_project(&base, &settings).await.unwrap();

        repo.delete_project(base.uid, 1).await.unwrap();

        assert!(matches!(
            repo.get_base(base.uid).await.unwrap_err(),
            RepositoryError::NotFound
        ));
        assert!(matches!(
            repo.get_settings(base.uid).await.unwrap_err(),
            RepositoryError::NotFound
        ));
        assert!(matches!(
            repo.slug_to_uid("delta").await.unwrap_err(),
            RepositoryError::NotFound
        ));
    }
}
