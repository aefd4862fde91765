use crate::config::Config;
use gallery_auth::{
    AccessGate, ImageStore, InMemoryImageStore, PolicyRegistry, RequireClaim,
    StoreOwnershipEvaluator,
};
use gallery_core::ImageService;
use gallery_storage::{ContentStorage, InMemoryStorage, LocalFileStorage};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub images: ImageService,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        // Build content backend
        let content: Arc<dyn ContentStorage> = match config.storage.backend.as_str() {
            "local" => {
                let path = config
                    .storage
                    .local_path
                    .as_ref()
                    .ok_or_else(|| anyhow::anyhow!("local storage requires local_path"))?;
                Arc::new(LocalFileStorage::new(path).await?)
            }
            "memory" => Arc::new(InMemoryStorage::new()),
            other => anyhow::bail!("Unknown storage backend '{other}'. Valid options: 'memory', 'local'"),
        };

        let store = build_store(config)?;

        // Policies: ownership gate plus the creation entitlement
        let evaluator = Arc::new(StoreOwnershipEvaluator::new(store.clone()));
        let gate = AccessGate::with_subject_claim(evaluator, config.auth.subject_claim.clone());
        let creator = RequireClaim::new(
            config.auth.role_claim.clone(),
            config.auth.creator_role.clone(),
        );
        let policies = Arc::new(PolicyRegistry::standard(gate, creator));

        let images = ImageService::new(store, content, policies)
            .with_subject_claim(config.auth.subject_claim.clone())
            .with_max_upload_bytes(config.uploads.max_bytes);

        tracing::info!(
            storage = %config.storage.backend,
            database = %config.database.backend,
            "gallery state ready"
        );

        Ok(Self {
            images,
            config: Arc::new(config.clone()),
        })
    }
}

fn build_store(config: &Config) -> anyhow::Result<Arc<dyn ImageStore>> {
    match config.database.backend.as_str() {
        "memory" => {
            tracing::warn!("Using in-memory image store - records are lost on restart");
            Ok(Arc::new(InMemoryImageStore::new()))
        }
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let path = config
                .database
                .sqlite_path
                .as_deref()
                .ok_or_else(|| anyhow::anyhow!("sqlite database requires sqlite_path"))?;
            Ok(Arc::new(gallery_auth::SqliteImageStore::open(path)?))
        }
        #[cfg(not(feature = "sqlite"))]
        "sqlite" => anyhow::bail!(
            "sqlite database requested but gallery-server was built without `--features sqlite`"
        ),
        other => anyhow::bail!("Unknown database backend '{other}'. Valid options: 'memory', 'sqlite'"),
    }
}
