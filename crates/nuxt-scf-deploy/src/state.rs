//! Deployment state persistence
//!
//! The deployment result is the component's only durable state. It is written
//! once per successful deployment, read back to supply a default name on
//! later runs, and cleared on removal. There is no compare-and-swap;
//! concurrent invocations against the same key are not guaranteed consistent.

use async_trait::async_trait;
use dashmap::DashMap;
use nuxt_scf_types::DeploymentOutputs;
use std::path::PathBuf;
use thiserror::Error;
use tokio::fs;

/// State store errors
#[derive(Debug, Error)]
pub enum StateStoreError {
    #[error("state io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("state serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for state operations
pub type Result<T> = std::result::Result<T, StateStoreError>;

/// Persistence for deployment results, keyed by component identity
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the persisted result for a key, if any
    async fn load(&self, key: &str) -> Result<Option<DeploymentOutputs>>;

    /// Persist the result for a key, replacing any previous value
    async fn save(&self, key: &str, outputs: &DeploymentOutputs) -> Result<()>;

    /// Drop the persisted result for a key; clearing an absent key is not an error
    async fn clear(&self, key: &str) -> Result<()>;
}

/// In-memory state store for development and testing
pub struct InMemoryStateStore {
    entries: DashMap<String, DeploymentOutputs>,
}

impl InMemoryStateStore {
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl Default for InMemoryStateStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StateStore for InMemoryStateStore {
    async fn load(&self, key: &str) -> Result<Option<DeploymentOutputs>> {
        Ok(self.entries.get(key).map(|e| e.clone()))
    }

    async fn save(&self, key: &str, outputs: &DeploymentOutputs) -> Result<()> {
        self.entries.insert(key.to_string(), outputs.clone());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// File-backed state store writing one JSON document per key
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    /// Create a store rooted at the given directory
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn load(&self, key: &str) -> Result<Option<DeploymentOutputs>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &str, outputs: &DeploymentOutputs) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;
        let raw = serde_json::to_string_pretty(outputs)?;
        fs::write(self.path_for(key), raw).await?;
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
