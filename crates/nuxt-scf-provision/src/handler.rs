//! Handler resolution
//!
//! The handler resolver locates the packaged entry-point file for the site.
//! Packaging itself is outside this component; all the orchestrator needs is
//! the cached file path, from which it derives `<basename>.handler` and the
//! include entry.

use crate::error::{ProvisionError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Resolves the cached entry-point file for a code location
#[async_trait]
pub trait HandlerResolver: Send + Sync {
    /// Resolve the entry-point path for the given code location.
    ///
    /// The include/exclude patterns are those of the configuration record
    /// being normalized; implementations may consult them when packaging.
    async fn resolve(
        &self,
        code_uri: &Path,
        include: &[String],
        exclude: &[String],
    ) -> Result<PathBuf>;
}

/// Resolver that caches a shim entry point under `<code_uri>/.cache/`
pub struct CacheDirHandlerResolver {
    shim_path: PathBuf,
}

impl CacheDirHandlerResolver {
    /// Create a resolver for the given shim source file
    pub fn new(shim_path: impl Into<PathBuf>) -> Self {
        Self {
            shim_path: shim_path.into(),
        }
    }
}

#[async_trait]
impl HandlerResolver for CacheDirHandlerResolver {
    async fn resolve(
        &self,
        code_uri: &Path,
        _include: &[String],
        _exclude: &[String],
    ) -> Result<PathBuf> {
        let file_name = self
            .shim_path
            .file_name()
            .ok_or_else(|| ProvisionError::Handler("shim path has no file name".into()))?;

        let cache_dir = code_uri.join(".cache");
        fs::create_dir_all(&cache_dir)
            .await
            .map_err(|e| ProvisionError::Handler(format!("create {}: {e}", cache_dir.display())))?;

        let cached = cache_dir.join(file_name);
        fs::copy(&self.shim_path, &cached)
            .await
            .map_err(|e| ProvisionError::Handler(format!("cache {}: {e}", cached.display())))?;

        Ok(cached)
    }
}
