//! Top-level operations consumed by the HTTP layer
//!
//! Mirrors the four operations of the visualization API: remote/local commit
//! listing and remote/local metadata fetch. Each call is an independent unit
//! of work; remote operations acquire a fresh isolated clone whose working
//! copy never outlives the call. Blocking libgit2 work runs on the tokio
//! blocking pool, and remote transfers are bounded by the caller-supplied
//! cancellation token plus the configured timeout.

use crate::config::CoreConfig;
use crate::envelope::decode_envelope;
use crate::error::BackendError;
use crate::repo;
use crate::types::{CommitRecord, MetadataDocument};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Handle to policy retrieval operations, constructed with explicit
/// configuration
#[derive(Debug, Clone)]
pub struct PolicyService {
    config: CoreConfig,
}

impl PolicyService {
    /// Create a service with the given configuration
    pub fn new(config: CoreConfig) -> Result<Self, BackendError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    /// List commits on the policy ref of a remote repository
    ///
    /// Clones into a temporary working copy which is removed before this
    /// returns, on success and on every error path.
    pub async fn list_remote_commits(
        &self,
        url: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<CommitRecord>, BackendError> {
        tracing::info!("Listing remote policy commits for {}", url);

        let config = self.config.clone();
        let url = url.to_string();
        self.run_remote(cancel, move |cancel| {
            let handle = repo::acquire_remote(&url, &config, &cancel)?;
            let records = repo::walk(&handle, &config.policy_ref)?;
            Ok(records)
        })
        .await
    }

    /// List commits reachable from `HEAD` of a local repository
    pub async fn list_local_commits(
        &self,
        path: &Path,
    ) -> Result<Vec<CommitRecord>, BackendError> {
        tracing::info!("Listing local commits for {}", path.display());

        let path = path.to_path_buf();
        run_blocking(move || {
            let handle = repo::acquire_local(&path)?;
            let records = repo::walk(&handle, "HEAD")?;
            Ok(records)
        })
        .await
    }

    /// Fetch and decode a metadata file at a commit of a remote repository
    pub async fn fetch_remote_metadata(
        &self,
        url: &str,
        commit_ish: &str,
        rel_path: &str,
        cancel: &CancellationToken,
    ) -> Result<MetadataDocument, BackendError> {
        tracing::info!(
            "Fetching remote metadata {} at {} from {}",
            rel_path,
            commit_ish,
            url
        );

        let config = self.config.clone();
        let url = url.to_string();
        let commit_ish = commit_ish.to_string();
        let rel_path = rel_path.to_string();
        self.run_remote(cancel, move |cancel| {
            let handle = repo::acquire_remote(&url, &config, &cancel)?;
            let bytes = repo::resolve_blob(&handle, &commit_ish, &rel_path)?;
            Ok(decode_envelope(&bytes)?)
        })
        .await
    }

    /// Fetch and decode a metadata file at a commit of a local repository
    pub async fn fetch_local_metadata(
        &self,
        path: &Path,
        commit_ish: &str,
        rel_path: &str,
    ) -> Result<MetadataDocument, BackendError> {
        tracing::info!(
            "Fetching local metadata {} at {} from {}",
            rel_path,
            commit_ish,
            path.display()
        );

        let path: PathBuf = path.to_path_buf();
        let commit_ish = commit_ish.to_string();
        let rel_path = rel_path.to_string();
        run_blocking(move || {
            let handle = repo::acquire_local(&path)?;
            let bytes = repo::resolve_blob(&handle, &commit_ish, &rel_path)?;
            Ok(decode_envelope(&bytes)?)
        })
        .await
    }

    /// Run a remote operation under the caller's cancellation token, bounded
    /// by the configured transfer timeout
    async fn run_remote<T, F>(
        &self,
        cancel: &CancellationToken,
        f: F,
    ) -> Result<T, BackendError>
    where
        F: FnOnce(CancellationToken) -> Result<T, BackendError> + Send + 'static,
        T: Send + 'static,
    {
        let bounded = cancel.child_token();
        let timer = {
            let token = bounded.clone();
            let timeout = Duration::from_secs(self.config.transfer_timeout_secs);
            tokio::spawn(async move {
                tokio::time::sleep(timeout).await;
                tracing::warn!("Remote transfer exceeded {:?}, cancelling", timeout);
                token.cancel();
            })
        };

        let result = run_blocking(move || f(bounded)).await;
        timer.abort();
        result
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T, BackendError>
where
    F: FnOnce() -> Result<T, BackendError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| BackendError::Other(format!("Blocking git task failed: {}", e)))?
}
