//! Repository acquisition
//!
//! Remote repositories are cloned into isolated temporary directories so
//! concurrent requests against the same URL never share disk state; the
//! directory is removed when the handle is dropped, on every exit path.
//! Local repositories are opened in place and never deleted.

use crate::config::CoreConfig;
use crate::error::AcquireError;
use git2::build::RepoBuilder;
use git2::{ErrorCode, FetchOptions, RemoteCallbacks, Repository};
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// An open repository plus the working copy it lives in
///
/// For remote acquisitions the handle owns the temporary directory; dropping
/// the handle deletes the working copy. A handle to a pre-existing local path
/// leaves the path untouched on drop.
pub struct RepoHandle {
    repo: Repository,
    workdir: PathBuf,
    // Declared after `repo` so the repository is closed before the
    // directory is removed.
    _temp: Option<TempDir>,
}

impl RepoHandle {
    /// The open repository
    pub fn repo(&self) -> &Repository {
        &self.repo
    }

    /// Path to the working copy
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    /// Whether this handle owns a temporary clone
    pub fn is_temporary(&self) -> bool {
        self._temp.is_some()
    }
}

impl std::fmt::Debug for RepoHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RepoHandle")
            .field("workdir", &self.workdir)
            .field("temporary", &self.is_temporary())
            .finish()
    }
}

/// Clone a remote repository into a fresh temporary directory and fetch the
/// configured policy reference
///
/// Clone failures of any cause (network, authentication, malformed URL) are
/// reported as [`AcquireError::CloneFailed`] with the underlying git message
/// attached. A failure to fetch the policy ref after a successful clone is
/// not fatal: the repository may simply not carry one, and the walker reports
/// `RefNotFound` when asked for it.
///
/// The transfer aborts when `cancel` fires; a partially created working copy
/// is removed before returning.
pub fn acquire_remote(
    url: &str,
    config: &CoreConfig,
    cancel: &CancellationToken,
) -> Result<RepoHandle, AcquireError> {
    if url.trim().is_empty() {
        return Err(AcquireError::InvalidUrl(
            "repository URL must not be empty".to_string(),
        ));
    }

    let temp = tempfile::Builder::new()
        .prefix(&config.clone_dir_prefix)
        .tempdir()
        .map_err(AcquireError::TempDir)?;

    tracing::info!("Cloning {} into {}", url, temp.path().display());

    let repo = RepoBuilder::new()
        .fetch_options(fetch_options(cancel))
        .clone(url, temp.path())
        .map_err(|e| {
            // `temp` is dropped on this path, removing the partial clone.
            if cancel.is_cancelled() {
                AcquireError::Cancelled
            } else {
                AcquireError::CloneFailed {
                    url: url.to_string(),
                    reason: e.message().to_string(),
                }
            }
        })?;

    if let Err(e) = fetch_policy_ref(&repo, &config.policy_ref, cancel) {
        if cancel.is_cancelled() {
            return Err(AcquireError::Cancelled);
        }
        tracing::debug!(
            "Could not fetch {} from {}: {} (repository may not carry a policy ref)",
            config.policy_ref,
            url,
            e.message()
        );
    }

    let workdir = temp.path().to_path_buf();
    Ok(RepoHandle {
        repo,
        workdir,
        _temp: Some(temp),
    })
}

/// Open an existing local repository in place
///
/// No copy is made and no network I/O happens. A path that does not contain
/// a valid repository is [`AcquireError::NotARepository`], distinct from
/// unexpected I/O failure.
pub fn acquire_local(path: &Path) -> Result<RepoHandle, AcquireError> {
    match Repository::open(path) {
        Ok(repo) => {
            tracing::debug!("Opened local repository at {}", path.display());
            Ok(RepoHandle {
                repo,
                workdir: path.to_path_buf(),
                _temp: None,
            })
        }
        Err(e) if e.code() == ErrorCode::NotFound => {
            Err(AcquireError::NotARepository(path.display().to_string()))
        }
        Err(e) => Err(AcquireError::OpenFailed(e.message().to_string())),
    }
}

fn fetch_options(cancel: &CancellationToken) -> FetchOptions<'static> {
    let mut callbacks = RemoteCallbacks::new();
    let token = cancel.clone();
    // Returning false aborts the in-flight transfer.
    callbacks.transfer_progress(move |_progress| !token.is_cancelled());

    let mut opts = FetchOptions::new();
    opts.remote_callbacks(callbacks);
    opts
}

fn fetch_policy_ref(
    repo: &Repository,
    policy_ref: &str,
    cancel: &CancellationToken,
) -> Result<(), git2::Error> {
    let refspec = format!("{}:{}", policy_ref, policy_ref);
    let mut remote = repo.find_remote("origin")?;
    remote.fetch(
        &[refspec.as_str()],
        Some(&mut fetch_options(cancel)),
        None,
    )
}
