//! File blob resolution inside a commit's tree
//!
//! Walks a `/`-delimited relative path through nested tree entries down to
//! the leaf blob. The path is split on `/` regardless of host platform
//! conventions, and the whole blob is returned in one read; metadata files
//! are small, bounded documents.

use crate::error::BlobError;
use crate::repo::RepoHandle;
use git2::ObjectType;

/// Resolve the blob at `rel_path` inside the tree snapshot of `commit_ish`
///
/// `commit_ish` accepts a hex hash or a symbolic name such as `HEAD`. A
/// missing path segment is [`BlobError::PathNotFound`]; a terminal entry
/// that is a directory rather than a file is [`BlobError::NotAFile`].
pub fn resolve_blob(
    handle: &RepoHandle,
    commit_ish: &str,
    rel_path: &str,
) -> Result<Vec<u8>, BlobError> {
    let segments: Vec<&str> = rel_path.split('/').filter(|s| !s.is_empty()).collect();
    let Some((leaf, parents)) = segments.split_last() else {
        return Err(BlobError::InvalidPath(rel_path.to_string()));
    };

    let repo = handle.repo();

    let commit = repo
        .revparse_single(commit_ish)
        .and_then(|object| object.peel_to_commit())
        .map_err(|_| BlobError::CommitNotFound(commit_ish.to_string()))?;
    let commit_hash = commit.id().to_string();

    let mut tree = commit
        .tree()
        .map_err(|e| BlobError::ReadFailed(e.message().to_string()))?;

    let path_not_found = || BlobError::PathNotFound {
        commit: commit_hash.clone(),
        path: rel_path.to_string(),
    };

    for segment in parents {
        let (entry_kind, entry_id) = {
            let entry = tree.get_name(segment).ok_or_else(path_not_found)?;
            (entry.kind(), entry.id())
        };
        if entry_kind != Some(ObjectType::Tree) {
            return Err(path_not_found());
        }
        tree = repo
            .find_tree(entry_id)
            .map_err(|e| BlobError::ReadFailed(e.message().to_string()))?;
    }

    let entry = tree.get_name(leaf).ok_or_else(path_not_found)?;
    match entry.kind() {
        Some(ObjectType::Blob) => {
            let blob = repo
                .find_blob(entry.id())
                .map_err(|e| BlobError::ReadFailed(e.message().to_string()))?;
            tracing::debug!(
                "Resolved {} at {} ({} bytes)",
                rel_path,
                commit_hash,
                blob.content().len()
            );
            Ok(blob.content().to_vec())
        }
        Some(ObjectType::Tree) => Err(BlobError::NotAFile {
            commit: commit_hash.clone(),
            path: rel_path.to_string(),
        }),
        _ => Err(path_not_found()),
    }
}
