//! Commit history walking
//!
//! Walks the commit graph backwards from a resolved reference and produces
//! [`CommitRecord`]s in topological order, tip first. Traversal starts
//! strictly from the resolved reference, never from an implicit default
//! branch.

use crate::error::HistoryError;
use crate::repo::RepoHandle;
use crate::types::CommitRecord;
use chrono::{DateTime, TimeZone, Utc};
use git2::{ErrorCode, Sort};
use std::collections::HashSet;

/// Walk all commits reachable from `ref_name`
///
/// Accepts full ref names (`refs/gittuf/policy`), branch shorthands, and
/// `HEAD`. A reference that does not exist is [`HistoryError::RefNotFound`],
/// distinct from repository-level failures. Merge commits contribute all of
/// their parents to the traversal; every reachable commit is emitted exactly
/// once, the starting commit first.
pub fn walk(handle: &RepoHandle, ref_name: &str) -> Result<Vec<CommitRecord>, HistoryError> {
    let repo = handle.repo();

    let reference = repo
        .resolve_reference_from_short_name(ref_name)
        .map_err(|e| {
            if e.code() == ErrorCode::NotFound {
                HistoryError::RefNotFound(ref_name.to_string())
            } else {
                HistoryError::WalkFailed(e.message().to_string())
            }
        })?;

    let tip = reference
        .peel_to_commit()
        .map_err(|e| HistoryError::WalkFailed(e.message().to_string()))?;

    let mut revwalk = repo
        .revwalk()
        .map_err(|e| HistoryError::WalkFailed(e.message().to_string()))?;
    revwalk
        .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
        .map_err(|e| HistoryError::WalkFailed(e.message().to_string()))?;
    revwalk
        .push(tip.id())
        .map_err(|e| HistoryError::WalkFailed(e.message().to_string()))?;

    let mut seen = HashSet::new();
    let mut records = Vec::new();

    for oid in revwalk {
        let oid = oid.map_err(|e| HistoryError::WalkFailed(e.message().to_string()))?;
        let hash = oid.to_string();

        // Guards against duplicate emission on degenerate merge topologies.
        if !seen.insert(hash) {
            continue;
        }

        let commit = repo
            .find_commit(oid)
            .map_err(|e| HistoryError::WalkFailed(e.message().to_string()))?;
        records.push(to_record(&commit));
    }

    tracing::debug!("Walked {} commits from {}", records.len(), ref_name);
    Ok(records)
}

fn to_record(commit: &git2::Commit) -> CommitRecord {
    let author = commit.author();
    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH);

    CommitRecord {
        hash: commit.id().to_string(),
        author_name: author.name().unwrap_or("Unknown").to_string(),
        author_email: author.email().unwrap_or("").to_string(),
        timestamp,
        message: String::from_utf8_lossy(commit.message_bytes()).into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::acquire_local;
    use anyhow::Result;
    use git2::{Oid, Repository};
    use std::path::Path;
    use tempfile::tempdir;

    fn commit_file(
        repo: &Repository,
        dir: &Path,
        name: &str,
        content: &str,
        message: &str,
        parents: &[&git2::Commit],
    ) -> Result<Oid> {
        let sig = repo.signature()?;
        let tree_id = {
            let mut index = repo.index()?;
            std::fs::write(dir.join(name), content)?;
            index.add_path(Path::new(name))?;
            index.write()?;
            index.write_tree()?
        };
        let tree = repo.find_tree(tree_id)?;
        Ok(repo.commit(Some("HEAD"), &sig, &sig, message, &tree, parents)?)
    }

    fn create_test_repo() -> Result<(tempfile::TempDir, Repository, Oid)> {
        let dir = tempdir()?;
        let repo = Repository::init(dir.path())?;

        let mut config = repo.config()?;
        config.set_str("user.name", "Test User")?;
        config.set_str("user.email", "test@example.com")?;

        let c1 = commit_file(&repo, dir.path(), "README.md", "# Test", "Initial commit", &[])?;
        let parent = repo.find_commit(c1)?;
        let c2 = commit_file(
            &repo,
            dir.path(),
            "root.json",
            "{}",
            "Add root.json",
            &[&parent],
        )?;
        drop(parent);

        repo.reference("refs/gittuf/policy", c2, true, "set policy ref")?;
        Ok((dir, repo, c2))
    }

    #[test]
    fn test_walk_policy_ref_tip_first() -> Result<()> {
        let (dir, _repo, tip) = create_test_repo()?;
        let handle = acquire_local(dir.path())?;

        let records = walk(&handle, "refs/gittuf/policy")?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].hash, tip.to_string());
        assert_eq!(records[0].message, "Add root.json");
        assert_eq!(records[1].message, "Initial commit");
        Ok(())
    }

    #[test]
    fn test_walk_head() -> Result<()> {
        let (dir, _repo, _tip) = create_test_repo()?;
        let handle = acquire_local(dir.path())?;

        let records = walk(&handle, "HEAD")?;
        assert_eq!(records.len(), 2);
        Ok(())
    }

    #[test]
    fn test_walk_missing_ref() -> Result<()> {
        let (dir, _repo, _tip) = create_test_repo()?;
        let handle = acquire_local(dir.path())?;

        let err = walk(&handle, "refs/gittuf/policy-staging").unwrap_err();
        assert!(matches!(err, HistoryError::RefNotFound(_)));
        Ok(())
    }

    #[test]
    fn test_walk_hashes_unique() -> Result<()> {
        let (dir, _repo, _tip) = create_test_repo()?;
        let handle = acquire_local(dir.path())?;

        let records = walk(&handle, "HEAD")?;
        let hashes: HashSet<_> = records.iter().map(|r| r.hash.clone()).collect();
        assert_eq!(hashes.len(), records.len());
        for record in &records {
            assert_eq!(record.hash.len(), 40);
            assert_eq!(record.author_name, "Test User");
            assert_eq!(record.author_email, "test@example.com");
        }
        Ok(())
    }

    #[test]
    fn test_walk_merge_visits_all_ancestors_once() -> Result<()> {
        let (dir, repo, base) = create_test_repo()?;

        // Two children of the same base, merged: 5 commits total, the base's
        // ancestors reachable via both parents.
        let base_commit = repo.find_commit(base)?;
        let left = commit_file(
            &repo,
            dir.path(),
            "left.txt",
            "left",
            "Left branch",
            &[&base_commit],
        )?;
        // `commit_file` updates HEAD, which git2 only allows when the current
        // tip is the commit's first parent; detach HEAD accordingly before
        // each divergent commit.
        repo.set_head_detached(base)?;
        let right = commit_file(
            &repo,
            dir.path(),
            "right.txt",
            "right",
            "Right branch",
            &[&base_commit],
        )?;
        let left_commit = repo.find_commit(left)?;
        let right_commit = repo.find_commit(right)?;
        repo.set_head_detached(left)?;
        let merge = commit_file(
            &repo,
            dir.path(),
            "merged.txt",
            "merged",
            "Merge branches",
            &[&left_commit, &right_commit],
        )?;

        let handle = acquire_local(dir.path())?;
        let records = walk(&handle, "HEAD")?;

        assert_eq!(records.len(), 5);
        assert_eq!(records[0].hash, merge.to_string());
        let hashes: HashSet<_> = records.iter().map(|r| r.hash.as_str()).collect();
        assert_eq!(hashes.len(), 5);
        Ok(())
    }

    #[test]
    fn test_walk_starts_from_ref_not_default_branch() -> Result<()> {
        let (dir, repo, policy_tip) = create_test_repo()?;

        // Advance HEAD past the policy ref; the walk of the policy ref must
        // not see the newer commit.
        let parent = repo.find_commit(policy_tip)?;
        let newer = commit_file(
            &repo,
            dir.path(),
            "newer.txt",
            "newer",
            "Later work",
            &[&parent],
        )?;

        let handle = acquire_local(dir.path())?;
        let records = walk(&handle, "refs/gittuf/policy")?;

        assert_eq!(records[0].hash, policy_tip.to_string());
        assert!(records.iter().all(|r| r.hash != newer.to_string()));
        Ok(())
    }
}
