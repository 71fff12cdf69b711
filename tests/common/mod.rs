//! Shared fixtures for integration tests
//!
//! Builds a throwaway repository with an initial commit, a policy commit
//! carrying a `metadata/root.json` envelope, and the `refs/gittuf/policy`
//! ref pointed at it.

use anyhow::Result;
use base64::Engine;
use git2::{Oid, Repository};
use std::path::Path;
use tempfile::TempDir;

pub const POLICY_REF: &str = "refs/gittuf/policy";

/// Build a base64 envelope around the given metadata document
pub fn make_envelope(inner_json: &str) -> String {
    let payload = base64::engine::general_purpose::STANDARD.encode(inner_json);
    format!(r#"{{"payload": "{}", "signatures": []}}"#, payload)
}

/// Create a repository with two commits and the policy ref set on the second
///
/// Returns the directory and the full hash of the policy tip commit.
pub fn setup_test_repo() -> Result<(TempDir, String)> {
    let dir = tempfile::tempdir()?;
    let repo = Repository::init(dir.path())?;

    let mut config = repo.config()?;
    config.set_str("user.name", "Test User")?;
    config.set_str("user.email", "test@example.com")?;

    std::fs::write(dir.path().join("README.md"), "# Test Repo")?;
    let c1 = commit_paths(&repo, &["README.md"], "Initial commit", &[])?;

    std::fs::create_dir_all(dir.path().join("metadata"))?;
    let envelope = make_envelope(r#"{"type":"root", "expires":"2030-01-01T00:00:00Z"}"#);
    std::fs::write(dir.path().join("metadata/root.json"), envelope)?;
    let parent = repo.find_commit(c1)?;
    let c2 = commit_paths(&repo, &["metadata/root.json"], "Add root.json", &[&parent])?;

    repo.reference(POLICY_REF, c2, true, "set policy ref")?;

    Ok((dir, c2.to_string()))
}

/// Create a repository with one commit and no policy ref
pub fn setup_repo_without_policy_ref() -> Result<TempDir> {
    let dir = tempfile::tempdir()?;
    let repo = Repository::init(dir.path())?;

    let mut config = repo.config()?;
    config.set_str("user.name", "Test User")?;
    config.set_str("user.email", "test@example.com")?;

    std::fs::write(dir.path().join("README.md"), "# No policy here")?;
    commit_paths(&repo, &["README.md"], "Initial commit", &[])?;

    Ok(dir)
}

fn commit_paths(
    repo: &Repository,
    paths: &[&str],
    message: &str,
    parents: &[&git2::Commit],
) -> Result<Oid> {
    let sig = repo.signature()?;
    let tree_id = {
        let mut index = repo.index()?;
        for path in paths {
            index.add_path(Path::new(path))?;
        }
        index.write()?;
        index.write_tree()?
    };
    let tree = repo.find_tree(tree_id)?;
    Ok(repo.commit(Some("HEAD"), &sig, &sig, message, &tree, parents)?)
}
