//! Git repository access for policy visualization
//!
//! Provides the read-only git layer: acquiring a working copy (temporary
//! clone of a remote, or in-place open of a local path), walking commit
//! history from a reference, and resolving file blobs inside historical
//! commits.

/// Repository acquisition and handle lifecycle
pub mod acquire;
/// File blob resolution inside a commit's tree
pub mod blob;
/// Commit history walking
pub mod walker;

pub use acquire::{acquire_local, acquire_remote, RepoHandle};
pub use blob::resolve_blob;
pub use walker::walk;
