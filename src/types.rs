//! Core value types shared across the backend
//!
//! These are the shapes handed to the HTTP layer: commit records for the
//! history view and the generic metadata document decoded from an envelope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single commit reachable from a walked reference
///
/// Immutable once produced; the hash is the identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Full commit SHA hash (hex)
    pub hash: String,
    /// Author's name
    pub author_name: String,
    /// Author's email address
    pub author_email: String,
    /// Commit timestamp in UTC
    pub timestamp: DateTime<Utc>,
    /// Commit message, unmodified
    pub message: String,
}

/// A decoded metadata document: an arbitrary JSON object
///
/// The core relies on no schema beyond "is a JSON object"; the only field
/// the surrounding system reads is the `type` discriminator.
pub type MetadataDocument = serde_json::Map<String, serde_json::Value>;
