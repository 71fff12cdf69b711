//! # gittuf-viz - Policy History Retrieval Backend
//!
//! Backend core for the gittuf policy visualization front end. Retrieves
//! commit history and policy metadata from git repositories, local or remote,
//! through strictly read-only operations.
//!
//! ## Overview
//!
//! gittuf stores its policy state on a dedicated reference
//! (`refs/gittuf/policy`) as commits whose trees carry signed metadata
//! envelopes. This crate acquires a repository (temporary clone of a remote
//! URL, or in-place open of a local path), walks commit history from a named
//! reference, resolves metadata file blobs inside historical commits, and
//! decodes the signed-envelope format (base64 payload wrapping JSON) into a
//! generic document.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────┐
//! │   HTTP layer     │  (out of scope, consumes PolicyService)
//! └────────┬─────────┘
//!          │
//! ┌────────▼─────────┐
//! │  PolicyService   │  (4 operations, explicit CoreConfig)
//! └────────┬─────────┘
//!          │
//!    ┌─────┴──────┬─────────────┬──────────────┐
//!    │            │             │              │
//! ┌──▼──────┐ ┌───▼─────┐ ┌─────▼────┐ ┌───────▼──────┐
//! │ acquire │ │ walker  │ │   blob   │ │   envelope   │
//! │ (git2 + │ │ (rev-   │ │ (tree    │ │ (JSON/base64 │
//! │  temp)  │ │  walk)  │ │  walk)   │ │  decoding)   │
//! └─────────┘ └─────────┘ └──────────┘ └──────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`service`]: top-level operations consumed by the HTTP layer
//! - [`repo`]: repository acquisition, history walking, blob resolution
//! - [`envelope`]: signed-envelope metadata decoding
//! - [`config`]: explicit configuration passed in at construction time
//! - [`types`]: commit records and the generic metadata document
//! - [`error`]: error taxonomy with API-boundary classification
//!
//! ## Usage Example
//!
//! ```no_run
//! use gittuf_viz::config::CoreConfig;
//! use gittuf_viz::service::PolicyService;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let service = PolicyService::new(CoreConfig::new()?)?;
//!     let cancel = CancellationToken::new();
//!
//!     let commits = service
//!         .list_remote_commits("https://example.com/repo.git", &cancel)
//!         .await?;
//!     println!("{} policy commits", commits.len());
//!
//!     Ok(())
//! }
//! ```

/// Explicit configuration passed into the core at construction time
pub mod config;

/// Signed-envelope metadata decoding
pub mod envelope;

/// Error types and API-boundary classification
pub mod error;

/// Git repository acquisition, history walking, and blob resolution
pub mod repo;

/// Top-level operations consumed by the HTTP layer
pub mod service;

/// Core value types
pub mod types;
