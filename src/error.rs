/// Centralized error types for gittuf-viz using thiserror
///
/// Provides domain-specific error types so the HTTP layer can map each
/// failure to an appropriate response without re-deriving the cause.
use thiserror::Error;

/// Main error type for the visualization backend core
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Acquisition error: {0}")]
    Acquire(#[from] AcquireError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Blob error: {0}")]
    Blob(#[from] BlobError),

    #[error("Envelope error: {0}")]
    Envelope(#[from] EnvelopeError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

/// Errors raised while acquiring a repository (clone or local open)
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("Invalid repository URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to clone '{url}': {reason}")]
    CloneFailed { url: String, reason: String },

    #[error("Not a git repository: {0}")]
    NotARepository(String),

    #[error("Failed to create temporary working copy: {0}")]
    TempDir(#[source] std::io::Error),

    #[error("Remote acquisition was cancelled")]
    Cancelled,

    #[error("Failed to open repository: {0}")]
    OpenFailed(String),
}

/// Errors raised while walking commit history
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Reference not found: {0}")]
    RefNotFound(String),

    #[error("Failed to walk commits: {0}")]
    WalkFailed(String),
}

/// Errors raised while resolving a file blob inside a commit
#[derive(Error, Debug)]
pub enum BlobError {
    #[error("Invalid file path: {0}")]
    InvalidPath(String),

    #[error("Commit not found: {0}")]
    CommitNotFound(String),

    #[error("Path '{path}' not found in commit {commit}")]
    PathNotFound { commit: String, path: String },

    #[error("Path '{path}' in commit {commit} is a directory, not a file")]
    NotAFile { commit: String, path: String },

    #[error("Failed to read blob: {0}")]
    ReadFailed(String),
}

/// Errors raised while decoding a signed metadata envelope
///
/// The three stages are deliberately distinct: outer JSON shape, payload
/// base64 encoding, and inner metadata document.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("Malformed envelope: {0}")]
    MalformedEnvelope(String),

    #[error("Malformed payload encoding: {0}")]
    MalformedPayloadEncoding(#[from] base64::DecodeError),

    #[error("Malformed metadata document: {0}")]
    MalformedMetadataDocument(String),
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration file: {0}")]
    LoadFailed(String),

    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    #[error("Invalid configuration value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Configuration file not found: {0}")]
    FileNotFound(String),
}

/// Outward-facing failure class, one per response family at the API boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Missing or malformed input argument
    BadRequest,
    /// Repository, reference, commit, or path does not exist
    NotFound,
    /// The stored data itself is invalid (envelope/payload/document)
    UnprocessableData,
    /// Network, authentication, or clone/fetch failure against the remote
    Upstream,
    /// Unexpected failure unrelated to user input
    Internal,
}

// Conversion from anyhow::Error to BackendError
impl From<anyhow::Error> for BackendError {
    fn from(err: anyhow::Error) -> Self {
        BackendError::Other(format!("{:#}", err))
    }
}

impl BackendError {
    /// Create a new error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        BackendError::Other(msg.into())
    }

    /// Classify this error for status-code selection at the API boundary
    pub fn class(&self) -> ErrorClass {
        match self {
            BackendError::Acquire(e) => match e {
                AcquireError::InvalidUrl(_) => ErrorClass::BadRequest,
                AcquireError::NotARepository(_) => ErrorClass::NotFound,
                AcquireError::CloneFailed { .. } | AcquireError::Cancelled => ErrorClass::Upstream,
                AcquireError::TempDir(_) | AcquireError::OpenFailed(_) => ErrorClass::Internal,
            },
            BackendError::History(e) => match e {
                HistoryError::RefNotFound(_) => ErrorClass::NotFound,
                HistoryError::WalkFailed(_) => ErrorClass::Internal,
            },
            BackendError::Blob(e) => match e {
                BlobError::InvalidPath(_) => ErrorClass::BadRequest,
                BlobError::CommitNotFound(_)
                | BlobError::PathNotFound { .. }
                | BlobError::NotAFile { .. } => ErrorClass::NotFound,
                BlobError::ReadFailed(_) => ErrorClass::Internal,
            },
            BackendError::Envelope(_) => ErrorClass::UnprocessableData,
            BackendError::Config(_) => ErrorClass::BadRequest,
            BackendError::Io(_) | BackendError::Other(_) => ErrorClass::Internal,
        }
    }

    /// Check if this is a user error (bad input or missing target) vs system error
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.class(),
            ErrorClass::BadRequest | ErrorClass::NotFound | ErrorClass::UnprocessableData
        )
    }
}
