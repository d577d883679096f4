//! Provisioner error types

use thiserror::Error;

/// Collaborator failures.
///
/// These are surfaced to callers verbatim; the orchestrator neither wraps nor
/// retries them.
#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("provisioning service returned {status}: {message}")]
    Remote { status: u16, message: String },

    #[error("provisioning transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("handler resolution failed: {0}")]
    Handler(String),

    #[error("provisioning payload error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("provisioning rejected: {0}")]
    Rejected(String),
}

/// Result type for provisioner operations
pub type Result<T> = std::result::Result<T, ProvisionError>;
