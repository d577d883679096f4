//! Deploy error types

use crate::state::StateStoreError;
use nuxt_scf_provision::ProvisionError;
use thiserror::Error;

/// Errors surfaced by the deploy and teardown entry points
#[derive(Debug, Error)]
pub enum DeployError {
    /// A field of the caller-supplied inputs failed its type/shape constraint
    #[error("invalid input `{field}`: {reason}")]
    InvalidInput {
        field: &'static str,
        reason: String,
    },

    /// A collaborator call failed; propagated verbatim, never retried
    #[error(transparent)]
    Provision(#[from] ProvisionError),

    /// Persisting or reading the deployment result failed
    #[error("state store error: {0}")]
    State(#[from] StateStoreError),
}

/// Result type for deploy operations
pub type Result<T> = std::result::Result<T, DeployError>;
