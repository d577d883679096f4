//! CLI error types

use nuxt_scf_deploy::DeployError;
use nuxt_scf_provision::ProvisionError;
use thiserror::Error;

/// Errors surfaced at the CLI boundary
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Deploy(#[from] DeployError),

    #[error("provisioner setup error: {0}")]
    Provision(#[from] ProvisionError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for CLI operations
pub type CliResult<T> = std::result::Result<T, CliError>;
