//! The normalized configuration record
//!
//! A `NormalizedConfig` is what the orchestrator actually deploys from: every
//! field populated, every default applied, the handler resolved. It is built
//! by the normalizer in `nuxt-scf-deploy` and never persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Fixed defaults applied during normalization
pub mod defaults {
    /// Region used when the caller supplies none
    pub const REGION: &str = "ap-guangzhou";

    /// Function runtime used when the caller supplies none
    pub const RUNTIME: &str = "Nodejs8.9";

    /// Prefix for generated function names
    pub const NAME_PREFIX: &str = "NuxtjsComponent_";

    /// Length of the random suffix on generated function names
    pub const NAME_SUFFIX_LEN: usize = 6;

    /// Remark attached to every collaborator call when the caller supplies none
    pub const FROM_CLIENT_REMARK: &str = "tencent-nuxtjs";

    /// Description attached to the gateway service
    pub const GATEWAY_DESCRIPTION: &str = "Serverless Framework tencent-nuxtjs Component";

    /// Gateway protocols used when `apigatewayConf.protocols` is absent
    pub const GATEWAY_PROTOCOLS: [&str; 1] = ["http"];

    /// Gateway environment used when `apigatewayConf.environment` is absent
    pub const GATEWAY_ENVIRONMENT: &str = "release";

    /// Invocation timeout in seconds when `functionConf` omits one
    pub const TIMEOUT_SECS: u32 = 3;

    /// Memory limit in MB when `functionConf` omits one
    pub const MEMORY_SIZE_MB: u32 = 128;

    /// Housekeeping patterns appended to every exclude list, in this order
    pub const HOUSEKEEPING_EXCLUDE: [&str; 4] =
        [".git/**", ".gitignore", ".serverless", ".DS_Store"];
}

/// Fully-populated deployment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalizedConfig {
    /// Function name (explicit, previously persisted, or generated)
    pub name: String,

    /// Source code location
    pub code_uri: PathBuf,

    /// Target region
    pub region: String,

    /// Include patterns; always contains the resolved entry-point path
    pub include: Vec<String>,

    /// Exclude patterns; always ends with the housekeeping patterns
    pub exclude: Vec<String>,

    /// Gateway configuration
    pub apigateway: ApiGatewayConf,

    /// Function runtime identifier
    pub runtime: String,

    /// Entry-point handler, `<basename>.handler`
    pub handler: String,

    /// Invocation timeout in seconds; set only when `functionConf` was present
    pub timeout: Option<u32>,

    /// Memory limit in MB; set only when `functionConf` was present
    pub memory_size: Option<u32>,

    /// Environment variables, passed through opaquely
    pub environment: Option<Value>,

    /// VPC configuration, passed through opaquely
    pub vpc_config: Option<Value>,

    /// Gateway service name to reuse
    pub service_name: Option<String>,

    /// Gateway service id to reuse
    pub service_id: Option<String>,

    /// Remark forwarded to both collaborators
    pub from_client_remark: String,
}

impl NormalizedConfig {
    /// Validate the record invariant.
    ///
    /// A normalized record must carry a non-empty name, handler, runtime and
    /// region, and its include list must contain the resolved entry point.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.name.is_empty() {
            return Err(ConfigValidationError::EmptyField("name"));
        }
        if self.handler.is_empty() {
            return Err(ConfigValidationError::EmptyField("handler"));
        }
        if self.runtime.is_empty() {
            return Err(ConfigValidationError::EmptyField("runtime"));
        }
        if self.region.is_empty() {
            return Err(ConfigValidationError::EmptyField("region"));
        }
        if self.include.is_empty() {
            return Err(ConfigValidationError::MissingEntryPoint);
        }
        Ok(())
    }
}

/// API gateway configuration carried under `apigatewayConf`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApiGatewayConf {
    /// Service protocols (`http`, `https`)
    pub protocols: Option<Vec<String>>,

    /// Gateway environment (`release`, `test`, ...)
    pub environment: Option<String>,

    /// Custom domain configuration, passed through opaquely
    pub custom_domain: Option<Value>,

    /// Endpoint auth configuration, passed through opaquely
    pub auth: Option<Value>,

    /// Usage plan, passed through opaquely; only forwarded when auth is set
    pub usage_plan: Option<Value>,
}

impl ApiGatewayConf {
    /// Whether auth is enabled. `null` and `false` count as disabled, matching
    /// the truthiness semantics of the configuration format.
    pub fn auth_enabled(&self) -> bool {
        match &self.auth {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(_) => true,
        }
    }
}

/// Configuration record invariant violations
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("normalized config field cannot be empty: {0}")]
    EmptyField(&'static str),

    #[error("include list is missing the resolved entry point")]
    MissingEntryPoint,
}
