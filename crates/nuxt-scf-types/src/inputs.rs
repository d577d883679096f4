//! Caller-supplied deploy and remove inputs
//!
//! `DeployInputs` is deliberately loose: the fields that carry type/shape
//! rules are kept as raw JSON values so the normalizer owns enforcement and
//! can report `InvalidInput` instead of a serde parse failure.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Raw deploy inputs as supplied by the caller.
///
/// Only `functionConf` and the pass-through fields are typed here; everything
/// the normalizer validates stays a `Value` until normalization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeployInputs {
    /// Function name; must be a string when present
    pub function_name: Option<Value>,

    /// Source code location; must be a string when present
    pub code: Option<Value>,

    /// Target region; must be a string when present
    pub region: Option<Value>,

    /// Glob patterns to include in the code package
    pub include: Option<Value>,

    /// Glob patterns to exclude from the code package
    pub exclude: Option<Value>,

    /// API gateway configuration; must be a plain object when present
    pub apigateway_conf: Option<Value>,

    /// Function runtime identifier; must be a string when present
    pub runtime: Option<Value>,

    /// Optional function resource configuration
    pub function_conf: Option<FunctionConf>,

    /// Gateway service name to reuse
    pub service_name: Option<String>,

    /// Gateway service id to reuse
    pub service_id: Option<String>,

    /// Remark forwarded to both collaborators
    pub from_client_remark: Option<String>,
}

/// Function resource configuration supplied under `functionConf`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FunctionConf {
    /// Invocation timeout in seconds
    pub timeout: Option<u32>,

    /// Memory limit in MB
    pub memory_size: Option<u32>,

    /// Environment variables, passed through opaquely
    pub environment: Option<Value>,

    /// VPC configuration, passed through opaquely
    pub vpc_config: Option<Value>,
}

/// Inputs accepted by the teardown entry point
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RemoveInputs {
    /// Remark forwarded to both collaborators
    pub from_client_remark: Option<String>,
}
