//! Cloud-function collaborator wire shapes

use crate::config::NormalizedConfig;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

/// Request sent to the cloud-function provisioner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDeployRequest {
    /// Function name
    pub name: String,

    /// Source code location
    pub code_uri: PathBuf,

    /// Entry-point handler
    pub handler: String,

    /// Runtime identifier
    pub runtime: String,

    /// Target region
    pub region: String,

    /// Include patterns for the code package
    pub include: Vec<String>,

    /// Exclude patterns for the code package
    pub exclude: Vec<String>,

    /// Invocation timeout in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u32>,

    /// Memory limit in MB
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory_size: Option<u32>,

    /// Environment variables
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<Value>,

    /// VPC configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vpc_config: Option<Value>,

    /// Caller remark
    pub from_client_remark: String,
}

impl FunctionDeployRequest {
    /// Build the request from a normalized configuration record
    pub fn from_config(config: &NormalizedConfig) -> Self {
        Self {
            name: config.name.clone(),
            code_uri: config.code_uri.clone(),
            handler: config.handler.clone(),
            runtime: config.runtime.clone(),
            region: config.region.clone(),
            include: config.include.clone(),
            exclude: config.exclude.clone(),
            timeout: config.timeout,
            memory_size: config.memory_size,
            environment: config.environment.clone(),
            vpc_config: config.vpc_config.clone(),
            from_client_remark: config.from_client_remark.clone(),
        }
    }
}

/// Outputs returned by the cloud-function provisioner.
///
/// Only `Name` is contractual; anything else the collaborator returns is
/// carried opaquely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FunctionDeployOutputs {
    /// Deployed function name
    #[serde(rename = "Name")]
    pub name: String,

    /// Collaborator-specific fields
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl FunctionDeployOutputs {
    /// Outputs carrying only a name
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extra: serde_json::Map::new(),
        }
    }
}
