//! API-gateway collaborator wire shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request sent to the API-gateway provisioner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayDeployRequest {
    /// Gateway service name to reuse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_name: Option<String>,

    /// Service description
    pub description: String,

    /// Gateway service id to reuse
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    /// Target region
    pub region: String,

    /// Service protocols
    pub protocols: Vec<String>,

    /// Gateway environment
    pub environment: String,

    /// Routed endpoints
    pub endpoints: Vec<GatewayEndpoint>,

    /// Custom domain configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domain: Option<Value>,

    /// Caller remark
    pub from_client_remark: String,
}

/// A single routed endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEndpoint {
    /// Route path
    pub path: String,

    /// HTTP method (`ANY` routes everything)
    pub method: String,

    /// Backing cloud function
    pub function: EndpointBackend,

    /// Usage plan; forwarded only when auth is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_plan: Option<Value>,

    /// Auth configuration; forwarded only when auth is enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Value>,
}

/// Function backend of an endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointBackend {
    /// Whether the function response is passed through as the HTTP response
    pub is_integrated_response: bool,

    /// Name of the backing function
    pub function_name: String,
}

/// Outputs returned by the API-gateway provisioner
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayDeployOutputs {
    /// Provisioned service id
    pub service_id: String,

    /// Live protocols on the service
    pub protocols: Vec<String>,

    /// Assigned subdomain
    pub sub_domain: String,

    /// Environment the service was published to
    pub environment: String,

    /// Bound custom domains, when any were configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domains: Option<Vec<Value>>,
}
