//! Deployment result and teardown request shapes

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The merged deployment result.
///
/// Created once per successful deployment, persisted as the component's
/// durable state, and read back only to supply a default name on later runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentOutputs {
    /// Region everything was provisioned in
    pub region: String,

    /// Function name from the normalized record
    pub function_name: String,

    /// Provisioned gateway service id
    pub api_gateway_service_id: String,

    /// Public URL, `<scheme>://<subDomain>/<environment>/`
    pub url: String,

    /// Bound custom domains, when any were configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_domains: Option<Vec<Value>>,
}

/// Request sent to both collaborators' remove operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveRequest {
    /// Caller remark; the only identifying data this component supplies
    pub from_client_remark: String,
}
