//! API-gateway provisioner trait

use crate::error::Result;
use async_trait::async_trait;
use nuxt_scf_types::{GatewayDeployOutputs, GatewayDeployRequest, RemoveRequest};

/// Provisioner for the API gateway service fronting the function
#[async_trait]
pub trait GatewayProvisioner: Send + Sync {
    /// Deploy or update the gateway service described by the request
    async fn deploy(&self, request: &GatewayDeployRequest) -> Result<GatewayDeployOutputs>;

    /// Tear down the previously provisioned gateway service
    async fn remove(&self, request: &RemoveRequest) -> Result<()>;
}
