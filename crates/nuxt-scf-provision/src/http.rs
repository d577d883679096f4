//! HTTP-backed provisioner implementations
//!
//! These delegate to remote provisioning services over JSON-over-HTTP. A
//! non-2xx response becomes [`ProvisionError::Remote`]; transport failures
//! surface as [`ProvisionError::Http`]. No retries.

use crate::error::{ProvisionError, Result};
use crate::function::FunctionProvisioner;
use crate::gateway::GatewayProvisioner;
use async_trait::async_trait;
use nuxt_scf_types::{
    FunctionDeployOutputs, FunctionDeployRequest, GatewayDeployOutputs, GatewayDeployRequest,
    RemoveRequest,
};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

/// Shared JSON-over-HTTP client for a provisioning service
struct ServiceClient {
    client: Client,
    base_url: String,
}

impl ServiceClient {
    fn new(endpoint: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            base_url: endpoint.trim_end_matches('/').to_string(),
        })
    }

    async fn post<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        debug!(%path, "posting provisioning request");
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProvisionError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    async fn post_discard<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        debug!(%path, "posting provisioning request");
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProvisionError::Remote {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

/// Function provisioner backed by a remote provisioning service
pub struct HttpFunctionProvisioner {
    service: ServiceClient,
}

impl HttpFunctionProvisioner {
    /// Create a provisioner for the given service endpoint
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            service: ServiceClient::new(endpoint)?,
        })
    }
}

#[async_trait]
impl FunctionProvisioner for HttpFunctionProvisioner {
    async fn deploy(&self, request: &FunctionDeployRequest) -> Result<FunctionDeployOutputs> {
        self.service.post("/functions/deploy", request).await
    }

    async fn remove(&self, request: &RemoveRequest) -> Result<()> {
        self.service.post_discard("/functions/remove", request).await
    }
}

/// Gateway provisioner backed by a remote provisioning service
pub struct HttpGatewayProvisioner {
    service: ServiceClient,
}

impl HttpGatewayProvisioner {
    /// Create a provisioner for the given service endpoint
    pub fn new(endpoint: &str) -> Result<Self> {
        Ok(Self {
            service: ServiceClient::new(endpoint)?,
        })
    }
}

#[async_trait]
impl GatewayProvisioner for HttpGatewayProvisioner {
    async fn deploy(&self, request: &GatewayDeployRequest) -> Result<GatewayDeployOutputs> {
        self.service.post("/gateways/deploy", request).await
    }

    async fn remove(&self, request: &RemoveRequest) -> Result<()> {
        self.service.post_discard("/gateways/remove", request).await
    }
}
