//! Static provisioner implementations
//!
//! These are suitable for development and testing: they return canned
//! outputs, record every request they receive, and can be configured to fail.
//! Production deployments use the HTTP-backed implementations in
//! [`crate::http`].

use crate::error::{ProvisionError, Result};
use crate::function::FunctionProvisioner;
use crate::gateway::GatewayProvisioner;
use crate::handler::HandlerResolver;
use async_trait::async_trait;
use nuxt_scf_types::{
    FunctionDeployOutputs, FunctionDeployRequest, GatewayDeployOutputs, GatewayDeployRequest,
    RemoveRequest,
};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Function provisioner returning canned outputs
pub struct StaticFunctionProvisioner {
    outputs: FunctionDeployOutputs,
    fail_with: Option<String>,
    deploys: Mutex<Vec<FunctionDeployRequest>>,
    removes: Mutex<Vec<RemoveRequest>>,
}

impl StaticFunctionProvisioner {
    /// Provisioner that succeeds with the given outputs
    pub fn new(outputs: FunctionDeployOutputs) -> Self {
        Self {
            outputs,
            fail_with: None,
            deploys: Mutex::new(Vec::new()),
            removes: Mutex::new(Vec::new()),
        }
    }

    /// Provisioner whose every call fails with the given reason
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outputs: FunctionDeployOutputs::named(""),
            fail_with: Some(reason.into()),
            deploys: Mutex::new(Vec::new()),
            removes: Mutex::new(Vec::new()),
        }
    }

    /// Deploy requests received so far
    pub fn deploy_requests(&self) -> Vec<FunctionDeployRequest> {
        self.deploys.lock().unwrap().clone()
    }

    /// Remove requests received so far
    pub fn remove_requests(&self) -> Vec<RemoveRequest> {
        self.removes.lock().unwrap().clone()
    }
}

#[async_trait]
impl FunctionProvisioner for StaticFunctionProvisioner {
    async fn deploy(&self, request: &FunctionDeployRequest) -> Result<FunctionDeployOutputs> {
        self.deploys.lock().unwrap().push(request.clone());
        match &self.fail_with {
            Some(reason) => Err(ProvisionError::Rejected(reason.clone())),
            None => Ok(self.outputs.clone()),
        }
    }

    async fn remove(&self, request: &RemoveRequest) -> Result<()> {
        self.removes.lock().unwrap().push(request.clone());
        match &self.fail_with {
            Some(reason) => Err(ProvisionError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

/// Gateway provisioner returning canned outputs
pub struct StaticGatewayProvisioner {
    outputs: GatewayDeployOutputs,
    fail_with: Option<String>,
    deploys: Mutex<Vec<GatewayDeployRequest>>,
    removes: Mutex<Vec<RemoveRequest>>,
}

impl StaticGatewayProvisioner {
    /// Provisioner that succeeds with the given outputs
    pub fn new(outputs: GatewayDeployOutputs) -> Self {
        Self {
            outputs,
            fail_with: None,
            deploys: Mutex::new(Vec::new()),
            removes: Mutex::new(Vec::new()),
        }
    }

    /// Provisioner whose every call fails with the given reason
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            outputs: GatewayDeployOutputs {
                service_id: String::new(),
                protocols: Vec::new(),
                sub_domain: String::new(),
                environment: String::new(),
                custom_domains: None,
            },
            fail_with: Some(reason.into()),
            deploys: Mutex::new(Vec::new()),
            removes: Mutex::new(Vec::new()),
        }
    }

    /// Deploy requests received so far
    pub fn deploy_requests(&self) -> Vec<GatewayDeployRequest> {
        self.deploys.lock().unwrap().clone()
    }

    /// Remove requests received so far
    pub fn remove_requests(&self) -> Vec<RemoveRequest> {
        self.removes.lock().unwrap().clone()
    }
}

#[async_trait]
impl GatewayProvisioner for StaticGatewayProvisioner {
    async fn deploy(&self, request: &GatewayDeployRequest) -> Result<GatewayDeployOutputs> {
        self.deploys.lock().unwrap().push(request.clone());
        match &self.fail_with {
            Some(reason) => Err(ProvisionError::Rejected(reason.clone())),
            None => Ok(self.outputs.clone()),
        }
    }

    async fn remove(&self, request: &RemoveRequest) -> Result<()> {
        self.removes.lock().unwrap().push(request.clone());
        match &self.fail_with {
            Some(reason) => Err(ProvisionError::Rejected(reason.clone())),
            None => Ok(()),
        }
    }
}

/// Handler resolver returning a fixed path
pub struct FixedHandlerResolver {
    path: PathBuf,
}

impl FixedHandlerResolver {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl HandlerResolver for FixedHandlerResolver {
    async fn resolve(
        &self,
        _code_uri: &Path,
        _include: &[String],
        _exclude: &[String],
    ) -> Result<PathBuf> {
        Ok(self.path.clone())
    }
}
