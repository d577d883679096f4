//! Cloud-function provisioner trait
//!
//! The function provisioner owns packaging, upload, and function lifecycle on
//! the target platform. nuxt-scf only shapes its requests and sequences its
//! calls.

use crate::error::Result;
use async_trait::async_trait;
use nuxt_scf_types::{FunctionDeployOutputs, FunctionDeployRequest, RemoveRequest};

/// Provisioner for the serverless cloud function
#[async_trait]
pub trait FunctionProvisioner: Send + Sync {
    /// Deploy or update the function described by the request
    async fn deploy(&self, request: &FunctionDeployRequest) -> Result<FunctionDeployOutputs>;

    /// Tear down the previously provisioned function.
    ///
    /// Identification of what to remove is the collaborator's responsibility;
    /// the request carries only the caller remark.
    async fn remove(&self, request: &RemoveRequest) -> Result<()>;
}
