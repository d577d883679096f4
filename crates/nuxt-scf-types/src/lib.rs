//! nuxt-scf Types - Core types for serverless Nuxt.js deployment
//!
//! nuxt-scf deploys a built Nuxt.js site onto Tencent Serverless Cloud
//! Functions and fronts it with an API Gateway service. This crate holds the
//! data model shared by the normalizer, the orchestrator, and the
//! provisioner implementations.
//!
//! ## Architectural Boundaries
//!
//! - **nuxt-scf-deploy** owns: input normalization, deploy/remove sequencing,
//!   state persistence
//! - **nuxt-scf-provision** owns: the collaborator traits and their
//!   implementations (static, HTTP)
//! - This crate owns: the shapes that cross those boundaries
//!
//! ## Key Concepts
//!
//! - **DeployInputs**: loosely-typed caller input, validated by the normalizer
//! - **NormalizedConfig**: the fully-populated configuration record
//! - **FunctionDeployRequest / GatewayDeployRequest**: collaborator wire shapes
//! - **DeploymentOutputs**: the merged, persisted deployment result
//! - **Events**: deploy/teardown lifecycle stream

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod config;
pub mod events;
pub mod function;
pub mod gateway;
pub mod inputs;
pub mod outputs;

// Re-export main types
pub use config::{defaults, ApiGatewayConf, ConfigValidationError, NormalizedConfig};
pub use events::{DeployEvent, DeployEventEnvelope, EventSource};
pub use function::{FunctionDeployOutputs, FunctionDeployRequest};
pub use gateway::{
    EndpointBackend, GatewayDeployOutputs, GatewayDeployRequest, GatewayEndpoint,
};
pub use inputs::{DeployInputs, FunctionConf, RemoveInputs};
pub use outputs::{DeploymentOutputs, RemoveRequest};
