//! nuxt-scf Provision - Collaborator traits and implementations
//!
//! This crate provides the provisioning infrastructure for nuxt-scf:
//!
//! - **FunctionProvisioner**: deploys and removes the cloud function
//! - **GatewayProvisioner**: deploys and removes the API gateway service
//! - **HandlerResolver**: locates the packaged entry-point file
//!
//! ## Static vs HTTP
//!
//! The crate provides static implementations suitable for development and
//! testing, and HTTP-backed implementations that delegate to remote
//! provisioning services. Both collaborators are consumed as opaque trait
//! objects; this component never retries, translates, or compensates their
//! failures.

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod error;
pub mod function;
pub mod gateway;
pub mod handler;
pub mod http;
pub mod memory;

// Re-exports
pub use error::{ProvisionError, Result};
pub use function::FunctionProvisioner;
pub use gateway::GatewayProvisioner;
pub use handler::{CacheDirHandlerResolver, HandlerResolver};
pub use http::{HttpFunctionProvisioner, HttpGatewayProvisioner};
pub use memory::{FixedHandlerResolver, StaticFunctionProvisioner, StaticGatewayProvisioner};
