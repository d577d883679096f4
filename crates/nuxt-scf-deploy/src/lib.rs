//! nuxt-scf Deploy - Deployment orchestration for serverless Nuxt.js sites
//!
//! Normalizes caller configuration, sequences the two provisioning calls
//! (function, then gateway), merges their outputs into a single result, and
//! persists that result for later teardown.
//!
//! ## Architectural Boundaries
//!
//! - `nuxt-scf-provision` owns: the collaborator traits and their
//!   implementations; provisioning work happens behind them
//! - `nuxt-scf-deploy` owns: normalization, sequencing, output merging,
//!   state persistence
//!
//! ## Key Principle
//!
//! The orchestrator calls through interfaces and never compensates. A
//! failure anywhere aborts the sequence immediately; collaborator errors
//! surface to the caller untouched, and state is written only after full
//! success.
//!
//! ## Usage
//!
//! ```no_run
//! use nuxt_scf_deploy::{InMemoryStateStore, NuxtComponent, RandomSuffixNamer};
//! use nuxt_scf_provision::{
//!     FixedHandlerResolver, StaticFunctionProvisioner, StaticGatewayProvisioner,
//! };
//! use nuxt_scf_types::{DeployInputs, FunctionDeployOutputs, GatewayDeployOutputs};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let functions = Arc::new(StaticFunctionProvisioner::new(
//!     FunctionDeployOutputs::named("site1"),
//! ));
//! let gateways = Arc::new(StaticGatewayProvisioner::new(GatewayDeployOutputs {
//!     service_id: "svc-1".into(),
//!     protocols: vec!["http".into()],
//!     sub_domain: "abc123.gw.example".into(),
//!     environment: "release".into(),
//!     custom_domains: None,
//! }));
//! let resolver = Arc::new(FixedHandlerResolver::new("/srv/site/.cache/nuxt.js"));
//! let state = Arc::new(InMemoryStateStore::new());
//!
//! let component = NuxtComponent::new(
//!     functions,
//!     gateways,
//!     resolver,
//!     state,
//!     Arc::new(RandomSuffixNamer),
//!     "nuxtjs",
//! );
//!
//! let outputs = component.deploy(DeployInputs::default()).await?;
//! println!("{}", outputs.url);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![cfg_attr(feature = "strict-docs", warn(missing_docs))]
#![cfg_attr(not(feature = "strict-docs"), allow(missing_docs))]

pub mod component;
pub mod error;
pub mod normalize;
pub mod state;

// Re-exports
pub use component::NuxtComponent;
pub use error::{DeployError, Result};
pub use normalize::{normalize_inputs, FixedNamer, NameGenerator, RandomSuffixNamer};
pub use state::{FileStateStore, InMemoryStateStore, StateStore, StateStoreError};
