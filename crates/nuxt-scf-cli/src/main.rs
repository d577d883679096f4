//! nuxt-scf CLI - Deploy a Nuxt.js site to serverless functions
//!
//! This CLI wires the deployment orchestrator to HTTP-backed provisioning
//! services and a file-backed state store:
//! - `deploy` provisions the function and the gateway and prints the result
//! - `remove` tears both down
//! - `status` shows the persisted deployment result

use clap::{Parser, Subcommand};
use nuxt_scf_deploy::{FileStateStore, NuxtComponent, RandomSuffixNamer};
use nuxt_scf_provision::{CacheDirHandlerResolver, HttpFunctionProvisioner, HttpGatewayProvisioner};
use nuxt_scf_types::{DeployInputs, RemoveInputs};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;

use config::CliConfig;
use error::CliResult;

/// nuxt-scf CLI application
#[derive(Parser)]
#[command(name = "nuxt-scf")]
#[command(about = "Deploy a Nuxt.js site to Tencent SCF behind an API gateway", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "NUXT_SCF_CONFIG")]
    config: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand)]
enum Commands {
    /// Deploy the site
    Deploy {
        /// Deploy inputs as a JSON file; defaults apply when omitted
        #[arg(short, long)]
        inputs: Option<PathBuf>,
    },

    /// Tear down the deployed function and gateway
    Remove {
        /// Remark forwarded to the provisioning services
        #[arg(long)]
        remark: Option<String>,
    },

    /// Show the persisted deployment result
    Status,
}

#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    // Load config and wire the component
    let config = CliConfig::load(cli.config.as_deref())?;
    let component = build_component(&config)?;

    match cli.command {
        Commands::Deploy { inputs } => {
            let inputs = read_inputs(inputs.as_deref())?;
            let outputs = component.deploy(inputs).await?;
            println!("{}", serde_json::to_string_pretty(&outputs)?);
        }

        Commands::Remove { remark } => {
            component
                .remove(RemoveInputs {
                    from_client_remark: remark,
                })
                .await?;
            println!("{{}}");
        }

        Commands::Status => match component.current_state().await? {
            Some(outputs) => println!("{}", serde_json::to_string_pretty(&outputs)?),
            None => println!("no deployment state"),
        },
    }

    Ok(())
}

fn build_component(config: &CliConfig) -> CliResult<NuxtComponent> {
    let functions = Arc::new(HttpFunctionProvisioner::new(
        &config.services.function_endpoint,
    )?);
    let gateways = Arc::new(HttpGatewayProvisioner::new(
        &config.services.gateway_endpoint,
    )?);
    let resolver = Arc::new(CacheDirHandlerResolver::new(&config.packaging.shim));
    let state = Arc::new(FileStateStore::new(&config.state.dir));

    Ok(NuxtComponent::new(
        functions,
        gateways,
        resolver,
        state,
        Arc::new(RandomSuffixNamer),
        config.state.key.clone(),
    ))
}

fn read_inputs(path: Option<&std::path::Path>) -> CliResult<DeployInputs> {
    match path {
        Some(path) => Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?),
        None => Ok(DeployInputs::default()),
    }
}
