//! Configuration for the nuxt-scf CLI

use serde::{Deserialize, Serialize};

/// Main CLI configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CliConfig {
    /// Provisioning service endpoints
    #[serde(default)]
    pub services: ServicesConfig,

    /// State persistence
    #[serde(default)]
    pub state: StateConfig,

    /// Packaging
    #[serde(default)]
    pub packaging: PackagingConfig,
}

/// Endpoints of the remote provisioning services
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServicesConfig {
    /// Cloud-function provisioning service
    #[serde(default = "default_function_endpoint")]
    pub function_endpoint: String,

    /// API-gateway provisioning service
    #[serde(default = "default_gateway_endpoint")]
    pub gateway_endpoint: String,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            function_endpoint: default_function_endpoint(),
            gateway_endpoint: default_gateway_endpoint(),
        }
    }
}

/// Where the deployment result is persisted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Directory holding the state files
    #[serde(default = "default_state_dir")]
    pub dir: String,

    /// Key the deployment result is stored under
    #[serde(default = "default_state_key")]
    pub key: String,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            dir: default_state_dir(),
            key: default_state_key(),
        }
    }
}

/// Entry-point packaging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackagingConfig {
    /// Shim entry-point file cached next to the site code
    #[serde(default = "default_shim")]
    pub shim: String,
}

impl Default for PackagingConfig {
    fn default() -> Self {
        Self {
            shim: default_shim(),
        }
    }
}

// Default value helpers
fn default_function_endpoint() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_gateway_endpoint() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_state_dir() -> String {
    ".serverless".to_string()
}

fn default_state_key() -> String {
    "nuxtjs".to_string()
}

fn default_shim() -> String {
    "shims/nuxt.js".to_string()
}

impl CliConfig {
    /// Load configuration: defaults, then an optional file, then
    /// `NUXT_SCF_`-prefixed environment variables
    pub fn load(path: Option<&str>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder();

        builder = builder.add_source(config::Config::try_from(&CliConfig::default())?);

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("NUXT_SCF")
                .separator("_")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CliConfig::default();
        assert_eq!(config.services.function_endpoint, "http://127.0.0.1:8080");
        assert_eq!(config.state.dir, ".serverless");
        assert_eq!(config.state.key, "nuxtjs");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = CliConfig::load(None).unwrap();
        assert_eq!(config.packaging.shim, "shims/nuxt.js");
    }
}
