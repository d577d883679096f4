//! Input normalization
//!
//! Turns the loosely-typed caller inputs into a fully-populated
//! [`NormalizedConfig`], applying defaults and rejecting mis-typed fields
//! with [`DeployError::InvalidInput`]. Handler resolution is the only
//! collaborator call made here; its failures propagate untouched.

use crate::error::{DeployError, Result};
use nuxt_scf_provision::{HandlerResolver, ProvisionError};
use nuxt_scf_types::{defaults, ApiGatewayConf, DeployInputs, NormalizedConfig};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Generates a function name when the caller supplies none and no prior
/// state exists. Injected so tests can pin the name.
pub trait NameGenerator: Send + Sync {
    fn generate(&self) -> String;
}

/// Default generator: `NuxtjsComponent_` plus six random alphanumerics
pub struct RandomSuffixNamer;

impl NameGenerator for RandomSuffixNamer {
    fn generate(&self) -> String {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(defaults::NAME_SUFFIX_LEN)
            .map(char::from)
            .collect();
        format!("{}{}", defaults::NAME_PREFIX, suffix)
    }
}

/// Generator returning a fixed name; for tests and deterministic embedding
pub struct FixedNamer(pub String);

impl NameGenerator for FixedNamer {
    fn generate(&self) -> String {
        self.0.clone()
    }
}

/// Normalize caller inputs into a complete configuration record.
///
/// `prior_name` is the function name from previously persisted state, used
/// as the middle rung of the name fallback chain.
pub async fn normalize_inputs(
    inputs: &DeployInputs,
    prior_name: Option<&str>,
    namer: &dyn NameGenerator,
    resolver: &dyn HandlerResolver,
) -> Result<NormalizedConfig> {
    let name = ensure_opt_string(inputs.function_name.as_ref(), "functionName")?
        .or_else(|| prior_name.map(str::to_owned))
        .unwrap_or_else(|| namer.generate());

    let code_uri = match ensure_opt_string(inputs.code.as_ref(), "code")? {
        Some(code) => PathBuf::from(code),
        None => std::env::current_dir().map_err(|e| DeployError::InvalidInput {
            field: "code",
            reason: format!("cannot resolve working directory: {e}"),
        })?,
    };

    let region = ensure_opt_string(inputs.region.as_ref(), "region")?
        .unwrap_or_else(|| defaults::REGION.to_string());
    let mut include = ensure_string_seq(inputs.include.as_ref(), "include")?;
    let mut exclude = ensure_string_seq(inputs.exclude.as_ref(), "exclude")?;
    let apigateway = ensure_gateway_conf(inputs.apigateway_conf.as_ref())?;
    let runtime = ensure_opt_string(inputs.runtime.as_ref(), "runtime")?
        .unwrap_or_else(|| defaults::RUNTIME.to_string());

    let cached = resolver.resolve(&code_uri, &include, &exclude).await?;
    let handler = handler_from_path(&cached)?;
    include.push(cached.to_string_lossy().into_owned());
    exclude.extend(defaults::HOUSEKEEPING_EXCLUDE.iter().map(|s| s.to_string()));

    let (timeout, memory_size, environment, vpc_config) = match &inputs.function_conf {
        Some(conf) => (
            Some(conf.timeout.filter(|t| *t != 0).unwrap_or(defaults::TIMEOUT_SECS)),
            Some(
                conf.memory_size
                    .filter(|m| *m != 0)
                    .unwrap_or(defaults::MEMORY_SIZE_MB),
            ),
            conf.environment.clone(),
            conf.vpc_config.clone(),
        ),
        None => (None, None, None, None),
    };

    Ok(NormalizedConfig {
        name,
        code_uri,
        region,
        include,
        exclude,
        apigateway,
        runtime,
        handler,
        timeout,
        memory_size,
        environment,
        vpc_config,
        service_name: inputs.service_name.clone(),
        service_id: inputs.service_id.clone(),
        from_client_remark: remark_or_default(inputs.from_client_remark.as_deref()),
    })
}

/// Caller-supplied remark, or the fixed component remark
pub(crate) fn remark_or_default(remark: Option<&str>) -> String {
    match remark {
        Some(r) => r.to_string(),
        None => defaults::FROM_CLIENT_REMARK.to_string(),
    }
}

fn ensure_opt_string(value: Option<&Value>, field: &'static str) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(DeployError::InvalidInput {
            field,
            reason: format!("expected a string, got {other}"),
        }),
    }
}

fn ensure_string_seq(value: Option<&Value>, field: &'static str) -> Result<Vec<String>> {
    match value {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(DeployError::InvalidInput {
                    field,
                    reason: format!("expected string items, got {other}"),
                }),
            })
            .collect(),
        Some(other) => Err(DeployError::InvalidInput {
            field,
            reason: format!("expected an array, got {other}"),
        }),
    }
}

fn ensure_gateway_conf(value: Option<&Value>) -> Result<ApiGatewayConf> {
    match value {
        None => Ok(ApiGatewayConf::default()),
        Some(v @ Value::Object(_)) => {
            serde_json::from_value(v.clone()).map_err(|e| DeployError::InvalidInput {
                field: "apigatewayConf",
                reason: e.to_string(),
            })
        }
        Some(other) => Err(DeployError::InvalidInput {
            field: "apigatewayConf",
            reason: format!("expected a plain object, got {other}"),
        }),
    }
}

fn handler_from_path(path: &Path) -> Result<String> {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| ProvisionError::Handler(format!("no file name in {}", path.display())))?;
    Ok(format!("{stem}.handler"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nuxt_scf_provision::FixedHandlerResolver;
    use serde_json::json;

    const ENTRY: &str = "/srv/site/.cache/nuxt.js";

    async fn normalize(inputs: DeployInputs) -> Result<NormalizedConfig> {
        normalize_inputs(
            &inputs,
            None,
            &FixedNamer("pinned".into()),
            &FixedHandlerResolver::new(ENTRY),
        )
        .await
    }

    fn base_inputs() -> DeployInputs {
        DeployInputs {
            code: Some(json!("/srv/site")),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_generated_name_shape() {
        let namer = RandomSuffixNamer;
        let name = namer.generate();

        assert!(name.starts_with(defaults::NAME_PREFIX));
        let suffix = &name[defaults::NAME_PREFIX.len()..];
        assert_eq!(suffix.len(), defaults::NAME_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));

        // Two independent generations collide only with negligible probability
        assert_ne!(name, namer.generate());
    }

    #[tokio::test]
    async fn test_name_fallback_chain() {
        // Explicit functionName wins
        let mut inputs = base_inputs();
        inputs.function_name = Some(json!("site1"));
        let config = normalize(inputs).await.unwrap();
        assert_eq!(config.name, "site1");

        // Prior state next
        let config = normalize_inputs(
            &base_inputs(),
            Some("persisted"),
            &FixedNamer("pinned".into()),
            &FixedHandlerResolver::new(ENTRY),
        )
        .await
        .unwrap();
        assert_eq!(config.name, "persisted");

        // Generator last
        let config = normalize(base_inputs()).await.unwrap();
        assert_eq!(config.name, "pinned");
    }

    #[tokio::test]
    async fn test_non_string_function_name_is_invalid() {
        let mut inputs = base_inputs();
        inputs.function_name = Some(json!(42));
        let err = normalize(inputs).await.unwrap_err();
        assert!(matches!(
            err,
            DeployError::InvalidInput {
                field: "functionName",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_defaults_applied() {
        let config = normalize(base_inputs()).await.unwrap();

        assert_eq!(config.region, "ap-guangzhou");
        assert_eq!(config.runtime, "Nodejs8.9");
        assert_eq!(config.handler, "nuxt.handler");
        assert_eq!(config.include, vec![ENTRY.to_string()]);
        assert_eq!(config.from_client_remark, "tencent-nuxtjs");
        assert!(config.timeout.is_none());
        assert!(config.memory_size.is_none());
        config.validate().unwrap();
    }

    #[tokio::test]
    async fn test_exclude_ends_with_housekeeping_patterns() {
        let mut inputs = base_inputs();
        inputs.exclude = Some(json!(["node_modules/**", "*.log"]));
        let config = normalize(inputs).await.unwrap();

        assert_eq!(
            config.exclude,
            vec![
                "node_modules/**",
                "*.log",
                ".git/**",
                ".gitignore",
                ".serverless",
                ".DS_Store",
            ]
        );
    }

    #[tokio::test]
    async fn test_include_exclude_reject_non_string_items() {
        let mut inputs = base_inputs();
        inputs.include = Some(json!(["ok", 1]));
        assert!(matches!(
            normalize(inputs).await.unwrap_err(),
            DeployError::InvalidInput {
                field: "include",
                ..
            }
        ));

        let mut inputs = base_inputs();
        inputs.exclude = Some(json!("not-an-array"));
        assert!(matches!(
            normalize(inputs).await.unwrap_err(),
            DeployError::InvalidInput {
                field: "exclude",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_apigateway_conf_must_be_object() {
        let mut inputs = base_inputs();
        inputs.apigateway_conf = Some(json!(["not", "an", "object"]));
        assert!(matches!(
            normalize(inputs).await.unwrap_err(),
            DeployError::InvalidInput {
                field: "apigatewayConf",
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_function_conf_presence_rules() {
        // Absent functionConf leaves everything unset
        let config = normalize(base_inputs()).await.unwrap();
        assert!(config.timeout.is_none() && config.environment.is_none());

        // Present functionConf always sets timeout and memorySize
        let mut inputs = base_inputs();
        inputs.function_conf = Some(nuxt_scf_types::FunctionConf::default());
        let config = normalize(inputs).await.unwrap();
        assert_eq!(config.timeout, Some(3));
        assert_eq!(config.memory_size, Some(128));
        assert!(config.environment.is_none());
        assert!(config.vpc_config.is_none());

        // Supplied values win; environment/vpcConfig copied when present
        let mut inputs = base_inputs();
        inputs.function_conf = Some(nuxt_scf_types::FunctionConf {
            timeout: Some(10),
            memory_size: Some(256),
            environment: Some(json!({ "variables": { "NODE_ENV": "production" } })),
            vpc_config: None,
        });
        let config = normalize(inputs).await.unwrap();
        assert_eq!(config.timeout, Some(10));
        assert_eq!(config.memory_size, Some(256));
        assert!(config.environment.is_some());
        assert!(config.vpc_config.is_none());
    }

    #[tokio::test]
    async fn test_zero_timeout_falls_back_to_default() {
        let mut inputs = base_inputs();
        inputs.function_conf = Some(nuxt_scf_types::FunctionConf {
            timeout: Some(0),
            memory_size: Some(0),
            environment: None,
            vpc_config: None,
        });
        let config = normalize(inputs).await.unwrap();
        assert_eq!(config.timeout, Some(3));
        assert_eq!(config.memory_size, Some(128));
    }

    #[tokio::test]
    async fn test_code_defaults_to_working_directory() {
        let config = normalize(DeployInputs::default()).await.unwrap();
        assert_eq!(config.code_uri, std::env::current_dir().unwrap());
    }

    #[tokio::test]
    async fn test_user_include_precedes_entry_point() {
        let mut inputs = base_inputs();
        inputs.include = Some(json!(["extra/**"]));
        let config = normalize(inputs).await.unwrap();
        assert_eq!(config.include, vec!["extra/**".to_string(), ENTRY.to_string()]);
    }
}
