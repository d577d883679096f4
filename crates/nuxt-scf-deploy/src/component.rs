//! Deployment and teardown orchestration
//!
//! `NuxtComponent` is the entry point for deploy and remove operations. It
//! sequences the two provisioning calls and delegates all actual resource
//! work through the injected collaborator traits.

use crate::error::{DeployError, Result};
use crate::normalize::{normalize_inputs, remark_or_default, NameGenerator};
use crate::state::StateStore;
use nuxt_scf_provision::{FunctionProvisioner, GatewayProvisioner, HandlerResolver};
use nuxt_scf_types::{
    defaults, DeployEvent, DeployEventEnvelope, DeployInputs, DeploymentOutputs, EndpointBackend,
    EventSource, FunctionDeployRequest, GatewayDeployRequest, GatewayEndpoint, NormalizedConfig,
    RemoveInputs, RemoveRequest,
};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{info, instrument};

/// Orchestrates deployment of a Nuxt.js site onto a cloud function fronted
/// by an API gateway
pub struct NuxtComponent {
    /// Cloud-function collaborator
    functions: Arc<dyn FunctionProvisioner>,
    /// API-gateway collaborator
    gateways: Arc<dyn GatewayProvisioner>,
    /// Entry-point resolution collaborator
    resolver: Arc<dyn HandlerResolver>,
    /// Deployment result persistence
    state: Arc<dyn StateStore>,
    /// Name generator for the no-name, no-state case
    namer: Arc<dyn NameGenerator>,
    /// Key the deployment result is persisted under
    state_key: String,
    /// Event channel
    event_tx: broadcast::Sender<DeployEventEnvelope>,
}

impl NuxtComponent {
    /// Create a component from its five capabilities
    pub fn new(
        functions: Arc<dyn FunctionProvisioner>,
        gateways: Arc<dyn GatewayProvisioner>,
        resolver: Arc<dyn HandlerResolver>,
        state: Arc<dyn StateStore>,
        namer: Arc<dyn NameGenerator>,
        state_key: impl Into<String>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(256);
        Self {
            functions,
            gateways,
            resolver,
            state,
            namer,
            state_key: state_key.into(),
            event_tx,
        }
    }

    /// Deploy the site: normalize, provision the function, provision the
    /// gateway from the function's outputs, merge, persist.
    ///
    /// Either provisioning failure aborts the remaining steps immediately;
    /// nothing is rolled back and no partial result is persisted.
    #[instrument(skip(self, inputs))]
    pub async fn deploy(&self, inputs: DeployInputs) -> Result<DeploymentOutputs> {
        // 1. Prior state supplies the default name.
        let prior = self.state.load(&self.state_key).await?;
        let prior_name = prior.as_ref().map(|o| o.function_name.as_str());

        // 2. Normalize.
        let config = normalize_inputs(
            &inputs,
            prior_name,
            self.namer.as_ref(),
            self.resolver.as_ref(),
        )
        .await?;

        // 3. Provision the function.
        let function_request = FunctionDeployRequest::from_config(&config);
        let function_outputs = self
            .functions
            .deploy(&function_request)
            .await
            .map_err(|e| self.deploy_failed(e))?;

        self.emit(
            DeployEvent::FunctionDeployed {
                function_name: function_outputs.name.clone(),
            },
            EventSource::Deployment,
        );
        info!(function = %function_outputs.name, "Cloud function deployed");

        // 4. Provision the gateway, routed at the provisioned function.
        let gateway_request = build_gateway_request(&config, &function_outputs.name);
        let gateway_outputs = self
            .gateways
            .deploy(&gateway_request)
            .await
            .map_err(|e| self.deploy_failed(e))?;

        // 5. Merge and persist.
        let url = format!(
            "{}://{}/{}/",
            default_protocol(&gateway_outputs.protocols),
            gateway_outputs.sub_domain,
            gateway_outputs.environment,
        );

        self.emit(
            DeployEvent::GatewayDeployed {
                service_id: gateway_outputs.service_id.clone(),
                url: url.clone(),
            },
            EventSource::Deployment,
        );

        let outputs = DeploymentOutputs {
            region: config.region.clone(),
            function_name: config.name.clone(),
            api_gateway_service_id: gateway_outputs.service_id,
            url,
            custom_domains: gateway_outputs.custom_domains,
        };

        self.state.save(&self.state_key, &outputs).await?;

        self.emit(
            DeployEvent::DeployCompleted {
                function_name: outputs.function_name.clone(),
                url: outputs.url.clone(),
            },
            EventSource::Deployment,
        );
        info!(url = %outputs.url, "Deployment completed");

        Ok(outputs)
    }

    /// Tear down both provisioned resources.
    ///
    /// The request carries only the remark; identifying what to remove is
    /// each collaborator's responsibility. Function remove runs first, then
    /// gateway remove; neither result is inspected beyond failure.
    #[instrument(skip(self, inputs))]
    pub async fn remove(&self, inputs: RemoveInputs) -> Result<()> {
        let request = RemoveRequest {
            from_client_remark: remark_or_default(inputs.from_client_remark.as_deref()),
        };

        self.functions.remove(&request).await?;
        self.emit(DeployEvent::FunctionRemoved, EventSource::Teardown);

        self.gateways.remove(&request).await?;
        self.emit(DeployEvent::GatewayRemoved, EventSource::Teardown);

        self.state.clear(&self.state_key).await?;

        self.emit(DeployEvent::RemoveCompleted, EventSource::Teardown);
        info!("Deployment removed");

        Ok(())
    }

    /// The currently persisted deployment result, if any
    pub async fn current_state(&self) -> Result<Option<DeploymentOutputs>> {
        Ok(self.state.load(&self.state_key).await?)
    }

    /// Subscribe to deploy lifecycle events
    pub fn subscribe(&self) -> broadcast::Receiver<DeployEventEnvelope> {
        self.event_tx.subscribe()
    }

    // --- Internal helpers ---

    fn deploy_failed(&self, e: nuxt_scf_provision::ProvisionError) -> DeployError {
        self.emit(
            DeployEvent::DeployFailed {
                reason: e.to_string(),
            },
            EventSource::Deployment,
        );
        e.into()
    }

    fn emit(&self, event: DeployEvent, source: EventSource) {
        let _ = self.event_tx.send(DeployEventEnvelope::new(event, source));
    }
}

/// Shape the gateway request from the normalized record and the provisioned
/// function name
fn build_gateway_request(config: &NormalizedConfig, function_name: &str) -> GatewayDeployRequest {
    let mut endpoint = GatewayEndpoint {
        path: "/".into(),
        method: "ANY".into(),
        function: EndpointBackend {
            is_integrated_response: true,
            function_name: function_name.into(),
        },
        usage_plan: None,
        auth: None,
    };

    // usagePlan and auth travel together, gated on auth alone
    if config.apigateway.auth_enabled() {
        endpoint.usage_plan = config.apigateway.usage_plan.clone();
        endpoint.auth = config.apigateway.auth.clone();
    }

    GatewayDeployRequest {
        service_name: config.service_name.clone(),
        description: defaults::GATEWAY_DESCRIPTION.into(),
        service_id: config.service_id.clone(),
        region: config.region.clone(),
        protocols: config.apigateway.protocols.clone().unwrap_or_else(|| {
            defaults::GATEWAY_PROTOCOLS
                .iter()
                .map(|s| s.to_string())
                .collect()
        }),
        environment: config
            .apigateway
            .environment
            .clone()
            .unwrap_or_else(|| defaults::GATEWAY_ENVIRONMENT.to_string()),
        endpoints: vec![endpoint],
        custom_domain: config.apigateway.custom_domain.clone(),
        from_client_remark: config.from_client_remark.clone(),
    }
}

/// `https` when the live protocols contain it (case-insensitively), else `http`
fn default_protocol(protocols: &[String]) -> &'static str {
    if protocols.iter().any(|p| p.eq_ignore_ascii_case("https")) {
        "https"
    } else {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::FixedNamer;
    use crate::state::InMemoryStateStore;
    use nuxt_scf_provision::{
        FixedHandlerResolver, StaticFunctionProvisioner, StaticGatewayProvisioner,
    };
    use nuxt_scf_types::{FunctionDeployOutputs, GatewayDeployOutputs};
    use serde_json::json;

    fn gateway_outputs() -> GatewayDeployOutputs {
        GatewayDeployOutputs {
            service_id: "svc-1".into(),
            protocols: vec!["https".into()],
            sub_domain: "abc123.gw.example".into(),
            environment: "release".into(),
            custom_domains: Some(vec![json!("example.com")]),
        }
    }

    struct Fixture {
        functions: Arc<StaticFunctionProvisioner>,
        gateways: Arc<StaticGatewayProvisioner>,
        state: Arc<InMemoryStateStore>,
        component: NuxtComponent,
    }

    fn fixture(
        functions: StaticFunctionProvisioner,
        gateways: StaticGatewayProvisioner,
    ) -> Fixture {
        let functions = Arc::new(functions);
        let gateways = Arc::new(gateways);
        let state = Arc::new(InMemoryStateStore::new());
        let component = NuxtComponent::new(
            functions.clone(),
            gateways.clone(),
            Arc::new(FixedHandlerResolver::new("/srv/site/.cache/nuxt.js")),
            state.clone(),
            Arc::new(FixedNamer("pinned".into())),
            "nuxtjs",
        );
        Fixture {
            functions,
            gateways,
            state,
            component,
        }
    }

    fn site1_inputs() -> DeployInputs {
        serde_json::from_value(json!({
            "functionName": "site1",
            "code": "/srv/site",
            "apigatewayConf": {
                "protocols": ["https"],
                "customDomain": "example.com",
            },
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_end_to_end_deploy() {
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("site1")),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );

        let outputs = f.component.deploy(site1_inputs()).await.unwrap();

        assert_eq!(
            outputs,
            DeploymentOutputs {
                region: "ap-guangzhou".into(),
                function_name: "site1".into(),
                api_gateway_service_id: "svc-1".into(),
                url: "https://abc123.gw.example/release/".into(),
                custom_domains: Some(vec![json!("example.com")]),
            }
        );

        // The gateway request was shaped from the function outputs
        let gateway_requests = f.gateways.deploy_requests();
        assert_eq!(gateway_requests.len(), 1);
        let request = &gateway_requests[0];
        assert_eq!(request.endpoints.len(), 1);
        assert_eq!(request.endpoints[0].path, "/");
        assert_eq!(request.endpoints[0].method, "ANY");
        assert!(request.endpoints[0].function.is_integrated_response);
        assert_eq!(request.endpoints[0].function.function_name, "site1");
        assert_eq!(request.custom_domain, Some(json!("example.com")));
        assert_eq!(request.description, defaults::GATEWAY_DESCRIPTION);

        // Success persisted the result
        assert_eq!(f.state.load("nuxtjs").await.unwrap(), Some(outputs));
    }

    #[tokio::test]
    async fn test_deploy_is_idempotent_with_pinned_name() {
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("site1")),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );

        let first = f.component.deploy(site1_inputs()).await.unwrap();
        let second = f.component.deploy(site1_inputs()).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_protocol_selection_is_case_insensitive() {
        assert_eq!(
            default_protocol(&["HTTP".to_string(), "HTTPS".to_string()]),
            "https"
        );
        assert_eq!(default_protocol(&["http".to_string()]), "http");
        assert_eq!(default_protocol(&[]), "http");
    }

    #[tokio::test]
    async fn test_gateway_defaults_when_conf_is_empty() {
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("site1")),
            StaticGatewayProvisioner::new(GatewayDeployOutputs {
                protocols: vec!["http".into()],
                custom_domains: None,
                ..gateway_outputs()
            }),
        );

        let mut inputs = site1_inputs();
        inputs.apigateway_conf = None;
        let outputs = f.component.deploy(inputs).await.unwrap();

        let request = &f.gateways.deploy_requests()[0];
        assert_eq!(request.protocols, vec!["http".to_string()]);
        assert_eq!(request.environment, "release");
        assert!(request.custom_domain.is_none());
        assert_eq!(outputs.url, "http://abc123.gw.example/release/");
        assert!(outputs.custom_domains.is_none());
    }

    #[tokio::test]
    async fn test_auth_gates_usage_plan_and_auth_together() {
        // auth set: both copied
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("site1")),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );
        let mut inputs = site1_inputs();
        inputs.apigateway_conf = Some(json!({
            "auth": { "serviceTimeout": 15 },
            "usagePlan": { "maxRequestNum": 1000 },
        }));
        f.component.deploy(inputs).await.unwrap();
        let endpoint = &f.gateways.deploy_requests()[0].endpoints[0];
        assert!(endpoint.auth.is_some());
        assert!(endpoint.usage_plan.is_some());

        // auth absent: usagePlan stays behind the same gate
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("site1")),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );
        let mut inputs = site1_inputs();
        inputs.apigateway_conf = Some(json!({
            "usagePlan": { "maxRequestNum": 1000 },
        }));
        f.component.deploy(inputs).await.unwrap();
        let endpoint = &f.gateways.deploy_requests()[0].endpoints[0];
        assert!(endpoint.auth.is_none());
        assert!(endpoint.usage_plan.is_none());
    }

    #[tokio::test]
    async fn test_function_failure_skips_gateway_and_state() {
        let f = fixture(
            StaticFunctionProvisioner::failing("quota exceeded"),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );

        let err = f.component.deploy(site1_inputs()).await.unwrap_err();
        assert!(matches!(err, DeployError::Provision(_)));
        assert!(f.gateways.deploy_requests().is_empty());
        assert!(f.state.load("nuxtjs").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_gateway_failure_leaves_no_state() {
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("site1")),
            StaticGatewayProvisioner::failing("service limit"),
        );

        let err = f.component.deploy(site1_inputs()).await.unwrap_err();
        assert!(matches!(err, DeployError::Provision(_)));
        // The function was provisioned; nothing compensates for it
        assert_eq!(f.functions.deploy_requests().len(), 1);
        assert!(f.state.load("nuxtjs").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_prior_state_supplies_default_name() {
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("persisted")),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );
        f.state
            .save(
                "nuxtjs",
                &DeploymentOutputs {
                    region: "ap-guangzhou".into(),
                    function_name: "persisted".into(),
                    api_gateway_service_id: "svc-0".into(),
                    url: "http://old.gw.example/release/".into(),
                    custom_domains: None,
                },
            )
            .await
            .unwrap();

        let mut inputs = site1_inputs();
        inputs.function_name = None;
        let outputs = f.component.deploy(inputs).await.unwrap();

        assert_eq!(outputs.function_name, "persisted");
        assert_eq!(f.functions.deploy_requests()[0].name, "persisted");
    }

    #[tokio::test]
    async fn test_remove_calls_both_collaborators_once() {
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("site1")),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );
        f.component.deploy(site1_inputs()).await.unwrap();

        f.component.remove(RemoveInputs::default()).await.unwrap();

        let expected = RemoveRequest {
            from_client_remark: "tencent-nuxtjs".into(),
        };
        assert_eq!(f.functions.remove_requests(), vec![expected.clone()]);
        assert_eq!(f.gateways.remove_requests(), vec![expected]);
        assert!(f.state.load("nuxtjs").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_remove_forwards_explicit_remark() {
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("site1")),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );

        f.component
            .remove(RemoveInputs {
                from_client_remark: Some("my-remark".into()),
            })
            .await
            .unwrap();

        assert_eq!(
            f.functions.remove_requests()[0].from_client_remark,
            "my-remark"
        );
    }

    #[tokio::test]
    async fn test_remove_failure_propagates() {
        let f = fixture(
            StaticFunctionProvisioner::failing("not found"),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );

        let err = f.component.remove(RemoveInputs::default()).await.unwrap_err();
        assert!(matches!(err, DeployError::Provision(_)));
    }

    #[tokio::test]
    async fn test_events_are_emitted_in_order() {
        let f = fixture(
            StaticFunctionProvisioner::new(FunctionDeployOutputs::named("site1")),
            StaticGatewayProvisioner::new(gateway_outputs()),
        );
        let mut events = f.component.subscribe();

        f.component.deploy(site1_inputs()).await.unwrap();

        assert!(matches!(
            events.recv().await.unwrap().event,
            DeployEvent::FunctionDeployed { .. }
        ));
        assert!(matches!(
            events.recv().await.unwrap().event,
            DeployEvent::GatewayDeployed { .. }
        ));
        assert!(matches!(
            events.recv().await.unwrap().event,
            DeployEvent::DeployCompleted { .. }
        ));
    }
}
