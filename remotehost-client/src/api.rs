//! The host API: a configured remote host with executable actions.

use crate::action::{ActionInputs, ActionRequest, UrlBuildMethod};
use crate::codec::CodecRegistry;
use crate::error::{ClientError, ClientResult};
use crate::registry::{ActionRegistry, InstantiationMode};
use crate::request::EncodeContext;
use crate::url_builder::UrlBuilder;
use crate::wrapper::{Envelope, ResponseContext};
use indexmap::IndexMap;
use remotehost_config::ConfigLoader;
use remotehost_core::types::{ClientConfig, HostConfig};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{redirect, Client, Method};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Api name used when a definition does not override it.
pub const DEFAULT_API_NAME: &str = "HOST_API";

/// A reusable description of a host api: its name and default configuration.
pub trait HostApiDefinition {
    fn api_name(&self) -> &str {
        DEFAULT_API_NAME
    }

    fn default_config(&self) -> HostConfig;
}

/// A configured remote host whose actions can be executed by name.
#[derive(Debug)]
pub struct HostApi {
    name: String,
    client: Client,
    user: Option<String>,
    password: Option<String>,
    registry: ActionRegistry,
    codecs: Arc<CodecRegistry>,
}

impl HostApi {
    /// Build a host api with lazy action instantiation.
    pub fn new(name: impl Into<String>, config: HostConfig) -> ClientResult<Self> {
        Self::with_mode(name, config, InstantiationMode::Lazy)
    }

    pub fn with_mode(
        name: impl Into<String>,
        config: HostConfig,
        mode: InstantiationMode,
    ) -> ClientResult<Self> {
        Self::with_codecs(name, config, mode, CodecRegistry::default())
    }

    /// Build a host api with a custom codec registry.
    pub fn with_codecs(
        name: impl Into<String>,
        config: HostConfig,
        mode: InstantiationMode,
        codecs: CodecRegistry,
    ) -> ClientResult<Self> {
        let name = name.into();
        UrlBuilder::validate(&config.parameters.base_url)?;

        let client = Self::build_client(config.client.as_ref())?;
        let codecs = Arc::new(codecs);
        let registry = ActionRegistry::from_config(&config, mode, codecs.clone())?;

        Ok(Self {
            name,
            client,
            user: config.parameters.user.clone(),
            password: config.parameters.password.clone(),
            registry,
            codecs,
        })
    }

    /// Build a host api from a definition's name and default configuration.
    pub fn from_definition<D: HostApiDefinition>(definition: &D) -> ClientResult<Self> {
        Self::new(definition.api_name().to_string(), definition.default_config())
    }

    /// Load the configuration from a YAML/JSON file and build a host api.
    pub fn from_file(name: impl Into<String>, path: impl AsRef<Path>) -> ClientResult<Self> {
        let config = ConfigLoader::load_from_file(path)?;
        Self::new(name, config)
    }

    /// Name of this api instance, used in logs.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The materialized request descriptor of an action.
    pub fn action(&self, name: &str) -> ClientResult<ActionRequest> {
        self.registry.lookup(name)
    }

    /// All request descriptors of an action group.
    pub fn action_group(&self, group: &str) -> ClientResult<Vec<ActionRequest>> {
        self.registry.group(group)
    }

    /// The configured parameter defaults of an action.
    pub fn action_parameters(&self, name: &str) -> ClientResult<IndexMap<String, String>> {
        self.registry.parameters(name)
    }

    /// Execute a remote action by name.
    ///
    /// Errors are synchronous and final: transport failures, non-success
    /// statuses and decode failures propagate to the caller without retries.
    pub async fn execute(&self, action_name: &str, inputs: ActionInputs) -> ClientResult<Envelope> {
        let action = self.registry.lookup(action_name)?;

        let url = match &action.url_build {
            UrlBuildMethod::Plain => UrlBuilder::plain(&action.base_url, action.port, &action.name)?,
            UrlBuildMethod::AddsOn(fragments) => {
                UrlBuilder::adds_on(&action.base_url, action.port, fragments, &inputs.url_tokens)?
            }
        };

        let method = Method::from_str(&action.method.to_uppercase()).map_err(|_| {
            ClientError::BadAction {
                action: action_name.to_string(),
                message: format!("invalid HTTP method '{}'", action.method),
            }
        })?;

        let mut builder = self.client.request(method.clone(), url);
        if let (Some(user), Some(password)) = (&self.user, &self.password) {
            builder = builder.basic_auth(user, Some(password));
        }

        // Per-call headers override the action's configured headers
        let mut headers = action.headers.clone();
        for (key, value) in &inputs.headers {
            headers.insert(key.clone(), value.clone());
        }
        for (key, value) in &headers {
            builder = builder.header(key.as_str(), value.as_str());
        }

        let parameters = action.parameters_with_values(&inputs.parameters);
        let codec = self.codecs.resolve_request(&action.request_kind)?;
        builder = codec.encode(
            builder,
            &EncodeContext { method: &method, parameters: &parameters, content: &inputs.content },
        )?;

        tracing::debug!(api = %self.name, action = %action, "executing remote action");
        let started = std::time::Instant::now();
        let response = builder.send().await?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or("").to_string();
        let body = response.text().await?;
        tracing::debug!(
            api = %self.name,
            action = action_name,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "remote action finished"
        );

        if !status.is_success() {
            return Err(ClientError::ActionFailed {
                action: action_name.to_string(),
                status: status.as_u16(),
                reason,
                body,
                request: Box::new(action),
            });
        }

        // Response types resolve here, on first use
        let decoder = self.codecs.resolve_response(&action.response_type)?;
        let raw_data = decoder.decode(&body)?;

        let wrapper = self.codecs.resolve_wrapper(action.response_wrapper.as_deref());
        Ok(wrapper.wrap(raw_data, &ResponseContext { status: status.as_u16(), reason }))
    }

    fn build_client(config: Option<&ClientConfig>) -> ClientResult<Client> {
        let config = config.cloned().unwrap_or_default();
        let timeout = config.timeout.unwrap_or_default();

        let mut builder = Client::builder()
            .connect_timeout(Duration::from_millis(timeout.connect_ms))
            .timeout(Duration::from_millis(timeout.total_ms));

        if let Some(max_redirects) = config.max_redirects {
            builder = builder.redirect(redirect::Policy::limited(max_redirects));
        }
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }
        if !config.default_headers.is_empty() {
            let mut headers = HeaderMap::new();
            for (key, value) in &config.default_headers {
                let name = HeaderName::from_str(key).map_err(|e| {
                    ClientError::BadConfiguration(format!("invalid default header '{}': {}", key, e))
                })?;
                let value = HeaderValue::from_str(value).map_err(|e| {
                    ClientError::BadConfiguration(format!("invalid default header '{}': {}", key, e))
                })?;
                headers.insert(name, value);
            }
            builder = builder.default_headers(headers);
        }

        Ok(builder.build()?)
    }
}
