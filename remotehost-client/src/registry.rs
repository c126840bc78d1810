//! Two-level action registry with eager or lazy materialization.

use crate::action::{ActionRequest, UrlBuildMethod};
use crate::codec::CodecRegistry;
use crate::error::{ClientError, ClientResult};
use indexmap::IndexMap;
use remotehost_core::types::{ActionConfig, HostConfig};
use remotehost_core::ActionName;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// When configured actions are turned into [`ActionRequest`] descriptors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstantiationMode {
    /// All actions are materialized at construction; configuration errors
    /// surface immediately.
    Eager,
    /// Actions are materialized on first lookup and cached.
    #[default]
    Lazy,
}

/// Maps two-level action names to materialized request descriptors.
#[derive(Debug)]
pub struct ActionRegistry {
    mode: InstantiationMode,
    /// Materialized descriptors, group -> action -> request.
    actions: RwLock<HashMap<String, HashMap<String, ActionRequest>>>,
    /// Raw configuration table the lazy path materializes from.
    configs: IndexMap<String, IndexMap<String, ActionConfig>>,
    /// Common parameter defaults applied at materialization.
    defaults: IndexMap<String, String>,
    default_base_url: String,
    default_port: Option<u16>,
    codecs: Arc<CodecRegistry>,
}

impl ActionRegistry {
    pub fn from_config(
        config: &HostConfig,
        mode: InstantiationMode,
        codecs: Arc<CodecRegistry>,
    ) -> ClientResult<Self> {
        let registry = Self {
            mode,
            actions: RwLock::new(HashMap::new()),
            configs: config.actions.clone(),
            defaults: config.actions_parameters.clone(),
            default_base_url: config.parameters.base_url.clone(),
            default_port: config.parameters.port,
            codecs,
        };

        if mode == InstantiationMode::Eager {
            for (group, actions) in &registry.configs {
                for (name, conf) in actions {
                    let request = registry.materialize(group, name, conf)?;
                    registry.cache(request);
                }
            }
        }

        Ok(registry)
    }

    pub fn mode(&self) -> InstantiationMode {
        self.mode
    }

    /// Look up an action by its two-level name, materializing it first when
    /// the registry is lazy.
    pub fn lookup(&self, name: &str) -> ClientResult<ActionRequest> {
        let action = ActionName::parse(name)
            .map_err(|e| ClientError::BadConfiguration(e.to_string()))?;

        if let Some(found) = self.cached(&action) {
            return Ok(found);
        }

        if self.mode == InstantiationMode::Eager {
            return Err(not_configured(name));
        }

        let conf = self
            .configs
            .get(action.group())
            .and_then(|group| group.get(action.action()))
            .ok_or_else(|| not_configured(name))?;

        let request = match self.materialize(action.group(), action.action(), conf) {
            Ok(request) => request,
            // A configuration-level failure reads as "this action is not
            // usable", same as a missing configuration.
            Err(ClientError::BadConfiguration(message)) => {
                return Err(ClientError::NotConfigured(format!(
                    "error while configuring action '{}': {}",
                    name, message
                )))
            }
            Err(other) => return Err(other),
        };
        self.cache(request.clone());
        Ok(request)
    }

    /// All materialized requests of a group, in configuration order.
    pub fn group(&self, group_name: &str) -> ClientResult<Vec<ActionRequest>> {
        let confs = self.configs.get(group_name).ok_or_else(|| {
            ClientError::NotConfigured(format!(
                "no action group configured with name '{}'",
                group_name
            ))
        })?;

        let mut requests = Vec::with_capacity(confs.len());
        for (name, conf) in confs {
            let action = ActionName::new(group_name, name)
                .map_err(|e| ClientError::BadConfiguration(e.to_string()))?;
            if let Some(found) = self.cached(&action) {
                requests.push(found);
                continue;
            }
            let request = self.materialize(group_name, name, conf)?;
            self.cache(request.clone());
            requests.push(request);
        }
        Ok(requests)
    }

    /// The configured parameter defaults of an action.
    pub fn parameters(&self, name: &str) -> ClientResult<IndexMap<String, String>> {
        Ok(self.lookup(name)?.parameters)
    }

    fn cached(&self, action: &ActionName) -> Option<ActionRequest> {
        let actions = self.actions.read().expect("action cache lock poisoned");
        actions.get(action.group())?.get(action.action()).cloned()
    }

    fn cache(&self, request: ActionRequest) {
        let mut actions = self.actions.write().expect("action cache lock poisoned");
        actions
            .entry(request.action.group().to_string())
            .or_default()
            .insert(request.action.action().to_string(), request);
    }

    /// Turn an action configuration into a request descriptor.
    fn materialize(
        &self,
        group: &str,
        name: &str,
        conf: &ActionConfig,
    ) -> ClientResult<ActionRequest> {
        let action = ActionName::new(group, name)
            .map_err(|e| ClientError::BadConfiguration(e.to_string()))?;

        // Unsupported request types surface here, at registration.
        let codec = self.codecs.resolve_request(&conf.request.kind)?;

        let url_build = if conf.request.adds_on.is_empty() {
            UrlBuildMethod::Plain
        } else {
            UrlBuildMethod::AddsOn(conf.request.adds_on.clone())
        };

        let base_url = conf
            .request
            .base_url
            .clone()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| self.default_base_url.clone());

        let request = ActionRequest {
            action,
            name: conf.name.clone(),
            request_type: conf.request.kind.clone(),
            request_kind: codec.kind().to_string(),
            response_type: conf.response.kind.clone(),
            response_wrapper: conf.response.wrapper.clone(),
            method: conf
                .request
                .method
                .clone()
                .unwrap_or_else(|| ActionRequest::DEFAULT_METHOD.to_string()),
            url_build,
            base_url,
            port: conf.request.port.or(self.default_port),
            parameters: conf.request.merged_parameters(&self.defaults),
            headers: conf.request.headers.clone(),
        };
        tracing::debug!(action = %request.action, kind = %request.request_kind, "materialized action request");
        Ok(request)
    }
}

fn not_configured(name: &str) -> ClientError {
    ClientError::NotConfigured(format!("no action configured with name '{}'", name))
}
