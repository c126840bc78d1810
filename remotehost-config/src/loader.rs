//! Loads host configurations from YAML or JSON documents.
//!
//! Content is parsed into a generic JSON value first so that missing
//! required keys surface as [`ConfigError::MissingField`] naming the key
//! path, instead of an opaque deserializer message.

use crate::error::{ConfigError, ConfigResult};
use remotehost_core::types::{ActionConfig, ClientConfig, HostConfig, HostParameters};
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;

/// Supported file formats for configuration
#[derive(Debug, Clone, PartialEq)]
pub enum FileFormat {
    Yaml,
    Json,
}

impl FileFormat {
    /// Detect file format from extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
            Some("json") => Ok(FileFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }
}

/// Configuration loader that parses YAML/JSON documents into a [`HostConfig`].
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a host configuration from a file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<HostConfig> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)?;
        let format = FileFormat::from_path(path)?;
        Self::parse_content(&content, format)
    }

    /// Parse configuration content directly
    pub fn parse_content(content: &str, format: FileFormat) -> ConfigResult<HostConfig> {
        let root: JsonValue = match format {
            FileFormat::Yaml => serde_yaml::from_str(content)?,
            FileFormat::Json => serde_json::from_str(content)?,
        };
        Self::from_value(root)
    }

    /// Convert a generic JSON value into a validated [`HostConfig`].
    pub fn from_value(root: JsonValue) -> ConfigResult<HostConfig> {
        let root = root
            .as_object()
            .ok_or_else(|| ConfigError::Validation("configuration root must be a mapping".to_string()))?;

        let parameters = root
            .get("parameters")
            .ok_or_else(|| ConfigError::MissingField("parameters".to_string()))?;
        if parameters.get("base_url").is_none() {
            return Err(ConfigError::MissingField("parameters.base_url".to_string()));
        }
        let parameters: HostParameters = serde_json::from_value(parameters.clone())?;

        let client: Option<ClientConfig> = match root.get("client") {
            Some(value) => Some(serde_json::from_value(value.clone())?),
            None => None,
        };

        let actions_value = root
            .get("actions")
            .ok_or_else(|| ConfigError::MissingField("actions".to_string()))?;
        let actions = Self::actions_from_value(actions_value)?;

        let actions_parameters: IndexMap<String, String> = match root.get("actions_parameters") {
            Some(value) => serde_json::from_value(value.clone())?,
            None => IndexMap::new(),
        };

        tracing::debug!(
            groups = actions.len(),
            "loaded host configuration"
        );

        Ok(HostConfig { parameters, client, actions, actions_parameters })
    }

    fn actions_from_value(
        value: &JsonValue,
    ) -> ConfigResult<IndexMap<String, IndexMap<String, ActionConfig>>> {
        let groups = value
            .as_object()
            .ok_or_else(|| ConfigError::Validation("'actions' must be a two-level mapping".to_string()))?;

        let mut actions = IndexMap::new();
        for (group_name, group_value) in groups {
            let group = group_value.as_object().ok_or_else(|| {
                ConfigError::Validation(format!(
                    "action group '{}' must be a mapping of action configurations",
                    group_name
                ))
            })?;

            let mut parsed_group = IndexMap::new();
            for (action_name, action_value) in group {
                let action =
                    Self::action_from_value(group_name, action_name, action_value)?;
                parsed_group.insert(action_name.clone(), action);
            }
            actions.insert(group_name.clone(), parsed_group);
        }
        Ok(actions)
    }

    fn action_from_value(
        group: &str,
        name: &str,
        value: &JsonValue,
    ) -> ConfigResult<ActionConfig> {
        let path = |field: &str| format!("actions.{}.{}.{}", group, name, field);

        let conf = value.as_object().ok_or_else(|| {
            ConfigError::Validation(format!("action '{}.{}' must be a mapping", group, name))
        })?;

        if conf.get("name").is_none() {
            return Err(ConfigError::MissingField(path("name")));
        }
        let request = conf
            .get("request")
            .ok_or_else(|| ConfigError::MissingField(path("request")))?;
        if request.get("type").is_none() {
            return Err(ConfigError::MissingField(path("request.type")));
        }
        let response = conf
            .get("response")
            .ok_or_else(|| ConfigError::MissingField(path("response")))?;
        if response.get("type").is_none() {
            return Err(ConfigError::MissingField(path("response.type")));
        }

        Ok(serde_json::from_value(value.clone())?)
    }
}
