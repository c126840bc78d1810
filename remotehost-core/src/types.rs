//! Configuration records for a remote host API.
//!
//! A [`HostConfig`] describes one remote host: general call parameters,
//! optional HTTP client settings, and a two-level table of actions
//! (group name -> action name -> [`ActionConfig`]).

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Root configuration for a host API instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// General call parameters shared by every action.
    pub parameters: HostParameters,

    /// HTTP client collaborator settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub client: Option<ClientConfig>,

    /// Two-level action table: group name -> action name -> configuration.
    pub actions: IndexMap<String, IndexMap<String, ActionConfig>>,

    /// Common parameter defaults applied to every action at registration.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub actions_parameters: IndexMap<String, String>,
}

/// General api call parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostParameters {
    /// Base URL of the remote host, e.g. `https://api.example.com/v1`.
    pub base_url: String,

    /// Port override applied to every constructed URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Basic-auth user; requests carry basic auth when both user and
    /// password are set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl HostParameters {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), port: None, user: None, password: None }
    }
}

/// Settings forwarded to the HTTP client collaborator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<TimeoutConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_redirects: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    /// Headers attached to every request of this host.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub default_headers: IndexMap<String, String>,
}

/// Timeout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeoutConfig {
    pub connect_ms: u64,
    pub total_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_ms: 10_000, // 10 seconds
            total_ms: 60_000,   // 60 seconds
        }
    }
}

/// Configuration of a single remote action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionConfig {
    /// URL path fragment identifying the action on the remote host.
    pub name: String,

    pub request: RequestConfig,

    pub response: ResponseConfig,
}

/// Request side of an action configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestConfig {
    /// Request type string resolved to a concrete encoder, e.g. `UrlEncoded`.
    #[serde(rename = "type")]
    pub kind: String,

    /// HTTP method; POST when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,

    /// Parameter names with their default values (empty string = no default).
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub parameters: IndexMap<String, String>,

    /// URL fragment templates; when non-empty the URL is built from these
    /// instead of the action name.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub adds_on: Vec<String>,

    /// Headers attached to every request of this action.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub headers: IndexMap<String, String>,

    /// Per-action base URL override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Per-action port override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

impl RequestConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            method: None,
            parameters: IndexMap::new(),
            adds_on: Vec::new(),
            headers: IndexMap::new(),
            base_url: None,
            port: None,
        }
    }

    /// Merge common defaults into the configured parameters.
    ///
    /// A default applies when the parameter is absent or configured as the
    /// empty string; defaults may introduce keys the action did not declare.
    pub fn merged_parameters(&self, defaults: &IndexMap<String, String>) -> IndexMap<String, String> {
        let mut parameters = self.parameters.clone();
        for (key, value) in defaults {
            let unset = match parameters.get(key) {
                None => true,
                Some(existing) => existing.is_empty(),
            };
            if unset {
                parameters.insert(key.clone(), value.clone());
            }
        }
        parameters
    }
}

/// Response side of an action configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseConfig {
    /// Response type string resolved to a concrete decoder, e.g. `Json`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Name of the response wrapper producing the result envelope; the
    /// default wrapper is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wrapper: Option<String>,
}

impl ResponseConfig {
    pub fn new(kind: impl Into<String>) -> Self {
        Self { kind: kind.into(), wrapper: None }
    }
}
