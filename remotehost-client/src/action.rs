//! Materialized action descriptors and per-call inputs.

use indexmap::IndexMap;
use remotehost_core::ActionName;
use std::fmt;

/// How the URL of an action is constructed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlBuildMethod {
    /// Base URL joined with the action's configured name.
    Plain,
    /// Base URL joined with the configured fragment templates; `{token}`
    /// placeholders are substituted from the call's URL tokens.
    AddsOn(Vec<String>),
}

impl fmt::Display for UrlBuildMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrlBuildMethod::Plain => write!(f, "plain"),
            UrlBuildMethod::AddsOn(_) => write!(f, "adds-on"),
        }
    }
}

/// A fully materialized action request descriptor.
///
/// Produced by the registry from an [`remotehost_core::ActionConfig`] with
/// common defaults and host parameters already folded in.
#[derive(Debug, Clone)]
pub struct ActionRequest {
    /// Two-level registry name of the action.
    pub action: ActionName,
    /// URL path fragment identifying the action on the remote host.
    pub name: String,
    /// Request type string as configured.
    pub request_type: String,
    /// Canonical codec identifier the request type resolved to.
    pub request_kind: String,
    /// Response type string, resolved to a decoder at execution time.
    pub response_type: String,
    pub response_wrapper: Option<String>,
    pub method: String,
    pub url_build: UrlBuildMethod,
    pub base_url: String,
    pub port: Option<u16>,
    /// Parameter names with their defaults, common defaults applied.
    pub parameters: IndexMap<String, String>,
    pub headers: IndexMap<String, String>,
}

impl ActionRequest {
    pub const DEFAULT_METHOD: &'static str = "POST";

    /// Merge caller values over the configured parameter defaults.
    ///
    /// A configured key takes the caller's value when present and non-empty,
    /// else its default when non-empty, else it is omitted. Caller keys that
    /// were never configured are ignored.
    pub fn parameters_with_values(
        &self,
        values: &IndexMap<String, String>,
    ) -> IndexMap<String, String> {
        let mut merged = IndexMap::new();
        for (key, default) in &self.parameters {
            match values.get(key) {
                Some(value) if !value.is_empty() => {
                    merged.insert(key.clone(), value.clone());
                }
                _ if !default.is_empty() => {
                    merged.insert(key.clone(), default.clone());
                }
                _ => {}
            }
        }
        merged
    }
}

impl fmt::Display for ActionRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[ActionRequest] name: {} | request: {} | response: {} | url: {} | method: {} | build: {}",
            self.action, self.request_type, self.response_type, self.base_url, self.method, self.url_build
        )
    }
}

/// Per-call inputs for [`crate::HostApi::execute`].
#[derive(Debug, Clone, Default)]
pub struct ActionInputs {
    /// Values for the action's configured parameters.
    pub parameters: IndexMap<String, String>,
    /// Raw request content for content-oriented request types.
    pub content: String,
    /// Values substituted into adds-on URL fragments.
    pub url_tokens: IndexMap<String, String>,
    /// Additional headers; they override the action's configured headers.
    pub headers: IndexMap<String, String>,
}

impl ActionInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    pub fn with_url_token(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.url_tokens.insert(key.into(), value.into());
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }
}
