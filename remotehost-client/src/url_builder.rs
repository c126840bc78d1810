//! URL construction for actions: plain or adds-on.

use crate::error::{ClientError, ClientResult};
use indexmap::IndexMap;
use url::Url;

/// Builds action URLs from the host base URL.
pub struct UrlBuilder;

impl UrlBuilder {
    /// Validate that a base URL is well-formed.
    pub fn validate(url: &str) -> ClientResult<()> {
        Self::parse_base(url)?;
        Ok(())
    }

    /// Plain construction: base URL joined with the `/`-trimmed action name.
    pub fn plain(base_url: &str, port: Option<u16>, action_name: &str) -> ClientResult<Url> {
        let base = Self::parse_base(base_url)?;
        let name = action_name.trim_matches('/');
        let mut url = Self::join(base, name)?;
        Self::apply_port(&mut url, port)?;
        Ok(url)
    }

    /// Adds-on construction: each fragment template has its `{token}`
    /// placeholders substituted, then the fragments are appended to the base
    /// path in order. The action name is not used.
    pub fn adds_on(
        base_url: &str,
        port: Option<u16>,
        fragments: &[String],
        tokens: &IndexMap<String, String>,
    ) -> ClientResult<Url> {
        let mut url = Self::parse_base(base_url)?;
        for fragment in fragments {
            let expanded = Self::expand(fragment, tokens)?;
            url = Self::join(url, expanded.trim_matches('/'))?;
        }
        Self::apply_port(&mut url, port)?;
        Ok(url)
    }

    fn parse_base(base_url: &str) -> ClientResult<Url> {
        Url::parse(base_url).map_err(|e| {
            ClientError::BadConfiguration(format!("invalid base URL '{}': {}", base_url, e))
        })
    }

    /// Append a relative path, keeping the base path prefix.
    fn join(mut base: Url, path: &str) -> ClientResult<Url> {
        if path.is_empty() {
            return Ok(base);
        }
        let base_path = base.path();
        if !base_path.ends_with('/') {
            base.set_path(&format!("{}/", base_path));
        }
        base.join(path).map_err(|e| {
            ClientError::BadConfiguration(format!(
                "failed to join '{}' onto URL '{}': {}",
                path, base, e
            ))
        })
    }

    /// Substitute `{token}` placeholders with percent-encoded values.
    fn expand(fragment: &str, tokens: &IndexMap<String, String>) -> ClientResult<String> {
        let mut expanded = String::with_capacity(fragment.len());
        let mut chars = fragment.chars();
        while let Some(ch) = chars.next() {
            if ch != '{' {
                expanded.push(ch);
                continue;
            }
            let mut name = String::new();
            let mut closed = false;
            for c in chars.by_ref() {
                if c == '}' {
                    closed = true;
                    break;
                }
                name.push(c);
            }
            if !closed || name.is_empty() {
                return Err(ClientError::BadConfiguration(format!(
                    "malformed URL fragment template '{}'",
                    fragment
                )));
            }
            let value = tokens.get(&name).ok_or_else(|| {
                ClientError::BadConfiguration(format!(
                    "no value for URL token '{}' in fragment '{}'",
                    name, fragment
                ))
            })?;
            expanded.push_str(&urlencoding::encode(value));
        }
        Ok(expanded)
    }

    fn apply_port(url: &mut Url, port: Option<u16>) -> ClientResult<()> {
        if let Some(port) = port {
            url.set_port(Some(port)).map_err(|_| {
                ClientError::BadConfiguration(format!("cannot set port on URL '{}'", url))
            })?;
        }
        Ok(())
    }
}
