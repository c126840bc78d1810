//! Response wrappers: decoded data plus HTTP metadata into a result envelope.

use serde_json::Value as JsonValue;

/// HTTP-level metadata of a successful response, handed to the wrapper.
#[derive(Debug, Clone)]
pub struct ResponseContext {
    pub status: u16,
    pub reason: String,
}

/// Envelope returned by [`crate::HostApi::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    /// Whether the remote host reported the call as successful.
    pub success: bool,
    /// Application-level return code extracted by the wrapper, if any.
    pub return_code: Option<String>,
    /// Application-level message extracted by the wrapper, if any.
    pub return_message: Option<String>,
    /// Decoded response data as produced by the response decoder.
    pub raw_data: JsonValue,
    /// Payload the wrapper considers the response body.
    pub body: JsonValue,
}

/// Turns decoded response data into an [`Envelope`].
///
/// Custom wrappers extract status/code/message from host-specific response
/// envelopes; the default wrapper passes the decoded data through.
pub trait ResponseWrapper: Send + Sync + std::fmt::Debug {
    /// Name this wrapper registers under.
    fn name(&self) -> &'static str;

    fn wrap(&self, raw_data: JsonValue, ctx: &ResponseContext) -> Envelope;
}

/// Pass-through wrapper used when an action configures no wrapper.
#[derive(Debug)]
pub struct DefaultResponseWrapper;

impl DefaultResponseWrapper {
    pub const NAME: &'static str = "default";
}

impl ResponseWrapper for DefaultResponseWrapper {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn wrap(&self, raw_data: JsonValue, _ctx: &ResponseContext) -> Envelope {
        Envelope {
            success: true,
            return_code: None,
            return_message: None,
            body: raw_data.clone(),
            raw_data,
        }
    }
}
