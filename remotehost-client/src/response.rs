//! Response decoders: raw response bodies into structured values.

use crate::error::{ClientError, ClientResult};
use serde_json::Value as JsonValue;

/// Decodes a raw response body into a [`JsonValue`].
pub trait ResponseDecoder: Send + Sync + std::fmt::Debug {
    /// Canonical identifier this decoder registers under.
    fn kind(&self) -> &'static str;

    fn decode(&self, body: &str) -> ClientResult<JsonValue>;
}

/// JSON bodies via `serde_json`.
#[derive(Debug)]
pub struct JsonDecoder;

impl ResponseDecoder for JsonDecoder {
    fn kind(&self) -> &'static str {
        "JsonActionResponse"
    }

    fn decode(&self, body: &str) -> ClientResult<JsonValue> {
        serde_json::from_str(body)
            .map_err(|e| ClientError::Decode(format!("invalid JSON response body: {}", e)))
    }
}

/// XML bodies via `quick-xml`; the root element's children become the value.
#[derive(Debug)]
pub struct XmlDecoder;

impl ResponseDecoder for XmlDecoder {
    fn kind(&self) -> &'static str {
        "XmlActionResponse"
    }

    fn decode(&self, body: &str) -> ClientResult<JsonValue> {
        quick_xml::de::from_str(body)
            .map_err(|e| ClientError::Decode(format!("invalid XML response body: {}", e)))
    }
}

/// The body as-is, as a JSON string value.
#[derive(Debug)]
pub struct PlainTextDecoder;

impl ResponseDecoder for PlainTextDecoder {
    fn kind(&self) -> &'static str {
        "PlainTextActionResponse"
    }

    fn decode(&self, body: &str) -> ClientResult<JsonValue> {
        Ok(JsonValue::String(body.to_string()))
    }
}
