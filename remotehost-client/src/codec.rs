//! Registry resolving request/response type strings to concrete codecs.
//!
//! Resolution probes the exact type string first, then the string with the
//! conventional suffix appended (`ActionRequest` for requests,
//! `ActionResponse` for responses), so a configuration may say either
//! `UrlEncoded` or `UrlEncodedActionRequest`.

use crate::error::{ClientError, ClientResult};
use crate::request::{
    JsonCodec, PlainTextCodec, PostTextCodec, RequestCodec, UrlEncodedCodec,
    UrlEncodedFromContentCodec, XmlCodec,
};
use crate::response::{JsonDecoder, PlainTextDecoder, ResponseDecoder, XmlDecoder};
use crate::wrapper::{DefaultResponseWrapper, ResponseWrapper};
use std::collections::HashMap;
use std::sync::Arc;

/// Conventional suffix of request type identifiers.
pub const REQUEST_SUFFIX: &str = "ActionRequest";

/// Conventional suffix of response type identifiers.
pub const RESPONSE_SUFFIX: &str = "ActionResponse";

/// Registered request codecs, response decoders and response wrappers.
#[derive(Debug)]
pub struct CodecRegistry {
    requests: HashMap<String, Arc<dyn RequestCodec>>,
    responses: HashMap<String, Arc<dyn ResponseDecoder>>,
    wrappers: HashMap<String, Arc<dyn ResponseWrapper>>,
    default_wrapper: Arc<dyn ResponseWrapper>,
}

impl Default for CodecRegistry {
    /// Registry with all built-in codecs and the default wrapper.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register_request_codec(Arc::new(UrlEncodedCodec));
        registry.register_request_codec(Arc::new(JsonCodec));
        registry.register_request_codec(Arc::new(XmlCodec));
        registry.register_request_codec(Arc::new(PlainTextCodec));
        registry.register_request_codec(Arc::new(PostTextCodec));
        registry.register_request_codec(Arc::new(UrlEncodedFromContentCodec));
        registry.register_response_decoder(Arc::new(JsonDecoder));
        registry.register_response_decoder(Arc::new(XmlDecoder));
        registry.register_response_decoder(Arc::new(PlainTextDecoder));
        registry
    }
}

impl CodecRegistry {
    /// Registry without built-ins; the default wrapper is always present.
    pub fn empty() -> Self {
        let default_wrapper: Arc<dyn ResponseWrapper> = Arc::new(DefaultResponseWrapper);
        let mut wrappers: HashMap<String, Arc<dyn ResponseWrapper>> = HashMap::new();
        wrappers.insert(default_wrapper.name().to_string(), default_wrapper.clone());
        Self {
            requests: HashMap::new(),
            responses: HashMap::new(),
            wrappers,
            default_wrapper,
        }
    }

    pub fn register_request_codec(&mut self, codec: Arc<dyn RequestCodec>) {
        self.requests.insert(codec.kind().to_string(), codec);
    }

    pub fn register_response_decoder(&mut self, decoder: Arc<dyn ResponseDecoder>) {
        self.responses.insert(decoder.kind().to_string(), decoder);
    }

    pub fn register_wrapper(&mut self, wrapper: Arc<dyn ResponseWrapper>) {
        self.wrappers.insert(wrapper.name().to_string(), wrapper);
    }

    /// Resolve a request type string to a codec.
    pub fn resolve_request(&self, kind: &str) -> ClientResult<Arc<dyn RequestCodec>> {
        Self::probe(&self.requests, kind, REQUEST_SUFFIX)
            .ok_or_else(|| ClientError::UnsupportedRequestType(kind.to_string()))
    }

    /// Resolve a response type string to a decoder.
    pub fn resolve_response(&self, kind: &str) -> ClientResult<Arc<dyn ResponseDecoder>> {
        Self::probe(&self.responses, kind, RESPONSE_SUFFIX)
            .ok_or_else(|| ClientError::UnsupportedResponseType(kind.to_string()))
    }

    /// Resolve a wrapper name; an unknown or absent name falls back to the
    /// default wrapper.
    pub fn resolve_wrapper(&self, name: Option<&str>) -> Arc<dyn ResponseWrapper> {
        name.and_then(|n| self.wrappers.get(n).cloned())
            .unwrap_or_else(|| self.default_wrapper.clone())
    }

    fn probe<T: ?Sized>(
        map: &HashMap<String, Arc<T>>,
        kind: &str,
        suffix: &str,
    ) -> Option<Arc<T>> {
        map.get(kind)
            .cloned()
            .or_else(|| map.get(&format!("{}{}", kind, suffix)).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_bare_and_suffixed_request_types() {
        let registry = CodecRegistry::default();
        assert_eq!(registry.resolve_request("UrlEncoded").unwrap().kind(), "UrlEncodedActionRequest");
        assert_eq!(
            registry.resolve_request("UrlEncodedActionRequest").unwrap().kind(),
            "UrlEncodedActionRequest"
        );
        assert_eq!(registry.resolve_request("Json").unwrap().kind(), "JsonActionRequest");
    }

    #[test]
    fn unknown_request_type_is_an_error() {
        let registry = CodecRegistry::default();
        let err = registry.resolve_request("Soap").unwrap_err();
        assert!(matches!(err, ClientError::UnsupportedRequestType(ref kind) if kind == "Soap"));
    }

    #[test]
    fn resolves_response_types() {
        let registry = CodecRegistry::default();
        assert_eq!(registry.resolve_response("Json").unwrap().kind(), "JsonActionResponse");
        assert_eq!(registry.resolve_response("Xml").unwrap().kind(), "XmlActionResponse");
        assert!(matches!(
            registry.resolve_response("Csv"),
            Err(ClientError::UnsupportedResponseType(_))
        ));
    }

    #[test]
    fn unknown_wrapper_falls_back_to_default() {
        let registry = CodecRegistry::default();
        assert_eq!(registry.resolve_wrapper(None).name(), DefaultResponseWrapper::NAME);
        assert_eq!(registry.resolve_wrapper(Some("nope")).name(), DefaultResponseWrapper::NAME);
    }
}
