//! Request codecs: how an action's parameters and content become an HTTP
//! request body or query string.
//!
//! A codec is resolved from the action's request type string through the
//! [`crate::CodecRegistry`]; the built-in codecs cover the conventional
//! encodings (url-encoded parameters, JSON parameters, XML/plain content,
//! pre-encoded pair strings).

use crate::error::ClientResult;
use indexmap::IndexMap;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, RequestBuilder};

/// Per-call data handed to a request codec.
pub struct EncodeContext<'a> {
    pub method: &'a Method,
    /// Action parameters, defaults and caller values already merged.
    pub parameters: &'a IndexMap<String, String>,
    /// Raw request content.
    pub content: &'a str,
}

/// Encodes parameters and content onto an outgoing request.
pub trait RequestCodec: Send + Sync + std::fmt::Debug {
    /// Canonical identifier this codec registers under.
    fn kind(&self) -> &'static str;

    fn encode(&self, builder: RequestBuilder, ctx: &EncodeContext<'_>)
        -> ClientResult<RequestBuilder>;
}

fn as_pairs(parameters: &IndexMap<String, String>) -> Vec<(&str, &str)> {
    parameters.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

/// Parse a pre-encoded pair string (`a=1&b=2`) into key/value pairs.
fn parse_pair_string(content: &str) -> Vec<(String, String)> {
    url::form_urlencoded::parse(content.as_bytes()).into_owned().collect()
}

/// Parameters as query string (GET) or form-encoded body (anything else).
#[derive(Debug)]
pub struct UrlEncodedCodec;

impl RequestCodec for UrlEncodedCodec {
    fn kind(&self) -> &'static str {
        "UrlEncodedActionRequest"
    }

    fn encode(
        &self,
        builder: RequestBuilder,
        ctx: &EncodeContext<'_>,
    ) -> ClientResult<RequestBuilder> {
        let pairs = as_pairs(ctx.parameters);
        if ctx.method == &Method::GET {
            Ok(builder.query(&pairs))
        } else {
            Ok(builder.form(&pairs))
        }
    }
}

/// Parameters serialized as a JSON object body.
#[derive(Debug)]
pub struct JsonCodec;

impl RequestCodec for JsonCodec {
    fn kind(&self) -> &'static str {
        "JsonActionRequest"
    }

    fn encode(
        &self,
        builder: RequestBuilder,
        ctx: &EncodeContext<'_>,
    ) -> ClientResult<RequestBuilder> {
        Ok(builder.json(ctx.parameters))
    }
}

/// Parameters as query string, raw content as `text/xml` body.
#[derive(Debug)]
pub struct XmlCodec;

impl RequestCodec for XmlCodec {
    fn kind(&self) -> &'static str {
        "XmlActionRequest"
    }

    fn encode(
        &self,
        builder: RequestBuilder,
        ctx: &EncodeContext<'_>,
    ) -> ClientResult<RequestBuilder> {
        let pairs = as_pairs(ctx.parameters);
        Ok(builder
            .query(&pairs)
            .header(CONTENT_TYPE, "text/xml")
            .body(ctx.content.to_string()))
    }
}

/// Raw content as the request body; parameters are not used.
#[derive(Debug)]
pub struct PlainTextCodec;

impl RequestCodec for PlainTextCodec {
    fn kind(&self) -> &'static str {
        "PlainTextActionRequest"
    }

    fn encode(
        &self,
        builder: RequestBuilder,
        ctx: &EncodeContext<'_>,
    ) -> ClientResult<RequestBuilder> {
        Ok(builder.body(ctx.content.to_string()))
    }
}

/// Content is a pre-encoded pair string: query for GET, form body otherwise.
#[derive(Debug)]
pub struct PostTextCodec;

impl RequestCodec for PostTextCodec {
    fn kind(&self) -> &'static str {
        "PostTextActionRequest"
    }

    fn encode(
        &self,
        builder: RequestBuilder,
        ctx: &EncodeContext<'_>,
    ) -> ClientResult<RequestBuilder> {
        if ctx.method == &Method::GET {
            Ok(builder.query(&parse_pair_string(ctx.content)))
        } else {
            Ok(builder
                .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(ctx.content.to_string()))
        }
    }
}

/// Content parsed into pairs and re-encoded: query for GET, form body for
/// POST/PUT/PATCH/DELETE.
#[derive(Debug)]
pub struct UrlEncodedFromContentCodec;

impl RequestCodec for UrlEncodedFromContentCodec {
    fn kind(&self) -> &'static str {
        "UrlEncodedFromContentActionRequest"
    }

    fn encode(
        &self,
        builder: RequestBuilder,
        ctx: &EncodeContext<'_>,
    ) -> ClientResult<RequestBuilder> {
        let pairs = parse_pair_string(ctx.content);
        if ctx.method == &Method::GET {
            Ok(builder.query(&pairs))
        } else {
            Ok(builder.form(&pairs))
        }
    }
}
