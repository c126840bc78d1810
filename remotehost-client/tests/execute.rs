//! End-to-end execution against a mock server.

use httpmock::prelude::*;
use indexmap::{indexmap, IndexMap};
use remotehost_client::{
    ActionInputs, ClientError, CodecRegistry, Envelope, HostApi, InstantiationMode,
    ResponseContext, ResponseWrapper,
};
use remotehost_core::types::{
    ActionConfig, ClientConfig, HostConfig, HostParameters, RequestConfig, ResponseConfig,
};
use serde_json::{json, Value as JsonValue};
use std::io::Write;

fn action(
    name: &str,
    request_kind: &str,
    method: Option<&str>,
    parameters: IndexMap<String, String>,
    response_kind: &str,
) -> ActionConfig {
    let mut request = RequestConfig::new(request_kind);
    request.method = method.map(str::to_string);
    request.parameters = parameters;
    ActionConfig {
        name: name.to_string(),
        request,
        response: ResponseConfig::new(response_kind),
    }
}

fn host_config(base_url: &str) -> HostConfig {
    let mut invoice = action("invoice", "UrlEncoded", Some("GET"), IndexMap::new(), "Json");
    invoice.request.adds_on = vec!["invoices/{invoice_id}".to_string()];

    let mut ping = action("ping", "PlainText", Some("GET"), IndexMap::new(), "PlainText");
    ping.request.headers = indexmap! { "x-api-key".to_string() => "secret".to_string() };

    HostConfig {
        parameters: HostParameters::new(base_url),
        client: None,
        actions: indexmap! {
            "customer".to_string() => indexmap! {
                "address".to_string() => action(
                    "customer/address",
                    "UrlEncoded",
                    Some("GET"),
                    indexmap! {
                        "customer_id".to_string() => "".to_string(),
                        "format".to_string() => "json".to_string(),
                    },
                    "Json",
                ),
                "update".to_string() => action(
                    "customer/update",
                    "Json",
                    None,
                    indexmap! { "customer_id".to_string() => "".to_string() },
                    "Json",
                ),
            },
            "billing".to_string() => indexmap! { "invoice".to_string() => invoice },
            "status".to_string() => indexmap! { "ping".to_string() => ping },
            "feed".to_string() => indexmap! {
                "status".to_string() => action(
                    "feed/status",
                    "UrlEncoded",
                    Some("GET"),
                    IndexMap::new(),
                    "Xml",
                ),
            },
            "broken".to_string() => indexmap! {
                "csv".to_string() => action(
                    "broken/csv",
                    "UrlEncoded",
                    Some("GET"),
                    IndexMap::new(),
                    "Csv",
                ),
            },
        },
        actions_parameters: IndexMap::new(),
    }
}

#[tokio::test]
async fn get_with_url_encoded_parameters() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET)
            .path("/customer/address")
            .query_param("customer_id", "42")
            .query_param("format", "json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"street": "Main St 1"}));
    }).await;

    let api = HostApi::new("MOCK_API", host_config(&server.base_url())).unwrap();
    let envelope = api
        .execute(
            "customer.address",
            ActionInputs::new().with_parameter("customer_id", "42"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert!(envelope.success);
    assert_eq!(envelope.body, json!({"street": "Main St 1"}));
}

#[tokio::test]
async fn post_with_json_parameters() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(POST)
            .path("/customer/update")
            .header("content-type", "application/json")
            .json_body(json!({"customer_id": "42"}));
        then.status(200).json_body(json!({"updated": true}));
    }).await;

    let api = HostApi::new("MOCK_API", host_config(&server.base_url())).unwrap();
    let envelope = api
        .execute(
            "customer.update",
            ActionInputs::new().with_parameter("customer_id", "42"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(envelope.body, json!({"updated": true}));
}

#[tokio::test]
async fn adds_on_url_replaces_tokens() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET).path("/invoices/2024-001");
        then.status(200).json_body(json!({"total": 10}));
    }).await;

    let api = HostApi::new("MOCK_API", host_config(&server.base_url())).unwrap();
    let envelope = api
        .execute(
            "billing.invoice",
            ActionInputs::new().with_url_token("invoice_id", "2024-001"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(envelope.body, json!({"total": 10}));
}

#[tokio::test]
async fn adds_on_without_token_fails_before_transport() {
    let server = MockServer::start_async().await;
    let api = HostApi::new("MOCK_API", host_config(&server.base_url())).unwrap();

    let err = api.execute("billing.invoice", ActionInputs::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::BadConfiguration(_)));
}

#[tokio::test]
async fn configured_headers_are_sent_and_input_headers_override() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET).path("/ping").header("x-api-key", "override");
        then.status(200).body("pong");
    }).await;

    let api = HostApi::new("MOCK_API", host_config(&server.base_url())).unwrap();
    let envelope = api
        .execute(
            "status.ping",
            ActionInputs::new().with_header("x-api-key", "override"),
        )
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(envelope.body, json!("pong"));
}

#[tokio::test]
async fn basic_auth_is_applied_when_configured() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET)
            .path("/ping")
            // base64("user:pass")
            .header("authorization", "Basic dXNlcjpwYXNz");
        then.status(200).body("pong");
    }).await;

    let mut config = host_config(&server.base_url());
    config.parameters.user = Some("user".to_string());
    config.parameters.password = Some("pass".to_string());

    let api = HostApi::new("MOCK_API", config).unwrap();
    api.execute("status.ping", ActionInputs::new()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn client_default_headers_are_sent() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET).path("/ping").header("x-client", "remotehost");
        then.status(200).body("pong");
    }).await;

    let mut config = host_config(&server.base_url());
    config.client = Some(ClientConfig {
        timeout: None,
        max_redirects: None,
        user_agent: None,
        default_headers: indexmap! { "x-client".to_string() => "remotehost".to_string() },
    });

    let api = HostApi::new("MOCK_API", config).unwrap();
    api.execute("status.ping", ActionInputs::new()).await.unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn xml_responses_are_decoded() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(GET).path("/feed/status");
        then.status(200)
            .header("content-type", "text/xml")
            .body("<response><status>ok</status><code>200</code></response>");
    }).await;

    let api = HostApi::new("MOCK_API", host_config(&server.base_url())).unwrap();
    let envelope = api.execute("feed.status", ActionInputs::new()).await.unwrap();

    assert_eq!(envelope.body, json!({"status": "ok", "code": "200"}));
}

#[tokio::test]
async fn non_success_status_is_an_action_failure() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(GET).path("/ping");
        then.status(503).body("maintenance window");
    }).await;

    let api = HostApi::new("MOCK_API", host_config(&server.base_url())).unwrap();
    let err = api.execute("status.ping", ActionInputs::new()).await.unwrap_err();

    match err {
        ClientError::ActionFailed { action, status, body, request, .. } => {
            assert_eq!(action, "status.ping");
            assert_eq!(status, 503);
            assert_eq!(body, "maintenance window");
            assert_eq!(request.name, "ping");
        }
        other => panic!("expected ActionFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn unsupported_response_type_surfaces_at_execution() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(GET).path("/broken/csv");
        then.status(200).body("a;b;c");
    }).await;

    let api = HostApi::new("MOCK_API", host_config(&server.base_url())).unwrap();

    // Lookup succeeds: only the request side resolves at materialization
    api.action("broken.csv").unwrap();

    let err = api.execute("broken.csv", ActionInputs::new()).await.unwrap_err();
    assert!(matches!(err, ClientError::UnsupportedResponseType(ref kind) if kind == "Csv"));
}

#[tokio::test]
async fn eager_mode_executes_like_lazy() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET).path("/ping");
        then.status(200).body("pong");
    }).await;

    let api = HostApi::with_mode(
        "MOCK_API",
        host_config(&server.base_url()),
        InstantiationMode::Eager,
    )
    .unwrap();
    let envelope = api.execute("status.ping", ActionInputs::new()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(envelope.body, json!("pong"));
}

#[derive(Debug)]
struct StatusWrapper;

impl ResponseWrapper for StatusWrapper {
    fn name(&self) -> &'static str {
        "StatusWrapper"
    }

    fn wrap(&self, raw_data: JsonValue, _ctx: &ResponseContext) -> Envelope {
        Envelope {
            success: raw_data.get("status").and_then(JsonValue::as_str) == Some("ok"),
            return_code: raw_data
                .get("code")
                .and_then(JsonValue::as_str)
                .map(str::to_string),
            return_message: raw_data
                .get("message")
                .and_then(JsonValue::as_str)
                .map(str::to_string),
            body: raw_data.get("data").cloned().unwrap_or(JsonValue::Null),
            raw_data,
        }
    }
}

#[tokio::test]
async fn custom_wrapper_extracts_the_host_envelope() {
    let server = MockServer::start_async().await;
    server.mock_async(|when, then| {
        when.method(GET).path("/customer/address");
        then.status(200).json_body(json!({
            "status": "ok",
            "code": "1000",
            "message": "found",
            "data": {"street": "Main St 1"}
        }));
    }).await;

    let mut config = host_config(&server.base_url());
    config.actions["customer"]["address"].response.wrapper = Some("StatusWrapper".to_string());

    let mut codecs = CodecRegistry::default();
    codecs.register_wrapper(std::sync::Arc::new(StatusWrapper));

    let api =
        HostApi::with_codecs("MOCK_API", config, InstantiationMode::Lazy, codecs).unwrap();
    let envelope = api.execute("customer.address", ActionInputs::new()).await.unwrap();

    assert!(envelope.success);
    assert_eq!(envelope.return_code.as_deref(), Some("1000"));
    assert_eq!(envelope.return_message.as_deref(), Some("found"));
    assert_eq!(envelope.body, json!({"street": "Main St 1"}));
}

#[tokio::test]
async fn builds_and_executes_from_a_config_file() {
    let server = MockServer::start_async().await;
    let mock = server.mock_async(|when, then| {
        when.method(GET).path("/status/ping").query_param("verbose", "1");
        then.status(200).body("pong");
    }).await;

    let yaml = format!(
        r#"
parameters:
  base_url: {}
actions:
  status:
    ping:
      name: status/ping
      request:
        type: UrlEncoded
        method: GET
        parameters:
          verbose: "1"
      response:
        type: PlainText
"#,
        server.base_url()
    );

    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(yaml.as_bytes()).unwrap();

    let api = HostApi::from_file("FILE_API", file.path()).unwrap();
    let envelope = api.execute("status.ping", ActionInputs::new()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(envelope.body, json!("pong"));
}
