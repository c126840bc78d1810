//! Configuration-driven REST API client framework.
//!
//! A [`HostApi`] is built from a declarative [`remotehost_core::HostConfig`]
//! describing a remote host's actions (URL shape, HTTP method,
//! request/response encoding, parameter defaults). Actions are addressed by
//! two-level names (`group.action`), materialized eagerly or lazily, and
//! executed over `reqwest`:
//!
//! ```no_run
//! use remotehost_client::{ActionInputs, HostApi};
//!
//! # async fn run() -> remotehost_client::ClientResult<()> {
//! let api = HostApi::from_file("EXAMPLE_API", "hosts/example.yaml")?;
//! let envelope = api
//!     .execute(
//!         "customer.address",
//!         ActionInputs::new().with_parameter("customer_id", "42"),
//!     )
//!     .await?;
//! println!("{}", envelope.body);
//! # Ok(())
//! # }
//! ```

pub mod action;
pub mod api;
pub mod codec;
pub mod error;
pub mod registry;
pub mod request;
pub mod response;
pub mod url_builder;
pub mod wrapper;

// Re-export commonly used types
pub use action::{ActionInputs, ActionRequest, UrlBuildMethod};
pub use api::{HostApi, HostApiDefinition, DEFAULT_API_NAME};
pub use codec::{CodecRegistry, REQUEST_SUFFIX, RESPONSE_SUFFIX};
pub use error::{ClientError, ClientResult};
pub use registry::{ActionRegistry, InstantiationMode};
pub use request::{EncodeContext, RequestCodec};
pub use response::ResponseDecoder;
pub use url_builder::UrlBuilder;
pub use wrapper::{DefaultResponseWrapper, Envelope, ResponseContext, ResponseWrapper};
