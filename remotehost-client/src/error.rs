use crate::action::ActionRequest;
use remotehost_config::ConfigError;
use remotehost_core::CoreError;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The host or action configuration itself is unusable.
    #[error("bad api configuration: {0}")]
    BadConfiguration(String),

    /// Lookup of an action (or action group) that has no configuration.
    #[error("{0}")]
    NotConfigured(String),

    /// A materialized action could not be turned into a request.
    #[error("badly configured action '{action}': {message}")]
    BadAction { action: String, message: String },

    #[error("unsupported request type: '{0}'")]
    UnsupportedRequestType(String),

    #[error("unsupported response type: '{0}'")]
    UnsupportedResponseType(String),

    /// The remote host answered with a non-success status.
    #[error("action '{action}' returned status {status} ({reason}): {body}")]
    ActionFailed {
        action: String,
        status: u16,
        reason: String,
        body: String,
        request: Box<ActionRequest>,
    },

    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("response decode error: {0}")]
    Decode(String),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}
