pub mod error;
pub mod name;
pub mod types;

// Re-export commonly used types
pub use error::{CoreError, CoreResult};
pub use name::ActionName;
pub use types::{
    ActionConfig, ClientConfig, HostConfig, HostParameters, RequestConfig, ResponseConfig,
    TimeoutConfig,
};
