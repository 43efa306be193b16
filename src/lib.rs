pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod router;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use crate::adapters::{http::HttpTransport, logging::TracingExchangeLogger, session::SessionBroadcaster};
pub use crate::config::toml_config::ClientConfig;
pub use crate::core::classify::{SESSION_EXPIRED_CODE, SUCCESS_CODE};
pub use crate::core::request::{ApiClient, Outcome, RequestHandle, SessionPolicy};
pub use crate::domain::model::{BaseResponse, LoginResponse, Payload, ResponseKind, ResponseModel};
pub use crate::domain::request::{RequestDescriptor, TransportError};
pub use crate::router::ApiRouter;
pub use crate::utils::error::{ClientError, Result};
