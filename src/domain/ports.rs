use crate::domain::model::ResponseKind;
use crate::domain::request::{RequestDescriptor, TransportError};
use async_trait::async_trait;
use serde_json::Value;

/// Performs the network exchange for one request.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn perform(&self, request: &RequestDescriptor) -> Result<Value, TransportError>;
}

/// Describes one API call and the response variant it expects on success.
pub trait Router: Send {
    fn descriptor(&self) -> RequestDescriptor;
    fn response_kind(&self) -> ResponseKind;
}

/// Receives the session-expired signal raised by classification.
pub trait SessionObserver: Send + Sync {
    fn session_expired(&self);

    fn is_logging_out(&self) -> bool {
        false
    }
}

/// Diagnostic observer of outgoing requests and raw responses.
pub trait ExchangeLogger: Send + Sync {
    fn log_request(&self, request: &RequestDescriptor);
    fn log_response(&self, request: &RequestDescriptor, result: &Result<Value, TransportError>);
}
