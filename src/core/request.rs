use crate::adapters::logging::TracingExchangeLogger;
use crate::core::classify::{classify, Classification};
use crate::core::normalize::normalize;
use crate::domain::model::{Payload, PayloadExt, ResponseKind, ResponseModel, STATUS_CODE_KEY};
use crate::domain::ports::{ExchangeLogger, Router, SessionObserver, Transport};
use crate::domain::request::RequestDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use tokio::task::JoinHandle;

/// What happens to a session-expired failure once the session observer has
/// been signalled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPolicy {
    /// Deliver the failure to the caller.
    #[default]
    Report,
    /// Swallow the failure unless the observer reports a logout in progress.
    /// Only applies when a session observer is attached.
    SuppressUnlessLoggingOut,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(ResponseModel),
    Failure(ResponseModel),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Splits into the `(success, failure)` pair handed to callbacks.
    pub fn into_parts(self) -> (Option<ResponseModel>, Option<ResponseModel>) {
        match self {
            Outcome::Success(model) => (Some(model), None),
            Outcome::Failure(model) => (None, Some(model)),
        }
    }
}

/// Issues router-described calls and reduces every result to an [`Outcome`].
pub struct ApiClient<T: Transport> {
    transport: Arc<T>,
    session: Option<Arc<dyn SessionObserver>>,
    logger: Arc<dyn ExchangeLogger>,
    session_policy: SessionPolicy,
}

impl<T: Transport> Clone for ApiClient<T> {
    fn clone(&self) -> Self {
        Self {
            transport: Arc::clone(&self.transport),
            session: self.session.clone(),
            logger: Arc::clone(&self.logger),
            session_policy: self.session_policy,
        }
    }
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
            session: None,
            logger: Arc::new(TracingExchangeLogger),
            session_policy: SessionPolicy::default(),
        }
    }

    pub fn with_session_observer(mut self, session: Arc<dyn SessionObserver>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_logger(mut self, logger: Arc<dyn ExchangeLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_session_policy(mut self, policy: SessionPolicy) -> Self {
        self.session_policy = policy;
        self
    }

    pub fn session_policy(&self) -> SessionPolicy {
        self.session_policy
    }

    /// Performs the call and classifies it. `None` means no callback must
    /// fire: the payload was malformed, or the session policy swallowed it.
    pub async fn dispatch<R: Router>(&self, router: R) -> Option<Outcome> {
        let request = router.descriptor();
        let kind = router.response_kind();

        self.logger.log_request(&request);
        let result = self.transport.perform(&request).await;
        self.logger.log_response(&request, &result);

        match result {
            Ok(Value::Object(payload)) => self.classify_payload(&request, kind, payload),
            Ok(other) => {
                tracing::warn!(
                    "Dropping response for {} {}: body is not a JSON object ({})",
                    request.method,
                    request.path,
                    json_type_name(&other)
                );
                None
            }
            Err(error) => {
                tracing::debug!(
                    "Transport failed for {} {}: {}",
                    request.method,
                    request.path,
                    error
                );
                Some(Outcome::Failure(ResponseKind::Base.build(&normalize(&error))))
            }
        }
    }

    /// Runs the call and hands the outcome to `callback` as
    /// `(Some(success), None)` or `(None, Some(failure))`. The callback is not
    /// invoked when [`dispatch`](Self::dispatch) returns `None`.
    pub async fn execute<R, F>(&self, router: R, callback: F)
    where
        R: Router,
        F: FnOnce(Option<ResponseModel>, Option<ResponseModel>),
    {
        if let Some(outcome) = self.dispatch(router).await {
            let (success, failure) = outcome.into_parts();
            callback(success, failure);
        }
    }

    fn classify_payload(
        &self,
        request: &RequestDescriptor,
        kind: ResponseKind,
        payload: Payload,
    ) -> Option<Outcome> {
        let Some(status_code) = payload.string_field(STATUS_CODE_KEY) else {
            tracing::warn!(
                "Dropping response for {} {}: no string statusCode in payload",
                request.method,
                request.path
            );
            return None;
        };

        match classify(&status_code) {
            Classification::Success => Some(Outcome::Success(kind.build(&payload))),
            Classification::Failure => {
                tracing::debug!(
                    "{} {} failed with status code {}",
                    request.method,
                    request.path,
                    status_code
                );
                Some(Outcome::Failure(ResponseKind::Base.build(&payload)))
            }
            Classification::SessionExpired => {
                tracing::info!(
                    "Session expired while calling {} {}",
                    request.method,
                    request.path
                );
                if self.signal_session_expired() {
                    tracing::debug!("Session-expired failure suppressed by policy");
                    return None;
                }
                Some(Outcome::Failure(ResponseKind::Base.build(&payload)))
            }
        }
    }

    /// Notifies the observer and reports whether the failure should be suppressed.
    fn signal_session_expired(&self) -> bool {
        let Some(session) = &self.session else {
            return false;
        };
        session.session_expired();

        match self.session_policy {
            SessionPolicy::Report => false,
            SessionPolicy::SuppressUnlessLoggingOut => !session.is_logging_out(),
        }
    }
}

impl<T: Transport + 'static> ApiClient<T> {
    /// Runs [`execute`](Self::execute) on a background task.
    pub fn spawn<R, F>(&self, router: R, callback: F) -> RequestHandle
    where
        R: Router + 'static,
        F: FnOnce(Option<ResponseModel>, Option<ResponseModel>) + Send + 'static,
    {
        let client = self.clone();
        let task = tokio::spawn(async move {
            client.execute(router, callback).await;
        });
        RequestHandle { task }
    }
}

/// Handle to a spawned call. Cancelling before the transport completes
/// guarantees the callback never runs.
#[derive(Debug)]
pub struct RequestHandle {
    task: JoinHandle<()>,
}

impl RequestHandle {
    pub fn cancel(&self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the call. Returns `false` if it was cancelled.
    pub async fn join(self) -> bool {
        match self.task.await {
            Ok(()) => true,
            Err(e) if e.is_cancelled() => false,
            Err(e) => std::panic::resume_unwind(e.into_panic()),
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
