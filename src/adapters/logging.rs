use crate::domain::model::Payload;
use crate::domain::ports::ExchangeLogger;
use crate::domain::request::{RequestDescriptor, TransportError};
use serde_json::Value;

const MASKED: &str = "******";
const SENSITIVE_KEYS: [&str; 4] = ["password", "token", "secret", "authorization"];

/// Emits request/response diagnostics as `tracing` debug events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingExchangeLogger;

impl ExchangeLogger for TracingExchangeLogger {
    fn log_request(&self, request: &RequestDescriptor) {
        let params = Value::Object(masked(&request.parameters));
        let headers = request
            .headers
            .iter()
            .map(|(name, value)| (name.as_str(), mask_value(name, value)))
            .collect::<Vec<_>>();
        tracing::debug!(
            "--> {} {} params={} headers={:?}",
            request.method,
            request.path,
            params,
            headers
        );
    }

    fn log_response(&self, request: &RequestDescriptor, result: &Result<Value, TransportError>) {
        match result {
            Ok(Value::Object(body)) => {
                let body = Value::Object(masked(body));
                tracing::debug!("<-- {} {} body={}", request.method, request.path, body)
            }
            Ok(body) => tracing::debug!("<-- {} {} body={}", request.method, request.path, body),
            Err(error) => tracing::debug!(
                "<-- {} {} error(code {})={}",
                request.method,
                request.path,
                error.code(),
                error
            ),
        }
    }
}

fn is_sensitive(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    SENSITIVE_KEYS.iter().any(|sensitive| key.contains(sensitive))
}

fn mask_value<'a>(key: &str, value: &'a str) -> &'a str {
    if is_sensitive(key) {
        MASKED
    } else {
        value
    }
}

/// Copy of `payload` with top-level sensitive values replaced.
fn masked(payload: &Payload) -> Payload {
    payload
        .iter()
        .map(|(key, value)| {
            let value = if is_sensitive(key) {
                Value::String(MASKED.to_string())
            } else {
                value.clone()
            };
            (key.clone(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::request::HttpMethod;
    use serde_json::json;

    #[test]
    fn test_masks_sensitive_parameters() {
        let request = RequestDescriptor::new(HttpMethod::Post, "login")
            .with_parameter("email", "a@b.c")
            .with_parameter("password", "hunter2")
            .with_parameter("refreshToken", "r");

        let masked = masked(&request.parameters);

        assert_eq!(masked.get("email"), Some(&json!("a@b.c")));
        assert_eq!(masked.get("password"), Some(&json!(MASKED)));
        assert_eq!(masked.get("refreshToken"), Some(&json!(MASKED)));
    }

    #[test]
    fn test_masks_authorization_header() {
        assert_eq!(mask_value("Authorization", "Bearer abc"), MASKED);
        assert_eq!(mask_value("X-Trace", "abc"), "abc");
    }

    #[derive(Clone, Default)]
    struct Capture(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_debug_events_mask_request_and_response() {
        let capture = Capture::default();
        let writer = capture.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let request = RequestDescriptor::new(HttpMethod::Post, "login")
            .with_parameter("email", "a@b.c")
            .with_parameter("password", "hunter2")
            .with_header("Authorization", "Bearer abc");

        tracing::subscriber::with_default(subscriber, || {
            let logger = TracingExchangeLogger;
            logger.log_request(&request);
            logger.log_response(
                &request,
                &Ok(json!({ "statusCode": "HH200", "accessToken": "secret-value" })),
            );
            logger.log_response(&request, &Ok(json!(["not", "an", "object"])));
        });

        let output = String::from_utf8(capture.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("--> POST login"));
        assert!(output.contains("a@b.c"));
        assert!(output.contains("<-- POST login"));
        assert!(output.contains("HH200"));
        assert!(!output.contains("hunter2"));
        assert!(!output.contains("Bearer abc"));
        assert!(!output.contains("secret-value"));
    }

    #[test]
    fn test_logging_without_subscriber_is_silent() {
        let logger = TracingExchangeLogger;
        let request = RequestDescriptor::new(HttpMethod::Get, "status");

        logger.log_request(&request);
        logger.log_response(&request, &Ok(json!({ "statusCode": "HH200" })));
        logger.log_response(
            &request,
            &Err(TransportError::Other {
                description: "boom".to_string(),
            }),
        );
    }
}
