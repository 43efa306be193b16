use crate::domain::model::{Payload, MESSAGE_KEY, STATUS_CODE_KEY};
use crate::domain::request::{TransportError, ValidationFailureReason};
use serde_json::Value;

/// Turns a transport failure into the same `{statusCode, message}` shape a
/// server failure arrives in.
pub fn normalize(error: &TransportError) -> Payload {
    let mut payload = Payload::new();
    payload.insert(
        STATUS_CODE_KEY.to_string(),
        Value::String(error.code().to_string()),
    );
    payload.insert(MESSAGE_KEY.to_string(), Value::String(error_message(error)));
    payload
}

pub fn error_message(error: &TransportError) -> String {
    match error {
        TransportError::InvalidUrl { url, .. } => format!("Invalid URL: {} - {}", url, error),
        TransportError::ParameterEncodingFailed { reason } => {
            format!("Parameter encoding failed: {}. Failure Reason: {}", error, reason)
        }
        TransportError::MultipartEncodingFailed { reason } => {
            format!("Multipart encoding failed: {}. Failure Reason: {}", error, reason)
        }
        TransportError::ResponseValidationFailed(reason) => {
            let prefix = format!(
                "Response validation failed: {}. Failure Reason: {}",
                error, reason
            );
            format!("{}. {}", prefix, validation_detail(reason))
        }
        TransportError::ResponseSerializationFailed { reason } => {
            format!("Response serialization failed: {}. Failure Reason: {}", error, reason)
        }
        TransportError::Connectivity { .. } => format!("Connection error occurred: {}", error),
        TransportError::Other { .. } => format!("Unknown error: {}", error),
    }
}

fn validation_detail(reason: &ValidationFailureReason) -> String {
    match reason {
        ValidationFailureReason::DataFileNil | ValidationFailureReason::DataFileReadFailed { .. } => {
            "Downloaded file could not be read".to_string()
        }
        ValidationFailureReason::MissingContentType { acceptable } => {
            format!("Content Type Missing: {}", content_type_list(acceptable))
        }
        ValidationFailureReason::UnacceptableContentType {
            acceptable,
            response,
        } => format!(
            "Response content type: {} was unacceptable: {}",
            response,
            content_type_list(acceptable)
        ),
        ValidationFailureReason::UnacceptableStatusCode { code } => {
            format!("Response status code was unacceptable: {}", code)
        }
    }
}

fn content_type_list(types: &[String]) -> String {
    format!("[{}]", types.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::ResponseKind;
    use crate::domain::request::TIMED_OUT_CODE;

    fn message_of(error: &TransportError) -> String {
        normalize(error)
            .get(MESSAGE_KEY)
            .and_then(Value::as_str)
            .unwrap()
            .to_string()
    }

    fn assert_builds_failure_model(error: &TransportError) {
        let model = ResponseKind::Base.build(&normalize(error));
        let expected_code = error.code().to_string();
        assert_eq!(model.status_code(), Some(expected_code.as_str()));
        assert!(model.message().is_some());
    }

    #[test]
    fn test_invalid_url() {
        let error = TransportError::InvalidUrl {
            url: "bad://x".to_string(),
            reason: "relative URL without a base".to_string(),
        };

        let payload = normalize(&error);

        assert_eq!(payload.get(STATUS_CODE_KEY), Some(&Value::from("0")));
        let message = message_of(&error);
        assert!(message.starts_with("Invalid URL: bad://x - "));
        assert!(message.contains("relative URL without a base"));
        assert_builds_failure_model(&error);
    }

    #[test]
    fn test_parameter_encoding() {
        let error = TransportError::ParameterEncodingFailed {
            reason: "key must be a string".to_string(),
        };

        let message = message_of(&error);

        assert!(message.starts_with("Parameter encoding failed"));
        assert!(message.contains("Failure Reason: key must be a string"));
        assert_builds_failure_model(&error);
    }

    #[test]
    fn test_multipart_encoding() {
        let error = TransportError::MultipartEncodingFailed {
            reason: "body part has no name".to_string(),
        };

        let message = message_of(&error);

        assert!(message.starts_with("Multipart encoding failed"));
        assert!(message.contains("body part has no name"));
        assert_builds_failure_model(&error);
    }

    #[test]
    fn test_validation_unreadable_file() {
        for reason in [
            ValidationFailureReason::DataFileNil,
            ValidationFailureReason::DataFileReadFailed {
                path: "/tmp/download.bin".to_string(),
            },
        ] {
            let error = TransportError::ResponseValidationFailed(reason);
            let message = message_of(&error);
            assert!(message.starts_with("Response validation failed"));
            assert!(message.contains("Downloaded file could not be read"));
            assert_builds_failure_model(&error);
        }
    }

    #[test]
    fn test_validation_missing_content_type() {
        let error = TransportError::ResponseValidationFailed(
            ValidationFailureReason::MissingContentType {
                acceptable: vec!["application/json".to_string()],
            },
        );

        let message = message_of(&error);

        assert!(message.contains("Content Type Missing: [application/json]"));
        assert_builds_failure_model(&error);
    }

    #[test]
    fn test_validation_unacceptable_content_type() {
        let error = TransportError::ResponseValidationFailed(
            ValidationFailureReason::UnacceptableContentType {
                acceptable: vec!["application/json".to_string(), "text/json".to_string()],
                response: "text/html".to_string(),
            },
        );

        let message = message_of(&error);

        assert!(message.contains(
            "Response content type: text/html was unacceptable: [application/json, text/json]"
        ));
        assert_builds_failure_model(&error);
    }

    #[test]
    fn test_validation_unacceptable_status_code() {
        let error = TransportError::ResponseValidationFailed(
            ValidationFailureReason::UnacceptableStatusCode { code: 503 },
        );

        let message = message_of(&error);

        assert!(message.contains("Response status code was unacceptable: 503"));
        assert_eq!(normalize(&error).get(STATUS_CODE_KEY), Some(&Value::from("3")));
        assert_builds_failure_model(&error);
    }

    #[test]
    fn test_serialization() {
        let error = TransportError::ResponseSerializationFailed {
            reason: "expected value at line 1 column 1".to_string(),
        };

        let message = message_of(&error);

        assert!(message.starts_with("Response serialization failed"));
        assert!(message.contains("expected value at line 1 column 1"));
        assert_builds_failure_model(&error);
    }

    #[test]
    fn test_connectivity() {
        let error = TransportError::Connectivity {
            code: TIMED_OUT_CODE,
            description: "operation timed out".to_string(),
        };

        let payload = normalize(&error);

        assert_eq!(payload.get(STATUS_CODE_KEY), Some(&Value::from("-1001")));
        assert_eq!(message_of(&error), "Connection error occurred: operation timed out");
        assert_builds_failure_model(&error);
    }

    #[test]
    fn test_unknown() {
        let error = TransportError::Other {
            description: "something odd".to_string(),
        };

        assert_eq!(message_of(&error), "Unknown error: something odd");
        assert_eq!(normalize(&error).get(STATUS_CODE_KEY), Some(&Value::from("-1")));
        assert_builds_failure_model(&error);
    }
}
