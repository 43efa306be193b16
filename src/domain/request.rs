use crate::domain::model::Payload;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where request parameters go on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterEncoding {
    Query,
    Json,
}

/// Everything a transport needs to issue one call. Paths are relative to the
/// transport's base URL unless they are absolute URLs themselves.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub method: HttpMethod,
    pub path: String,
    pub parameters: Payload,
    pub encoding: ParameterEncoding,
    pub headers: Vec<(String, String)>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        let encoding = match method {
            HttpMethod::Get | HttpMethod::Delete => ParameterEncoding::Query,
            HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch => ParameterEncoding::Json,
        };
        Self {
            method,
            path: path.into(),
            parameters: Payload::new(),
            encoding,
            headers: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    pub fn with_encoding(mut self, encoding: ParameterEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

/// Failure codes reported for connectivity problems.
pub const TIMED_OUT_CODE: i64 = -1001;
pub const CANNOT_CONNECT_CODE: i64 = -1004;
pub const UNKNOWN_ERROR_CODE: i64 = -1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationFailureReason {
    #[error("no downloaded file was produced")]
    DataFileNil,

    #[error("downloaded file at {path} could not be read")]
    DataFileReadFailed { path: String },

    #[error("response has no Content-Type header")]
    MissingContentType { acceptable: Vec<String> },

    #[error("response Content-Type {response} is not acceptable")]
    UnacceptableContentType {
        acceptable: Vec<String>,
        response: String,
    },

    #[error("response status code {code} is not acceptable")]
    UnacceptableStatusCode { code: u16 },
}

/// Categorized transport failure. `Display` gives the native description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("URL is not valid: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Request parameters could not be encoded")]
    ParameterEncodingFailed { reason: String },

    #[error("Multipart form data could not be encoded")]
    MultipartEncodingFailed { reason: String },

    #[error("Response could not be validated")]
    ResponseValidationFailed(ValidationFailureReason),

    #[error("Response could not be serialized")]
    ResponseSerializationFailed { reason: String },

    #[error("{description}")]
    Connectivity { code: i64, description: String },

    #[error("{description}")]
    Other { description: String },
}

impl TransportError {
    pub fn code(&self) -> i64 {
        match self {
            TransportError::InvalidUrl { .. } => 0,
            TransportError::ParameterEncodingFailed { .. } => 1,
            TransportError::MultipartEncodingFailed { .. } => 2,
            TransportError::ResponseValidationFailed(_) => 3,
            TransportError::ResponseSerializationFailed { .. } => 4,
            TransportError::Connectivity { code, .. } => *code,
            TransportError::Other { .. } => UNKNOWN_ERROR_CODE,
        }
    }
}
