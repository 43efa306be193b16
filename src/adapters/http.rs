use crate::config::toml_config::ClientSettings;
use crate::domain::model::Payload;
use crate::domain::ports::Transport;
use crate::domain::request::{
    HttpMethod, ParameterEncoding, RequestDescriptor, TransportError, ValidationFailureReason,
    CANNOT_CONNECT_CODE, TIMED_OUT_CODE, UNKNOWN_ERROR_CODE,
};
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::validate_url;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// reqwest-backed [`Transport`] rooted at a base URL.
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    timeout: Option<Duration>,
    validate_status: bool,
    acceptable_content_types: Vec<String>,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            base_url: parse_base_url(base_url)?,
            timeout: None,
            validate_status: false,
            acceptable_content_types: Vec::new(),
        })
    }

    pub fn from_config(settings: &ClientSettings) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(headers) = &settings.headers {
            builder = builder.default_headers(default_headers(headers)?);
        }
        if let Some(user_agent) = &settings.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        Ok(Self {
            client: builder.build()?,
            base_url: parse_base_url(&settings.base_url)?,
            timeout: settings.timeout_seconds.map(Duration::from_secs),
            validate_status: settings.validate_status.unwrap_or(false),
            acceptable_content_types: settings
                .acceptable_content_types
                .clone()
                .unwrap_or_default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Rejects non-2xx responses before the body is decoded. Off by default, so
    /// application status codes sent with 4xx/5xx still reach classification.
    pub fn with_status_validation(mut self, enabled: bool) -> Self {
        self.validate_status = enabled;
        self
    }

    /// An empty list turns content-type validation off.
    pub fn with_acceptable_content_types(mut self, content_types: Vec<String>) -> Self {
        self.acceptable_content_types = content_types;
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve_url(&self, path: &str) -> std::result::Result<Url, TransportError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| TransportError::InvalidUrl {
                url: path.to_string(),
                reason: e.to_string(),
            })?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(TransportError::InvalidUrl {
                url: path.to_string(),
                reason: format!("unsupported URL scheme {}", scheme),
            }),
        }
    }

    fn validate(&self, response: &Response) -> std::result::Result<(), TransportError> {
        let status = response.status();
        if self.validate_status && !status.is_success() {
            return Err(TransportError::ResponseValidationFailed(
                ValidationFailureReason::UnacceptableStatusCode {
                    code: status.as_u16(),
                },
            ));
        }

        if self.acceptable_content_types.is_empty()
            || self.acceptable_content_types.iter().any(|t| t == "*/*")
        {
            return Ok(());
        }

        let Some(content_type) = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
        else {
            return Err(TransportError::ResponseValidationFailed(
                ValidationFailureReason::MissingContentType {
                    acceptable: self.acceptable_content_types.clone(),
                },
            ));
        };

        let mime = essence(content_type);
        if self
            .acceptable_content_types
            .iter()
            .any(|acceptable| mime_matches(acceptable, &mime))
        {
            Ok(())
        } else {
            Err(TransportError::ResponseValidationFailed(
                ValidationFailureReason::UnacceptableContentType {
                    acceptable: self.acceptable_content_types.clone(),
                    response: mime,
                },
            ))
        }
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn perform(&self, request: &RequestDescriptor) -> std::result::Result<Value, TransportError> {
        let url = self.resolve_url(&request.path)?;
        let mut builder = self.client.request(method_of(request.method), url);

        for (name, value) in &request.headers {
            let (name, value) = header_pair(name, value)
                .map_err(|reason| TransportError::ParameterEncodingFailed { reason })?;
            builder = builder.header(name, value);
        }

        builder = match request.encoding {
            ParameterEncoding::Query => builder.query(&query_pairs(&request.parameters)?),
            ParameterEncoding::Json if request.parameters.is_empty() => builder,
            ParameterEncoding::Json => {
                let body = serde_json::to_vec(&request.parameters).map_err(|e| {
                    TransportError::ParameterEncodingFailed {
                        reason: e.to_string(),
                    }
                })?;
                builder.header(CONTENT_TYPE, "application/json").body(body)
            }
        };

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await.map_err(map_reqwest_error)?;
        tracing::debug!("{} {} -> {}", request.method, request.path, response.status());

        self.validate(&response)?;

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        if body.is_empty() {
            return Err(TransportError::ResponseSerializationFailed {
                reason: "response body was empty".to_string(),
            });
        }

        serde_json::from_slice(&body).map_err(|e| TransportError::ResponseSerializationFailed {
            reason: e.to_string(),
        })
    }
}

fn parse_base_url(base_url: &str) -> Result<Url> {
    validate_url("client.base_url", base_url)?;

    // A trailing slash makes relative endpoint paths extend the base path
    // instead of replacing its last segment.
    let normalized = if base_url.ends_with('/') {
        base_url.to_string()
    } else {
        format!("{}/", base_url)
    };

    Url::parse(&normalized).map_err(|e| ClientError::InvalidConfigValueError {
        field: "client.base_url".to_string(),
        value: base_url.to_string(),
        reason: e.to_string(),
    })
}

fn default_headers(headers: &HashMap<String, String>) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    for (name, value) in headers {
        let (name, value) =
            header_pair(name, value).map_err(|reason| ClientError::InvalidConfigValueError {
                field: "client.headers".to_string(),
                value: name.clone(),
                reason,
            })?;
        map.insert(name, value);
    }
    Ok(map)
}

fn header_pair(name: &str, value: &str) -> std::result::Result<(HeaderName, HeaderValue), String> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| format!("invalid header name {}: {}", name, e))?;
    let header_value = HeaderValue::from_str(value)
        .map_err(|e| format!("invalid value for header {}: {}", name, e))?;
    Ok((header_name, header_value))
}

fn method_of(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Patch => Method::PATCH,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn query_pairs(parameters: &Payload) -> std::result::Result<Vec<(String, String)>, TransportError> {
    parameters
        .iter()
        .map(|(key, value)| {
            let rendered = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                Value::Array(_) | Value::Object(_) => {
                    return Err(TransportError::ParameterEncodingFailed {
                        reason: format!(
                            "parameter {} is nested and cannot be encoded in a query string",
                            key
                        ),
                    })
                }
            };
            Ok((key.clone(), rendered))
        })
        .collect()
}

fn map_reqwest_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Connectivity {
            code: TIMED_OUT_CODE,
            description: error.to_string(),
        }
    } else if error.is_connect() {
        TransportError::Connectivity {
            code: CANNOT_CONNECT_CODE,
            description: error.to_string(),
        }
    } else if error.is_builder() {
        TransportError::InvalidUrl {
            url: error.url().map(Url::to_string).unwrap_or_default(),
            reason: error.to_string(),
        }
    } else if error.is_request() || error.is_body() || error.is_redirect() {
        TransportError::Connectivity {
            code: UNKNOWN_ERROR_CODE,
            description: error.to_string(),
        }
    } else {
        TransportError::Other {
            description: error.to_string(),
        }
    }
}

/// `type/subtype` without parameters, lowercased.
fn essence(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn mime_matches(acceptable: &str, mime: &str) -> bool {
    let acceptable = acceptable.to_ascii_lowercase();
    match acceptable.strip_suffix("/*") {
        Some(kind) => mime.split('/').next() == Some(kind),
        None => acceptable == mime,
    }
}
