use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("HTTP client setup failed: {0}")]
    HttpClientError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

impl ClientError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            ClientError::HttpClientError(_) => "Could not set up the HTTP client".to_string(),
            ClientError::IoError(e) => format!("Could not read a file: {}", e),
            ClientError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            ClientError::InvalidConfigValueError { field, reason, .. } => {
                format!("'{}' is not valid: {}", field, reason)
            }
            ClientError::MissingConfigError { field } => {
                format!("'{}' must be provided", field)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ClientError::HttpClientError(_) => "Check the TLS setup and the default headers in the config file",
            ClientError::IoError(_) => "Check that the config file exists and is readable",
            ClientError::ConfigValidationError { .. } => "Fix the TOML syntax in the config file",
            ClientError::InvalidConfigValueError { .. } => "Correct the value and run again",
            ClientError::MissingConfigError { .. } => {
                "Pass the value on the command line or set it in the config file"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
