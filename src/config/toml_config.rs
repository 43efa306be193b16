use crate::core::request::SessionPolicy;
use crate::utils::error::{ClientError, Result};
use crate::utils::validation::{
    validate_content_types, validate_non_empty_string, validate_positive_number, validate_url,
    Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub client: ClientSettings,
    pub session: Option<SessionSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    pub base_url: String,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
    pub headers: Option<HashMap<String, String>>,
    pub validate_status: Option<bool>,
    pub acceptable_content_types: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    pub policy: Option<SessionPolicy>,
    pub channel_capacity: Option<usize>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: ClientSettings {
                base_url: base_url.into(),
                timeout_seconds: None,
                user_agent: None,
                headers: None,
                validate_status: None,
                acceptable_content_types: None,
            },
            session: None,
        }
    }

    /// Loads the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ClientError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` references with environment values. Unset variables are left as-is.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ClientError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn session_policy(&self) -> SessionPolicy {
        self.session
            .as_ref()
            .and_then(|session| session.policy)
            .unwrap_or_default()
    }

    pub fn session_channel_capacity(&self) -> usize {
        self.session
            .as_ref()
            .and_then(|session| session.channel_capacity)
            .unwrap_or(16)
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("client.base_url", &self.client.base_url)?;

        if let Some(timeout) = self.client.timeout_seconds {
            validate_positive_number("client.timeout_seconds", timeout, 1)?;
        }

        if let Some(user_agent) = &self.client.user_agent {
            validate_non_empty_string("client.user_agent", user_agent)?;
        }

        if let Some(content_types) = &self.client.acceptable_content_types {
            validate_content_types("client.acceptable_content_types", content_types)?;
        }

        if let Some(capacity) = self.session.as_ref().and_then(|s| s.channel_capacity) {
            validate_positive_number("session.channel_capacity", capacity as u64, 1)?;
        }

        Ok(())
    }
}
