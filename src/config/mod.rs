pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli_config::CliConfig;

#[cfg(feature = "cli")]
mod cli_config {
    use super::toml_config::ClientConfig;
    use crate::utils::error::{ClientError, Result};
    use crate::utils::validation::{validate_non_empty_string, validate_required_field, Validate};
    use clap::Parser;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "api-router")]
    #[command(about = "Issue a login call and print the classified response")]
    pub struct CliConfig {
        #[arg(long, help = "Path to a TOML client config")]
        pub config: Option<String>,

        #[arg(long, help = "Base URL of the API; overrides the config file")]
        pub base_url: Option<String>,

        #[arg(long)]
        pub email: Option<String>,

        #[arg(long, env = "API_ROUTER_PASSWORD", hide_env_values = true)]
        pub password: Option<String>,

        #[arg(long)]
        pub timeout_seconds: Option<u64>,

        #[arg(long, help = "Log as JSON lines")]
        pub json_logs: bool,

        #[arg(long, help = "Enable verbose output")]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Loads the config file when given, then applies command-line overrides.
        pub fn client_config(&self) -> Result<ClientConfig> {
            let mut config = match (&self.config, &self.base_url) {
                (Some(path), _) => ClientConfig::from_file(path)?,
                (None, Some(base_url)) => ClientConfig::new(base_url.clone()),
                (None, None) => {
                    return Err(ClientError::MissingConfigError {
                        field: "--config or --base-url".to_string(),
                    })
                }
            };

            if let Some(base_url) = &self.base_url {
                config.client.base_url = base_url.clone();
            }
            if let Some(timeout) = self.timeout_seconds {
                config.client.timeout_seconds = Some(timeout);
            }

            config.validate()?;
            Ok(config)
        }

        pub fn credentials(&self) -> Result<(&str, &str)> {
            let email = validate_required_field("--email", &self.email)?;
            validate_non_empty_string("--email", email)?;
            let password = validate_required_field("--password", &self.password)?;
            Ok((email.as_str(), password.as_str()))
        }
    }

}
