use api_router::utils::logger;
use api_router::{
    ApiClient, ApiRouter, ClientError, CliConfig, HttpTransport, ResponseModel, SessionBroadcaster,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting api-router CLI");
    if cli.verbose {
        tracing::debug!("CLI config: base_url={:?} config={:?}", cli.base_url, cli.config);
    }

    let (config, email, password) = match load(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            tracing::error!("❌ Configuration failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(3);
        }
    };

    let transport = HttpTransport::from_config(&config.client)?;
    let session = Arc::new(SessionBroadcaster::new(config.session_channel_capacity()));
    let mut session_events = session.subscribe();
    tokio::spawn(async move {
        while session_events.recv().await.is_ok() {
            tracing::warn!("🔒 Session expired, a new login is required");
        }
    });

    let client = ApiClient::new(transport)
        .with_session_observer(session.clone())
        .with_session_policy(config.session_policy());

    let mut outcome: Option<(Option<ResponseModel>, Option<ResponseModel>)> = None;
    client
        .execute(ApiRouter::login(email, password), |response, error| {
            outcome = Some((response, error));
        })
        .await;

    match outcome {
        Some((Some(response), _)) => {
            tracing::info!("✅ Login succeeded");
            println!("Response msg: {}", response.message().unwrap_or("<none>"));
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        Some((None, Some(error))) => {
            tracing::error!(
                "❌ Login failed with status code {}",
                error.status_code().unwrap_or("<none>")
            );
            println!("Error msg: {}", error.message().unwrap_or("<none>"));
            std::process::exit(1);
        }
        _ => {
            tracing::warn!("No response was delivered for the login call");
            std::process::exit(2);
        }
    }

    Ok(())
}

fn load(cli: &CliConfig) -> Result<(api_router::ClientConfig, String, String), ClientError> {
    let config = cli.client_config()?;
    let (email, password) = cli.credentials()?;
    Ok((config, email.to_string(), password.to_string()))
}
