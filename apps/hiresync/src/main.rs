use std::sync::Arc;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hiresync::api::HttpHiringApi;
use hiresync::client::{CredentialProvider, NoCredentials, ResourceClient, StorageTokenProvider};
use hiresync::config::Config;
use hiresync::screens::{Dashboard, OnboardingBoard};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting hiresync v{} against {}", env!("CARGO_PKG_VERSION"), config.api_base_url);

    let credentials: Arc<dyn CredentialProvider> = match &config.auth_storage_path {
        Some(path) => {
            info!("Reading auth token '{}' from {}", config.auth_token_key, path.display());
            Arc::new(StorageTokenProvider::new(path, &config.auth_token_key))
        }
        None => {
            warn!("AUTH_STORAGE_PATH not set; requests are sent without credentials");
            Arc::new(NoCredentials)
        }
    };

    let client = ResourceClient::with_timeout(
        config.api_base_url.clone(),
        credentials,
        config.request_timeout,
    )?;
    let api = HttpHiringApi::new(client);

    let dashboard = Dashboard::load(&api, config.jobs_page_limit, config.feed_limit).await;
    for message in &dashboard.errors {
        warn!("Dashboard source failed: {message}");
    }

    let mut onboarding = OnboardingBoard::new();
    if let Err(e) = onboarding.load(&api).await {
        warn!("Onboarding unavailable: {e}");
    }

    let snapshot = serde_json::json!({
        "stats": dashboard.stats,
        "feed": dashboard.feed,
        "onboarding": onboarding
            .records()
            .iter()
            .map(|r| serde_json::json!({
                "employee": r.employee_name,
                "progress": r.progress,
            }))
            .collect::<Vec<_>>(),
    });
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
