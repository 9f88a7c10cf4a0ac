//! `kukkuta-probe` -- backend connectivity check.
//!
//! Prints the backend's health status and, when credentials are given,
//! logs in and reports the resulting session.
//!
//! # Environment variables
//!
//! | Variable                       | Required | Default        | Description                      |
//! |--------------------------------|----------|----------------|----------------------------------|
//! | `KUKKUTA_API_BASE_URL`         | no       | production URL | Backend base URL                 |
//! | `KUKKUTA_API_VERSION`          | no       | `v1`           | API version segment              |
//! | `KUKKUTA_REQUEST_TIMEOUT_SECS` | no       | --             | Per-request timeout              |
//! | `KUKKUTA_SESSION_FILE`         | no       | --             | Persist the session to this file |
//! | `KUKKUTA_EMAIL`                | no       | --             | Log in as this account           |
//! | `KUKKUTA_PASSWORD`             | no       | --             | Password for `KUKKUTA_EMAIL`     |

use kukkuta_client::domain::auth::LoginPayload;
use kukkuta_client::{ClientConfig, KukkutaClient};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "kukkuta_client=info,kukkuta_probe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ClientConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let client = KukkutaClient::from_config(&config).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build HTTP client");
        std::process::exit(1);
    });

    tracing::info!(base_url = %config.base_url, api_version = %config.api_version, "Probing backend");

    match client.health().check().await {
        Ok(health) => {
            tracing::info!(
                status = %health.status,
                version = %health.version,
                healthy = health.is_healthy(),
                "Backend reachable",
            );
        }
        Err(e) => {
            tracing::error!(error = %e, "Backend unreachable");
            std::process::exit(1);
        }
    }

    let (Ok(email), Ok(password)) = (
        std::env::var("KUKKUTA_EMAIL"),
        std::env::var("KUKKUTA_PASSWORD"),
    ) else {
        return;
    };

    match client.auth().login(&LoginPayload { email, password }).await {
        Ok(auth) => {
            tracing::info!(user_id = auth.user_id, role = %auth.role, "Login succeeded");
        }
        Err(e) => {
            tracing::error!(error = %e, "Login failed");
            std::process::exit(1);
        }
    }
}
