//! intercom - connectivity check for the Intercom API
//!
//! Loads credentials from the environment, verifies they are accepted and
//! reports how many users and companies the application has.
//!
//! # Configuration
//!
//! Set the following environment variables (or use a `.env` file):
//!
//! - `INTERCOM_APP_ID`: Application id
//! - `INTERCOM_API_KEY`: API key
//! - `INTERCOM_API_ENDPOINT` (optional): API base URL
//! - `INTERCOM_TIMEOUT_SECS` (optional): Request timeout
//!
//! # Usage
//!
//! ```bash
//! INTERCOM_APP_ID=abc INTERCOM_API_KEY=xyz RUST_LOG=intercom=debug ./intercom
//! ```

use anyhow::{Context, Result};
use tracing_subscriber::{fmt, EnvFilter};

use intercom::{CompanyQuery, Config, IntercomClient};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (ignore errors if not found)
    dotenvy::dotenv().ok();

    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("intercom=info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    tracing::info!("intercom v{}", env!("CARGO_PKG_VERSION"));

    let config = Config::from_env().context("Failed to load configuration")?;

    tracing::debug!(endpoint = %config.api_endpoint, "Configuration loaded");

    let client = IntercomClient::new(&config).context("Failed to create Intercom client")?;

    let users = client
        .test_connection()
        .await
        .context("Could not reach the Intercom API")?;
    let companies = client
        .list_companies(&CompanyQuery::new().page(1).per_page(1))
        .await
        .context("Failed to list companies")?;

    println!(
        "users: {}",
        users
            .total_count
            .map_or_else(|| "unknown".to_string(), |n| n.to_string())
    );
    println!(
        "companies: {}",
        companies
            .total_count
            .map_or_else(|| "unknown".to_string(), |n| n.to_string())
    );

    Ok(())
}
