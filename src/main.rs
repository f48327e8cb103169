//! Rail Feedback - a bilingual public feedback portal for railway passengers.
//!
//! # API Endpoints
//!
//! - `POST /reports` - Submit a report
//! - `GET /reports/:id` - Details of a report submitted this session
//! - `GET /dashboard` - Search and filter this session's reports
//! - `GET /catalog` - Form options in English or Hindi
//! - `GET /health` - Health check
//!
//! # Configuration
//!
//! See [`rail_feedback::config`] for the environment variables read at start-up.

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use rail_feedback::api::{AppState, router};
use rail_feedback::config::PortalConfig;
use rail_feedback::storage::Storage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // PRIVACY NOTE: Default log level is INFO; contact details are never logged at any level
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive("rail_feedback=info".parse()?))
        .init();

    let config = PortalConfig::from_env()?;

    info!(
        port = config.port,
        collection = %config.collection,
        language = %config.default_language,
        "Starting Rail Feedback portal"
    );

    let storage = Storage::connect(&config).await?;

    let state = AppState::new(storage, &config.collection, config.default_language);
    let app = router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await?;

    info!(%addr, "Rail Feedback is listening");

    axum::serve(listener, app).await?;

    Ok(())
}
