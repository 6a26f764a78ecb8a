use std::net::SocketAddr;
use std::sync::Arc;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};

use cowork_leads_api::config::Config;
use cowork_leads_api::db::Database;
use cowork_leads_api::db_storage::LeadStorage;
use cowork_leads_api::handlers::AppState;
use cowork_leads_api::lead_forwarder::LeadForwarder;
use cowork_leads_api::{obs, routes};

/// Main entry point for the application.
///
/// This function initializes the application, including:
/// - Logging and tracing.
/// - Configuration loading.
/// - Database connection and migrations.
/// - The optional lead forwarder.
/// - HTTP routes and middleware (CORS, Rate Limiting).
///
/// It then starts the Axum server.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    obs::init_tracing();

    // Load configuration
    let config = Config::from_env()?;
    tracing::info!("Configuration loaded successfully");

    // Initialize database connection pool
    let db = Database::new(&config).await?;
    tracing::info!("Database connection pool established");

    let storage = LeadStorage::with_default_location(db.pool.clone(), &config.default_location);

    // Forwarding is optional; a broken client config disables it instead of
    // blocking startup
    let forwarder = match LeadForwarder::from_config(&config) {
        Ok(Some(forwarder)) => {
            tracing::info!("✓ Lead forwarder initialized: {}", forwarder.url());
            Some(forwarder)
        }
        Ok(None) => None,
        Err(e) => {
            tracing::error!("Failed to initialize lead forwarder: {}", e);
            None
        }
    };

    // Build application state
    let app_state = Arc::new(AppState { storage, forwarder });

    // Rate limiter: one token every 2 seconds per IP, burst of 10
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(2)
            .burst_size(10)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    let lead_routes = routes::lead_routes().layer(GovernorLayer {
        config: governor_conf,
    });

    let app = routes::app(app_state, lead_routes);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    // Peer address is the rate limiter's fallback key when no proxy headers are set
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
