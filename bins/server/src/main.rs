//! Tellerpoint API Server
//!
//! Main entry point for the Tellerpoint posting service.

use std::sync::Arc;

use jsonwebtoken::DecodingKey;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tellerpoint_api::{AppState, create_router};
use tellerpoint_core::approval::ApprovalPolicy;
use tellerpoint_db::connect;
use tellerpoint_shared::{AppConfig, ApprovalTokenConfig, ApprovalTokenService};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tellerpoint=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load().expect("Failed to load configuration");

    // Connect to database
    let db = connect(&config.database.url).await?;
    info!("Connected to database");

    // Create approval token service
    let approval_tokens = ApprovalTokenService::new(ApprovalTokenConfig {
        secret: config.approval.secret.clone(),
        token_expires_minutes: config.approval.token_expires_minutes,
    });
    let approval_policy = ApprovalPolicy::new(config.approval.threshold_cents);
    info!(
        threshold_cents = config.approval.threshold_cents,
        "Approval gate configured"
    );

    // Create application state
    let state = AppState {
        db: Arc::new(db),
        approval_tokens: Arc::new(approval_tokens),
        approval_policy,
        session_key: Arc::new(DecodingKey::from_secret(config.session.secret.as_bytes())),
    };

    // Create router
    let app = create_router(state);

    // Start server
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
