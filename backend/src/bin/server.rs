//! Shiftdesk HTTP Server Binary
//!
//! This is the main entry point for the shiftdesk REST API server.
//! It initializes the repository, resolves the allocation policy, sets up the
//! HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Run with the in-memory repository (default)
//! cargo run --bin shiftdesk-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `REPOSITORY_TYPE`: Storage backend (default: local)
//! - `RUST_LOG`: Log level (default: info)
//!
//! # Configuration
//!
//! When a `shiftdesk.toml` is present in a standard location it selects the
//! repository type and the allocation-policy epoch; otherwise the server
//! falls back to environment variables and the default exact-mode policy.

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use shiftdesk_rust::db::{self, RepositoryConfig, RepositoryFactory};
use shiftdesk_rust::http::{create_router, AppState};
use shiftdesk_rust::models::AllocationPolicy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting shiftdesk HTTP server");

    // Resolve repository and policy: config file first, then environment
    let (repository, policy) = match RepositoryConfig::from_default_location() {
        Ok(config) => {
            let repository = RepositoryFactory::from_repository_config(&config)
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            let policy = config
                .allocation_policy()
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            info!("Configuration loaded from shiftdesk.toml");
            (repository, policy)
        }
        Err(e) => {
            warn!("No config file found ({}); using environment defaults", e);
            db::init_repository()?;
            let repository = std::sync::Arc::clone(db::get_repository()?);
            (repository, AllocationPolicy::default())
        }
    };
    info!(
        "Repository initialized; policy quota={} max_consecutive={}",
        policy.total_quota, policy.max_consecutive_days
    );

    // Create application state
    let state = AppState::new(repository, policy);

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
