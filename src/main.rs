//! Social Mint Service
//!
//! Main entry point for the social mint backend.
//! This service provides:
//! - GET  <action path>: action metadata for the calling UI
//! - POST <action path>: social proof check and unsigned mint transaction
//! - GET  /healthz

use anyhow::Context;
use social_mint::api;
use social_mint::chain_client::{ContractAbi, RpcChainReader};
use social_mint::services::TwitterProofChecker;
use social_mint::{AppConfig, AppError, AppState};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{error, info, warn};

fn init_tracing(config: &AppConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("social_mint={},tower_http=info", config.log_level).into()
    });

    if config.json_logs() {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received, shutting down gracefully...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables first
    dotenv::dotenv().ok();

    // Load configuration
    let config = AppConfig::from_env().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        AppError::Config(e)
    })?;

    init_tracing(&config);

    info!("Social Mint service starting");
    info!("Environment: {}", config.environment);
    info!("Log level: {}", config.log_level);
    info!(
        "Chain: {} ({}) via {}",
        config.chain.chain_name, config.chain.chain_id, config.chain.rpc_url
    );
    info!("Mint contract: {}", config.chain.contract_address);

    // =========================================================================
    // CHAIN CLIENT
    // =========================================================================
    let abi = Arc::new(
        ContractAbi::load(config.chain.abi_path.as_deref()).context("loading contract ABI")?,
    );
    match &config.chain.abi_path {
        Some(path) => info!("✓ Contract ABI loaded from {}", path.display()),
        None => info!("✓ Built-in contract ABI loaded"),
    }

    let reader = Arc::new(
        RpcChainReader::connect(&config.chain.rpc_url, abi.clone())
            .context("creating chain RPC client")?,
    );
    info!("✓ Chain reader initialized ({})", reader.rpc_url());

    // =========================================================================
    // SOCIAL PROOF PROVIDER
    // =========================================================================
    let checker = Arc::new(TwitterProofChecker::new(config.proof.clone()));
    if checker.has_token() {
        info!("✓ Social proof provider initialized ({})", config.proof.api_url);
    } else {
        warn!("TWITTER_BEARER_TOKEN not set - proof checks for tagged events will fail");
    }

    let state = AppState::new(&config, abi, reader, checker);

    if let Err(e) = state.metadata.validate() {
        return Err(AppError::Config(format!("Invalid action metadata: {}", e)).into());
    }
    info!("✓ Action metadata validated");

    // =========================================================================
    // START SERVER
    // =========================================================================
    let bind_address = config.bind_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("binding HTTP listener on {}", bind_address))?;

    info!(
        "✓ HTTP server listening on {} (action path {})",
        bind_address, state.action_path
    );

    let app = api::router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Social Mint service shutdown complete");
    Ok(())
}
