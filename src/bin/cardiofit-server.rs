// ABOUTME: Server binary wiring configuration, model loading, and HTTP startup
// ABOUTME: Aborts before serving if any pretrained artifact fails to load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Cardiofit Prediction Server Binary
//!
//! Starts the prediction API: loads configuration from the environment,
//! populates the model cache from the asset store, and serves the
//! recommendation and risk endpoints. A missing or invalid artifact aborts
//! startup with a non-zero exit; restarting the process is the recovery path.

use anyhow::Result;
use cardiofit_server::{
    assets, config::environment::ServerConfig, logging, model_cache::ModelCache,
    resources::ServerResources, server::HttpServer,
};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "cardiofit-server")]
#[command(about = "Cardiofit Prediction API - exercise recommendations and cardiovascular risk scoring")]
pub struct Args {
    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,

    /// Override asset store URL (directory path or http(s) base URL)
    #[arg(long)]
    assets: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration from environment
    let mut config = ServerConfig::from_env()?;

    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }
    if let Some(assets_url) = args.assets {
        config.assets.store =
            cardiofit_server::config::environment::AssetStoreUrl::parse_url(&assets_url)?;
    }

    // Initialize production logging
    logging::init_from_env()?;

    info!("Starting Cardiofit Prediction API");
    info!("{}", config.summary());

    // Populate the model cache before accepting any connection
    let store = assets::store_from_url(&config.assets.store);
    let model_cache = match ModelCache::load(store.as_ref(), &config.assets).await {
        Ok(cache) => cache,
        Err(e) => {
            error!("Model cache population failed, refusing to serve: {e}");
            return Err(e.into());
        }
    };
    info!("Model cache populated, server is ready to serve predictions");

    let http_port = config.http_port;
    let resources = Arc::new(ServerResources::new(model_cache, Arc::new(config)));

    display_available_endpoints(http_port);

    let server = HttpServer::new(resources);
    if let Err(e) = server.run(http_port).await {
        error!("Server error: {}", e);
        return Err(e);
    }

    Ok(())
}

/// Display all available API endpoints with their port
fn display_available_endpoints(port: u16) {
    let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

    info!("=== Available API Endpoints ===");
    info!("Prediction:");
    info!("   Recommendations: POST http://{host}:{port}/predict/recommendation");
    info!("   Risk Score:      POST http://{host}:{port}/predict/risk");
    info!("Monitoring:");
    info!("   Health Check:    GET  http://{host}:{port}/health");
    info!("   Readiness:       GET  http://{host}:{port}/ready");
    info!("=== End of Endpoint List ===");
}
