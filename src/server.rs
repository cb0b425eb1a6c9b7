// ABOUTME: HTTP server assembly: router composition, middleware layers, and listener startup
// ABOUTME: Serves the prediction and health endpoints over a single port
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! HTTP server assembly and startup
//!
//! Composes the per-domain routers, applies tracing, CORS, and body-limit
//! layers, and runs the axum server. The model cache is fully populated
//! before [`HttpServer::run`] is called, so request handling never blocks on
//! artifact I/O.

use crate::constants::limits;
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, RecommendationRoutes, RiskRoutes};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Prediction API server
pub struct HttpServer {
    resources: Arc<ServerResources>,
}

impl HttpServer {
    /// Create a new server over shared resources
    #[must_use]
    pub fn new(resources: Arc<ServerResources>) -> Self {
        Self { resources }
    }

    /// Build the full application router
    #[must_use]
    pub fn router(&self) -> Router {
        Router::new()
            .merge(HealthRoutes::routes(self.resources.clone()))
            .merge(RecommendationRoutes::routes(self.resources.clone()))
            .merge(RiskRoutes::routes(self.resources.clone()))
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive())
            .layer(RequestBodyLimitLayer::new(limits::MAX_REQUEST_BODY_BYTES))
    }

    /// Bind the listener and serve until shutdown
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind or serve on the given
    /// port
    pub async fn run(self, port: u16) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(("0.0.0.0", port)).await?;
        info!("HTTP server listening on http://0.0.0.0:{port}");

        axum::serve(listener, self.router()).await?;
        Ok(())
    }
}
