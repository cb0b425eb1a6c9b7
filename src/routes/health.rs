// ABOUTME: Health check route handlers for service monitoring and status endpoints
// ABOUTME: Provides system health and readiness endpoints for monitoring infrastructure
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Health check routes for service monitoring
//!
//! This module provides health and readiness endpoints for monitoring and
//! load balancer health checks. Readiness reports the loaded model shapes
//! since a serving process implies a fully populated model cache.

use crate::resources::ServerResources;
use axum::{extract::State, routing::get, Json, Router};
use std::sync::Arc;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        async fn health_handler() -> Json<serde_json::Value> {
            Json(serde_json::json!({
                "status": "healthy",
                "timestamp": chrono::Utc::now().to_rfc3339()
            }))
        }

        async fn ready_handler(
            State(resources): State<Arc<ServerResources>>,
        ) -> Json<serde_json::Value> {
            let cache = &resources.model_cache;
            Json(serde_json::json!({
                "status": "ready",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "models": {
                    "recommendation": {
                        "features": cache.recommendation.feature_count(),
                        "clusters": cache.recommendation.cluster_count(),
                        "catalog_items": cache.recommendation.catalog_size()
                    },
                    "risk": {
                        "features": cache.risk.feature_count()
                    }
                }
            }))
        }

        Router::new()
            .route("/health", get(health_handler))
            .route("/ready", get(ready_handler))
            .with_state(resources)
    }
}
