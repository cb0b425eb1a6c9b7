// ABOUTME: Exercise recommendation route handlers for the prediction endpoint
// ABOUTME: Parses the raw query payload and delegates to the recommendation pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Exercise recommendation routes
//!
//! Single route, single method: submit a feature profile, receive the ranked
//! nearest catalog entries. The payload is parsed from a raw JSON value so a
//! missing required field surfaces as the service's own validation error
//! rather than a framework rejection.

use crate::errors::AppError;
use crate::resources::ServerResources;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use std::sync::Arc;
use tracing::debug;

/// Recommendation routes
pub struct RecommendationRoutes;

impl RecommendationRoutes {
    /// Create all recommendation routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/predict/recommendation", post(Self::handle_predict))
            .with_state(resources)
    }

    /// Handle a recommendation prediction request
    async fn handle_predict(
        State(resources): State<Arc<ServerResources>>,
        Json(payload): Json<serde_json::Value>,
    ) -> Result<Response, AppError> {
        let recommendations = resources.model_cache.recommendation.recommend(&payload)?;
        debug!(returned = recommendations.len(), "Recommendation request served");

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "recomendaciones": recommendations })),
        )
            .into_response())
    }
}
