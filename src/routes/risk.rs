// ABOUTME: Cardiovascular risk route handlers for the prediction endpoint
// ABOUTME: Parses the raw health attributes and delegates to the risk pipeline
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Cardiovascular risk routes
//!
//! Single route, single method: submit health attributes, receive a 0/1 risk
//! label from the gradient-boosted classifier.

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

/// Risk routes
pub struct RiskRoutes;

impl RiskRoutes {
    /// Create all risk routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/predict/risk", post(Self::handle_predict))
            .with_state(resources)
    }

    /// Handle a risk prediction request
    async fn handle_predict(
        State(resources): State<Arc<ServerResources>>,
        Json(payload): Json<serde_json::Value>,
    ) -> Result<Response, AppError> {
        let label = resources.model_cache.risk.predict(&payload)?;
        debug!(label = label, "Risk request served");

        Ok((
            StatusCode::OK,
            Json(serde_json::json!({ "prediccion": label })),
        )
            .into_response())
    }
}
