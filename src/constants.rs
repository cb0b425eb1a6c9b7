// ABOUTME: System-wide constants and configuration values for the Cardiofit API
// ABOUTME: Contains asset names, environment variable parsing, and system defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Constants Module
//!
//! Application constants and environment-based configuration values.
//! This module provides both hardcoded constants and environment variable
//! configuration.

use std::env;

/// Service identity constants
pub mod service_names {
    /// Canonical service name for structured logging
    pub const CARDIOFIT_SERVER: &str = "cardiofit-server";

    /// Server version from Cargo.toml
    pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
}

/// Network port defaults
pub mod ports {
    /// Default `HTTP` API port
    pub const DEFAULT_HTTP_PORT: u16 = 8080;
}

/// Request handling limits
pub mod limits {
    /// Maximum accepted request body size in bytes
    pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

    /// Default number of recommendations returned when `top_n` is omitted
    pub const DEFAULT_TOP_N: i64 = 3;
}

/// Default names of the model artifacts inside the asset store.
///
/// The layout mirrors the training side's blob storage: scalers and models
/// under `models/`, the clustered catalog at the root.
pub mod assets {
    /// Recommendation feature scaler (JSON)
    pub const RECOMMENDATION_SCALER: &str = "models/scaler.json";

    /// K-means centroids for the recommendation clusters (JSON)
    pub const CLUSTER_MODEL: &str = "models/kmeans_model.json";

    /// Clustered exercise catalog (CSV)
    pub const EXERCISE_CATALOG: &str = "dataset_clustering.csv";

    /// Risk feature scaler (JSON)
    pub const RISK_SCALER: &str = "models/risk_scaler.json";

    /// Gradient-boosted risk classifier (JSON)
    pub const RISK_CLASSIFIER: &str = "models/risk_model.json";
}

/// Environment-based configuration
pub mod env_config {
    use super::env;

    /// Get `HTTP` server port from environment or default
    #[must_use]
    pub fn http_port() -> u16 {
        env::var("HTTP_PORT")
            .unwrap_or_else(|_| crate::constants::ports::DEFAULT_HTTP_PORT.to_string())
            .parse()
            .unwrap_or(crate::constants::ports::DEFAULT_HTTP_PORT)
    }

    /// Get log level from environment or default
    #[must_use]
    pub fn log_level() -> String {
        env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into())
    }

    /// Get the asset store `URL` from environment or default.
    ///
    /// Accepts `file:<dir>`, a bare directory path, or an `http(s)://` base
    /// URL.
    #[must_use]
    pub fn asset_store_url() -> String {
        env::var("ASSET_STORE_URL").unwrap_or_else(|_| "file:./assets".into())
    }
}

/// Get an environment variable with a default fallback
#[must_use]
pub fn env_var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_owned())
}
