// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Handles environment variables, asset store selection, and runtime configuration parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Environment-based configuration management for production deployment

use crate::constants::{assets, env_config, env_var_or};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Convert to `tracing::Level`
    #[must_use]
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }

    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => LogLevel::Error,
            "warn" => LogLevel::Warn,
            "debug" => LogLevel::Debug,
            "trace" => LogLevel::Trace,
            _ => LogLevel::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Error => write!(f, "error"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Trace => write!(f, "trace"),
        }
    }
}

/// Type-safe asset store location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AssetStoreUrl {
    /// Local directory holding the model artifacts
    Local { root: PathBuf },
    /// HTTP(S) blob endpoint serving artifacts by name
    Http { base_url: String },
}

impl AssetStoreUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if an HTTP base URL is syntactically empty.
    pub fn parse_url(s: &str) -> Result<Self> {
        if s.starts_with("http://") || s.starts_with("https://") {
            let base_url = s.trim_end_matches('/');
            if base_url.len() <= "https://".len() {
                anyhow::bail!("Invalid asset store URL: {s}");
            }
            Ok(AssetStoreUrl::Http {
                base_url: base_url.to_owned(),
            })
        } else {
            // `file:` prefix is optional; a bare path means a local directory
            let path_str = s.strip_prefix("file:").unwrap_or(s);
            Ok(AssetStoreUrl::Local {
                root: PathBuf::from(path_str),
            })
        }
    }

    /// Convert back to a URL string for logging
    #[must_use]
    pub fn to_url_string(&self) -> String {
        match self {
            AssetStoreUrl::Local { root } => format!("file:{}", root.display()),
            AssetStoreUrl::Http { base_url } => base_url.clone(),
        }
    }

    /// Check if this is a local directory store
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(self, AssetStoreUrl::Local { .. })
    }
}

impl Default for AssetStoreUrl {
    fn default() -> Self {
        AssetStoreUrl::Local {
            root: PathBuf::from("./assets"),
        }
    }
}

/// Model artifact configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Where artifacts are fetched from
    pub store: AssetStoreUrl,
    /// Recommendation scaler artifact name
    pub recommendation_scaler: String,
    /// Cluster centroids artifact name
    pub cluster_model: String,
    /// Clustered exercise catalog artifact name
    pub exercise_catalog: String,
    /// Risk scaler artifact name
    pub risk_scaler: String,
    /// Risk classifier artifact name
    pub risk_classifier: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            store: AssetStoreUrl::default(),
            recommendation_scaler: assets::RECOMMENDATION_SCALER.into(),
            cluster_model: assets::CLUSTER_MODEL.into(),
            exercise_catalog: assets::EXERCISE_CATALOG.into(),
            risk_scaler: assets::RISK_SCALER.into(),
            risk_classifier: assets::RISK_CLASSIFIER.into(),
        }
    }
}

/// Server configuration loaded from the environment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// HTTP API port
    pub http_port: u16,
    /// Log level
    pub log_level: LogLevel,
    /// Model artifact configuration
    pub assets: AssetConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if the asset store URL cannot be parsed.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists
        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        let config = ServerConfig {
            http_port: env_config::http_port(),
            log_level: LogLevel::from_str_or_default(&env_config::log_level()),
            assets: AssetConfig {
                store: AssetStoreUrl::parse_url(&env_config::asset_store_url())?,
                recommendation_scaler: env_var_or(
                    "RECOMMENDATION_SCALER_ASSET",
                    assets::RECOMMENDATION_SCALER,
                ),
                cluster_model: env_var_or("CLUSTER_MODEL_ASSET", assets::CLUSTER_MODEL),
                exercise_catalog: env_var_or("EXERCISE_CATALOG_ASSET", assets::EXERCISE_CATALOG),
                risk_scaler: env_var_or("RISK_SCALER_ASSET", assets::RISK_SCALER),
                risk_classifier: env_var_or("RISK_CLASSIFIER_ASSET", assets::RISK_CLASSIFIER),
            },
        };

        Ok(config)
    }

    /// Human-readable configuration summary for startup logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "http_port={} log_level={} asset_store={}",
            self.http_port,
            self.log_level,
            self.assets.store.to_url_string()
        )
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            http_port: crate::constants::ports::DEFAULT_HTTP_PORT,
            log_level: LogLevel::default(),
            assets: AssetConfig::default(),
        }
    }
}
