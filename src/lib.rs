// ABOUTME: Main library entry point for the Cardiofit prediction API
// ABOUTME: Serves exercise recommendations and cardiovascular risk scoring over HTTP
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

#![deny(unsafe_code)]

//! # Cardiofit Prediction Server
//!
//! An HTTP service exposing two prediction endpoints backed by pretrained
//! models: an exercise recommendation engine (standardized feature space,
//! k-means cluster assignment, distance-ranked catalog candidates) and a
//! cardiovascular risk classifier (gradient-boosted decision ensemble).
//!
//! ## Architecture
//!
//! The server follows a modular architecture:
//! - **Assets**: durable blob retrieval for model artifacts
//! - **Model Cache**: init-once, read-only holder of scalers, centroids,
//!   catalog, and classifier, shared across request handlers
//! - **Intelligence**: feature-vector construction and the two inference
//!   pipelines
//! - **Routes**: thin axum handlers per prediction domain
//! - **Config**: environment-based configuration management
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use cardiofit_server::config::environment::ServerConfig;
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Cardiofit server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

// ── Public API ──────────────────────────────────────────────────────────
// These modules are used by the binary crate (src/bin/) and integration
// tests (tests/). They must remain `pub` so external consumers can access them.

/// Asset store abstraction for fetching model artifacts from durable storage
pub mod assets;

/// Configuration management and environment parsing
pub mod config;

/// Application constants and configuration values
pub mod constants;

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Feature building and the recommendation / risk inference pipelines
pub mod intelligence;

/// Production logging and structured output
pub mod logging;

/// Init-once model artifact cache shared by all request handlers
pub mod model_cache;

/// Common data models for scalers, clusters, and the exercise catalog
pub mod models;

/// Centralized dependency-injection container for route handlers
pub mod resources;

/// `HTTP` routes for the prediction endpoints
pub mod routes;

/// HTTP server assembly and startup
pub mod server;
