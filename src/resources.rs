// ABOUTME: Centralized resource container for dependency injection in route handlers
// ABOUTME: Shares the immutable model cache and configuration across concurrent requests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Server Resources Module
//!
//! Centralized resource container for dependency injection. Route
//! constructors take an `Arc<ServerResources>` instead of individual model
//! handles, so handlers share one immutable cache without ambient globals.

use crate::config::environment::ServerConfig;
use crate::model_cache::ModelCache;
use std::sync::Arc;

/// Shared, read-only state handed to every route handler
#[derive(Clone)]
pub struct ServerResources {
    /// Pretrained models, populated once before serving
    pub model_cache: Arc<ModelCache>,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create new server resources with proper Arc sharing
    #[must_use]
    pub fn new(model_cache: ModelCache, config: Arc<ServerConfig>) -> Self {
        Self {
            model_cache: Arc::new(model_cache),
            config,
        }
    }
}
