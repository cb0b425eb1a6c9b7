// ABOUTME: Asset store abstraction for fetching model artifacts from durable storage
// ABOUTME: Provides local-directory and HTTP blob backends behind a common trait
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Asset Store
//!
//! Model artifacts (scalers, centroids, catalog, classifier) are produced by
//! an external training pipeline and published to durable blob storage. This
//! module abstracts "fetch named blob to local bytes" behind [`AssetStore`] so
//! the model cache does not care where artifacts live.
//!
//! A fetch that finds no object, or an object with zero bytes, is a
//! retrievability error; the model cache treats that as fatal at startup.

use crate::config::environment::AssetStoreUrl;
use crate::errors::{AppError, AppResult};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::debug;

/// Durable blob storage exposing "fetch named blob to local bytes"
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Fetch the named asset, failing if it is absent or empty
    async fn fetch(&self, name: &str) -> AppResult<Vec<u8>>;
}

/// Asset store backed by a local directory
pub struct LocalAssetStore {
    root: PathBuf,
}

impl LocalAssetStore {
    /// Create a store rooted at the given directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl AssetStore for LocalAssetStore {
    async fn fetch(&self, name: &str) -> AppResult<Vec<u8>> {
        let path = self.root.join(name);
        debug!("Fetching asset from {}", path.display());

        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AppError::asset_missing(name));
            }
            Err(e) => return Err(AppError::asset(name, e.to_string()).with_source(e)),
        };

        if bytes.is_empty() {
            return Err(AppError::asset_missing(name));
        }

        Ok(bytes)
    }
}

/// Asset store backed by an HTTP(S) blob endpoint
pub struct HttpAssetStore {
    base_url: String,
    client: reqwest::Client,
}

impl HttpAssetStore {
    /// Create a store fetching `{base_url}/{name}`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl AssetStore for HttpAssetStore {
    async fn fetch(&self, name: &str) -> AppResult<Vec<u8>> {
        let url = format!("{}/{name}", self.base_url);
        debug!("Fetching asset from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::asset(name, e.to_string()).with_source(e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(AppError::asset_missing(name));
        }

        let response = response
            .error_for_status()
            .map_err(|e| AppError::asset(name, e.to_string()).with_source(e))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::asset(name, e.to_string()).with_source(e))?;

        if bytes.is_empty() {
            return Err(AppError::asset_missing(name));
        }

        Ok(bytes.to_vec())
    }
}

/// Build the asset store matching the configured URL
#[must_use]
pub fn store_from_url(url: &AssetStoreUrl) -> Box<dyn AssetStore> {
    match url {
        AssetStoreUrl::Local { root } => Box::new(LocalAssetStore::new(root.clone())),
        AssetStoreUrl::Http { base_url } => Box::new(HttpAssetStore::new(base_url.clone())),
    }
}
