// ABOUTME: Init-once model cache: fetches, parses, and cross-validates all pretrained artifacts
// ABOUTME: Populated before serving begins and shared read-only across request handlers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Model Cache
//!
//! Process-wide holder of the pretrained model state: recommendation scaler,
//! k-means centroids, clustered catalog, risk scaler, and risk classifier.
//!
//! Population happens exactly once, in `main`, before the listener accepts
//! connections; a failed or partial load aborts startup, so no request can
//! ever observe uninitialized model state. After load the cache is immutable
//! and shared by `Arc` — request handling never touches the asset store.

use crate::assets::AssetStore;
use crate::config::environment::AssetConfig;
use crate::errors::AppResult;
use crate::intelligence::{GradientBoostedClassifier, RecommendationModel, RiskModel};
use crate::models::{ClusterModel, ExerciseCatalog, ScalerParams};
use tracing::info;

/// Read-only holder of all pretrained model artifacts
#[derive(Debug)]
pub struct ModelCache {
    /// Exercise recommendation model
    pub recommendation: RecommendationModel,
    /// Cardiovascular risk model
    pub risk: RiskModel,
}

impl ModelCache {
    /// Assemble a cache from already-built models (test and embedding paths)
    #[must_use]
    pub fn new(recommendation: RecommendationModel, risk: RiskModel) -> Self {
        Self {
            recommendation,
            risk,
        }
    }

    /// Fetch and validate every artifact from the asset store.
    ///
    /// Any missing, empty, or invalid artifact is fatal: the error propagates
    /// to `main`, which exits without serving.
    ///
    /// # Errors
    ///
    /// Returns an asset error when retrieval fails and a model-validation
    /// error when an artifact is malformed or the artifacts disagree with
    /// each other (scaler shape, centroid dimensionality, cluster labels,
    /// unknown risk features).
    pub async fn load(store: &dyn AssetStore, assets: &AssetConfig) -> AppResult<Self> {
        let scaler_bytes = store.fetch(&assets.recommendation_scaler).await?;
        let scaler = ScalerParams::from_json(&assets.recommendation_scaler, &scaler_bytes)?;
        info!(
            "Recommendation scaler loaded: {} features",
            scaler.len()
        );

        let cluster_bytes = store.fetch(&assets.cluster_model).await?;
        let clusters = ClusterModel::from_json(&assets.cluster_model, &cluster_bytes, scaler.len())?;
        info!("Cluster model loaded: {} centroids", clusters.k());

        let catalog_bytes = store.fetch(&assets.exercise_catalog).await?;
        let catalog = ExerciseCatalog::from_csv(
            &assets.exercise_catalog,
            &catalog_bytes,
            &scaler.feature_names,
        )?;
        info!("Exercise catalog loaded: {} items", catalog.len());

        let recommendation = RecommendationModel::new(scaler, clusters, catalog)?;

        let risk_scaler_bytes = store.fetch(&assets.risk_scaler).await?;
        let risk_scaler = ScalerParams::from_json(&assets.risk_scaler, &risk_scaler_bytes)?;
        info!("Risk scaler loaded: {} features", risk_scaler.len());

        let classifier_bytes = store.fetch(&assets.risk_classifier).await?;
        let classifier =
            GradientBoostedClassifier::from_json(&assets.risk_classifier, &classifier_bytes)?;
        info!("Risk classifier loaded");

        let risk = RiskModel::new(risk_scaler, Box::new(classifier))?;

        Ok(Self::new(recommendation, risk))
    }
}
