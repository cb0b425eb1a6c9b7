// ABOUTME: Recommendation pipeline: standardize query, assign cluster, rank catalog candidates
// ABOUTME: Owns the precomputed standardized catalog matrix and top-N truncation rules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Recommendation Engine
//!
//! The exercise recommendation pipeline: a query's raw attributes become an
//! 8-dimension feature vector, standardized into the fitted scaler's space,
//! assigned to the nearest k-means centroid, and ranked against the catalog
//! items sharing that cluster by Euclidean distance.
//!
//! The catalog's standardized matrix is computed once at model load;
//! standardization is deterministic so this changes no observable behavior.

use crate::constants::limits;
use crate::errors::{AppError, AppResult};
use crate::intelligence::features::{self, RECOMMENDATION_FEATURES};
use crate::models::{euclidean, ClusterModel, ExerciseCatalog, ScalerParams};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// A ranked catalog entry as returned to the client
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    /// Exercise title
    #[serde(rename = "Title")]
    pub title: String,
    /// Exercise description
    #[serde(rename = "Desc")]
    pub description: String,
}

/// The pretrained recommendation model: scaler, centroids, and catalog
#[derive(Debug)]
pub struct RecommendationModel {
    scaler: ScalerParams,
    clusters: ClusterModel,
    catalog: ExerciseCatalog,
    /// Catalog feature vectors standardized once at load time
    standardized: Vec<Vec<f64>>,
}

impl RecommendationModel {
    /// Assemble and cross-validate the recommendation model parts.
    ///
    /// # Errors
    ///
    /// Returns a model-validation error if the scaler's feature order is not
    /// the one the query builder produces, or if a catalog item carries a
    /// cluster label outside `[0, K)`.
    pub fn new(
        scaler: ScalerParams,
        clusters: ClusterModel,
        catalog: ExerciseCatalog,
    ) -> AppResult<Self> {
        if scaler
            .feature_names
            .iter()
            .map(String::as_str)
            .ne(RECOMMENDATION_FEATURES)
        {
            return Err(AppError::model_invalid(format!(
                "recommendation scaler feature order {:?} does not match the query builder",
                scaler.feature_names
            )));
        }

        for (idx, item) in catalog.items().iter().enumerate() {
            if item.cluster >= clusters.k() {
                return Err(AppError::model_invalid(format!(
                    "catalog item {idx} ({}) has cluster label {} but the model has {} clusters",
                    item.title,
                    item.cluster,
                    clusters.k()
                )));
            }
        }

        let standardized = catalog
            .items()
            .iter()
            .map(|item| scaler.transform(&item.features))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self {
            scaler,
            clusters,
            catalog,
            standardized,
        })
    }

    /// Number of clusters in the fitted model
    #[must_use]
    pub fn cluster_count(&self) -> usize {
        self.clusters.k()
    }

    /// Number of catalog entries
    #[must_use]
    pub fn catalog_size(&self) -> usize {
        self.catalog.len()
    }

    /// Number of features the scaler expects
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.scaler.len()
    }

    /// Run the full recommendation pipeline for one request payload.
    ///
    /// `top_n` defaults to 3, is clamped to the candidates available, and a
    /// negative value yields an empty result rather than an error. An empty
    /// cluster likewise yields an empty result.
    ///
    /// # Errors
    ///
    /// Returns a validation error for absent/non-numeric required fields and
    /// an inference error for dimensionality failures inside the pipeline.
    pub fn recommend(&self, payload: &Value) -> AppResult<Vec<Recommendation>> {
        let requested = payload
            .get("top_n")
            .and_then(Value::as_i64)
            .unwrap_or(limits::DEFAULT_TOP_N);
        let top_n = requested.max(0) as usize;

        let vector = features::recommendation_vector(payload)?;
        let query = self.scaler.transform(&vector)?;
        let cluster = self.clusters.assign(&query)?;

        let mut candidates: Vec<(usize, f64)> = self
            .catalog
            .items()
            .iter()
            .enumerate()
            .filter(|(_, item)| item.cluster == cluster)
            .map(|(idx, _)| (idx, euclidean(&self.standardized[idx], &query)))
            .collect();

        debug!(
            cluster = cluster,
            candidates = candidates.len(),
            top_n = top_n,
            "Ranking recommendation candidates"
        );

        // Stable sort keeps catalog order for exact distance ties
        candidates.sort_by(|a, b| a.1.total_cmp(&b.1));
        candidates.truncate(top_n);

        Ok(candidates
            .into_iter()
            .map(|(idx, _)| {
                let item = &self.catalog.items()[idx];
                Recommendation {
                    title: item.title.clone(),
                    description: item.description.clone(),
                }
            })
            .collect())
    }
}
