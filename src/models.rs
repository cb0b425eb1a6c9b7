// ABOUTME: Core data models for pretrained artifacts: scalers, centroids, and the catalog
// ABOUTME: Implements standardization, nearest-centroid assignment, and catalog CSV parsing
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Model Data Structures
//!
//! Parsed forms of the pretrained artifacts the server loads at startup. All
//! types here are immutable after load and shared read-only across concurrent
//! requests.
//!
//! The scaler and cluster artifacts are JSON exports of the training
//! pipeline's fitted parameters (`feature_names_in_` / `mean_` / `scale_` for
//! the standard scaler, `cluster_centers_` for k-means). The catalog is the
//! clustered exercise dataset CSV.

use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Euclidean distance between two equal-length vectors
#[must_use]
pub fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

/// Fitted per-feature standardization parameters.
///
/// The feature order is fixed at load time and never mutated; query and
/// catalog vectors must be built in exactly this order before transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerParams {
    /// Ordered feature names, matching the training columns
    pub feature_names: Vec<String>,
    /// Per-feature mean
    pub mean: Vec<f64>,
    /// Per-feature scale divisor
    pub scale: Vec<f64>,
}

impl ScalerParams {
    /// Parse and validate a scaler artifact
    ///
    /// # Errors
    ///
    /// Returns a model-validation error for malformed JSON, mismatched
    /// lengths, or a degenerate (zero) scale.
    pub fn from_json(name: &str, bytes: &[u8]) -> AppResult<Self> {
        let scaler: Self = serde_json::from_slice(bytes)
            .map_err(|e| AppError::model_invalid(format!("{name}: {e}")).with_source(e))?;
        scaler.validate(name)?;
        Ok(scaler)
    }

    fn validate(&self, name: &str) -> AppResult<()> {
        if self.feature_names.is_empty() {
            return Err(AppError::model_invalid(format!(
                "{name}: scaler declares no features"
            )));
        }
        if self.mean.len() != self.feature_names.len() || self.scale.len() != self.feature_names.len()
        {
            return Err(AppError::model_invalid(format!(
                "{name}: feature_names/mean/scale lengths differ ({}/{}/{})",
                self.feature_names.len(),
                self.mean.len(),
                self.scale.len()
            )));
        }
        // Division by zero is a load-time concern, never a per-request branch
        if let Some(idx) = self.scale.iter().position(|s| *s == 0.0 || !s.is_finite()) {
            return Err(AppError::model_invalid(format!(
                "{name}: degenerate scale for feature {}",
                self.feature_names[idx]
            )));
        }
        Ok(())
    }

    /// Number of features
    #[must_use]
    pub fn len(&self) -> usize {
        self.feature_names.len()
    }

    /// Whether the scaler declares no features
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.feature_names.is_empty()
    }

    /// Position of a feature name in the fixed order
    #[must_use]
    pub fn position(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|f| f == name)
    }

    /// Standardize a vector: `v'[i] = (v[i] - mean[i]) / scale[i]`
    ///
    /// Pure and deterministic; applied identically to query and catalog
    /// vectors so distances in standardized space are comparable.
    ///
    /// # Errors
    ///
    /// Returns an inference error if the vector length does not match the
    /// feature count.
    pub fn transform(&self, vector: &[f64]) -> AppResult<Vec<f64>> {
        if vector.len() != self.len() {
            return Err(AppError::inference(format!(
                "vector has {} features, scaler expects {}",
                vector.len(),
                self.len()
            )));
        }
        Ok(vector
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(v, (m, s))| (v - m) / s)
            .collect())
    }
}

/// Pretrained k-means centroids in standardized feature space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterModel {
    /// One centroid per cluster, indexed by cluster id
    pub centroids: Vec<Vec<f64>>,
}

impl ClusterModel {
    /// Parse and validate a cluster-model artifact against the scaler's
    /// feature count
    ///
    /// # Errors
    ///
    /// Returns a model-validation error for malformed JSON, zero clusters, or
    /// a centroid whose dimensionality differs from `dimensions`.
    pub fn from_json(name: &str, bytes: &[u8], dimensions: usize) -> AppResult<Self> {
        let model: Self = serde_json::from_slice(bytes)
            .map_err(|e| AppError::model_invalid(format!("{name}: {e}")).with_source(e))?;

        if model.centroids.is_empty() {
            return Err(AppError::model_invalid(format!(
                "{name}: cluster model has no centroids"
            )));
        }
        for (id, centroid) in model.centroids.iter().enumerate() {
            if centroid.len() != dimensions {
                return Err(AppError::model_invalid(format!(
                    "{name}: centroid {id} has {} dimensions, expected {dimensions}",
                    centroid.len()
                )));
            }
        }
        Ok(model)
    }

    /// Number of clusters
    #[must_use]
    pub fn k(&self) -> usize {
        self.centroids.len()
    }

    /// Assign a standardized vector to the nearest centroid.
    ///
    /// Ties break to the lowest index: the first encountered minimum wins,
    /// so assignment is stable and deterministic.
    ///
    /// # Errors
    ///
    /// Returns an inference error if the vector's dimensionality differs
    /// from the centroids'.
    pub fn assign(&self, standardized: &[f64]) -> AppResult<usize> {
        let mut best = 0usize;
        let mut best_distance = f64::INFINITY;
        for (id, centroid) in self.centroids.iter().enumerate() {
            if centroid.len() != standardized.len() {
                return Err(AppError::inference(format!(
                    "query has {} dimensions, centroid {id} has {}",
                    standardized.len(),
                    centroid.len()
                )));
            }
            let distance = euclidean(standardized, centroid);
            if distance < best_distance {
                best = id;
                best_distance = distance;
            }
        }
        Ok(best)
    }
}

/// One entry of the reference exercise catalog.
///
/// The cluster label is assigned once at catalog build time by the training
/// pipeline, not recomputed per request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Display title
    pub title: String,
    /// Display description
    pub description: String,
    /// Raw (unstandardized) feature vector in scaler order
    pub features: Vec<f64>,
    /// Precomputed cluster label
    pub cluster: usize,
}

/// The immutable reference collection searched for recommendations
#[derive(Debug, Clone)]
pub struct ExerciseCatalog {
    items: Vec<CatalogItem>,
}

impl ExerciseCatalog {
    /// Parse the clustered catalog CSV.
    ///
    /// Feature columns are resolved by the scaler's declared names so the raw
    /// vectors come out in scaler order regardless of CSV column layout.
    ///
    /// # Errors
    ///
    /// Returns a model-validation error if a required column is absent or a
    /// cell fails to parse.
    pub fn from_csv(name: &str, bytes: &[u8], feature_names: &[String]) -> AppResult<Self> {
        let mut reader = csv::Reader::from_reader(bytes);
        let headers = reader
            .headers()
            .map_err(|e| AppError::model_invalid(format!("{name}: {e}")).with_source(e))?
            .clone();

        let column = |wanted: &str| -> AppResult<usize> {
            headers
                .iter()
                .position(|h| h == wanted)
                .ok_or_else(|| AppError::model_invalid(format!("{name}: missing column {wanted}")))
        };

        let title_idx = column("Title")?;
        let desc_idx = column("Desc")?;
        let cluster_idx = column("Cluster")?;
        let feature_idx: Vec<usize> = feature_names
            .iter()
            .map(|f| column(f))
            .collect::<AppResult<_>>()?;

        fn cell<'r>(
            record: &'r csv::StringRecord,
            idx: usize,
            name: &str,
            row: usize,
        ) -> AppResult<&'r str> {
            record
                .get(idx)
                .ok_or_else(|| AppError::model_invalid(format!("{name}: row {row} is short")))
        }

        let mut items = Vec::new();
        for (row, record) in reader.records().enumerate() {
            let record = record
                .map_err(|e| AppError::model_invalid(format!("{name}: {e}")).with_source(e))?;

            let mut features = Vec::with_capacity(feature_idx.len());
            for &idx in &feature_idx {
                let value = cell(&record, idx, name, row)?
                    .trim()
                    .parse::<f64>()
                    .map_err(|e| {
                        AppError::model_invalid(format!(
                            "{name}: row {row}, column {}: {e}",
                            headers.get(idx).unwrap_or("?")
                        ))
                    })?;
                features.push(value);
            }

            // Labels may arrive as "2" or "2.0" depending on the export path
            let cluster_raw = cell(&record, cluster_idx, name, row)?
                .trim()
                .parse::<f64>()
                .map_err(|e| {
                    AppError::model_invalid(format!("{name}: row {row}, column Cluster: {e}"))
                })?;
            if cluster_raw < 0.0 || cluster_raw.fract() != 0.0 {
                return Err(AppError::model_invalid(format!(
                    "{name}: row {row}: cluster label {cluster_raw} is not a non-negative integer"
                )));
            }

            items.push(CatalogItem {
                title: cell(&record, title_idx, name, row)?.to_owned(),
                description: cell(&record, desc_idx, name, row)?.to_owned(),
                features,
                cluster: cluster_raw as usize,
            });
        }

        Ok(Self { items })
    }

    /// Build a catalog from already-parsed items (test and seed paths)
    #[must_use]
    pub fn from_items(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    /// All items in stable catalog order
    #[must_use]
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Number of catalog entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
