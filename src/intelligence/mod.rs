// ABOUTME: Domain intelligence layer: feature construction and the two inference pipelines
// ABOUTME: Groups feature building, recommendation ranking, and risk classification
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Intelligence Module
//!
//! The inference side of the service. Both pipelines share one shape: build a
//! fixed-order feature vector from the raw request attributes, standardize it
//! with the fitted scaler, then infer — nearest-centroid assignment plus
//! distance ranking for recommendations, gradient-boosted classification for
//! risk.

/// Feature-vector construction from raw request attributes
pub mod features;

/// Cluster-constrained candidate ranking for exercise recommendations
pub mod recommendation;

/// Cardiovascular risk classification behind the `Classifier` capability
pub mod risk;

pub use recommendation::{Recommendation, RecommendationModel};
pub use risk::{Classifier, GradientBoostedClassifier, RiskModel};
