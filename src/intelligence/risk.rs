// ABOUTME: Cardiovascular risk pipeline: classifier capability and gradient-boosted implementation
// ABOUTME: Walks a JSON-encoded decision-tree ensemble to a 0/1 risk label
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Risk Classifier
//!
//! The risk endpoint's inference side. The trained model is an opaque
//! capability behind [`Classifier`]: vector in, discrete label out. The
//! provided implementation evaluates a gradient-boosted decision ensemble
//! exported to JSON by the training pipeline (per-tree root-to-leaf walk,
//! leaf sum plus base score through a logistic sigmoid, thresholded to a
//! label).

use crate::errors::{AppError, AppResult};
use crate::intelligence::features::{self, RISK_FEATURES};
use crate::models::ScalerParams;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Opaque scoring capability mapping a standardized vector to a discrete label
pub trait Classifier: Send + Sync {
    /// Score a standardized feature vector into a 0/1 label
    ///
    /// # Errors
    ///
    /// Returns an inference error when the vector cannot be evaluated
    /// (malformed dimensionality for the trained model).
    fn classify(&self, standardized: &[f64]) -> AppResult<u8>;
}

fn default_threshold() -> f64 {
    0.5
}

/// One node of a decision tree: an internal split or a leaf contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    /// Internal split: `x[feature] < threshold` goes left, else right
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    /// Leaf contribution added to the ensemble sum
    Leaf { value: f64 },
}

/// A single decision tree, nodes indexed with the root at 0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk the tree from the root to a leaf for the given vector
    fn evaluate(&self, x: &[f64]) -> AppResult<f64> {
        let mut index = 0usize;
        // A well-formed tree reaches a leaf within nodes.len() steps
        for _ in 0..=self.nodes.len() {
            match self.nodes.get(index) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let value = x.get(*feature).ok_or_else(|| {
                        AppError::inference(format!(
                            "tree split references feature {feature} but vector has {} dimensions",
                            x.len()
                        ))
                    })?;
                    index = if *value < *threshold { *left } else { *right };
                }
                None => {
                    return Err(AppError::inference(format!(
                        "tree walk reached invalid node index {index}"
                    )))
                }
            }
        }
        Err(AppError::inference("tree walk did not reach a leaf"))
    }
}

/// Gradient-boosted decision ensemble loaded from a JSON artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradientBoostedClassifier {
    /// Bias added to the summed leaf contributions
    base_score: f64,
    /// Probability cutoff separating label 0 from label 1
    #[serde(default = "default_threshold")]
    threshold: f64,
    trees: Vec<DecisionTree>,
}

impl GradientBoostedClassifier {
    /// Parse a classifier artifact
    ///
    /// # Errors
    ///
    /// Returns a model-validation error for malformed JSON or an empty tree.
    pub fn from_json(name: &str, bytes: &[u8]) -> AppResult<Self> {
        let model: Self = serde_json::from_slice(bytes)
            .map_err(|e| AppError::model_invalid(format!("{name}: {e}")).with_source(e))?;

        if let Some(idx) = model.trees.iter().position(|t| t.nodes.is_empty()) {
            return Err(AppError::model_invalid(format!(
                "{name}: tree {idx} has no nodes"
            )));
        }
        Ok(model)
    }

    /// Positive-class probability for a standardized vector
    fn probability(&self, standardized: &[f64]) -> AppResult<f64> {
        let mut margin = self.base_score;
        for tree in &self.trees {
            margin += tree.evaluate(standardized)?;
        }
        Ok(1.0 / (1.0 + (-margin).exp()))
    }
}

impl Classifier for GradientBoostedClassifier {
    fn classify(&self, standardized: &[f64]) -> AppResult<u8> {
        let probability = self.probability(standardized)?;
        Ok(u8::from(probability >= self.threshold))
    }
}

/// The pretrained risk model: scaler plus the classifier capability
pub struct RiskModel {
    scaler: ScalerParams,
    classifier: Box<dyn Classifier>,
}

impl RiskModel {
    /// Assemble and cross-validate the risk model parts.
    ///
    /// Every feature the scaler declares must be one the risk builder can
    /// produce, so per-request permutation cannot fail.
    ///
    /// # Errors
    ///
    /// Returns a model-validation error if the scaler declares an unknown
    /// feature name.
    pub fn new(scaler: ScalerParams, classifier: Box<dyn Classifier>) -> AppResult<Self> {
        for name in &scaler.feature_names {
            if !RISK_FEATURES.contains(&name.as_str()) {
                return Err(AppError::model_invalid(format!(
                    "risk scaler declares unknown feature {name}"
                )));
            }
        }
        Ok(Self { scaler, classifier })
    }

    /// Number of features the scaler expects
    #[must_use]
    pub fn feature_count(&self) -> usize {
        self.scaler.len()
    }

    /// Run the full risk pipeline for one request payload.
    ///
    /// # Errors
    ///
    /// Returns a validation error for absent/non-numeric required fields and
    /// an inference error for evaluation failures.
    pub fn predict(&self, payload: &Value) -> AppResult<u8> {
        let vector = features::risk_vector(payload, &self.scaler)?;
        let standardized = self.scaler.transform(&vector)?;
        self.classifier.classify(&standardized)
    }
}

impl std::fmt::Debug for RiskModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RiskModel")
            .field("features", &self.scaler.feature_names)
            .finish_non_exhaustive()
    }
}
