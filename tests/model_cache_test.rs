// ABOUTME: Integration tests for model cache population from an asset store
// ABOUTME: Covers successful load, missing/empty artifacts, and cross-validation rejections
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Model Cache Population Tests
//!
//! Loads the full artifact set from a temporary local asset store and checks
//! the startup contract: a missing, empty, or inconsistent artifact must
//! fail the load before any request could be served.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use anyhow::Result;
use cardiofit_server::assets::LocalAssetStore;
use cardiofit_server::config::environment::AssetConfig;
use cardiofit_server::errors::ErrorCode;
use cardiofit_server::model_cache::ModelCache;
use cardiofit_server::models::ScalerParams;

mod helpers;

// ============================================================================
// Successful population
// ============================================================================

#[tokio::test]
async fn test_load_populates_all_models() -> Result<()> {
    let dir = tempfile::tempdir()?;
    helpers::write_test_assets(dir.path());

    let store = LocalAssetStore::new(dir.path());
    let cache = ModelCache::load(&store, &AssetConfig::default()).await?;

    assert_eq!(cache.recommendation.feature_count(), 8);
    assert_eq!(cache.recommendation.cluster_count(), 4);
    assert_eq!(cache.recommendation.catalog_size(), 5);
    assert_eq!(cache.risk.feature_count(), 10);

    Ok(())
}

#[tokio::test]
async fn test_loaded_cache_serves_predictions() -> Result<()> {
    let dir = tempfile::tempdir()?;
    helpers::write_test_assets(dir.path());

    let store = LocalAssetStore::new(dir.path());
    let cache = ModelCache::load(&store, &AssetConfig::default()).await?;

    let recommendations = cache.recommendation.recommend(&helpers::strength_query())?;
    assert_eq!(recommendations[0].title, "Bench Press");

    assert_eq!(cache.risk.predict(&helpers::risk_payload(165.0))?, 1);
    Ok(())
}

// ============================================================================
// Retrievability failures are fatal
// ============================================================================

#[tokio::test]
async fn test_missing_artifact_aborts_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    helpers::write_test_assets(dir.path());
    std::fs::remove_file(dir.path().join("models/kmeans_model.json"))?;

    let store = LocalAssetStore::new(dir.path());
    let err = ModelCache::load(&store, &AssetConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::AssetMissing);
    Ok(())
}

#[tokio::test]
async fn test_empty_artifact_aborts_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    helpers::write_test_assets(dir.path());
    std::fs::write(dir.path().join("dataset_clustering.csv"), b"")?;

    let store = LocalAssetStore::new(dir.path());
    let err = ModelCache::load(&store, &AssetConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::AssetMissing);
    Ok(())
}

// ============================================================================
// Cross-validation rejections
// ============================================================================

#[tokio::test]
async fn test_degenerate_scaler_rejected_at_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    helpers::write_test_assets(dir.path());

    let mut scaler = helpers::recommendation_scaler();
    scaler.scale[3] = 0.0;
    std::fs::write(
        dir.path().join("models/scaler.json"),
        serde_json::to_vec(&scaler)?,
    )?;

    let store = LocalAssetStore::new(dir.path());
    let err = ModelCache::load(&store, &AssetConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ModelInvalid);
    Ok(())
}

#[tokio::test]
async fn test_centroid_dimension_mismatch_rejected_at_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    helpers::write_test_assets(dir.path());

    let mut clusters = helpers::cluster_model();
    clusters.centroids[1].pop();
    std::fs::write(
        dir.path().join("models/kmeans_model.json"),
        serde_json::to_vec(&clusters)?,
    )?;

    let store = LocalAssetStore::new(dir.path());
    let err = ModelCache::load(&store, &AssetConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ModelInvalid);
    Ok(())
}

#[tokio::test]
async fn test_out_of_range_catalog_label_rejected_at_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    helpers::write_test_assets(dir.path());

    // Relabel one row beyond the number of centroids
    let csv = helpers::catalog_csv().replace(
        "Jogging description,0,0,0,0,1,0,0,0,0",
        "Jogging description,0,0,0,0,1,0,0,0,9",
    );
    std::fs::write(dir.path().join("dataset_clustering.csv"), csv)?;

    let store = LocalAssetStore::new(dir.path());
    let err = ModelCache::load(&store, &AssetConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ModelInvalid);
    Ok(())
}

#[tokio::test]
async fn test_unknown_risk_feature_rejected_at_load() -> Result<()> {
    let dir = tempfile::tempdir()?;
    helpers::write_test_assets(dir.path());

    let bad_scaler = ScalerParams {
        feature_names: vec!["age".into(), "resting_hr".into()],
        mean: vec![0.0; 2],
        scale: vec![1.0; 2],
    };
    std::fs::write(
        dir.path().join("models/risk_scaler.json"),
        serde_json::to_vec(&bad_scaler)?,
    )?;

    let store = LocalAssetStore::new(dir.path());
    let err = ModelCache::load(&store, &AssetConfig::default())
        .await
        .unwrap_err();

    assert_eq!(err.code, ErrorCode::ModelInvalid);
    Ok(())
}
