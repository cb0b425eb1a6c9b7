// ABOUTME: Shared fixtures for integration tests: pretrained model stand-ins and test resources
// ABOUTME: Builds small scalers, centroids, catalogs, and classifier artifacts with known geometry

#![allow(dead_code)]

pub mod axum_test;

use cardiofit_server::config::environment::ServerConfig;
use cardiofit_server::intelligence::features::{RECOMMENDATION_FEATURES, RISK_FEATURES};
use cardiofit_server::intelligence::{GradientBoostedClassifier, RecommendationModel, RiskModel};
use cardiofit_server::model_cache::ModelCache;
use cardiofit_server::models::{CatalogItem, ClusterModel, ExerciseCatalog, ScalerParams};
use cardiofit_server::resources::ServerResources;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;

/// Identity scaler over the recommendation feature order
pub fn recommendation_scaler() -> ScalerParams {
    ScalerParams {
        feature_names: RECOMMENDATION_FEATURES.iter().map(|s| (*s).into()).collect(),
        mean: vec![0.0; 8],
        scale: vec![1.0; 8],
    }
}

/// Identity scaler over the canonical risk feature order
pub fn risk_scaler() -> ScalerParams {
    ScalerParams {
        feature_names: RISK_FEATURES.iter().map(|s| (*s).into()).collect(),
        mean: vec![0.0; 10],
        scale: vec![1.0; 10],
    }
}

/// Four centroids: generic (0), plyometric-heavy (1), strength (2), and an
/// outlier cluster (3) that owns no catalog items
pub fn cluster_model() -> ClusterModel {
    ClusterModel {
        centroids: vec![
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![10.0, 10.0, 10.0, 10.0, 0.0, 1.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0],
            vec![-50.0, -50.0, -50.0, -50.0, 0.0, 0.0, 0.0, 0.0],
        ],
    }
}

fn catalog_item(title: &str, features: [f64; 8], cluster: usize) -> CatalogItem {
    CatalogItem {
        title: title.into(),
        description: format!("{title} description"),
        features: features.to_vec(),
        cluster,
    }
}

/// Five items: three in cluster 2 at increasing distance from the strength
/// centroid, one each in clusters 0 and 1
pub fn exercise_catalog() -> ExerciseCatalog {
    ExerciseCatalog::from_items(vec![
        catalog_item("Bench Press", [1.0, 1.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0], 2),
        catalog_item("Deadlift", [1.0, 1.0, 1.0, 3.0, 0.0, 0.0, 1.0, 0.0], 2),
        catalog_item(
            "Overhead Press",
            [1.0, 1.0, 1.0, 5.0, 0.0, 0.0, 1.0, 0.0],
            2,
        ),
        catalog_item("Jogging", [0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0], 0),
        catalog_item("Box Jump", [10.0, 10.0, 10.0, 10.0, 0.0, 1.0, 0.0, 0.0], 1),
    ])
}

/// Classifier artifact: single split on standardized `ap_hi` (index 1),
/// below 140 scores label 0, at or above scores label 1
pub fn risk_classifier_artifact() -> serde_json::Value {
    json!({
        "base_score": 0.0,
        "threshold": 0.5,
        "trees": [{
            "nodes": [
                { "feature": 1, "threshold": 140.0, "left": 1, "right": 2 },
                { "value": -2.0 },
                { "value": 2.0 }
            ]
        }]
    })
}

/// Build the recommendation model over the shared fixtures
pub fn recommendation_model() -> RecommendationModel {
    RecommendationModel::new(recommendation_scaler(), cluster_model(), exercise_catalog())
        .expect("fixture recommendation model is valid")
}

/// Build the risk model over the shared fixtures
pub fn risk_model() -> RiskModel {
    let classifier = GradientBoostedClassifier::from_json(
        "risk_model.json",
        &serde_json::to_vec(&risk_classifier_artifact()).expect("fixture serializes"),
    )
    .expect("fixture classifier is valid");
    RiskModel::new(risk_scaler(), Box::new(classifier)).expect("fixture risk model is valid")
}

/// Assemble full server resources over the fixture models
pub fn test_resources() -> Arc<ServerResources> {
    let cache = ModelCache::new(recommendation_model(), risk_model());
    Arc::new(ServerResources::new(cache, Arc::new(ServerConfig::default())))
}

/// A recommendation payload assigned to the strength cluster
pub fn strength_query() -> serde_json::Value {
    json!({
        "Cardiovascular_Safe": 1,
        "BodyPart_Category_Encoded": 1,
        "Equipment_Encoded": 1,
        "Level": 1,
        "Type": 3
    })
}

/// A complete risk payload with the given systolic pressure
pub fn risk_payload(ap_hi: f64) -> serde_json::Value {
    json!({
        "age": 52, "ap_hi": ap_hi, "ap_lo": 80, "height": 170, "weight": 72,
        "gender": 2, "cholesterol": 2, "gluc": 1, "smoke": 0, "alco": 0, "active": 1
    })
}

/// Write the five artifact files a model-cache load expects under `dir`
pub fn write_test_assets(dir: &Path) {
    let models_dir = dir.join("models");
    std::fs::create_dir_all(&models_dir).expect("create models dir");

    std::fs::write(
        models_dir.join("scaler.json"),
        serde_json::to_vec(&recommendation_scaler()).expect("scaler serializes"),
    )
    .expect("write scaler");

    std::fs::write(
        models_dir.join("kmeans_model.json"),
        serde_json::to_vec(&cluster_model()).expect("cluster model serializes"),
    )
    .expect("write cluster model");

    std::fs::write(dir.join("dataset_clustering.csv"), catalog_csv()).expect("write catalog");

    std::fs::write(
        models_dir.join("risk_scaler.json"),
        serde_json::to_vec(&risk_scaler()).expect("risk scaler serializes"),
    )
    .expect("write risk scaler");

    std::fs::write(
        models_dir.join("risk_model.json"),
        serde_json::to_vec(&risk_classifier_artifact()).expect("classifier serializes"),
    )
    .expect("write risk model");
}

/// The fixture catalog rendered as the clustered-dataset CSV
pub fn catalog_csv() -> String {
    let mut out = String::from(
        "Title,Desc,Cardiovascular_Safe,BodyPart_Category_Encoded,Equipment_Encoded,Level,\
         Type_Cardio,Type_Plyometrics,Type_Strength,Type_Stretching,Cluster\n",
    );
    for item in exercise_catalog().items() {
        let features = item
            .features
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&format!(
            "{},{},{},{}\n",
            item.title, item.description, features, item.cluster
        ));
    }
    out
}
