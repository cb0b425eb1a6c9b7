// ABOUTME: Feature-vector builders mapping raw request attributes to fixed-order numeric vectors
// ABOUTME: Covers the one-hot exercise type table and the derived risk features (BMI, re-encodings)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Feature Vector Builders
//!
//! Raw request attributes arrive as JSON objects; each builder turns them
//! into a numeric vector whose positions exactly match the corresponding
//! scaler's feature order. A required field that is absent fails the request
//! with a missing-field validation error — the only hard validation step.
//! Out-of-range values are not rejected; they flow through to
//! standardization and inference.

use crate::errors::{AppError, AppResult};
use crate::models::ScalerParams;
use serde_json::Value;

/// Feature order the recommendation scaler is fitted on: the four scalar
/// attributes followed by the one-hot expansion of the exercise type.
pub const RECOMMENDATION_FEATURES: [&str; 8] = [
    "Cardiovascular_Safe",
    "BodyPart_Category_Encoded",
    "Equipment_Encoded",
    "Level",
    "Type_Cardio",
    "Type_Plyometrics",
    "Type_Strength",
    "Type_Stretching",
];

/// Feature names the risk builder can produce. The risk scaler may declare
/// them in any order; the builder permutes to match.
pub const RISK_FEATURES: [&str; 10] = [
    "age",
    "ap_hi",
    "ap_lo",
    "imc",
    "gender_encoded",
    "cholesterol_encoded",
    "gluc_encoded",
    "smoke",
    "alco",
    "active",
];

/// One-hot encoding for the categorical exercise `Type`.
///
/// Codes 1-4 map to Cardio, Plyometrics, Strength, and Stretching. Code 0,
/// a missing field, and any unrecognized code all take the all-zero default
/// encoding — unknown codes never fail the request.
#[must_use]
pub fn type_one_hot(code: Option<i64>) -> [f64; 4] {
    match code {
        Some(1) => [1.0, 0.0, 0.0, 0.0],
        Some(2) => [0.0, 1.0, 0.0, 0.0],
        Some(3) => [0.0, 0.0, 1.0, 0.0],
        Some(4) => [0.0, 0.0, 0.0, 1.0],
        _ => [0.0, 0.0, 0.0, 0.0],
    }
}

/// Extract a required numeric field from the request payload
fn required_f64(payload: &Value, field: &str) -> AppResult<f64> {
    let value = payload
        .get(field)
        .ok_or_else(|| AppError::missing_field(field))?;
    value
        .as_f64()
        .ok_or_else(|| AppError::invalid_input(format!("Field {field} must be numeric")))
}

/// Build the 8-dimension recommendation query vector.
///
/// Output order matches [`RECOMMENDATION_FEATURES`]: the four required
/// scalar fields concatenated with the 4-length one-hot `Type` expansion.
///
/// # Errors
///
/// Returns a validation error if a required field is absent or non-numeric.
pub fn recommendation_vector(payload: &Value) -> AppResult<Vec<f64>> {
    let mut vector = Vec::with_capacity(RECOMMENDATION_FEATURES.len());
    vector.push(required_f64(payload, "Cardiovascular_Safe")?);
    vector.push(required_f64(payload, "BodyPart_Category_Encoded")?);
    vector.push(required_f64(payload, "Equipment_Encoded")?);
    vector.push(required_f64(payload, "Level")?);

    let type_code = payload.get("Type").and_then(Value::as_i64);
    vector.extend_from_slice(&type_one_hot(type_code));

    Ok(vector)
}

/// Build the risk feature vector in the order the risk scaler declares.
///
/// Computes the derived and re-encoded features (`imc` from height/weight,
/// `gender_encoded` from the 2-valued gender, 0-based `cholesterol_encoded`
/// and `gluc_encoded`), then permutes the named values to the scaler's
/// declared column order rather than assuming any fixed layout.
///
/// # Errors
///
/// Returns a validation error for an absent or non-numeric required field,
/// and an inference error if the scaler declares a feature the builder does
/// not produce (prevented at model load time).
pub fn risk_vector(payload: &Value, scaler: &ScalerParams) -> AppResult<Vec<f64>> {
    let age = required_f64(payload, "age")?;
    let ap_hi = required_f64(payload, "ap_hi")?;
    let ap_lo = required_f64(payload, "ap_lo")?;
    let height = required_f64(payload, "height")?;
    let weight = required_f64(payload, "weight")?;
    let gender = required_f64(payload, "gender")?;
    let cholesterol = required_f64(payload, "cholesterol")?;
    let gluc = required_f64(payload, "gluc")?;
    let smoke = required_f64(payload, "smoke")?;
    let alco = required_f64(payload, "alco")?;
    let active = required_f64(payload, "active")?;

    // Body-mass index from height in centimeters
    let height_m = height / 100.0;
    let imc = weight / (height_m * height_m);

    // Gender arrives 2-valued; cholesterol and glucose arrive as 1-based ordinals
    let gender_encoded = if (gender - 2.0).abs() < f64::EPSILON {
        1.0
    } else {
        0.0
    };
    let cholesterol_encoded = cholesterol - 1.0;
    let gluc_encoded = gluc - 1.0;

    let lookup = |name: &str| -> Option<f64> {
        match name {
            "age" => Some(age),
            "ap_hi" => Some(ap_hi),
            "ap_lo" => Some(ap_lo),
            "imc" => Some(imc),
            "gender_encoded" => Some(gender_encoded),
            "cholesterol_encoded" => Some(cholesterol_encoded),
            "gluc_encoded" => Some(gluc_encoded),
            "smoke" => Some(smoke),
            "alco" => Some(alco),
            "active" => Some(active),
            _ => None,
        }
    };

    scaler
        .feature_names
        .iter()
        .map(|name| {
            lookup(name).ok_or_else(|| {
                AppError::inference(format!("risk scaler declares unknown feature {name}"))
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use serde_json::json;

    #[test]
    fn test_one_hot_known_codes_have_single_one() {
        for code in 1..=4 {
            let encoding = type_one_hot(Some(code));
            assert_eq!(encoding.iter().filter(|v| **v == 1.0).count(), 1);
            assert_eq!(encoding.iter().filter(|v| **v == 0.0).count(), 3);
        }
    }

    #[test]
    fn test_one_hot_unknown_matches_default() {
        assert_eq!(type_one_hot(Some(0)), [0.0; 4]);
        assert_eq!(type_one_hot(Some(99)), type_one_hot(Some(0)));
        assert_eq!(type_one_hot(Some(-3)), type_one_hot(Some(0)));
        assert_eq!(type_one_hot(None), type_one_hot(Some(0)));
    }

    #[test]
    fn test_recommendation_vector_layout() {
        let payload = json!({
            "Cardiovascular_Safe": 1,
            "BodyPart_Category_Encoded": 5,
            "Equipment_Encoded": 2,
            "Level": 1,
            "Type": 3
        });
        let vector = recommendation_vector(&payload).unwrap();
        assert_eq!(vector, vec![1.0, 5.0, 2.0, 1.0, 0.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_recommendation_vector_missing_field() {
        let payload = json!({ "Cardiovascular_Safe": 1 });
        let err = recommendation_vector(&payload).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_risk_vector_follows_scaler_permutation() {
        let scaler = ScalerParams {
            feature_names: vec!["ap_hi".into(), "age".into(), "imc".into()],
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        let payload = json!({
            "age": 50, "ap_hi": 120, "ap_lo": 80, "height": 170, "weight": 70,
            "gender": 1, "cholesterol": 1, "gluc": 1, "smoke": 0, "alco": 0, "active": 1
        });

        let vector = risk_vector(&payload, &scaler).unwrap();
        assert_eq!(vector[0], 120.0);
        assert_eq!(vector[1], 50.0);
        let expected_imc = 70.0 / (1.7_f64 * 1.7);
        assert!((vector[2] - expected_imc).abs() < 1e-9);
    }

    #[test]
    fn test_risk_vector_reencodes_ordinals() {
        let scaler = ScalerParams {
            feature_names: vec![
                "gender_encoded".into(),
                "cholesterol_encoded".into(),
                "gluc_encoded".into(),
            ],
            mean: vec![0.0; 3],
            scale: vec![1.0; 3],
        };
        let payload = json!({
            "age": 50, "ap_hi": 120, "ap_lo": 80, "height": 170, "weight": 70,
            "gender": 2, "cholesterol": 3, "gluc": 2, "smoke": 0, "alco": 0, "active": 1
        });

        let vector = risk_vector(&payload, &scaler).unwrap();
        assert_eq!(vector, vec![1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_risk_vector_missing_weight() {
        let scaler = ScalerParams {
            feature_names: vec!["age".into()],
            mean: vec![0.0],
            scale: vec![1.0],
        };
        let payload = json!({
            "age": 50, "ap_hi": 120, "ap_lo": 80, "height": 170,
            "gender": 1, "cholesterol": 1, "gluc": 1, "smoke": 0, "alco": 0, "active": 1
        });

        let err = risk_vector(&payload, &scaler).unwrap_err();
        assert_eq!(err.code, crate::errors::ErrorCode::MissingRequiredField);
        assert_eq!(err.context.details["field"], "weight");
    }
}
