// ABOUTME: Unified error types with standard error codes and HTTP response formatting
// ABOUTME: Covers startup asset failures, request validation, and inference errors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! # Unified Error Handling System
//!
//! This module provides a centralized error handling system for the Cardiofit
//! server. It defines standard error types, error codes, and HTTP response
//! formatting to ensure consistent error handling across all modules and APIs.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    // Validation (3000-3999)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput = 3000,
    #[serde(rename = "MISSING_REQUIRED_FIELD")]
    MissingRequiredField = 3001,

    // Model artifacts (5000-5999)
    #[serde(rename = "ASSET_ERROR")]
    AssetError = 5000,
    #[serde(rename = "ASSET_MISSING")]
    AssetMissing = 5001,
    #[serde(rename = "MODEL_INVALID")]
    ModelInvalid = 5002,

    // Configuration (6000-6999)
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError = 6000,

    // Internal Errors (9000-9999)
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError = 9000,
    #[serde(rename = "INFERENCE_ERROR")]
    InferenceError = 9001,
    #[serde(rename = "SERIALIZATION_ERROR")]
    SerializationError = 9002,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            ErrorCode::InvalidInput | ErrorCode::MissingRequiredField => 400,

            // 500 Internal Server Error
            ErrorCode::AssetError
            | ErrorCode::AssetMissing
            | ErrorCode::ModelInvalid
            | ErrorCode::ConfigError
            | ErrorCode::InternalError
            | ErrorCode::InferenceError
            | ErrorCode::SerializationError => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidInput => "The provided input is invalid",
            ErrorCode::MissingRequiredField => "A required field is missing from the request",
            ErrorCode::AssetError => "A model artifact could not be retrieved",
            ErrorCode::AssetMissing => "A required model artifact is missing or empty",
            ErrorCode::ModelInvalid => "A model artifact failed validation",
            ErrorCode::ConfigError => "Configuration error encountered",
            ErrorCode::InternalError => "An internal server error occurred",
            ErrorCode::InferenceError => "Model inference failed for this request",
            ErrorCode::SerializationError => "Data serialization/deserialization failed",
        }
    }
}

/// Additional context that can be attached to errors
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorContext {
    /// Request ID for tracing
    pub request_id: Option<String>,
    /// Additional key-value context
    pub details: serde_json::Value,
}

impl Default for ErrorContext {
    fn default() -> Self {
        Self {
            request_id: None,
            details: serde_json::Value::Object(serde_json::Map::new()),
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context
    pub context: ErrorContext,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: ErrorContext::default(),
            source: None,
        }
    }

    /// Add a request ID to the error context
    #[must_use]
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.context.request_id = Some(request_id.into());
        self
    }

    /// Add details to the error context
    #[must_use]
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.context.details = details;
        self
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorResponseDetails,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponseDetails {
    pub code: ErrorCode,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
    #[serde(skip_serializing_if = "serde_json::Value::is_null")]
    pub details: serde_json::Value,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        Self {
            error: ErrorResponseDetails {
                code: error.code,
                message: error.message,
                request_id: error.context.request_id,
                details: error.context.details,
            },
        }
    }
}

/// Render errors as the standard JSON envelope with the mapped status code
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(ErrorResponse::from(self))).into_response()
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Required request field absent
    pub fn missing_field(field: impl Into<String>) -> Self {
        let field = field.into();
        Self::new(
            ErrorCode::MissingRequiredField,
            format!("Missing required field: {field}"),
        )
        .with_details(serde_json::json!({ "field": field }))
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Artifact retrieval failure
    pub fn asset(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::AssetError,
            format!("{}: {}", name.into(), message.into()),
        )
    }

    /// Artifact missing or empty
    pub fn asset_missing(name: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::AssetMissing,
            format!("Asset {} is missing or empty", name.into()),
        )
    }

    /// Artifact failed validation at load time
    pub fn model_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ModelInvalid, message)
    }

    /// Inference failure inside the pipeline
    pub fn inference(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InferenceError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

/// Conversion from anyhow::Error to `AppError`
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        match error.source() {
            Some(source) => AppError::new(ErrorCode::InternalError, error.to_string())
                .with_details(serde_json::json!({
                    "source": source.to_string()
                })),
            None => AppError::new(ErrorCode::InternalError, error.to_string()),
        }
    }
}
