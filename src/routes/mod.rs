// ABOUTME: Route module organization for the Cardiofit HTTP endpoints
// ABOUTME: Provides centralized route definitions organized by prediction domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Route module for the Cardiofit server
//!
//! This module organizes all HTTP routes by domain. Each domain module
//! contains only route definitions and thin handler functions that delegate
//! to the intelligence layer.

/// Health check and system status routes
pub mod health;
/// Exercise recommendation prediction routes
pub mod recommendation;
/// Cardiovascular risk prediction routes
pub mod risk;

/// Health check route handlers
pub use health::HealthRoutes;
/// Recommendation route handlers
pub use recommendation::RecommendationRoutes;
/// Risk route handlers
pub use risk::RiskRoutes;
