// ABOUTME: Configuration module organization for the Cardiofit server
// ABOUTME: Groups environment parsing and runtime configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Async-IO.org

//! Configuration management for the Cardiofit server

/// Environment-based configuration management
pub mod environment;

pub use environment::{AssetConfig, AssetStoreUrl, LogLevel, ServerConfig};
