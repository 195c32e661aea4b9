// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Error types for agentscout.
//!
//! This module provides strongly-typed errors for the parts of the crate that
//! can actually fail, using `thiserror` for ergonomic error definitions and
//! `anyhow` for propagation at the binary edge.
//!
//! Probe and health-check failures are deliberately absent here: they are
//! reported as [`AgentStatus`](crate::discovery::AgentStatus) values and
//! [`HealthReport`](crate::discovery::HealthReport)s instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading locally declared agent definitions.
///
/// This is the only error a discovery pass can return.
#[derive(Error, Debug)]
pub enum DefinitionReadError {
    #[error("Failed to read agent definition {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed agent definition {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Invalid agent definition {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("Agent identity '{identity}' is declared by both {first} and {second}")]
    DuplicateIdentity {
        identity: String,
        first: PathBuf,
        second: PathBuf,
    },
}

impl DefinitionReadError {
    /// Create a parse error for a definition file.
    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Create a validation error for a definition file.
    pub fn invalid(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Invalid {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Path of the offending file.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } | Self::Invalid { path, .. } => path,
            Self::DuplicateIdentity { second, .. } => second,
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },

    #[error("IO error reading config: {0}")]
    IoError(String),

    #[error("YAML parsing error: {0}")]
    YamlError(String),

    #[error("JSON parsing error: {0}")]
    JsonError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(err.to_string()),
            _ => Self::IoError(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::YamlError(err.to_string())
    }
}

/// Errors that can occur in the local credential store.
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Auth storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Auth storage serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No home directory available for auth storage")]
    NoHomeDir,
}

/// Result type alias using anyhow for flexible error handling.
pub type Result<T> = anyhow::Result<T>;
