// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Probe and discovery result types.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::agents::{AgentIdentity, AgentModel, CommandLine, DeclaredStatus, Provenance};

/// Observed status of an agent for one discovery pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentStatus {
    Available,
    NotInstalled,
    NotConfigured,
    Error,
}

impl AgentStatus {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::NotInstalled => write!(f, "not_installed"),
            Self::NotConfigured => write!(f, "not_configured"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// Raw outcome of probing one candidate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeReport {
    pub installed: bool,
    /// Best-effort version text. Empty when unknown, `"timeout"` when the
    /// check command did not finish in time.
    pub version: String,
    /// The command that was found: the primary, or the winning alternate.
    pub command: CommandLine,
    /// Resolved path of the command's program, when it is on the search path.
    pub executable: Option<PathBuf>,
    /// One entry per attempt that did not succeed, in attempt order.
    pub failures: Vec<String>,
    /// Set when no attempt could be judged at all (spawn errors only).
    pub error: Option<String>,
}

impl ProbeReport {
    pub fn not_installed(command: CommandLine, failures: Vec<String>) -> Self {
        Self {
            installed: false,
            version: String::new(),
            command,
            executable: None,
            failures,
            error: None,
        }
    }
}

/// One agent as seen by the latest discovery pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveredAgent {
    pub identity: AgentIdentity,
    pub name: String,
    pub short_name: String,
    pub command: CommandLine,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executable: Option<PathBuf>,
    pub status: AgentStatus,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub credential_env_vars: Vec<String>,
    pub has_credentials: bool,

    pub declared_status: DeclaredStatus,
    pub capabilities: Vec<String>,
    pub description: String,
    pub provenance: Provenance,
    pub models: &'static [AgentModel],
    pub icon: &'static str,
    pub color: &'static str,
}

impl DiscoveredAgent {
    pub fn is_available(&self) -> bool {
        self.status.is_available()
    }

    /// Case-insensitive short-name comparison.
    pub fn matches_short_name(&self, short_name: &str) -> bool {
        self.short_name.eq_ignore_ascii_case(short_name)
    }
}

/// Outcome of a health check. Failures are carried in `message`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub healthy: bool,
    pub message: String,
}

impl HealthReport {
    pub fn healthy(message: impl Into<String>) -> Self {
        Self {
            healthy: true,
            message: message.into(),
        }
    }

    pub fn unhealthy(message: impl Into<String>) -> Self {
        Self {
            healthy: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AgentStatus::NotConfigured).unwrap(),
            r#""not_configured""#
        );
        assert_eq!(AgentStatus::NotInstalled.to_string(), "not_installed");
        assert!(AgentStatus::Available.is_available());
        assert!(!AgentStatus::Error.is_available());
    }

    #[test]
    fn test_health_report_constructors() {
        assert!(HealthReport::healthy("ok").healthy);
        let bad = HealthReport::unhealthy("Agent not found");
        assert!(!bad.healthy);
        assert_eq!(bad.message, "Agent not found");
    }
}
