// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Live agent discovery.
//!
//! - [`probe`]: is the agent's command present, and which version is it
//! - [`health`]: does the agent answer an ACP hello
//! - [`catalog`]: the cached, concurrently probed view over all agents
//!
//! Probe and health failures are reported as [`AgentStatus`] values and
//! [`HealthReport`]s; the only error a discovery pass returns is a
//! [`DefinitionReadError`](crate::error::DefinitionReadError).

pub mod catalog;
pub mod env;
pub mod health;
pub mod probe;
pub mod types;

pub use catalog::{installation_info, AgentCatalog, InstallationInfo};
pub use env::{has_any_credential, set_credentials, EnvSource, ProcessEnv};
pub use health::{HealthChecker, HEALTH_TIMEOUT, HELLO_REQUEST};
pub use probe::{
    classify, extract_version, is_launcher, AvailabilityProbe, Prober, LAUNCHERS, PROBE_TIMEOUT,
};
pub use types::{AgentStatus, DiscoveredAgent, HealthReport, ProbeReport};
