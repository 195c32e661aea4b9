// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! agentscout - find out which ACP coding agents are usable on this machine.
//!
//! The crate merges a built-in registry of Agent Client Protocol agents with
//! locally declared agent definitions, probes each agent's command for
//! presence and version, gates on the credential environment variables each
//! agent needs, and can run a one-line JSON-RPC hello handshake against an
//! available agent.
//!
//! # Architecture
//!
//! - [`agents`] - Agent records: identities, the built-in registry, local definition files, merging
//! - [`discovery`] - Probing, classification, health checks, and the cached catalog
//! - [`auth`] - File-backed local credential store
//! - [`config`] - Configuration loading and merging
//! - [`telemetry`] - Tracing subscriber setup
//! - [`cli`] - Command implementations for the `agentscout` binary
//! - [`error`] - Error types and result aliases
//!
//! # Example
//!
//! ```rust,ignore
//! use agentscout::agents::DefinitionSource;
//! use agentscout::discovery::AgentCatalog;
//!
//! let catalog = AgentCatalog::with_defaults(DefinitionSource::empty());
//! let agents = catalog.discover_all(false).await?;
//! for agent in agents.iter().filter(|a| a.is_available()) {
//!     println!("{} {}", agent.short_name, agent.version);
//! }
//! ```

pub mod agents;
pub mod auth;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod telemetry;

// Re-export commonly used types at crate root
pub use agents::{AgentIdentity, AgentRecord, CommandLine, DefinitionSource};
pub use discovery::{AgentCatalog, AgentStatus, DiscoveredAgent, HealthReport};
pub use error::{AuthError, ConfigError, DefinitionReadError, Result};

/// agentscout version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_public_exports() {
        let identity = AgentIdentity::new("opencode.ai").unwrap();
        assert_eq!(identity.as_str(), "opencode.ai");
        assert!(AgentStatus::Available.is_available());
    }
}
