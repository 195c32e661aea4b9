// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Command-line surface over the agent catalog and auth store.

pub mod agents;
pub mod auth;

use colored::{ColoredString, Colorize};

use crate::discovery::AgentStatus;

pub use agents::AgentsCommand;
pub use auth::AuthCommand;

/// Output format for commands
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

/// Colored status label.
pub fn status_label(status: AgentStatus) -> ColoredString {
    match status {
        AgentStatus::Available => "available".green(),
        AgentStatus::NotInstalled => "not installed".dimmed(),
        AgentStatus::NotConfigured => "not configured".yellow(),
        AgentStatus::Error => "error".red(),
    }
}

/// Status glyph shown at the start of a list row.
pub fn status_marker(status: AgentStatus) -> ColoredString {
    match status {
        AgentStatus::Available => "✓".green(),
        AgentStatus::NotInstalled => "·".dimmed(),
        AgentStatus::NotConfigured => "!".yellow(),
        AgentStatus::Error => "✗".red(),
    }
}
