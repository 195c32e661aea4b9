// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Core agent metadata types.
//!
//! [`AgentRecord`] is the merged view of one agent, regardless of whether it
//! came from a local definition file or the built-in registry.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use super::registry::KnownAgent;

/// Globally unique agent key, e.g. `codex.openai.com`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct AgentIdentity(String);

impl AgentIdentity {
    /// Create an identity, rejecting empty or whitespace-only values.
    pub fn new(value: impl Into<String>) -> Option<Self> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self(trimmed.to_string()))
    }

    /// Wrap a value already known to be valid, such as a registry key.
    pub(crate) fn from_trusted(value: &str) -> Self {
        Self(value.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AgentIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for AgentIdentity {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for AgentIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A command as an argv vector.
///
/// Deserializes from either `"opencode acp"` or `["opencode", "acp"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawCommandLine", into = "Vec<String>")]
pub struct CommandLine(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawCommandLine {
    Line(String),
    Argv(Vec<String>),
}

impl TryFrom<RawCommandLine> for CommandLine {
    type Error = String;

    fn try_from(raw: RawCommandLine) -> Result<Self, Self::Error> {
        let parsed = match raw {
            RawCommandLine::Line(line) => Self::parse(&line),
            RawCommandLine::Argv(argv) => Self::from_argv(argv),
        };
        parsed.ok_or_else(|| "command must not be empty".to_string())
    }
}

impl From<CommandLine> for Vec<String> {
    fn from(command: CommandLine) -> Self {
        command.0
    }
}

impl CommandLine {
    /// Split a command on whitespace.
    pub fn parse(line: &str) -> Option<Self> {
        Self::from_argv(line.split_whitespace().map(str::to_string).collect())
    }

    /// Build from an argv vector. The program token must be non-empty.
    pub fn from_argv(argv: Vec<String>) -> Option<Self> {
        match argv.first() {
            Some(program) if !program.trim().is_empty() => Some(Self(argv)),
            _ => None,
        }
    }

    /// Build from borrowed parts. Panics on an empty slice, so only used with
    /// tokens that are known to be present.
    pub(crate) fn from_parts(parts: &[&str]) -> Self {
        assert!(!parts.is_empty(), "command parts must not be empty");
        Self(parts.iter().map(|s| s.to_string()).collect())
    }

    /// The base token (executable name or path).
    pub fn program(&self) -> &str {
        &self.0[0]
    }

    pub fn args(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn argv(&self) -> &[String] {
        &self.0
    }

    /// A copy of this command with one more argument appended.
    pub fn with_arg(&self, arg: impl Into<String>) -> Self {
        let mut argv = self.0.clone();
        argv.push(arg.into());
        Self(argv)
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(" "))
    }
}

/// Declared support status. Never probed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeclaredStatus {
    #[default]
    Available,
    ComingSoon,
    Deprecated,
}

impl fmt::Display for DeclaredStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::ComingSoon => write!(f, "coming-soon"),
            Self::Deprecated => write!(f, "deprecated"),
        }
    }
}

/// Where an [`AgentRecord`]'s fields came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Local,
    Registry,
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Local => write!(f, "local"),
            Self::Registry => write!(f, "registry"),
        }
    }
}

/// Merged metadata for one agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentRecord {
    pub identity: AgentIdentity,
    pub name: String,
    pub short_name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author_url: Option<String>,

    /// Command used to launch the agent over ACP.
    pub run_command: CommandLine,
    /// Command used for probing; `<program> --version` when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_command: Option<CommandLine>,
    /// Alternate launch forms, tried in order when the primary is missing.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alt_commands: Vec<CommandLine>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install_instructions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
    pub requirements: Vec<String>,

    pub status: DeclaredStatus,
    pub capabilities: Vec<String>,
    /// Any one of these being set satisfies the credential requirement.
    pub credential_env_vars: Vec<String>,

    pub provenance: Provenance,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<KnownAgent>,
}

impl AgentRecord {
    /// Command that the prober runs for the primary form.
    pub fn primary_check_command(&self) -> CommandLine {
        self.check_command.clone().unwrap_or_else(|| {
            CommandLine::from_parts(&[self.run_command.program(), "--version"])
        })
    }

    pub fn requires_credentials(&self) -> bool {
        !self.credential_env_vars.is_empty()
    }

    /// Case-insensitive short-name comparison.
    pub fn matches_short_name(&self, short_name: &str) -> bool {
        self.short_name.eq_ignore_ascii_case(short_name)
    }
}
