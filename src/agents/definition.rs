// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Local agent definition files.
//!
//! Users can declare their own agents (or override registry entries) by
//! dropping one file per agent into an agents directory:
//!
//! ```toml
//! identity = "my-agent.example.com"
//! name = "My Agent"
//! short_name = "mine"
//! run_command = "my-agent --acp"
//! alt_commands = [["npx", "my-agent", "--acp"]]
//! credential_env_vars = ["MY_AGENT_API_KEY"]
//! ```
//!
//! TOML, JSON and YAML are accepted, chosen by file extension.

use serde::Deserialize;
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::DefinitionReadError;

use super::registry::KnownAgent;
use super::types::{AgentIdentity, AgentRecord, CommandLine, DeclaredStatus, Provenance};

/// Directory name (under a config root) holding definition files.
pub const DEFINITION_DIR: &str = "agents";

/// Extensions recognised as definition files.
pub const DEFINITION_EXTENSIONS: &[&str] = &["toml", "json", "yaml", "yml"];

/// On-disk shape of a local agent definition.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentDefinition {
    pub identity: String,
    #[serde(default)]
    pub name: Option<String>,
    pub short_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub author_url: Option<String>,
    pub run_command: CommandLine,
    #[serde(default)]
    pub check_command: Option<CommandLine>,
    #[serde(default)]
    pub alt_commands: Vec<CommandLine>,
    #[serde(default)]
    pub install_command: Option<String>,
    #[serde(default)]
    pub install_instructions: Option<String>,
    #[serde(default)]
    pub help: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub status: DeclaredStatus,
    #[serde(default)]
    pub capabilities: Vec<String>,
    #[serde(default)]
    pub credential_env_vars: Vec<String>,
}

impl AgentDefinition {
    /// Validate and convert into a local-provenance record.
    pub fn into_record(self, path: &Path) -> Result<AgentRecord, DefinitionReadError> {
        let identity = AgentIdentity::new(self.identity)
            .ok_or_else(|| DefinitionReadError::invalid(path, "identity must not be empty"))?;

        let short_name = self.short_name.trim().to_string();
        if short_name.is_empty() {
            return Err(DefinitionReadError::invalid(
                path,
                format!("agent '{identity}' has an empty short_name"),
            ));
        }

        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| short_name.clone());

        let credential_env_vars = self
            .credential_env_vars
            .into_iter()
            .map(|var| var.trim().to_string())
            .filter(|var| !var.is_empty())
            .collect();

        let kind = KnownAgent::from_identity(identity.as_str());

        Ok(AgentRecord {
            identity,
            name,
            short_name,
            description: self.description,
            url: self.url,
            author_name: self.author_name,
            author_url: self.author_url,
            run_command: self.run_command,
            check_command: self.check_command,
            alt_commands: self.alt_commands,
            install_command: self.install_command,
            install_instructions: self.install_instructions,
            help: self.help,
            requirements: self.requirements,
            status: self.status,
            capabilities: self.capabilities,
            credential_env_vars,
            provenance: Provenance::Local,
            kind,
        })
    }
}

/// Parse one definition file, picking the format from its extension.
pub fn read_definition_file(path: &Path) -> Result<AgentRecord, DefinitionReadError> {
    let content = std::fs::read_to_string(path).map_err(|source| DefinitionReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let definition: AgentDefinition = match extension.as_str() {
        "toml" => toml::from_str(&content).map_err(|e| DefinitionReadError::parse(path, e))?,
        "yaml" | "yml" => {
            serde_yaml::from_str(&content).map_err(|e| DefinitionReadError::parse(path, e))?
        }
        _ => serde_json::from_str(&content).map_err(|e| DefinitionReadError::parse(path, e))?,
    };

    definition.into_record(path)
}

fn is_definition_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| {
                DEFINITION_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false)
}

/// Read every definition in one directory, in sorted path order.
///
/// A missing directory yields no definitions. Two files declaring the same
/// identity is an error.
pub fn read_definition_dir(
    dir: &Path,
) -> Result<BTreeMap<AgentIdentity, (PathBuf, AgentRecord)>, DefinitionReadError> {
    let mut found = BTreeMap::new();
    if !dir.is_dir() {
        return Ok(found);
    }

    let io_err = |source| DefinitionReadError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if is_definition_file(&path) {
            paths.push(path);
        }
    }
    paths.sort();

    for path in paths {
        let record = read_definition_file(&path)?;
        match found.entry(record.identity.clone()) {
            Entry::Vacant(slot) => {
                slot.insert((path, record));
            }
            Entry::Occupied(existing) => {
                return Err(DefinitionReadError::DuplicateIdentity {
                    identity: record.identity.to_string(),
                    first: existing.get().0.clone(),
                    second: path,
                });
            }
        }
    }

    Ok(found)
}

/// Default definition directories: global first, then workspace.
///
/// A workspace rooted at the home directory contributes no second entry.
pub fn default_definition_dirs(workspace_root: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    if let Some(global) = crate::config::get_global_config_dir() {
        dirs.push(global.join(DEFINITION_DIR));
    }
    let workspace = workspace_root
        .join(crate::config::WORKSPACE_CONFIG_DIR)
        .join(DEFINITION_DIR);
    if !dirs.contains(&workspace) {
        dirs.push(workspace);
    }
    dirs
}

/// Ordered set of directories local definitions are read from.
///
/// Later directories override earlier ones for the same identity.
#[derive(Debug, Clone, Default)]
pub struct DefinitionSource {
    dirs: Vec<PathBuf>,
}

impl DefinitionSource {
    pub fn new(dirs: Vec<PathBuf>) -> Self {
        Self { dirs }
    }

    /// A source with no directories; only the registry will be visible.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// Read all local definitions keyed by identity.
    pub fn read(&self) -> Result<BTreeMap<AgentIdentity, AgentRecord>, DefinitionReadError> {
        let mut merged: BTreeMap<AgentIdentity, AgentRecord> = BTreeMap::new();

        for dir in &self.dirs {
            for (identity, (path, record)) in read_definition_dir(dir)? {
                if merged.insert(identity.clone(), record).is_some() {
                    info!(identity = %identity, path = %path.display(), "Local agent definition overridden");
                }
            }
        }

        debug!(count = merged.len(), "Read local agent definitions");
        Ok(merged)
    }
}
