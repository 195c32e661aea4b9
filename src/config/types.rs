// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration type definitions.
//!
//! Defines the structure of workspace and resolved configuration,
//! supporting JSON and YAML formats.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::agents::default_definition_dirs;

/// Log levels accepted by `logLevel`.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Workspace configuration for agentscout.
/// Can be defined in .agentscout.json or .agentscout/config.json in the project root.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceConfig {
    /// Extra directories holding agent definition files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent_dirs: Option<Vec<PathBuf>>,

    /// Path of the local auth store
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_file: Option<PathBuf>,

    /// Whether built-in registry agents are listed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_registry: Option<bool>,

    /// Default log level (trace, debug, info, warn, error)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

/// Fully resolved configuration with all defaults applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedConfig {
    /// Directory the workspace layers were loaded from.
    pub workspace_root: PathBuf,
    /// Extra definition directories, in precedence order (later wins).
    pub agent_dirs: Vec<PathBuf>,
    pub auth_file: Option<PathBuf>,
    pub include_registry: bool,
    pub log_level: String,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            workspace_root: PathBuf::from("."),
            agent_dirs: Vec::new(),
            auth_file: None,
            include_registry: true,
            log_level: "warn".to_string(),
        }
    }
}

impl ResolvedConfig {
    /// All directories local agent definitions are read from: the global and
    /// workspace defaults, then `agentDirs`. Relative entries are taken
    /// relative to the workspace root.
    pub fn definition_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = default_definition_dirs(&self.workspace_root);
        for dir in &self.agent_dirs {
            let resolved = resolve_path(&self.workspace_root, dir);
            if !dirs.contains(&resolved) {
                dirs.push(resolved);
            }
        }
        dirs
    }

    /// The auth store path, relative entries resolved against the workspace.
    pub fn auth_file_path(&self) -> Option<PathBuf> {
        self.auth_file
            .as_ref()
            .map(|path| resolve_path(&self.workspace_root, path))
    }
}

fn resolve_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workspace_config_camel_case() {
        let config: WorkspaceConfig = serde_json::from_str(
            r#"{"agentDirs": ["defs"], "includeRegistry": false, "logLevel": "debug"}"#,
        )
        .unwrap();
        assert_eq!(config.agent_dirs, Some(vec![PathBuf::from("defs")]));
        assert_eq!(config.include_registry, Some(false));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert!(config.auth_file.is_none());
    }

    #[test]
    fn test_empty_fields_not_serialized() {
        let json = serde_json::to_string(&WorkspaceConfig::default()).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_definition_dirs_resolve_relative() {
        let config = ResolvedConfig {
            workspace_root: PathBuf::from("/work"),
            agent_dirs: vec![PathBuf::from("defs"), PathBuf::from("/abs/defs")],
            ..Default::default()
        };
        let dirs = config.definition_dirs();
        assert_eq!(dirs[dirs.len() - 2], PathBuf::from("/work/defs"));
        assert_eq!(dirs[dirs.len() - 1], PathBuf::from("/abs/defs"));
        assert!(dirs.contains(&PathBuf::from("/work/.agentscout/agents")));
    }

    #[test]
    fn test_auth_file_path() {
        let config = ResolvedConfig {
            workspace_root: PathBuf::from("/work"),
            auth_file: Some(PathBuf::from("secrets/auth.json")),
            ..Default::default()
        };
        assert_eq!(
            config.auth_file_path(),
            Some(PathBuf::from("/work/secrets/auth.json"))
        );
        assert!(ResolvedConfig::default().auth_file_path().is_none());
    }
}
