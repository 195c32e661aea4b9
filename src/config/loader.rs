// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Locating and reading config files.
//!
//! Each [`ConfigLayer`] comes from at most one file. JSON and YAML are both
//! accepted; the extension decides.

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::ConfigError;

use super::types::WorkspaceConfig;

/// Workspace config file names, first match wins.
pub const CONFIG_FILES: &[&str] = &[
    ".agentscout.json",
    ".agentscout.yaml",
    ".agentscout/config.json",
    "agentscout.config.json",
];

/// Personal, uncommitted overrides next to the workspace config.
pub const LOCAL_CONFIG_FILE: &str = ".agentscout.local.json";

/// Directory under the home directory holding global state.
pub const GLOBAL_CONFIG_DIR: &str = ".agentscout";

/// Directory under the workspace root holding workspace state.
pub const WORKSPACE_CONFIG_DIR: &str = ".agentscout";

pub const GLOBAL_CONFIG_FILE: &str = "config.json";

/// One source of file configuration, lowest precedence first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ConfigLayer {
    Global,
    Workspace,
    Local,
}

impl ConfigLayer {
    pub const ALL: [ConfigLayer; 3] = [Self::Global, Self::Workspace, Self::Local];

    /// The file backing this layer, if one exists.
    pub fn locate(self, workspace_root: &Path) -> Option<PathBuf> {
        match self {
            Self::Global => get_global_config_path().filter(|p| p.is_file()),
            Self::Workspace => {
                workspace_config_in(workspace_root, get_global_config_path().as_deref())
            }
            Self::Local => Some(workspace_root.join(LOCAL_CONFIG_FILE)).filter(|p| p.is_file()),
        }
    }

    /// Read this layer. `Ok(None)` when it has no file.
    pub fn load(self, workspace_root: &Path) -> Result<Option<WorkspaceConfig>, ConfigError> {
        let Some(path) = self.locate(workspace_root) else {
            return Ok(None);
        };
        debug!(layer = %self, path = %path.display(), "Loading config layer");
        load_config_file(&path).map(Some)
    }
}

impl fmt::Display for ConfigLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Global => "global",
            Self::Workspace => "workspace",
            Self::Local => "local",
        })
    }
}

/// `~/.agentscout`.
pub fn get_global_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(GLOBAL_CONFIG_DIR))
}

/// `~/.agentscout/config.json`.
pub fn get_global_config_path() -> Option<PathBuf> {
    get_global_config_dir().map(|dir| dir.join(GLOBAL_CONFIG_FILE))
}

/// Every layer that has a file, lowest precedence first.
pub fn config_sources(workspace_root: &Path) -> Vec<(ConfigLayer, PathBuf)> {
    ConfigLayer::ALL
        .into_iter()
        .filter_map(|layer| layer.locate(workspace_root).map(|path| (layer, path)))
        .collect()
}

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
}

/// Read one config file.
pub fn load_config_file(path: &Path) -> Result<WorkspaceConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    if is_yaml(path) {
        Ok(serde_yaml::from_str(&content)?)
    } else {
        Ok(serde_json::from_str(&content)?)
    }
}

/// Write `config` to `path` in the format its extension names.
pub fn write_config_file(path: &Path, config: &WorkspaceConfig) -> Result<(), ConfigError> {
    let content = if is_yaml(path) {
        serde_yaml::to_string(config)?
    } else {
        serde_json::to_string_pretty(config)?
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

/// Write an example workspace config as `.agentscout.json`.
///
/// Refuses to overwrite an existing workspace config.
pub fn init_config(
    workspace_root: &Path,
    config: Option<WorkspaceConfig>,
) -> Result<PathBuf, ConfigError> {
    if let Some(existing) = ConfigLayer::Workspace.locate(workspace_root) {
        return Err(ConfigError::InvalidValue {
            field: "init".to_string(),
            message: format!("config already exists at {}", existing.display()),
        });
    }
    let path = workspace_root.join(CONFIG_FILES[0]);
    write_config_file(&path, &config.unwrap_or_else(get_example_config))?;
    Ok(path)
}

/// First workspace config file in `root`. The global config file never
/// counts, even when `root` is the home directory.
fn workspace_config_in(root: &Path, global: Option<&Path>) -> Option<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| root.join(name))
        .filter(|p| Some(p.as_path()) != global)
        .find(|p| p.is_file())
}

/// Nearest ancestor of `start` (inclusive) holding a workspace config.
/// The home directory is skipped.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    find_workspace_root_from(start, dirs::home_dir().as_deref())
}

fn find_workspace_root_from(start: &Path, home: Option<&Path>) -> Option<PathBuf> {
    start
        .ancestors()
        .filter(|dir| Some(*dir) != home)
        .find(|dir| ConfigLayer::Workspace.locate(dir).is_some())
        .map(Path::to_path_buf)
}

/// The config `config init` writes.
pub fn get_example_config() -> WorkspaceConfig {
    WorkspaceConfig {
        agent_dirs: Some(vec![PathBuf::from(".agentscout/agents")]),
        include_registry: Some(true),
        log_level: Some("warn".to_string()),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_global_config_dir() {
        let dir = get_global_config_dir().unwrap();
        assert!(dir.ends_with(".agentscout"));
    }

    #[test]
    fn test_missing_layers_load_as_none() {
        let temp = TempDir::new().unwrap();
        assert!(ConfigLayer::Workspace.load(temp.path()).unwrap().is_none());
        assert!(ConfigLayer::Local.load(temp.path()).unwrap().is_none());
    }

    #[test]
    fn test_workspace_file_order() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join(".agentscout");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(nested.join("config.json"), r#"{"logLevel": "info"}"#).unwrap();
        std::fs::write(
            temp.path().join(".agentscout.yaml"),
            "logLevel: debug\nagentDirs:\n  - more-agents\n",
        )
        .unwrap();

        let config = ConfigLayer::Workspace.load(temp.path()).unwrap().unwrap();
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        assert_eq!(config.agent_dirs, Some(vec![PathBuf::from("more-agents")]));
    }

    #[test]
    fn test_malformed_config_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".agentscout.json"), "{not json").unwrap();

        let err = ConfigLayer::Workspace.load(temp.path()).unwrap_err();
        assert!(matches!(err, ConfigError::JsonError(_)));
    }

    #[test]
    fn test_config_sources_lists_existing_files() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".agentscout.json"), "{}").unwrap();
        std::fs::write(temp.path().join(LOCAL_CONFIG_FILE), "{}").unwrap();

        let sources: Vec<_> = config_sources(temp.path())
            .into_iter()
            .filter(|(layer, _)| *layer != ConfigLayer::Global)
            .collect();
        assert_eq!(
            sources,
            vec![
                (ConfigLayer::Workspace, temp.path().join(".agentscout.json")),
                (ConfigLayer::Local, temp.path().join(LOCAL_CONFIG_FILE)),
            ]
        );
    }

    #[test]
    fn test_write_yaml_round_trips() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.yml");
        let config = WorkspaceConfig {
            auth_file: Some(PathBuf::from("auth.json")),
            include_registry: Some(false),
            ..Default::default()
        };

        write_config_file(&path, &config).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("authFile"));
        assert_eq!(load_config_file(&path).unwrap(), config);
    }

    #[test]
    fn test_find_workspace_root() {
        let temp = TempDir::new().unwrap();
        let subdir = temp.path().join("a").join("b").join("c");
        std::fs::create_dir_all(&subdir).unwrap();
        std::fs::write(temp.path().join(".agentscout.json"), "{}").unwrap();

        assert_eq!(find_workspace_root(&subdir).as_deref(), Some(temp.path()));
    }

    #[test]
    fn test_find_workspace_root_skips_home() {
        let temp = TempDir::new().unwrap();
        let home = temp.path().join("home");
        let project = home.join("project").join("src");
        std::fs::create_dir_all(&project).unwrap();
        std::fs::write(home.join(".agentscout.json"), "{}").unwrap();

        assert_eq!(find_workspace_root_from(&project, Some(&home)), None);
        assert_eq!(find_workspace_root_from(&project, None), Some(home.clone()));

        std::fs::write(temp.path().join(".agentscout.json"), "{}").unwrap();
        assert_eq!(
            find_workspace_root_from(&project, Some(&home)).as_deref(),
            Some(temp.path())
        );
    }

    #[test]
    fn test_global_config_is_not_a_workspace_config() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join(".agentscout");
        std::fs::create_dir(&nested).unwrap();
        let global = nested.join("config.json");
        std::fs::write(&global, "{}").unwrap();

        assert_eq!(workspace_config_in(temp.path(), Some(&global)), None);
        assert_eq!(workspace_config_in(temp.path(), None), Some(global.clone()));

        std::fs::write(temp.path().join("agentscout.config.json"), "{}").unwrap();
        assert_eq!(
            workspace_config_in(temp.path(), Some(&global)),
            Some(temp.path().join("agentscout.config.json"))
        );
    }

    #[test]
    fn test_init_config_does_not_clobber() {
        let temp = TempDir::new().unwrap();
        let path = init_config(temp.path(), None).unwrap();
        assert_eq!(path.file_name().unwrap(), ".agentscout.json");
        assert_eq!(load_config_file(&path).unwrap(), get_example_config());

        assert!(matches!(
            init_config(temp.path(), None),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
