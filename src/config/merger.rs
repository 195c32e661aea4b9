// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration merging.
//!
//! Handles merging configurations from different sources with proper precedence.

use std::path::PathBuf;

use crate::error::ConfigError;

use super::types::{ResolvedConfig, WorkspaceConfig, LOG_LEVELS};

/// CLI options that can override configuration.
#[derive(Debug, Clone, Default)]
pub struct CliOptions {
    pub agent_dirs: Vec<PathBuf>,
    pub auth_file: Option<PathBuf>,
    pub no_registry: bool,
    pub log_level: Option<String>,
}

/// Default configuration values.
pub fn default_config() -> ResolvedConfig {
    ResolvedConfig::default()
}

/// Merge multiple configurations with precedence.
///
/// Precedence (highest to lowest):
/// 1. CLI options
/// 2. Local config (.agentscout.local.json)
/// 3. Workspace config (.agentscout.json)
/// 4. Global config (~/.agentscout/config.json)
/// 5. Default values
///
/// `agentDirs` accumulate across layers instead of replacing each other.
pub fn merge_config(
    global: Option<WorkspaceConfig>,
    workspace: Option<WorkspaceConfig>,
    local: Option<WorkspaceConfig>,
    cli: CliOptions,
) -> ResolvedConfig {
    let mut result = default_config();

    for config in [global, workspace, local].into_iter().flatten() {
        apply_workspace_config(&mut result, &config);
    }

    // Apply CLI options (highest precedence)
    apply_cli_options(&mut result, &cli);

    result
}

fn push_unique(dirs: &mut Vec<PathBuf>, dir: &PathBuf) {
    if !dirs.contains(dir) {
        dirs.push(dir.clone());
    }
}

fn apply_workspace_config(result: &mut ResolvedConfig, config: &WorkspaceConfig) {
    if let Some(ref dirs) = config.agent_dirs {
        for dir in dirs {
            push_unique(&mut result.agent_dirs, dir);
        }
    }

    if config.auth_file.is_some() {
        result.auth_file = config.auth_file.clone();
    }

    if let Some(include) = config.include_registry {
        result.include_registry = include;
    }

    if let Some(ref level) = config.log_level {
        result.log_level = level.clone();
    }
}

fn apply_cli_options(result: &mut ResolvedConfig, cli: &CliOptions) {
    for dir in &cli.agent_dirs {
        push_unique(&mut result.agent_dirs, dir);
    }

    if cli.auth_file.is_some() {
        result.auth_file = cli.auth_file.clone();
    }

    if cli.no_registry {
        result.include_registry = false;
    }

    if let Some(ref level) = cli.log_level {
        result.log_level = level.clone();
    }
}

/// Reject values the rest of the crate cannot use.
pub fn validate_config(config: &ResolvedConfig) -> Result<(), ConfigError> {
    let level = config.log_level.to_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        return Err(ConfigError::InvalidValue {
            field: "logLevel".to_string(),
            message: format!(
                "'{}' is not one of {}",
                config.log_level,
                LOG_LEVELS.join(", ")
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert!(config.include_registry);
        assert!(config.agent_dirs.is_empty());
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_merge_config_precedence() {
        let global = WorkspaceConfig {
            log_level: Some("error".to_string()),
            auth_file: Some(PathBuf::from("/global/auth.json")),
            ..Default::default()
        };

        let workspace = WorkspaceConfig {
            log_level: Some("info".to_string()),
            ..Default::default()
        };

        let local = WorkspaceConfig {
            log_level: Some("debug".to_string()),
            include_registry: Some(false),
            ..Default::default()
        };

        let cli = CliOptions {
            log_level: Some("trace".to_string()),
            ..Default::default()
        };

        let result = merge_config(Some(global), Some(workspace), Some(local), cli);

        // CLI log level takes precedence
        assert_eq!(result.log_level, "trace");
        assert!(!result.include_registry);
        assert_eq!(result.auth_file, Some(PathBuf::from("/global/auth.json")));
    }

    #[test]
    fn test_merge_agent_dirs_accumulate() {
        let global = WorkspaceConfig {
            agent_dirs: Some(vec![PathBuf::from("/shared/agents")]),
            ..Default::default()
        };

        let workspace = WorkspaceConfig {
            agent_dirs: Some(vec![PathBuf::from("agents"), PathBuf::from("/shared/agents")]),
            ..Default::default()
        };

        let cli = CliOptions {
            agent_dirs: vec![PathBuf::from("/tmp/agents")],
            ..Default::default()
        };

        let result = merge_config(Some(global), Some(workspace), None, cli);

        // Should have all dirs without duplicates, in layer order
        assert_eq!(
            result.agent_dirs,
            vec![
                PathBuf::from("/shared/agents"),
                PathBuf::from("agents"),
                PathBuf::from("/tmp/agents"),
            ]
        );
    }

    #[test]
    fn test_cli_no_registry_override() {
        let workspace = WorkspaceConfig {
            include_registry: Some(true),
            ..Default::default()
        };

        let cli = CliOptions {
            no_registry: true,
            ..Default::default()
        };

        let result = merge_config(None, Some(workspace), None, cli);
        assert!(!result.include_registry);
    }

    #[test]
    fn test_validate_log_level() {
        assert!(validate_config(&default_config()).is_ok());

        let config = ResolvedConfig {
            log_level: "INFO".to_string(),
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());

        let config = ResolvedConfig {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
        assert!(err.to_string().contains("logLevel"));
    }
}
