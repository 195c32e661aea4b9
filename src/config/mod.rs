// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Configuration module for agentscout.
//!
//! Handles loading, merging, and validation of configuration from multiple sources:
//! - Global config: ~/.agentscout/config.json
//! - Workspace config: .agentscout.json, .agentscout.yaml, .agentscout/config.json, or agentscout.config.json
//! - Local config: .agentscout.local.json (gitignored, for personal overrides)
//! - CLI options: command-line arguments
//!
//! Configuration is merged with precedence (CLI > local > workspace > global > defaults).

mod loader;
mod merger;
mod types;

pub use loader::{
    config_sources, find_workspace_root, get_example_config, get_global_config_dir,
    get_global_config_path, init_config, load_config_file, write_config_file, ConfigLayer,
    CONFIG_FILES, GLOBAL_CONFIG_DIR, GLOBAL_CONFIG_FILE, LOCAL_CONFIG_FILE, WORKSPACE_CONFIG_DIR,
};

pub use merger::{default_config, merge_config, validate_config, CliOptions};

pub use types::{ResolvedConfig, WorkspaceConfig, LOG_LEVELS};

use crate::error::ConfigError;
use std::path::Path;

/// Load, merge and validate every layer for a workspace.
pub fn load_config(
    workspace_root: &Path,
    cli_options: CliOptions,
) -> Result<ResolvedConfig, ConfigError> {
    let global = ConfigLayer::Global.load(workspace_root)?;
    let workspace = ConfigLayer::Workspace.load(workspace_root)?;
    let local = ConfigLayer::Local.load(workspace_root)?;

    let mut config = merge_config(global, workspace, local, cli_options);
    config.workspace_root = workspace_root.to_path_buf();
    validate_config(&config)?;
    Ok(config)
}
