// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! End-to-end discovery against real processes.
//!
//! Every test builds a private bin directory of shell scripts and points the
//! prober at it, so nothing on the host `PATH` is consulted.

#![cfg(unix)]

use std::collections::HashMap;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::sync::Arc;

use agentscout::agents::{registry_records, CommandLine, DefinitionSource, Provenance};
use agentscout::discovery::{AgentCatalog, AgentStatus, HealthChecker, Prober};
use tempfile::TempDir;

fn script(dir: &Path, name: &str, body: &str) {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
}

/// A bin directory where every launcher answers `--version` immediately.
fn fake_bin() -> TempDir {
    let bin = TempDir::new().unwrap();
    for launcher in ["npx", "uvx", "bunx"] {
        script(bin.path(), launcher, "echo 10.2.0");
    }
    bin
}

fn catalog(bin: &Path, dirs: Vec<std::path::PathBuf>, env: HashMap<String, String>) -> AgentCatalog {
    AgentCatalog::new(
        DefinitionSource::new(dirs),
        Arc::new(Prober::new().with_search_path(bin.as_os_str())),
        HealthChecker::new(),
        Arc::new(env),
    )
}

#[tokio::test]
async fn codex_without_openai_key_is_not_configured() {
    let bin = fake_bin();
    let catalog = catalog(bin.path(), Vec::new(), HashMap::new());

    let agents = catalog.discover_all(false).await.unwrap();
    assert_eq!(agents.len(), registry_records().len());

    let codex: Vec<_> = agents
        .iter()
        .filter(|a| a.identity.as_str() == "codex.openai.com")
        .collect();
    assert_eq!(codex.len(), 1);
    assert_eq!(codex[0].short_name, "codex");
    assert_eq!(codex[0].status, AgentStatus::NotConfigured);
    assert!(codex[0].message.as_deref().unwrap().contains("OPENAI_API_KEY"));
    assert!(!catalog
        .get_available_agents()
        .await
        .iter()
        .any(|a| a.short_name == "codex"));
}

#[tokio::test]
async fn codex_with_key_is_available() {
    let bin = fake_bin();
    let mut env = HashMap::new();
    env.insert("OPENAI_API_KEY".to_string(), "sk-test".to_string());
    let catalog = catalog(bin.path(), Vec::new(), env);

    catalog.discover_all(false).await.unwrap();
    let codex = catalog.get_agent("codex").await.unwrap();
    assert_eq!(codex.status, AgentStatus::Available);
    assert_eq!(codex.version, "10.2.0");
    assert!(codex.has_credentials);
}

#[tokio::test]
async fn alternate_command_supersedes_missing_primary() {
    let bin = fake_bin();
    script(bin.path(), "alt-agent", "echo v2.3.1");

    let defs = TempDir::new().unwrap();
    std::fs::write(
        defs.path().join("alt.toml"),
        r#"identity = "alt.example.com"
short_name = "alt"
name = "Alt Agent"
run_command = "primary-agent --acp"
alt_commands = ["alt-agent --acp"]
"#,
    )
    .unwrap();

    let catalog = catalog(bin.path(), vec![defs.path().to_path_buf()], HashMap::new())
        .include_registry(false);
    let agents = catalog.discover_all(false).await.unwrap();
    assert_eq!(agents.len(), 1);

    let alt = &agents[0];
    assert_eq!(alt.status, AgentStatus::Available);
    assert_eq!(alt.version, "v2.3.1");
    assert_eq!(alt.command, CommandLine::parse("alt-agent --acp").unwrap());
    assert!(alt.executable.as_ref().unwrap().ends_with("alt-agent"));
    assert_eq!(alt.provenance, Provenance::Local);
}

#[tokio::test]
async fn local_definition_replaces_registry_entry() {
    let bin = fake_bin();
    script(bin.path(), "my-opencode", "echo 'opencode version 0.9.1'");

    let defs = TempDir::new().unwrap();
    std::fs::write(
        defs.path().join("opencode.yaml"),
        "identity: opencode.ai\nshort_name: opencode\nname: My OpenCode\nrun_command: [my-opencode, acp]\n",
    )
    .unwrap();

    let catalog = catalog(bin.path(), vec![defs.path().to_path_buf()], HashMap::new());
    let agents = catalog.discover_all(false).await.unwrap();
    assert_eq!(agents.len(), registry_records().len());

    let opencode = catalog.get_agent("OpenCode").await.unwrap();
    assert_eq!(opencode.provenance, Provenance::Local);
    assert_eq!(opencode.name, "My OpenCode");
    assert_eq!(opencode.version, "opencode version 0.9.1");
}

#[tokio::test]
async fn health_check_runs_handshake_against_discovered_agent() {
    let bin = fake_bin();
    script(
        bin.path(),
        "hello-agent",
        r#"if [ "$1" = "--version" ]; then echo 1.0.0; exit 0; fi
read line
echo '{"jsonrpc":"2.0","id":1,"result":{"ok":true}}'"#,
    );

    let defs = TempDir::new().unwrap();
    std::fs::write(
        defs.path().join("hello.json"),
        r#"{"identity": "hello.example.com", "short_name": "hello", "run_command": "hello-agent"}"#,
    )
    .unwrap();

    let catalog = catalog(bin.path(), vec![defs.path().to_path_buf()], HashMap::new())
        .include_registry(false);
    catalog.discover_all(false).await.unwrap();

    let report = catalog.health_check("hello").await;
    assert!(report.healthy, "{}", report.message);

    let report = catalog.health_check("nobody").await;
    assert!(!report.healthy);
    assert_eq!(report.message, "Agent not found");
}
