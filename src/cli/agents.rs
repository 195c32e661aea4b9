// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! `agentscout agents ...` commands.

use clap::Subcommand;
use colored::Colorize;
use std::process::ExitCode;

use crate::agents::AgentRecord;
use crate::discovery::{
    installation_info, AgentCatalog, DiscoveredAgent, HealthReport, InstallationInfo,
};

use super::{status_label, status_marker, OutputFormat};

/// Agent discovery commands.
#[derive(Debug, Subcommand)]
pub enum AgentsCommand {
    /// List known agents and whether they are usable
    #[command(aliases = &["ls"])]
    List {
        /// Only agents that are installed and configured
        #[arg(long, conflicts_with = "supported")]
        available: bool,
        /// Only agents whose declared status is available
        #[arg(long)]
        supported: bool,
        /// Re-read definitions and probe again
        #[arg(long)]
        refresh: bool,
        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Show one agent by identity or short name
    Show {
        name: String,
        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Run the ACP hello handshake against an agent
    Health { name: String },
    /// Print how to install an agent (nothing is executed)
    Install { name: String },
}

/// Which subset of the snapshot to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ListFilter {
    All,
    Available,
    Supported,
}

impl AgentsCommand {
    pub async fn execute(self, catalog: &AgentCatalog) -> anyhow::Result<ExitCode> {
        match self {
            AgentsCommand::List {
                available,
                supported,
                refresh,
                format,
            } => {
                let filter = if available {
                    ListFilter::Available
                } else if supported {
                    ListFilter::Supported
                } else {
                    ListFilter::All
                };
                list(catalog, filter, refresh, format).await
            }
            AgentsCommand::Show { name, format } => show(catalog, &name, format).await,
            AgentsCommand::Health { name } => health(catalog, &name).await,
            AgentsCommand::Install { name } => install(catalog, &name).await,
        }
    }
}

async fn list(
    catalog: &AgentCatalog,
    filter: ListFilter,
    refresh: bool,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let total = catalog.discover_all(refresh).await?.len();
    let agents = match filter {
        ListFilter::All => catalog.get_all_agents().await,
        ListFilter::Available => catalog.get_available_agents().await,
        ListFilter::Supported => catalog.get_supported_agents().await,
    };

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&agents)?),
        OutputFormat::Text => print!("{}", render_agent_list(&agents, total)),
    }
    Ok(ExitCode::SUCCESS)
}

async fn show(catalog: &AgentCatalog, name: &str, format: OutputFormat) -> anyhow::Result<ExitCode> {
    let Some(record) = catalog.find_record(name).await? else {
        eprintln!("{} Unknown agent: {}", "✗".red(), name);
        return Ok(ExitCode::FAILURE);
    };
    catalog.discover_all(false).await?;
    let discovered = catalog.get_agent_by_identity(record.identity.as_str()).await;

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "record": record,
                "discovered": discovered,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print!("{}", render_agent_detail(&record, discovered.as_ref())),
    }
    Ok(ExitCode::SUCCESS)
}

async fn health(catalog: &AgentCatalog, name: &str) -> anyhow::Result<ExitCode> {
    let Some((record, report)) = check_named(catalog, name).await? else {
        eprintln!("{} Unknown agent: {}", "✗".red(), name);
        return Ok(ExitCode::FAILURE);
    };

    if report.healthy {
        println!("{} {}: {}", "✓".green(), record.name.bold(), report.message);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("{} {}: {}", "✗".red(), record.name.bold(), report.message);
        Ok(ExitCode::FAILURE)
    }
}

/// Resolve `name` to one record and health-check that exact agent.
async fn check_named(
    catalog: &AgentCatalog,
    name: &str,
) -> anyhow::Result<Option<(AgentRecord, HealthReport)>> {
    let Some(record) = catalog.find_record(name).await? else {
        return Ok(None);
    };
    catalog.discover_all(false).await?;
    let report = catalog.health_check_identity(record.identity.as_str()).await;
    Ok(Some((record, report)))
}

async fn install(catalog: &AgentCatalog, name: &str) -> anyhow::Result<ExitCode> {
    let Some(record) = catalog.find_record(name).await? else {
        eprintln!("{} Unknown agent: {}", "✗".red(), name);
        return Ok(ExitCode::FAILURE);
    };
    print!("{}", render_installation(&installation_info(&record)));
    Ok(ExitCode::SUCCESS)
}

/// One line per agent plus a summary.
pub fn render_agent_list(agents: &[DiscoveredAgent], total: usize) -> String {
    if agents.is_empty() {
        return format!("{}\n", "No agents match.".dimmed());
    }

    let mut out = String::new();
    let name_width = agents.iter().map(|a| a.name.chars().count()).max().unwrap_or(0);
    for agent in agents {
        let version = if agent.version.is_empty() {
            String::new()
        } else {
            format!(" {}", agent.version.dimmed())
        };
        out.push_str(&format!(
            "{} {} {:<width$}  {:<14} {}{}\n",
            status_marker(agent.status),
            agent.icon,
            agent.name,
            status_label(agent.status),
            agent.short_name.cyan(),
            version,
            width = name_width,
        ));
        if let Some(message) = &agent.message {
            out.push_str(&format!("      {}\n", message.dimmed()));
        }
    }

    let available = agents.iter().filter(|a| a.is_available()).count();
    out.push_str(&format!(
        "\n{} of {} agents available\n",
        available.to_string().bold(),
        total
    ));
    out
}

/// Metadata for one agent plus its latest probe result.
pub fn render_agent_detail(record: &AgentRecord, discovered: Option<&DiscoveredAgent>) -> String {
    let title = format!("{} ({})", record.name, record.short_name);
    let mut out = format!("{}\n", title.bright_blue().bold());
    out.push_str(&format!("Identity:     {}\n", record.identity));
    if !record.description.is_empty() {
        out.push_str(&format!("Description:  {}\n", record.description));
    }
    if let Some(url) = &record.url {
        out.push_str(&format!("URL:          {}\n", url));
    }
    out.push_str(&format!("Source:       {}\n", record.provenance));
    out.push_str(&format!("Declared:     {}\n", record.status));
    out.push_str(&format!("Run command:  {}\n", record.run_command));
    for alt in &record.alt_commands {
        out.push_str(&format!("Alternate:    {}\n", alt));
    }
    if !record.credential_env_vars.is_empty() {
        out.push_str(&format!(
            "Credentials:  {}\n",
            record.credential_env_vars.join(" | ")
        ));
    }
    if !record.capabilities.is_empty() {
        out.push_str(&format!("Capabilities: {}\n", record.capabilities.join(", ")));
    }

    let Some(agent) = discovered else {
        out.push_str(&format!("Status:       {}\n", "not probed".dimmed()));
        return out;
    };
    out.push_str(&format!("Status:       {}\n", status_label(agent.status)));
    if !agent.version.is_empty() {
        out.push_str(&format!("Version:      {}\n", agent.version));
    }
    if agent.command != record.run_command {
        out.push_str(&format!("Resolved:     {}\n", agent.command));
    }
    if let Some(path) = &agent.executable {
        out.push_str(&format!("Executable:   {}\n", path.display()));
    }
    if let Some(message) = &agent.message {
        out.push_str(&format!("Message:      {}\n", message));
    }
    if !agent.models.is_empty() {
        let names: Vec<_> = agent.models.iter().map(|m| m.id).collect();
        out.push_str(&format!("Models:       {}\n", names.join(", ")));
    }
    out
}

pub fn render_installation(info: &InstallationInfo) -> String {
    let mut out = format!("{}\n", info.description.bold());
    if !info.instructions.is_empty() {
        out.push_str(&format!("\n{}\n", info.instructions));
    }
    if !info.command.is_empty() {
        out.push_str(&format!("\nRun: {}\n", info.command.cyan()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::registry_entry;
    use crate::discovery::{classify, ProbeReport};
    use std::collections::HashMap;

    fn discovered(identity: &str, installed: bool) -> (AgentRecord, DiscoveredAgent) {
        let record = registry_entry(identity).unwrap().to_record();
        let report = if installed {
            ProbeReport {
                installed: true,
                version: "1.2.3".to_string(),
                command: record.run_command.clone(),
                executable: None,
                failures: Vec::new(),
                error: None,
            }
        } else {
            ProbeReport::not_installed(record.run_command.clone(), Vec::new())
        };
        let env: HashMap<String, String> = HashMap::new();
        let agent = classify(&record, report, &env);
        (record, agent)
    }

    #[test]
    fn test_render_agent_list() {
        colored::control::set_override(false);
        let (_, opencode) = discovered("opencode.ai", true);
        let (_, codex) = discovered("codex.openai.com", true);

        let out = render_agent_list(&[opencode, codex], 14);
        assert!(out.contains("OpenCode"));
        assert!(out.contains("1.2.3"));
        assert!(out.contains("not configured"));
        assert!(out.contains("Missing API key. Set one of: OPENAI_API_KEY, CODEX_API_KEY"));
        assert!(out.contains("1 of 14 agents available"));
    }

    #[test]
    fn test_render_empty_list() {
        colored::control::set_override(false);
        assert!(render_agent_list(&[], 3).contains("No agents match."));
    }

    #[test]
    fn test_render_agent_detail() {
        colored::control::set_override(false);
        let (record, agent) = discovered("gemini.google.com", false);
        let out = render_agent_detail(&record, Some(&agent));
        assert!(out.contains("Identity:     gemini.google.com"));
        assert!(out.contains("Alternate:    gemini acp"));
        assert!(out.contains("not installed"));

        assert!(out.lines().any(|line| line == "Status:       not installed"));

        let out = render_agent_detail(&record, None);
        assert!(out.ends_with("Status:       not probed\n"));
    }

    #[test]
    fn test_render_installation() {
        colored::control::set_override(false);
        let record = registry_entry("opencode.ai").unwrap().to_record();
        let out = render_installation(&installation_info(&record));
        assert!(out.contains("Install OpenCode"));
        assert!(out.starts_with("Install OpenCode\n"));
        assert!(out.ends_with("\nRun: npm install -g opencode-ai\n"));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use crate::agents::DefinitionSource;
        use crate::discovery::{HealthChecker, Prober};
        use std::os::unix::fs::PermissionsExt;
        use std::sync::Arc;
        use tempfile::TempDir;

        #[tokio::test]
        async fn test_health_targets_resolved_identity() {
            let bin = TempDir::new().unwrap();
            let script = bin.path().join("zzz-agent");
            std::fs::write(
                &script,
                r#"#!/bin/sh
if [ "$1" = "--version" ]; then echo 0.1.0; exit 0; fi
read line
echo '{"jsonrpc":"2.0","id":1,"result":{}}'
"#,
            )
            .unwrap();
            std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

            let defs = TempDir::new().unwrap();
            std::fs::write(
                defs.path().join("zzz.toml"),
                "identity = \"zzz.example.com\"\nshort_name = \"codex\"\nname = \"Zzz\"\nrun_command = \"zzz-agent\"\n",
            )
            .unwrap();

            let env: HashMap<String, String> = HashMap::new();
            let catalog = AgentCatalog::new(
                DefinitionSource::new(vec![defs.path().to_path_buf()]),
                Arc::new(Prober::new().with_search_path(bin.path().as_os_str())),
                HealthChecker::new(),
                Arc::new(env),
            );

            let (record, report) = check_named(&catalog, "zzz.example.com").await.unwrap().unwrap();
            assert_eq!(record.identity.as_str(), "zzz.example.com");
            assert!(report.healthy, "{}", report.message);

            let (record, report) = check_named(&catalog, "codex").await.unwrap().unwrap();
            assert_eq!(record.identity.as_str(), "codex.openai.com");
            assert!(!report.healthy);

            assert!(check_named(&catalog, "nobody").await.unwrap().is_none());
        }
    }
}
