// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! The agent catalog: the query surface the CLI consumes.
//!
//! A catalog owns one discovery snapshot. The snapshot is produced by a full
//! pass (read local definitions, merge with the registry, probe every
//! candidate concurrently) and is only ever replaced wholesale, so readers
//! see either the previous pass or the next one.

use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinSet;

use tracing::{debug, info, warn};

use crate::agents::{
    merge, registry_entry, registry_records, AgentIdentity, AgentRecord, DeclaredStatus,
    DefinitionSource,
};
use crate::error::DefinitionReadError;

use super::env::{EnvSource, ProcessEnv};
use super::health::{HealthChecker, MSG_NOT_FOUND};
use super::probe::{classify, probe_failed, AvailabilityProbe, Prober};
use super::types::{DiscoveredAgent, HealthReport, ProbeReport};

type Records = Arc<BTreeMap<AgentIdentity, AgentRecord>>;

/// How to install an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstallationInfo {
    pub command: String,
    pub description: String,
    pub instructions: String,
}

/// Text after the `## Installation` heading of a help block.
fn installation_section(help: &str) -> Option<&str> {
    help.split_once("## Installation")
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
}

/// Installation details for a record, falling back to the registry entry
/// for the same identity when the record declares no install command.
pub fn installation_info(record: &AgentRecord) -> InstallationInfo {
    if let Some(command) = record.install_command.as_deref().filter(|c| !c.is_empty()) {
        let instructions = record
            .install_instructions
            .clone()
            .or_else(|| {
                record
                    .help
                    .as_deref()
                    .and_then(installation_section)
                    .map(str::to_string)
            })
            .unwrap_or_default();
        return InstallationInfo {
            command: command.to_string(),
            description: format!("Install {}", record.name),
            instructions,
        };
    }

    if let Some(entry) = registry_entry(record.identity.as_str()) {
        if !entry.install_command.is_empty() {
            return InstallationInfo {
                command: entry.install_command.to_string(),
                description: format!("Install {}", entry.name),
                instructions: entry.install_instructions.to_string(),
            };
        }
    }

    InstallationInfo {
        command: String::new(),
        description: "Installation not available".to_string(),
        instructions: "No installation instructions available for this agent.".to_string(),
    }
}

/// Explicitly constructed discovery catalog.
pub struct AgentCatalog {
    source: DefinitionSource,
    include_registry: bool,
    prober: Arc<dyn AvailabilityProbe>,
    health: HealthChecker,
    env: Arc<dyn EnvSource>,
    records: RwLock<Option<Records>>,
    snapshot: RwLock<Option<Arc<Vec<DiscoveredAgent>>>>,
    /// Serializes discovery passes.
    pass: Mutex<()>,
}

impl AgentCatalog {
    pub fn new(
        source: DefinitionSource,
        prober: Arc<dyn AvailabilityProbe>,
        health: HealthChecker,
        env: Arc<dyn EnvSource>,
    ) -> Self {
        Self {
            source,
            include_registry: true,
            prober,
            health,
            env,
            records: RwLock::new(None),
            snapshot: RwLock::new(None),
            pass: Mutex::new(()),
        }
    }

    /// A catalog using the real prober, health checker and environment.
    pub fn with_defaults(source: DefinitionSource) -> Self {
        Self::new(
            source,
            Arc::new(Prober::new()),
            HealthChecker::new(),
            Arc::new(ProcessEnv),
        )
    }

    /// Whether registry entries take part in discovery (default true).
    pub fn include_registry(mut self, include: bool) -> Self {
        self.include_registry = include;
        self
    }

    pub fn source(&self) -> &DefinitionSource {
        &self.source
    }

    /// Merged metadata, without probing.
    ///
    /// Local definitions are re-read when `force` is set or nothing is
    /// cached yet.
    pub async fn records(&self, force: bool) -> Result<Records, DefinitionReadError> {
        if !force {
            if let Some(records) = self.records.read().await.as_ref() {
                return Ok(Arc::clone(records));
            }
        }

        let local = self.source.read()?;
        let registry = if self.include_registry {
            registry_records()
        } else {
            BTreeMap::new()
        };
        let merged = Arc::new(merge(local, registry));
        debug!(count = merged.len(), "Merged agent records");

        *self.records.write().await = Some(Arc::clone(&merged));
        Ok(merged)
    }

    /// Look up merged metadata by identity, then by short name.
    pub async fn find_record(&self, id_or_short_name: &str) -> Result<Option<AgentRecord>, DefinitionReadError> {
        let records = self.records(false).await?;
        if let Some(record) = records.get(id_or_short_name) {
            return Ok(Some(record.clone()));
        }
        Ok(records
            .values()
            .find(|record| record.matches_short_name(id_or_short_name))
            .cloned())
    }

    /// Run a discovery pass, or return the cached one.
    ///
    /// Dropping the returned future aborts the in-flight probes and kills
    /// their check commands.
    pub async fn discover_all(&self, force: bool) -> Result<Arc<Vec<DiscoveredAgent>>, DefinitionReadError> {
        if !force {
            if let Some(snapshot) = self.cached().await {
                return Ok(snapshot);
            }
        }

        let _pass = self.pass.lock().await;
        if !force {
            // Another caller may have finished a pass while we waited.
            if let Some(snapshot) = self.cached().await {
                return Ok(snapshot);
            }
        }

        let records = self.records(true).await?;
        let agents = Arc::new(self.probe_all(&records).await);

        let available = agents.iter().filter(|a| a.is_available()).count();
        info!(total = agents.len(), available, "Agent discovery complete");

        *self.snapshot.write().await = Some(Arc::clone(&agents));
        Ok(agents)
    }

    async fn cached(&self) -> Option<Arc<Vec<DiscoveredAgent>>> {
        self.snapshot.read().await.as_ref().map(Arc::clone)
    }

    async fn probe_all(&self, records: &Records) -> Vec<DiscoveredAgent> {
        let candidates: Vec<AgentRecord> = records.values().cloned().collect();

        let mut probes = JoinSet::new();
        for (idx, record) in candidates.iter().cloned().enumerate() {
            let prober = Arc::clone(&self.prober);
            probes.spawn(async move { (idx, prober.probe(&record).await) });
        }

        let mut reports: Vec<Option<ProbeReport>> = vec![None; candidates.len()];
        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok((idx, report)) => reports[idx] = Some(report),
                Err(e) => warn!(error = %e, "Probe task failed"),
            }
        }

        candidates
            .iter()
            .zip(reports)
            .map(|(record, report)| match report {
                Some(report) => classify(record, report, self.env.as_ref()),
                None => probe_failed(record, "Probe task failed".to_string(), self.env.as_ref()),
            })
            .collect()
    }

    /// First agent in the current snapshot whose short name matches,
    /// ignoring case.
    pub async fn get_agent(&self, short_name: &str) -> Option<DiscoveredAgent> {
        self.cached()
            .await?
            .iter()
            .find(|agent| agent.matches_short_name(short_name))
            .cloned()
    }

    pub async fn get_agent_by_identity(&self, identity: &str) -> Option<DiscoveredAgent> {
        self.cached()
            .await?
            .iter()
            .find(|agent| agent.identity.as_str() == identity)
            .cloned()
    }

    /// Agents in the current snapshot with status `available`.
    pub async fn get_available_agents(&self) -> Vec<DiscoveredAgent> {
        self.filtered(DiscoveredAgent::is_available).await
    }

    /// The whole current snapshot, empty before the first pass.
    pub async fn get_all_agents(&self) -> Vec<DiscoveredAgent> {
        self.filtered(|_| true).await
    }

    /// Agents whose declared status is `available`.
    pub async fn get_supported_agents(&self) -> Vec<DiscoveredAgent> {
        self.filtered(|agent| agent.declared_status == DeclaredStatus::Available)
            .await
    }

    async fn filtered(&self, keep: impl Fn(&DiscoveredAgent) -> bool) -> Vec<DiscoveredAgent> {
        match self.cached().await {
            Some(snapshot) => snapshot.iter().filter(|a| keep(*a)).cloned().collect(),
            None => Vec::new(),
        }
    }

    /// Health-check the first agent in the current snapshot matching
    /// `short_name`.
    pub async fn health_check(&self, short_name: &str) -> HealthReport {
        self.check_found(self.get_agent(short_name).await).await
    }

    /// Health-check exactly the agent with `identity`. Short names may be
    /// shared; identities are not.
    pub async fn health_check_identity(&self, identity: &str) -> HealthReport {
        self.check_found(self.get_agent_by_identity(identity).await).await
    }

    async fn check_found(&self, agent: Option<DiscoveredAgent>) -> HealthReport {
        match agent {
            Some(agent) => self.health.check(&agent).await,
            None => HealthReport::unhealthy(MSG_NOT_FOUND),
        }
    }
}
