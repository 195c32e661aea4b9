// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Availability prober.
//!
//! Determines whether an agent's executable is present, extracts a
//! best-effort version string, and falls back to alternate invocation forms
//! when the primary one is missing.

use async_trait::async_trait;
use regex::Regex;
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::LazyLock;
use std::time::Duration;
use tokio::process::Command;
use tokio::time::timeout;

#[cfg(feature = "telemetry")]
use tracing::{debug, instrument, warn};

use crate::agents::{color_for, icon_for, AgentRecord, CommandLine};

use super::env::{has_any_credential, EnvSource};
use super::types::{AgentStatus, DiscoveredAgent, ProbeReport};

/// Wall-clock cap on a single check command.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// Programs that fetch and run a package on demand. They are spawned even
/// when not resolvable up front.
pub const LAUNCHERS: &[&str] = &["npx", "uvx", "bunx"];

/// Placeholder version for a successful check with no version line.
pub const INSTALLED_PLACEHOLDER: &str = "installed";

/// Version reported when the check command hit the timeout.
pub const TIMEOUT_VERSION: &str = "timeout";

static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(?:version|^v?\d)").unwrap());

/// Seam between the catalog and the process-spawning prober.
#[async_trait]
pub trait AvailabilityProbe: Send + Sync {
    async fn probe(&self, record: &AgentRecord) -> ProbeReport;
}

/// Whether `program` is a package launcher such as `npx`.
pub fn is_launcher(program: &str) -> bool {
    let base = std::path::Path::new(program)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(program);
    LAUNCHERS.contains(&base)
}

/// First non-empty line that mentions "version" or starts with a version
/// number (`2.3.1`, `v2.3.1`).
pub fn extract_version(output: &str) -> Option<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .find(|line| VERSION_LINE.is_match(line))
        .map(str::to_string)
}

/// Outcome of running one check command.
#[derive(Debug)]
enum Attempt {
    Installed {
        version: String,
        executable: Option<PathBuf>,
    },
    Missing(String),
    Failed(String),
}

/// Process-spawning [`AvailabilityProbe`].
#[derive(Debug, Clone)]
pub struct Prober {
    timeout: Duration,
    search_path: Option<OsString>,
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}

impl Prober {
    pub fn new() -> Self {
        Self {
            timeout: PROBE_TIMEOUT,
            search_path: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve programs against this `PATH`-style list instead of `PATH`.
    pub fn with_search_path(mut self, search_path: impl Into<OsString>) -> Self {
        self.search_path = Some(search_path.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Locate `program` on the search path.
    pub fn resolve(&self, program: &str) -> Option<PathBuf> {
        match &self.search_path {
            Some(paths) => {
                let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                which::which_in(program, Some(paths), cwd).ok()
            }
            None => which::which(program).ok(),
        }
    }

    #[cfg_attr(feature = "telemetry", instrument(skip(self), fields(command = %check)))]
    async fn attempt(&self, check: &CommandLine) -> Attempt {
        let program = check.program();
        let executable = self.resolve(program);

        if executable.is_none() && !is_launcher(program) {
            return Attempt::Missing(format!("{program}: not found on search path"));
        }

        let target: &OsStr = match &executable {
            Some(path) => path.as_os_str(),
            None => OsStr::new(program),
        };

        let mut cmd = Command::new(target);
        cmd.args(check.args())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        match timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => {
                if !output.status.success() {
                    #[cfg(feature = "telemetry")]
                    debug!(code = ?output.status.code(), "Check command exited non-zero");
                    return Attempt::Installed {
                        version: String::new(),
                        executable,
                    };
                }

                let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
                combined.push('\n');
                combined.push_str(&String::from_utf8_lossy(&output.stderr));

                Attempt::Installed {
                    version: extract_version(&combined)
                        .unwrap_or_else(|| INSTALLED_PLACEHOLDER.to_string()),
                    executable,
                }
            }
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Attempt::Missing(format!("{check}: {e}"))
            }
            Ok(Err(e)) => Attempt::Failed(format!("{check}: {e}")),
            Err(_) => {
                #[cfg(feature = "telemetry")]
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Check command timed out");
                Attempt::Installed {
                    version: TIMEOUT_VERSION.to_string(),
                    executable,
                }
            }
        }
    }
}

#[async_trait]
impl AvailabilityProbe for Prober {
    #[cfg_attr(feature = "telemetry", instrument(skip(self, record), fields(identity = %record.identity)))]
    async fn probe(&self, record: &AgentRecord) -> ProbeReport {
        let mut failures = Vec::new();
        let mut spawn_errors = 0usize;

        let primary = record.primary_check_command();
        let candidates = std::iter::once((record.run_command.clone(), primary)).chain(
            record
                .alt_commands
                .iter()
                .map(|alt| (alt.clone(), alt.with_arg("--version"))),
        );

        for (command, check) in candidates {
            match self.attempt(&check).await {
                Attempt::Installed {
                    version,
                    executable,
                } => {
                    #[cfg(feature = "telemetry")]
                    debug!(command = %command, version = %version, "Agent command found");
                    let executable = if command.program() == check.program() {
                        executable
                    } else {
                        self.resolve(command.program())
                    };
                    return ProbeReport {
                        installed: true,
                        version,
                        command,
                        executable,
                        failures,
                        error: None,
                    };
                }
                Attempt::Missing(reason) => failures.push(reason),
                Attempt::Failed(reason) => {
                    spawn_errors += 1;
                    failures.push(reason);
                }
            }
        }

        let mut report = ProbeReport::not_installed(record.run_command.clone(), failures);
        if spawn_errors > 0 && spawn_errors == report.failures.len() {
            report.error = Some(report.failures.join("; "));
        }
        report
    }
}

/// Message attached to an installed agent with no credential set.
pub fn missing_credentials_message(vars: &[String]) -> String {
    format!("Missing API key. Set one of: {}", vars.join(", "))
}

/// Turn a probe report into the agent's observed status for this pass.
///
/// `available` requires an installed command and, when credentials are
/// declared, at least one of them set and non-empty.
pub fn classify(record: &AgentRecord, report: ProbeReport, env: &dyn EnvSource) -> DiscoveredAgent {
    let has_credentials = has_any_credential(env, &record.credential_env_vars);

    let (status, message) = if report.installed {
        if record.requires_credentials() && !has_credentials {
            (
                AgentStatus::NotConfigured,
                Some(missing_credentials_message(&record.credential_env_vars)),
            )
        } else {
            (AgentStatus::Available, None)
        }
    } else if let Some(error) = report.error {
        (AgentStatus::Error, Some(error))
    } else {
        let message = (!report.failures.is_empty()).then(|| report.failures.join("; "));
        (AgentStatus::NotInstalled, message)
    };

    let version = if report.installed {
        report.version
    } else {
        String::new()
    };

    from_record(record, report.command, report.executable, status, version, message, has_credentials)
}

/// A discovered agent whose probe task itself failed.
pub fn probe_failed(record: &AgentRecord, reason: String, env: &dyn EnvSource) -> DiscoveredAgent {
    let has_credentials = has_any_credential(env, &record.credential_env_vars);
    from_record(
        record,
        record.run_command.clone(),
        None,
        AgentStatus::Error,
        String::new(),
        Some(reason),
        has_credentials,
    )
}

fn from_record(
    record: &AgentRecord,
    command: CommandLine,
    executable: Option<PathBuf>,
    status: AgentStatus,
    version: String,
    message: Option<String>,
    has_credentials: bool,
) -> DiscoveredAgent {
    DiscoveredAgent {
        identity: record.identity.clone(),
        name: record.name.clone(),
        short_name: record.short_name.clone(),
        command,
        executable,
        status,
        version,
        message,
        credential_env_vars: record.credential_env_vars.clone(),
        has_credentials,
        declared_status: record.status,
        capabilities: record.capabilities.clone(),
        description: record.description.clone(),
        provenance: record.provenance,
        models: record.kind.map(|k| k.models()).unwrap_or(&[]),
        icon: icon_for(record.kind),
        color: color_for(record.kind),
    }
}
