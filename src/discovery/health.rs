// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! ACP handshake health check.

use std::ffi::OsStr;
use std::process::Stdio;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tokio::time::timeout;

#[cfg(feature = "telemetry")]
use tracing::{debug, instrument, warn};

use super::types::{AgentStatus, DiscoveredAgent, HealthReport};

/// How long to wait for the agent to answer the hello request.
pub const HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

/// Single-line JSON-RPC request sent to the agent.
pub const HELLO_REQUEST: &str = r#"{"jsonrpc":"2.0","method":"hello","id":1,"params":{}}"#;

pub const MSG_NOT_FOUND: &str = "Agent not found";
pub const MSG_NOT_INSTALLED: &str = "Agent not installed";
pub const MSG_NOT_CONFIGURED: &str = "Agent not configured";
pub const MSG_HEALTHY: &str = "Agent is healthy";
pub const MSG_NO_HANDSHAKE: &str = "Agent did not respond to handshake";

/// Whether the agent's output indicates a successful reply.
pub fn is_success_response(output: &str) -> bool {
    let lower = output.to_lowercase();
    lower.contains("success") || lower.contains("result")
}

/// Runs the hello handshake against an available agent.
#[derive(Debug, Clone)]
pub struct HealthChecker {
    timeout: Duration,
}

impl Default for HealthChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl HealthChecker {
    pub fn new() -> Self {
        Self {
            timeout: HEALTH_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check one agent. Never fails; every problem ends up in the report.
    #[cfg_attr(feature = "telemetry", instrument(skip(self, agent), fields(agent = %agent.short_name)))]
    pub async fn check(&self, agent: &DiscoveredAgent) -> HealthReport {
        match agent.status {
            AgentStatus::Available => {}
            AgentStatus::NotInstalled => return HealthReport::unhealthy(MSG_NOT_INSTALLED),
            AgentStatus::NotConfigured | AgentStatus::Error => {
                return HealthReport::unhealthy(
                    agent
                        .message
                        .clone()
                        .unwrap_or_else(|| MSG_NOT_CONFIGURED.to_string()),
                );
            }
        }

        let program: &OsStr = match &agent.executable {
            Some(path) => path.as_os_str(),
            None => OsStr::new(agent.command.program()),
        };

        let mut cmd = Command::new(program);
        cmd.args(agent.command.args())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => return HealthReport::unhealthy(format!("Failed to start {}: {e}", agent.command)),
        };

        if let Some(mut stdin) = child.stdin.take() {
            let request = format!("{HELLO_REQUEST}\n");
            // An agent that exits early closes the pipe; it is judged on its output.
            if let Err(e) = stdin.write_all(request.as_bytes()).await {
                #[cfg(feature = "telemetry")]
                debug!(error = %e, "Failed to write hello request");
                drop(e);
            }
        }

        match timeout(self.timeout, child.wait_with_output()).await {
            Ok(Ok(output)) => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                if is_success_response(&stdout) {
                    HealthReport::healthy(MSG_HEALTHY)
                } else {
                    HealthReport::unhealthy(MSG_NO_HANDSHAKE)
                }
            }
            Ok(Err(e)) => HealthReport::unhealthy(format!("Failed to read from {}: {e}", agent.command)),
            Err(_) => {
                #[cfg(feature = "telemetry")]
                warn!(timeout_ms = self.timeout.as_millis() as u64, "Health check timed out");
                HealthReport::unhealthy(MSG_NO_HANDSHAKE)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::{AgentIdentity, CommandLine, DeclaredStatus, Provenance};

    fn agent(command: &str, status: AgentStatus, message: Option<&str>) -> DiscoveredAgent {
        DiscoveredAgent {
            identity: AgentIdentity::new("test.example.com").unwrap(),
            name: "Test".to_string(),
            short_name: "test".to_string(),
            command: CommandLine::parse(command).unwrap(),
            executable: None,
            status,
            version: String::new(),
            message: message.map(str::to_string),
            credential_env_vars: Vec::new(),
            has_credentials: false,
            declared_status: DeclaredStatus::Available,
            capabilities: Vec::new(),
            description: String::new(),
            provenance: Provenance::Local,
            models: &[],
            icon: "🤖",
            color: "#a855f7",
        }
    }

    #[test]
    fn test_success_response_detection() {
        assert!(is_success_response(r#"{"jsonrpc":"2.0","id":1,"result":{}}"#));
        assert!(is_success_response("SUCCESS"));
        assert!(!is_success_response(r#"{"error":{"code":-32601}}"#));
    }

    #[tokio::test]
    async fn test_preconditions_spawn_nothing() {
        let checker = HealthChecker::new();

        let report = checker
            .check(&agent("never-run", AgentStatus::NotInstalled, None))
            .await;
        assert_eq!(report, HealthReport::unhealthy(MSG_NOT_INSTALLED));

        let report = checker
            .check(&agent(
                "never-run",
                AgentStatus::NotConfigured,
                Some("Missing API key. Set one of: X_API_KEY"),
            ))
            .await;
        assert!(!report.healthy);
        assert!(report.message.contains("X_API_KEY"));

        let report = checker
            .check(&agent("never-run", AgentStatus::NotConfigured, None))
            .await;
        assert_eq!(report.message, MSG_NOT_CONFIGURED);
    }

    #[tokio::test]
    async fn test_spawn_failure_is_reported() {
        let report = HealthChecker::new()
            .check(&agent(
                "/nonexistent/agentscout-test-binary",
                AgentStatus::Available,
                None,
            ))
            .await;
        assert!(!report.healthy);
        assert!(report.message.starts_with("Failed to start"));
    }

    #[cfg(unix)]
    mod unix {
        use super::*;
        use std::os::unix::fs::PermissionsExt;
        use tempfile::TempDir;

        fn script(dir: &std::path::Path, name: &str, body: &str) -> String {
            let path = dir.join(name);
            std::fs::write(&path, format!("#!/bin/sh\n{body}\n")).unwrap();
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
            path.to_string_lossy().into_owned()
        }

        #[tokio::test]
        async fn test_healthy_agent() {
            let temp = TempDir::new().unwrap();
            let path = script(
                temp.path(),
                "echo-agent",
                r#"read line
echo '{"jsonrpc":"2.0","id":1,"result":{}}'"#,
            );

            let report = HealthChecker::new()
                .check(&agent(&path, AgentStatus::Available, None))
                .await;
            assert_eq!(report, HealthReport::healthy(MSG_HEALTHY));
        }

        #[tokio::test]
        async fn test_agent_receives_hello() {
            let temp = TempDir::new().unwrap();
            let path = script(
                temp.path(),
                "picky-agent",
                r#"read line
case "$line" in
  *'"method":"hello"'*) echo ok-result ;;
  *) echo nope ;;
esac"#,
            );

            let report = HealthChecker::new()
                .check(&agent(&path, AgentStatus::Available, None))
                .await;
            assert!(report.healthy);
        }

        #[tokio::test]
        async fn test_wrong_reply_is_unhealthy() {
            let temp = TempDir::new().unwrap();
            let path = script(temp.path(), "rude-agent", "read line\necho 'go away'");

            let report = HealthChecker::new()
                .check(&agent(&path, AgentStatus::Available, None))
                .await;
            assert_eq!(report, HealthReport::unhealthy(MSG_NO_HANDSHAKE));
        }

        #[tokio::test]
        async fn test_hung_agent_times_out() {
            let temp = TempDir::new().unwrap();
            let path = script(temp.path(), "hung-agent", "sleep 30");

            let started = std::time::Instant::now();
            let report = HealthChecker::new()
                .with_timeout(Duration::from_millis(300))
                .check(&agent(&path, AgentStatus::Available, None))
                .await;
            assert!(started.elapsed() < Duration::from_secs(5));
            assert!(!report.healthy);
        }
    }
}
