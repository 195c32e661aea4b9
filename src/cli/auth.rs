// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! `agentscout auth ...` commands. Secret values are never printed.

use anyhow::Context;
use clap::Subcommand;
use colored::Colorize;
use std::collections::BTreeMap;
use std::io::{self, BufRead};
use std::process::ExitCode;

use crate::agents::AgentRecord;
use crate::auth::{AuthInfo, LocalAuthStore};
use crate::discovery::env::is_set;
use crate::discovery::{AgentCatalog, EnvSource, ProcessEnv};

/// Local credential store commands.
#[derive(Debug, Subcommand)]
pub enum AuthCommand {
    /// List stored providers (values are never shown)
    #[command(aliases = &["ls"])]
    List,
    /// Store an API key for a provider
    Set {
        provider: String,
        /// The key; read from stdin when omitted
        key: Option<String>,
    },
    /// Remove a provider's stored credential
    #[command(aliases = &["rm"])]
    Remove { provider: String },
    /// Remove every stored credential
    Clear {
        /// Skip the confirmation
        #[arg(short, long)]
        yes: bool,
    },
    /// Show which of an agent's credential variables are set
    Check { agent: String },
}

impl AuthCommand {
    pub async fn execute(
        self,
        store: &LocalAuthStore,
        catalog: &AgentCatalog,
    ) -> anyhow::Result<ExitCode> {
        match self {
            AuthCommand::List => {
                print!("{}", render_auth_list(store, &store.all()));
                Ok(ExitCode::SUCCESS)
            }
            AuthCommand::Set { provider, key } => {
                let key = match key {
                    Some(key) => key,
                    None => read_key_from_stdin()?,
                };
                let key = key.trim();
                if key.is_empty() {
                    eprintln!("{} Refusing to store an empty key", "✗".red());
                    return Ok(ExitCode::FAILURE);
                }
                store
                    .set(&provider, &AuthInfo::api(key))
                    .with_context(|| format!("storing credential for {provider}"))?;
                println!("{} Stored credential for {}", "✓".green(), provider.bold());
                Ok(ExitCode::SUCCESS)
            }
            AuthCommand::Remove { provider } => {
                if store.remove(&provider)? {
                    println!("{} Removed credential for {}", "✓".green(), provider.bold());
                    Ok(ExitCode::SUCCESS)
                } else {
                    eprintln!("{} No credential stored for {}", "✗".red(), provider);
                    Ok(ExitCode::FAILURE)
                }
            }
            AuthCommand::Clear { yes } => {
                if !yes {
                    eprintln!(
                        "{} This removes every credential in {}. Re-run with --yes to confirm.",
                        "!".yellow(),
                        store.path().display()
                    );
                    return Ok(ExitCode::FAILURE);
                }
                store.clear()?;
                println!("{} Cleared {}", "✓".green(), store.path().display());
                Ok(ExitCode::SUCCESS)
            }
            AuthCommand::Check { agent } => {
                let Some(record) = catalog.find_record(&agent).await? else {
                    eprintln!("{} Unknown agent: {}", "✗".red(), agent);
                    return Ok(ExitCode::FAILURE);
                };
                print!("{}", render_credential_check(&record, &ProcessEnv));
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn read_key_from_stdin() -> anyhow::Result<String> {
    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading key from stdin")?;
    Ok(line)
}

pub fn render_auth_list(store: &LocalAuthStore, entries: &BTreeMap<String, AuthInfo>) -> String {
    if entries.is_empty() {
        let empty = format!("No stored credentials in {}", store.path().display());
        return format!("{}\n", empty.dimmed());
    }
    let mut out = String::new();
    for (provider, info) in entries {
        let expired = if info.is_expired() {
            format!(" {}", "(expired)".red())
        } else {
            String::new()
        };
        out.push_str(&format!("{} {}{}\n", provider.bold(), info.kind().dimmed(), expired));
    }
    out
}

/// Which of the agent's credential variables are set. Never prints values.
pub fn render_credential_check(record: &AgentRecord, env: &dyn EnvSource) -> String {
    if record.credential_env_vars.is_empty() {
        return format!("{} {} needs no credentials\n", "✓".green(), record.name);
    }

    let mut out = String::new();
    let mut any = false;
    for var in &record.credential_env_vars {
        let set = is_set(env, var);
        any |= set;
        let marker = if set { "✓".green() } else { "·".dimmed() };
        let state = if set { "set" } else { "not set" };
        out.push_str(&format!("{} {} {}\n", marker, var, state.dimmed()));
    }
    if !any {
        out.push_str(&format!(
            "{} {} is not configured. Set one of: {}\n",
            "✗".red(),
            record.name,
            record.credential_env_vars.join(", ")
        ));
    }
    out
}
