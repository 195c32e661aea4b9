// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Built-in registry of known ACP agents.
//!
//! The registry is a compiled-in table. Per-agent presentation data (model
//! lists, icons, colors) hangs off the closed [`KnownAgent`] enum so that an
//! unknown agent simply has no profile instead of an empty default.

use serde::Serialize;
use std::collections::BTreeMap;

use super::types::{AgentIdentity, AgentRecord, CommandLine, DeclaredStatus, Provenance};

/// Capability tags every ACP agent in the registry is expected to offer.
pub const STANDARD_ACP_CAPABILITIES: &[&str] = &["file_read", "file_write", "shell", "search"];

const DEFAULT_ICON: &str = "🤖";
const DEFAULT_COLOR: &str = "#a855f7";

/// Agents this crate has a built-in profile for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnownAgent {
    OpenCode,
    OpenHands,
    ClaudeCode,
    Codex,
    Goose,
    Gemini,
    Cursor,
    Aider,
    Stakpak,
    VtCode,
    CodeAssistant,
    Cagent,
    FastAgent,
    LlmlingAgent,
}

/// A model an agent can be driven with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentModel {
    pub id: &'static str,
    pub name: &'static str,
    pub is_free: bool,
    pub description: &'static str,
}

const fn model(id: &'static str, name: &'static str) -> AgentModel {
    AgentModel {
        id,
        name,
        is_free: false,
        description: "",
    }
}

const fn free_model(id: &'static str, name: &'static str) -> AgentModel {
    AgentModel {
        id,
        name,
        is_free: true,
        description: "",
    }
}

const OPENCODE_MODELS: &[AgentModel] = &[
    AgentModel {
        id: "auto",
        name: "Auto",
        is_free: true,
        description: "Automatic model selection",
    },
    free_model("claude-3-5-sonnet", "Claude 3.5 Sonnet"),
    free_model("gpt-4o", "GPT-4o"),
    free_model("gemini-1.5-pro", "Gemini 1.5 Pro"),
];

const OPENHANDS_MODELS: &[AgentModel] = &[AgentModel {
    id: "default",
    name: "Default",
    is_free: false,
    description: "Default model",
}];

const CLAUDE_CODE_MODELS: &[AgentModel] = &[
    model("claude-3-5-sonnet-20241022", "Claude 3.5 Sonnet"),
    model("claude-3-opus-20240229", "Claude 3 Opus"),
];

const CODEX_MODELS: &[AgentModel] = &[
    model("gpt-5.2", "GPT-5.2 (Latest)"),
    model("gpt-5.2-pro", "GPT-5.2 Pro"),
    model("gpt-5.2-codex", "GPT-5.2 Codex"),
    model("gpt-5.1", "GPT-5.1"),
    model("gpt-5.1-codex", "GPT-5.1 Codex"),
    model("gpt-5.1-codex-mini", "GPT-5.1 Codex Mini"),
    model("gpt-4o", "GPT-4o"),
    model("gpt-4-turbo", "GPT-4 Turbo"),
];

const DEFAULT_MODELS: &[AgentModel] = &[model("default", "Default")];

const GEMINI_MODELS: &[AgentModel] = &[
    model("gemini-1.5-pro", "Gemini 1.5 Pro"),
    model("gemini-1.5-flash", "Gemini 1.5 Flash"),
];

const AIDER_MODELS: &[AgentModel] = &[
    model("gpt-4o", "GPT-4o"),
    model("claude-3-5-sonnet", "Claude 3.5 Sonnet"),
];

impl KnownAgent {
    /// Resolve the profile for an identity, if the registry knows it.
    pub fn from_identity(identity: &str) -> Option<Self> {
        REGISTRY
            .iter()
            .find(|entry| entry.identity == identity)
            .map(|entry| entry.kind)
    }

    /// Identity of this agent in the registry.
    pub fn identity(&self) -> &'static str {
        match self {
            Self::OpenCode => "opencode.ai",
            Self::OpenHands => "openhands.dev",
            Self::ClaudeCode => "claude-code.anthropic.com",
            Self::Codex => "codex.openai.com",
            Self::Goose => "goose.block.xyz",
            Self::Gemini => "gemini.google.com",
            Self::Cursor => "cursor.com",
            Self::Aider => "aider.chat",
            Self::Stakpak => "stakpak.ai",
            Self::VtCode => "vtcode.ai",
            Self::CodeAssistant => "codeassistant.ai",
            Self::Cagent => "cagent.ai",
            Self::FastAgent => "fastagent.ai",
            Self::LlmlingAgent => "llmlingagent.ai",
        }
    }

    /// Models the agent is known to support.
    pub fn models(&self) -> &'static [AgentModel] {
        match self {
            Self::OpenCode => OPENCODE_MODELS,
            Self::OpenHands => OPENHANDS_MODELS,
            Self::ClaudeCode => CLAUDE_CODE_MODELS,
            Self::Codex => CODEX_MODELS,
            Self::Goose | Self::Cursor => DEFAULT_MODELS,
            Self::Gemini => GEMINI_MODELS,
            Self::Aider => AIDER_MODELS,
            Self::Stakpak
            | Self::VtCode
            | Self::CodeAssistant
            | Self::Cagent
            | Self::FastAgent
            | Self::LlmlingAgent => &[],
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::OpenCode => "🌿",
            Self::OpenHands => "🤝",
            Self::ClaudeCode => "🧡",
            Self::Codex => "📜",
            Self::Goose => "🦆",
            Self::Gemini => "✨",
            Self::Cursor => "▸",
            Self::Aider => "🔧",
            Self::Stakpak
            | Self::VtCode
            | Self::CodeAssistant
            | Self::Cagent
            | Self::FastAgent
            | Self::LlmlingAgent => DEFAULT_ICON,
        }
    }

    /// Accent color as a hex string.
    pub fn color(&self) -> &'static str {
        match self {
            Self::OpenCode => "#22c55e",
            Self::OpenHands => "#f97316",
            Self::ClaudeCode => "#d97706",
            Self::Codex => "#10b981",
            Self::Goose => "#8b5cf6",
            Self::Gemini => "#4285f4",
            Self::Cursor => "#06b6d4",
            Self::Aider => "#f43f5e",
            Self::Stakpak
            | Self::VtCode
            | Self::CodeAssistant
            | Self::Cagent
            | Self::FastAgent
            | Self::LlmlingAgent => DEFAULT_COLOR,
        }
    }
}

/// Icon for an optional profile, falling back to the generic robot.
pub fn icon_for(kind: Option<KnownAgent>) -> &'static str {
    kind.map(|k| k.icon()).unwrap_or(DEFAULT_ICON)
}

/// Color for an optional profile, falling back to the default accent.
pub fn color_for(kind: Option<KnownAgent>) -> &'static str {
    kind.map(|k| k.color()).unwrap_or(DEFAULT_COLOR)
}

/// One row of the built-in registry.
#[derive(Debug, Clone, Copy)]
pub struct RegistryEntry {
    pub kind: KnownAgent,
    pub identity: &'static str,
    pub name: &'static str,
    pub short_name: &'static str,
    pub description: &'static str,
    pub url: &'static str,
    pub author_name: &'static str,
    pub author_url: &'static str,
    pub run_command: &'static [&'static str],
    pub check_command: Option<&'static [&'static str]>,
    pub alt_commands: &'static [&'static [&'static str]],
    pub install_command: &'static str,
    pub install_instructions: &'static str,
    pub requirements: &'static [&'static str],
    pub status: DeclaredStatus,
    pub credential_env_vars: &'static [&'static str],
}

impl RegistryEntry {
    /// Synthesize the unified record for this entry.
    ///
    /// Install instructions are embedded into the free-text help.
    pub fn to_record(&self) -> AgentRecord {
        let install_command = non_empty(self.install_command);
        let install_instructions = non_empty(self.install_instructions);

        let mut help = format!("# {}\n\n{}", self.name, self.description);
        if let Some(instructions) = &install_instructions {
            help.push_str(&format!("\n\n## Installation\n\n{instructions}"));
        }
        if let Some(command) = &install_command {
            help.push_str(&format!("\n\nRun: `{command}`"));
        }

        AgentRecord {
            identity: AgentIdentity::from_trusted(self.identity),
            name: self.name.to_string(),
            short_name: self.short_name.to_string(),
            description: self.description.to_string(),
            url: non_empty(self.url),
            author_name: non_empty(self.author_name),
            author_url: non_empty(self.author_url),
            run_command: CommandLine::from_parts(self.run_command),
            check_command: self.check_command.map(CommandLine::from_parts),
            alt_commands: self
                .alt_commands
                .iter()
                .map(|parts| CommandLine::from_parts(parts))
                .collect(),
            install_command,
            install_instructions,
            help: Some(help),
            requirements: to_strings(self.requirements),
            status: self.status,
            capabilities: to_strings(STANDARD_ACP_CAPABILITIES),
            credential_env_vars: to_strings(self.credential_env_vars),
            provenance: Provenance::Registry,
            kind: Some(self.kind),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

const NODE: &[&str] = &["node", "npm"];
const PYTHON: &[&str] = &["python3", "pip"];
const OPENAI_OR_ANTHROPIC: &[&str] = &["OPENAI_API_KEY", "ANTHROPIC_API_KEY"];

static REGISTRY: &[RegistryEntry] = &[
    RegistryEntry {
        kind: KnownAgent::OpenCode,
        identity: "opencode.ai",
        name: "OpenCode",
        short_name: "opencode",
        description: "Open-source AI coding assistant with full file and shell capabilities.",
        url: "https://opencode.ai",
        author_name: "SST",
        author_url: "https://github.com/sst",
        run_command: &["opencode", "acp"],
        check_command: Some(&["opencode", "--version"]),
        alt_commands: &[],
        install_command: "npm install -g opencode-ai",
        install_instructions: "Install OpenCode via npm. Requires Node.js and npm.",
        requirements: NODE,
        status: DeclaredStatus::Available,
        credential_env_vars: &[],
    },
    RegistryEntry {
        kind: KnownAgent::OpenHands,
        identity: "openhands.dev",
        name: "OpenHands",
        short_name: "openhands",
        description: "AI software development agent.",
        url: "https://github.com/All-Hands-AI/OpenHands",
        author_name: "All Hands AI",
        author_url: "https://github.com/All-Hands-AI",
        run_command: &["openhands", "acp"],
        check_command: Some(&["openhands", "--version"]),
        alt_commands: &[],
        install_command: "pip install openhands-ai",
        install_instructions: "Install OpenHands via pip. Requires Python 3.12+.",
        requirements: PYTHON,
        status: DeclaredStatus::Available,
        credential_env_vars: OPENAI_OR_ANTHROPIC,
    },
    RegistryEntry {
        kind: KnownAgent::ClaudeCode,
        identity: "claude-code.anthropic.com",
        name: "Claude Code",
        short_name: "claude-code",
        description: "Anthropic's Claude for coding, through the Zed ACP adapter.",
        url: "https://claude.ai/code",
        author_name: "Anthropic",
        author_url: "https://anthropic.com",
        run_command: &["claude-code-acp"],
        check_command: Some(&["claude-code-acp", "--version"]),
        alt_commands: &[
            &["npx", "@zed-industries/claude-code-acp"],
            &["npx", "-y", "@zed-industries/claude-code-acp"],
        ],
        install_command: "npm install -g @zed-industries/claude-code-acp",
        install_instructions: "Install the Claude Code ACP adapter via npm. Requires Node.js and npm.",
        requirements: NODE,
        status: DeclaredStatus::Available,
        credential_env_vars: &["ANTHROPIC_API_KEY"],
    },
    RegistryEntry {
        kind: KnownAgent::Codex,
        identity: "codex.openai.com",
        name: "Codex",
        short_name: "codex",
        description: "OpenAI's code generation agent with streaming terminal output and community adapters.",
        url: "https://openai.com/codex",
        author_name: "OpenAI",
        author_url: "https://openai.com",
        run_command: &["npx", "@openai/codex-acp"],
        check_command: Some(&["npx", "@openai/codex-acp", "--version"]),
        alt_commands: &[&["codex-acp"], &["npx", "-y", "@openai/codex-acp"]],
        install_command: "npm install -g @zed-industries/codex-acp",
        install_instructions: "Install Codex ACP adapter via npm. Requires Node.js and npm.",
        requirements: NODE,
        status: DeclaredStatus::Available,
        credential_env_vars: &["OPENAI_API_KEY", "CODEX_API_KEY"],
    },
    RegistryEntry {
        kind: KnownAgent::Goose,
        identity: "goose.block.xyz",
        name: "Goose",
        short_name: "goose",
        description: "Block's open-source AI coding agent.",
        url: "https://github.com/block/goose",
        author_name: "Block",
        author_url: "https://github.com/block",
        run_command: &["goose", "acp"],
        check_command: Some(&["goose", "--version"]),
        alt_commands: &[],
        install_command: "brew install block-goose-cli",
        install_instructions: "Install the Goose CLI with Homebrew or the release script from GitHub.",
        requirements: &[],
        status: DeclaredStatus::Available,
        credential_env_vars: OPENAI_OR_ANTHROPIC,
    },
    RegistryEntry {
        kind: KnownAgent::Gemini,
        identity: "gemini.google.com",
        name: "Gemini CLI",
        short_name: "gemini",
        description: "Google's Gemini AI in the terminal.",
        url: "https://ai.google.dev",
        author_name: "Google",
        author_url: "https://google.com",
        run_command: &["gemini-cli", "acp"],
        check_command: Some(&["gemini-cli", "--version"]),
        alt_commands: &[&["gemini", "acp"]],
        install_command: "npm install -g @google/gemini-cli",
        install_instructions: "Install Gemini CLI via npm. Requires Node.js and npm.",
        requirements: NODE,
        status: DeclaredStatus::Available,
        credential_env_vars: &["GOOGLE_API_KEY", "GEMINI_API_KEY"],
    },
    RegistryEntry {
        kind: KnownAgent::Cursor,
        identity: "cursor.com",
        name: "Cursor",
        short_name: "cursor",
        description: "Cursor AI editor agent.",
        url: "https://cursor.sh",
        author_name: "Anysphere",
        author_url: "https://cursor.sh",
        run_command: &["cursor", "acp"],
        check_command: Some(&["cursor", "--version"]),
        alt_commands: &[],
        install_command: "",
        install_instructions: "Install Cursor from https://cursor.sh and sign in.",
        requirements: &[],
        status: DeclaredStatus::ComingSoon,
        credential_env_vars: &[],
    },
    RegistryEntry {
        kind: KnownAgent::Aider,
        identity: "aider.chat",
        name: "Aider",
        short_name: "aider",
        description: "AI pair programming in your terminal.",
        url: "https://aider.chat",
        author_name: "Aider",
        author_url: "https://github.com/Aider-AI",
        run_command: &["aider", "--acp"],
        check_command: Some(&["aider", "--version"]),
        alt_commands: &[],
        install_command: "pip install aider-chat",
        install_instructions: "Install Aider via pip. Requires Python 3.9+.",
        requirements: PYTHON,
        status: DeclaredStatus::ComingSoon,
        credential_env_vars: OPENAI_OR_ANTHROPIC,
    },
    RegistryEntry {
        kind: KnownAgent::Stakpak,
        identity: "stakpak.ai",
        name: "Stakpak",
        short_name: "stakpak",
        description: "An ACP-compatible agent focused on providing comprehensive code assistance and collaboration features.",
        url: "https://github.com/stakpak/stakpak",
        author_name: "Stakpak",
        author_url: "https://github.com/stakpak",
        run_command: &["stakpak"],
        check_command: None,
        alt_commands: &[],
        install_command: "pip install stakpak",
        install_instructions: "Install Stakpak via pip. Requires Python 3.8+.",
        requirements: PYTHON,
        status: DeclaredStatus::Available,
        credential_env_vars: &[],
    },
    RegistryEntry {
        kind: KnownAgent::VtCode,
        identity: "vtcode.ai",
        name: "VT Code",
        short_name: "vtcode",
        description: "A versatile coding agent implementing ACP for seamless integration with compatible development environments.",
        url: "https://github.com/vtcode/vtcode",
        author_name: "VT Code",
        author_url: "https://github.com/vtcode",
        run_command: &["vtcode-acp"],
        check_command: None,
        alt_commands: &[],
        install_command: "npm install -g vtcode-acp",
        install_instructions: "Install VT Code ACP adapter via npm. Requires Node.js and npm.",
        requirements: NODE,
        status: DeclaredStatus::Available,
        credential_env_vars: &[],
    },
    RegistryEntry {
        kind: KnownAgent::CodeAssistant,
        identity: "codeassistant.ai",
        name: "Code Assistant",
        short_name: "codeassistant",
        description: "An AI coding assistant built in Rust for autonomous code analysis and modification.",
        url: "https://github.com/codeassistant/codeassistant",
        author_name: "Code Assistant",
        author_url: "https://github.com/codeassistant",
        run_command: &["code-assistant"],
        check_command: None,
        alt_commands: &[],
        install_command: "cargo install code-assistant",
        install_instructions: "Install Code Assistant via Cargo. Requires Rust toolchain.",
        requirements: &["rust", "cargo"],
        status: DeclaredStatus::Available,
        credential_env_vars: &[],
    },
    RegistryEntry {
        kind: KnownAgent::Cagent,
        identity: "cagent.ai",
        name: "cagent",
        short_name: "cagent",
        description: "A powerful, easy-to-use, customizable multi-agent runtime that orchestrates AI agents.",
        url: "https://github.com/cagent/cagent",
        author_name: "cagent",
        author_url: "https://github.com/cagent",
        run_command: &["cagent"],
        check_command: None,
        alt_commands: &[],
        install_command: "pip install cagent",
        install_instructions: "Install cagent via pip. Requires Python 3.8+.",
        requirements: PYTHON,
        status: DeclaredStatus::Available,
        credential_env_vars: &[],
    },
    RegistryEntry {
        kind: KnownAgent::FastAgent,
        identity: "fastagent.ai",
        name: "fast-agent",
        short_name: "fastagent",
        description: "Create and interact with sophisticated Agents and Workflows in minutes.",
        url: "https://github.com/fastagent/fast-agent",
        author_name: "fast-agent",
        author_url: "https://github.com/fastagent",
        run_command: &["fast-agent"],
        check_command: None,
        alt_commands: &[],
        install_command: "npm install -g fast-agent",
        install_instructions: "Install fast-agent via npm. Requires Node.js and npm.",
        requirements: NODE,
        status: DeclaredStatus::Available,
        credential_env_vars: &[],
    },
    RegistryEntry {
        kind: KnownAgent::LlmlingAgent,
        identity: "llmlingagent.ai",
        name: "LLMling-Agent",
        short_name: "llmlingagent",
        description: "A framework for creating and managing LLM-powered agents to provide structured interactions.",
        url: "https://github.com/llmling/llmling-agent",
        author_name: "LLMling",
        author_url: "https://github.com/llmling",
        run_command: &["llmling-agent"],
        check_command: None,
        alt_commands: &[],
        install_command: "pip install llmling-agent",
        install_instructions: "Install LLMling-Agent via pip. Requires Python 3.8+.",
        requirements: PYTHON,
        status: DeclaredStatus::Available,
        credential_env_vars: &[],
    },
];

/// All built-in registry entries.
pub fn registry_entries() -> &'static [RegistryEntry] {
    REGISTRY
}

/// Look up a registry entry by identity.
pub fn registry_entry(identity: &str) -> Option<&'static RegistryEntry> {
    REGISTRY.iter().find(|entry| entry.identity == identity)
}

/// Look up a registry entry by short name (case-insensitive).
pub fn registry_entry_by_short_name(short_name: &str) -> Option<&'static RegistryEntry> {
    REGISTRY
        .iter()
        .find(|entry| entry.short_name.eq_ignore_ascii_case(short_name))
}

/// The whole registry as unified records keyed by identity.
pub fn registry_records() -> BTreeMap<AgentIdentity, AgentRecord> {
    REGISTRY
        .iter()
        .map(|entry| {
            let record = entry.to_record();
            (record.identity.clone(), record)
        })
        .collect()
}
