// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Local credential storage.
//!
//! An optional alternative to exporting API keys in the environment: keys
//! live in a single JSON file (`~/.agentscout/auth.json` by default) that is
//! only readable by its owner.
//!
//! ```json
//! {
//!   "anthropic": { "type": "api", "key": "sk-..." },
//!   "github":    { "type": "oauth", "refresh": "...", "access": "...", "expires": 0 }
//! }
//! ```
//!
//! Credential values are never logged.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::GLOBAL_CONFIG_DIR;
use crate::error::AuthError;

/// Auth file name inside the global config directory.
pub const AUTH_FILE: &str = "auth.json";

/// One stored credential.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthInfo {
    /// Plain API key.
    Api {
        #[serde(default)]
        key: String,
    },
    /// OAuth tokens. `expires` is a unix timestamp in seconds; 0 never expires.
    OAuth {
        #[serde(default)]
        refresh: String,
        #[serde(default)]
        access: String,
        #[serde(default)]
        expires: i64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        account_id: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        enterprise_url: Option<String>,
    },
    /// Key and token pair.
    WellKnown {
        #[serde(default)]
        key: String,
        #[serde(default)]
        token: String,
    },
}

impl AuthInfo {
    pub fn api(key: impl Into<String>) -> Self {
        Self::Api { key: key.into() }
    }

    /// The `type` tag as stored on disk.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Api { .. } => "api",
            Self::OAuth { .. } => "oauth",
            Self::WellKnown { .. } => "wellknown",
        }
    }

    /// Whether an OAuth access token is past its expiry.
    pub fn is_expired(&self) -> bool {
        match self {
            Self::OAuth { expires, .. } => *expires > 0 && *expires < Utc::now().timestamp(),
            _ => false,
        }
    }
}

// Hand-written so that secrets never reach logs or panic messages.
impl fmt::Debug for AuthInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api { .. } => f.debug_struct("Api").field("key", &"<redacted>").finish(),
            Self::OAuth {
                expires,
                account_id,
                ..
            } => f
                .debug_struct("OAuth")
                .field("expires", expires)
                .field("account_id", account_id)
                .finish_non_exhaustive(),
            Self::WellKnown { .. } => f.debug_struct("WellKnown").finish_non_exhaustive(),
        }
    }
}

/// File-backed credential store.
#[derive(Debug, Clone)]
pub struct LocalAuthStore {
    path: PathBuf,
}

impl LocalAuthStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.agentscout/auth.json`.
    pub fn default_path() -> Result<PathBuf, AuthError> {
        dirs::home_dir()
            .map(|home| home.join(GLOBAL_CONFIG_DIR).join(AUTH_FILE))
            .ok_or(AuthError::NoHomeDir)
    }

    /// Store at `path`, or at the default location when `None`.
    pub fn open(path: Option<PathBuf>) -> Result<Self, AuthError> {
        match path {
            Some(path) => Ok(Self::new(path)),
            None => Self::default_path().map(Self::new),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents. Missing or unreadable files read as empty.
    fn read_file(&self) -> BTreeMap<String, serde_json::Value> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return BTreeMap::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Auth file unreadable, treating as empty");
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&content).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Auth file invalid, treating as empty");
            BTreeMap::new()
        })
    }

    fn ensure_dir(&self) -> Result<(), AuthError> {
        let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) else {
            return Ok(());
        };
        if parent.exists() {
            return Ok(());
        }

        let mut builder = std::fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(0o700);
        }
        builder.create(parent)?;
        Ok(())
    }

    /// Write via a sibling temp file with owner-only permissions, then
    /// rename it over the target.
    fn write_file(&self, data: &BTreeMap<String, serde_json::Value>) -> Result<(), AuthError> {
        self.ensure_dir()?;

        let mut temp_name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| AUTH_FILE.into());
        temp_name.push(".tmp");
        let temp_path = self.path.with_file_name(temp_name);

        let content = serde_json::to_string_pretty(data)?;

        let mut options = std::fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }
        let mut file = options.open(&temp_path)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
        drop(file);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&temp_path, std::fs::Permissions::from_mode(0o600))?;
        }

        std::fs::rename(&temp_path, &self.path)?;
        Ok(())
    }

    /// Credential for a provider, if present and of a known type.
    pub fn get(&self, provider: &str) -> Option<AuthInfo> {
        let value = self.read_file().remove(provider)?;
        serde_json::from_value(value).ok()
    }

    /// All credentials of known types. Unknown entries are skipped.
    pub fn all(&self) -> BTreeMap<String, AuthInfo> {
        self.read_file()
            .into_iter()
            .filter_map(|(provider, value)| {
                serde_json::from_value(value)
                    .ok()
                    .map(|info| (provider, info))
            })
            .collect()
    }

    pub fn set(&self, provider: &str, info: &AuthInfo) -> Result<(), AuthError> {
        let mut data = self.read_file();
        data.insert(provider.to_string(), serde_json::to_value(info)?);
        self.write_file(&data)?;
        debug!(provider, kind = info.kind(), "Saved auth");
        Ok(())
    }

    /// Returns whether an entry was removed.
    pub fn remove(&self, provider: &str) -> Result<bool, AuthError> {
        let mut data = self.read_file();
        if data.remove(provider).is_none() {
            return Ok(false);
        }
        self.write_file(&data)?;
        debug!(provider, "Removed auth");
        Ok(true)
    }

    pub fn exists(&self, provider: &str) -> bool {
        self.read_file().contains_key(provider)
    }

    pub fn clear(&self) -> Result<(), AuthError> {
        self.write_file(&BTreeMap::new())?;
        debug!("Cleared all auth");
        Ok(())
    }
}
