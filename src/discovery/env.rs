// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Read-only environment lookup for credential gating.

use std::collections::HashMap;

/// Source of environment variable values.
///
/// Discovery never writes the environment; tests substitute a map.
pub trait EnvSource: Send + Sync {
    fn var(&self, name: &str) -> Option<String>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvSource for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvSource for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// True when the variable is set to something other than whitespace.
pub fn is_set(env: &dyn EnvSource, name: &str) -> bool {
    env.var(name).is_some_and(|v| !v.trim().is_empty())
}

/// True when at least one of `names` is set and non-empty.
pub fn has_any_credential(env: &dyn EnvSource, names: &[String]) -> bool {
    names.iter().any(|name| is_set(env, name))
}

/// The subset of `names` that are currently set.
pub fn set_credentials<'a>(env: &dyn EnvSource, names: &'a [String]) -> Vec<&'a str> {
    names
        .iter()
        .filter(|name| is_set(env, name))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_value_is_not_set() {
        let env = env(&[("A_KEY", ""), ("B_KEY", "  "), ("C_KEY", "sk-123")]);
        assert!(!is_set(&env, "A_KEY"));
        assert!(!is_set(&env, "B_KEY"));
        assert!(is_set(&env, "C_KEY"));
        assert!(!is_set(&env, "MISSING"));
    }

    #[test]
    fn test_has_any_credential() {
        let names = vec!["OPENAI_API_KEY".to_string(), "CODEX_API_KEY".to_string()];
        assert!(!has_any_credential(&env(&[]), &names));
        assert!(has_any_credential(&env(&[("CODEX_API_KEY", "x")]), &names));
        assert!(!has_any_credential(&env(&[("CODEX_API_KEY", "x")]), &[]));
    }

    #[test]
    fn test_set_credentials() {
        let names = vec!["A".to_string(), "B".to_string()];
        assert_eq!(set_credentials(&env(&[("B", "1")]), &names), vec!["B"]);
    }
}
