// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Merge local definitions with the built-in registry.

use std::collections::BTreeMap;

use super::types::{AgentIdentity, AgentRecord};

/// Combine local and registry records, keyed by identity.
///
/// A local record replaces the registry record with the same identity
/// wholesale; fields are never mixed between the two.
pub fn merge(
    local: BTreeMap<AgentIdentity, AgentRecord>,
    registry: BTreeMap<AgentIdentity, AgentRecord>,
) -> BTreeMap<AgentIdentity, AgentRecord> {
    let mut merged = registry;
    merged.extend(local);
    merged
}
