// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Agent metadata: the built-in registry, local definition files, and the
//! merge of the two into one record per identity.

pub mod definition;
pub mod merge;
pub mod registry;
pub mod types;

pub use definition::{
    default_definition_dirs, read_definition_dir, read_definition_file, AgentDefinition,
    DefinitionSource, DEFINITION_DIR, DEFINITION_EXTENSIONS,
};
pub use merge::merge;
pub use registry::{
    color_for, icon_for, registry_entries, registry_entry, registry_entry_by_short_name,
    registry_records, AgentModel, KnownAgent, RegistryEntry, STANDARD_ACP_CAPABILITIES,
};
pub use types::{AgentIdentity, AgentRecord, CommandLine, DeclaredStatus, Provenance};
