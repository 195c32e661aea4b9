// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Logging and tracing setup.
//!
//! Discovery code emits structured `tracing` events; the binary installs a
//! `tracing-subscriber` formatter once at startup:
//!
//! ```rust,ignore
//! use agentscout::telemetry::{init_telemetry, TelemetryConfig};
//!
//! init_telemetry(&TelemetryConfig::default())?;
//! ```
//!
//! Probe and health-check paths carry `#[instrument]` spans when the
//! `telemetry` feature is enabled (the default). Fields record identities,
//! commands and timings, never credential values.

mod init;

pub use init::{init_telemetry, LogFormat, TelemetryConfig};
