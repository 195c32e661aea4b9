// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Subscriber setup for the `agentscout` binary.

use std::io::{self, IsTerminal};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// Line layout of log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One short line per event.
    Compact,
    /// Multi-field layout with span context.
    Full,
}

/// How logs are filtered and formatted.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Level for this crate's events. Dependencies stay at `warn`.
    pub level: Level,

    pub format: LogFormat,

    /// Emit span close events, which carry probe and handshake timings.
    pub span_timings: bool,

    /// Include file and line of each event.
    pub source_location: bool,

    pub ansi: bool,

    /// Explicit filter directive. Overrides `RUST_LOG` and `level`.
    pub directive: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            format: LogFormat::Compact,
            span_timings: false,
            source_location: false,
            ansi: io::stderr().is_terminal(),
            directive: None,
        }
    }
}

impl TelemetryConfig {
    /// Verbose output for `--verbose`: debug events with probe timings.
    pub fn verbose() -> Self {
        Self {
            level: Level::DEBUG,
            format: LogFormat::Full,
            span_timings: true,
            ..Self::default()
        }
    }

    /// Pick a config from the CLI flags and the configured `logLevel`.
    ///
    /// `--debug` wins over `--verbose`, which wins over the config value.
    pub fn for_cli(verbose: bool, debug: bool, log_level: &str) -> Self {
        if debug {
            Self {
                source_location: true,
                ..Self::verbose().with_level(Level::TRACE)
            }
        } else if verbose {
            Self::verbose()
        } else {
            Self::default().with_level(Level::from_str(log_level).unwrap_or(Level::WARN))
        }
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_directive(mut self, directive: impl Into<String>) -> Self {
        self.directive = Some(directive.into());
        self
    }

    pub fn with_ansi(mut self, ansi: bool) -> Self {
        self.ansi = ansi;
        self
    }

    /// Directive used when neither `directive` nor `RUST_LOG` is set.
    pub fn default_directive(&self) -> String {
        format!("warn,agentscout={}", self.level.as_str().to_lowercase())
    }

    fn filter(&self) -> EnvFilter {
        let fallback = || EnvFilter::new(self.default_directive());
        match &self.directive {
            Some(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| fallback()),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback()),
        }
    }
}

/// Install the global subscriber. Logs go to stderr so that command output
/// on stdout stays machine-readable.
///
/// Fails if a subscriber is already installed.
pub fn init_telemetry(config: &TelemetryConfig) -> io::Result<()> {
    let span_events = if config.span_timings {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_ansi(config.ansi)
        .with_file(config.source_location)
        .with_line_number(config.source_location)
        .with_span_events(span_events);

    let registry = tracing_subscriber::registry().with(config.filter());
    let result = match config.format {
        LogFormat::Compact => registry.with(layer.compact().with_target(false)).try_init(),
        LogFormat::Full => registry.with(layer).try_init(),
    };
    result.map_err(|e| io::Error::other(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_quiet() {
        let config = TelemetryConfig::default();
        assert_eq!(config.level, Level::WARN);
        assert_eq!(config.format, LogFormat::Compact);
        assert!(!config.span_timings);
        assert_eq!(config.default_directive(), "warn,agentscout=warn");
    }

    #[test]
    fn test_for_cli_precedence() {
        let debug = TelemetryConfig::for_cli(true, true, "error");
        assert_eq!(debug.level, Level::TRACE);
        assert!(debug.source_location);

        let verbose = TelemetryConfig::for_cli(true, false, "error");
        assert_eq!(verbose.level, Level::DEBUG);
        assert!(verbose.span_timings);

        assert_eq!(TelemetryConfig::for_cli(false, false, "info").level, Level::INFO);
        assert_eq!(TelemetryConfig::for_cli(false, false, "bogus").level, Level::WARN);
    }

    #[test]
    fn test_dependencies_stay_at_warn() {
        let config = TelemetryConfig::default().with_level(Level::TRACE);
        assert_eq!(config.default_directive(), "warn,agentscout=trace");
    }

    #[test]
    fn test_builder() {
        let config = TelemetryConfig::default()
            .with_directive("agentscout::discovery=trace")
            .with_ansi(false);
        assert_eq!(config.directive.as_deref(), Some("agentscout::discovery=trace"));
        assert!(!config.ansi);
    }
}
