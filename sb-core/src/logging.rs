//! Structured logging setup using the `tracing` ecosystem.
//!
//! Library crates only emit events; binaries call one of these initializers
//! once at startup.

use std::path::Path;

use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::LoggingConfig;
use crate::error::{SbError, SbResult};

const LOG_FILE_PREFIX: &str = "staybook.log";

/// HTTP stack crates capped unless the filter names them explicitly.
const NOISY_TARGETS: &[(&str, &str)] = &[
    ("hyper", "hyper=warn"),
    ("hyper_util", "hyper_util=warn"),
    ("rustls", "rustls=warn"),
    ("reqwest", "reqwest=info"),
];

/// Guard that keeps the non-blocking log writer alive.
/// Drop this to flush and close the log file.
pub struct LogGuard {
    _guard: tracing_appender::non_blocking::WorkerGuard,
}

/// Build the level filter. An invalid directive falls back to "info".
fn build_filter(level: &str) -> EnvFilter {
    let mut filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    for (target, directive) in NOISY_TARGETS {
        if level.contains(target) {
            continue;
        }
        if let Ok(d) = directive.parse() {
            filter = filter.add_directive(d);
        }
    }
    filter
}

/// Install the global subscriber: compact stderr output plus a daily-rotated
/// file in `log_dir`, written as JSON lines when `json_output` is set.
///
/// `level` is a filter directive, e.g. "info" or "info,sb_api=debug".
pub fn init_logging(level: &str, log_dir: &Path, json_output: bool) -> SbResult<LogGuard> {
    std::fs::create_dir_all(log_dir)?;

    let (writer, guard) = tracing_appender::non_blocking(rolling::daily(log_dir, LOG_FILE_PREFIX));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact();

    let (json_layer, text_layer) = if json_output {
        let layer = fmt::layer()
            .json()
            .with_writer(writer)
            .with_current_span(false);
        (Some(layer), None)
    } else {
        let layer = fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_line_number(true);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(console_layer)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .map_err(|e| SbError::Internal(format!("logging already initialized: {e}")))?;

    tracing::debug!("logging to {} at level {level}", log_dir.display());
    Ok(LogGuard { _guard: guard })
}

/// Initialize logging from the `[logging]` configuration section.
pub fn init_from_config(config: &LoggingConfig, log_dir: &Path) -> SbResult<LogGuard> {
    init_logging(&config.level, log_dir, config.json_output)
}

/// Console-only logger for tests. Does nothing when a subscriber is already set.
pub fn init_console_logging(level: &str) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(level))
        .with(fmt::layer().with_test_writer().compact())
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_explicit_targets() {
        let filter = build_filter("debug,reqwest=trace").to_string();
        assert!(filter.contains("reqwest=trace"));
        assert!(!filter.contains("reqwest=info"));
        assert!(filter.contains("hyper=warn"));
    }

    #[test]
    fn test_invalid_directive_falls_back() {
        let filter = build_filter("not a directive ===").to_string();
        assert!(filter.contains("info"));
    }

    #[test]
    fn test_console_logging_is_idempotent() {
        init_console_logging("debug");
        init_console_logging("warn");
    }
}
