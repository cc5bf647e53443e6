// SPDX-License-Identifier: MPL-2.0
//! Minimal stderr logger behind the `log` facade.
//!
//! The level comes from `--log-level`, then `ICED_PLAYER_LOG`, then defaults
//! to `info`. Installing twice is harmless; the first logger wins.

use log::{LevelFilter, Log, Metadata, Record};
use std::sync::OnceLock;

/// Environment variable holding the default log level.
pub const ENV_LOG_LEVEL: &str = "ICED_PLAYER_LOG";

struct StderrLogger {
    level: LevelFilter,
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: OnceLock<StderrLogger> = OnceLock::new();

/// Parses a level name; unknown names yield `None`.
#[must_use]
pub fn parse_level(value: &str) -> Option<LevelFilter> {
    match value.trim().to_lowercase().as_str() {
        "off" => Some(LevelFilter::Off),
        "error" => Some(LevelFilter::Error),
        "warn" | "warning" => Some(LevelFilter::Warn),
        "info" => Some(LevelFilter::Info),
        "debug" => Some(LevelFilter::Debug),
        "trace" => Some(LevelFilter::Trace),
        _ => None,
    }
}

/// Picks the level from the CLI value, then the environment.
#[must_use]
pub fn resolve_level(cli_level: Option<&str>) -> LevelFilter {
    cli_level
        .and_then(parse_level)
        .or_else(|| {
            std::env::var(ENV_LOG_LEVEL)
                .ok()
                .as_deref()
                .and_then(parse_level)
        })
        .unwrap_or(LevelFilter::Info)
}

/// Installs the stderr logger.
pub fn init(level: LevelFilter) {
    let logger = LOGGER.get_or_init(|| StderrLogger { level });
    if log::set_logger(logger).is_ok() {
        log::set_max_level(logger.level);
    }
}
