//! Standard `tracing`-based logging setup for the vapor UI engine.
//!
//! One call installs a `tracing_subscriber::fmt` layer filtered by
//! `EnvFilter`: every other crate instruments with `tracing` spans/events
//! (spec `SPEC_FULL.md` §2) but none of them install a subscriber
//! themselves, so nothing is printed until a binary calls [`init_logging`].

use tracing_subscriber::{fmt, EnvFilter};

/// Minimum level to print when `RUST_LOG`/`VAPOR_LOG` is unset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::Info
    }
}

/// Configuration for [`init_logging`]. Mirrors the rest of the engine's
/// one-struct-per-concern `init` convention (`SPEC_FULL.md` §3).
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Fallback level used when the environment variable is unset or
    /// fails to parse.
    pub default_level: LogLevel,
    /// Environment variable consulted for a user-supplied filter
    /// directive, e.g. `"vapor_core=debug,vapor_reactivity=trace"`.
    pub env_var: &'static str,
    /// Include ANSI color codes in the formatted output.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { default_level: LogLevel::default(), env_var: "VAPOR_LOG", ansi: true }
    }
}

/// Install a global `tracing_subscriber::fmt` subscriber. Safe to call at
/// most once per process; a second call is a no-op (logged at `warn` via
/// whichever subscriber, if any, already won the race) rather than a
/// panic, since embedding hosts may initialize logging before calling
/// `vapor::init`.
pub fn init_logging(config: LogConfig) {
    let filter = EnvFilter::try_from_env(config.env_var)
        .unwrap_or_else(|_| EnvFilter::new(config.default_level.as_filter_str()));

    let subscriber = fmt().with_env_filter(filter).with_ansi(config.ansi).finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("vapor-log: a global tracing subscriber was already installed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_info_and_vapor_log_env() {
        let config = LogConfig::default();
        assert_eq!(config.default_level, LogLevel::Info);
        assert_eq!(config.env_var, "VAPOR_LOG");
    }

    #[test]
    fn level_names_match_env_filter_directives() {
        assert_eq!(LogLevel::Warn.as_filter_str(), "warn");
        assert_eq!(LogLevel::Trace.as_filter_str(), "trace");
    }
}
