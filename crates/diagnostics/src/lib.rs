//! Logging setup shared by the plugsite crates.
//!
//! Usage:
//! - `PLUGSITE_LOG=off` (default) - no logs
//! - `PLUGSITE_LOG=info` - page counts, dataset sizes
//! - `PLUGSITE_LOG=debug` - skipped records, every written file
//!
//! The `--verbose` flag of the binary raises an `off` setting to `info`.

use std::sync::Once;

// Re-export emit so macros can use it
pub use emit;

/// Environment variable holding the log level.
pub const LOG_ENV: &str = "PLUGSITE_LOG";

static INIT: Once = Once::new();

/// Minimum level written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
}

impl LogLevel {
    /// Parse a `PLUGSITE_LOG` value. Unknown values yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "off" => Some(LogLevel::Off),
            "error" => Some(LogLevel::Error),
            "warn" => Some(LogLevel::Warn),
            "info" => Some(LogLevel::Info),
            "debug" => Some(LogLevel::Debug),
            _ => None,
        }
    }

    fn emit_level(self) -> Option<emit::Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(emit::Level::Error),
            LogLevel::Warn => Some(emit::Level::Warn),
            LogLevel::Info => Some(emit::Level::Info),
            LogLevel::Debug => Some(emit::Level::Debug),
        }
    }
}

/// Initialize diagnostics from `PLUGSITE_LOG`.
///
/// Safe to call more than once; only the first call has an effect.
pub fn init_diagnostics() {
    init_with_floor(LogLevel::Off);
}

/// Initialize diagnostics, never logging less than `floor`.
pub fn init_with_floor(floor: LogLevel) {
    INIT.call_once(|| {
        let raw = std::env::var(LOG_ENV).unwrap_or_default();
        let (configured, unknown) = match LogLevel::parse(&raw) {
            Some(level) => (level, false),
            None => (LogLevel::Info, true),
        };
        let level = if configured == LogLevel::Off { floor } else { configured };

        let Some(min) = level.emit_level() else {
            return;
        };

        let rt = emit::setup()
            .emit_to(emit_term::stderr())
            .emit_when(emit::level::min_filter(min))
            .init();

        if unknown {
            emit::warn!("Unknown {var} value {value}, using info", var: LOG_ENV, value: raw.as_str());
        }

        // The runtime must outlive every log call in the process.
        std::mem::forget(rt);
    });
}

/// Log basic operations (pages written, datasets loaded).
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::emit::info!($($arg)*)
    };
}

/// Log detailed diagnostics (skipped records, individual files).
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {
        $crate::emit::debug!($($arg)*)
    };
}

/// Log recoverable conditions (missing optional inputs, fallbacks).
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::emit::warn!($($arg)*)
    };
}

/// Log failures that stop an operation.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::emit::error!($($arg)*)
    };
}

pub use init_diagnostics as init;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_levels() {
        assert_eq!(LogLevel::parse("off"), Some(LogLevel::Off));
        assert_eq!(LogLevel::parse(""), Some(LogLevel::Off));
        assert_eq!(LogLevel::parse("DEBUG"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse(" warn "), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("chatty"), None);
    }

    #[test]
    fn test_init_is_safe_to_call_multiple_times() {
        init_diagnostics();
        init_diagnostics();
        init_with_floor(LogLevel::Info);
    }

    #[test]
    fn test_macros_compile() {
        info!("Test message");
        debug!("Debug message with {value}", value: 42);
        warn!("Warning message");
        error!("Error message");
    }
}
