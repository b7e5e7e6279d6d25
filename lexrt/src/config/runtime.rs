// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

/// Environment variable names for runtime preferences
pub mod env_vars {
    pub const LOGGING_MIN_LEVEL: &str = "LEXRT_LOGGING_MIN_LEVEL";
    pub const LOGGING_STRUCTURED: &str = "LEXRT_LOGGING_STRUCTURED";
    pub const LOGGING_CONSOLE: &str = "LEXRT_LOGGING_CONSOLE";
    pub const DRIVER_DETAILED_METRICS: &str = "LEXRT_DRIVER_DETAILED_METRICS";
    pub const DRIVER_TRACK_MODES: &str = "LEXRT_DRIVER_TRACK_MODES";
    pub const DRIVER_LOG_RECOVERY: &str = "LEXRT_DRIVER_LOG_RECOVERY";
    pub const DRIVER_POSITION_IN_ERRORS: &str = "LEXRT_DRIVER_POSITION_IN_ERRORS";
}

/// Severity threshold for emitted log events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    /// Convert to the event-system level
    pub fn to_events_log_level(self) -> crate::logging::LogLevel {
        match self {
            LogLevel::Error => crate::logging::LogLevel::Error,
            LogLevel::Warning => crate::logging::LogLevel::Warning,
            LogLevel::Info => crate::logging::LogLevel::Info,
            LogLevel::Debug => crate::logging::LogLevel::Debug,
        }
    }
}

/// Minimum level compiled into this build, used when no env override is set
fn compiled_min_level() -> LogLevel {
    match crate::config::constants::compile_time::logging::MIN_EVENT_LOG_LEVEL {
        0 => LogLevel::Error,
        1 => LogLevel::Warning,
        2 => LogLevel::Info,
        _ => LogLevel::Debug,
    }
}

/// Parse a log level from an environment value ("error", "warn", "2", ...)
pub fn parse_log_level(value: &str) -> Option<LogLevel> {
    match value.to_ascii_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warn" | "warning" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Minimum level that gets emitted
    pub min_log_level: LogLevel,

    /// Whether events are emitted as JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Whether console output is enabled at all
    pub enable_console_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or_else(compiled_min_level),
            use_structured_logging: env::var(env_vars::LOGGING_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverPreferences {
    /// Whether to collect detailed per-run token metrics
    pub collect_detailed_metrics: bool,

    /// Whether to log every mode push/pop at debug level
    pub track_mode_transitions: bool,

    /// Whether to log each recognition-error recovery at debug level
    pub log_recovery_events: bool,

    /// Whether to include line/column in syntax error messages
    pub include_position_in_errors: bool,
}

impl Default for DriverPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env::var(env_vars::DRIVER_DETAILED_METRICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            track_mode_transitions: env::var(env_vars::DRIVER_TRACK_MODES)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_recovery_events: env::var(env_vars::DRIVER_LOG_RECOVERY)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            include_position_in_errors: env::var(env_vars::DRIVER_POSITION_IN_ERRORS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("invalid"), None);
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(!env_vars::LOGGING_MIN_LEVEL.is_empty());
        assert!(!env_vars::DRIVER_DETAILED_METRICS.is_empty());
        assert!(!env_vars::DRIVER_LOG_RECOVERY.is_empty());
    }

    #[test]
    fn test_default_preferences() {
        let prefs = DriverPreferences::default();
        // Defaults hold unless the environment overrides them
        let _ = prefs.collect_detailed_metrics;
        let _ = prefs.include_position_in_errors;

        let logging = LoggingPreferences::default();
        let _ = logging.min_log_level.to_events_log_level();
    }
}
