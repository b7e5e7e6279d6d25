//! Logging infrastructure with coded events and a process-wide service
//!
//! Events carry a stable code (see [`codes`]), a level, an optional source
//! span, and free-form context pairs. The global service is initialized once
//! and reached through the `log_*` macros; before initialization the macros
//! are silent no-ops so library code never has to care about setup order.

pub mod codes;
pub mod events;
#[macro_use]
pub mod macros;
pub mod service;

pub use codes::{Code, Severity};
pub use events::{LogEvent, LogLevel};
pub use service::{
    ConsoleLogger, EventSummary, FileLogger, Logger, LoggingService, MemoryLogger,
    StructuredLogger,
};

use crate::config::runtime::LoggingPreferences;
use crate::utils::Span;
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<LoggingService> = OnceLock::new();

/// Initialize global logging from runtime preferences.
///
/// Subsequent calls are ignored once a service is installed.
pub fn init_global_logging() {
    let preferences = LoggingPreferences::default();
    if GLOBAL_LOGGER
        .set(LoggingService::from_preferences(&preferences))
        .is_ok()
    {
        log_success_with_context(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Logging service initialized",
            vec![],
        );
    }
}

/// Initialize global logging with an explicit service, for tests and embedders.
pub fn init_global_logging_with_service(service: LoggingService) {
    let _ = GLOBAL_LOGGER.set(service);
}

/// Whether the global logger has been installed
pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Get the global logger, installing a preference-driven one on first use
pub fn get_global_logger() -> &'static LoggingService {
    GLOBAL_LOGGER.get_or_init(|| {
        let preferences = LoggingPreferences::default();
        LoggingService::from_preferences(&preferences)
    })
}

/// Get the global logger only if one has been installed
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get()
}

/// Macro support: log an error event with optional span and context pairs
pub fn log_error_with_context(
    error_code: Code,
    message: &str,
    span: Option<Span>,
    context: Vec<(&str, &str)>,
) {
    if let Some(logger) = try_get_global_logger() {
        let mut event = LogEvent::error(error_code, message);
        if let Some(span) = span {
            event = event.with_span(span);
        }
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        logger.log_event(event);
    }
}

/// Macro support: log a success event with context pairs
pub fn log_success_with_context(success_code: Code, message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        let mut event = LogEvent::success(success_code, message);
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        logger.log_event(event);
    }
}

/// Macro support: log an info event with context pairs
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    if let Some(logger) = try_get_global_logger() {
        let mut event = LogEvent::info(message);
        for (key, value) in context {
            event = event.with_context(key, value);
        }
        logger.log_event(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_logging_is_silent() {
        // Support functions must be callable before initialization
        log_info_with_context("early message", vec![]);
        log_error_with_context(codes::system::INTERNAL_ERROR, "early error", None, vec![]);
    }

    #[test]
    fn test_get_global_logger_installs_default() {
        let logger = get_global_logger();
        // Level check must be consistent across calls
        let level_ok = logger.should_log(LogLevel::Error);
        assert!(level_ok);
        assert!(is_initialized());
    }
}
