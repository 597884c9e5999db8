#![deny(missing_docs)]
//! Shared logging utilities for the ragdesk workspace.
//!
//! This crate provides the `desk_*` logging macros used across the codebase,
//! the mapping from command-line verbosity to a level filter, and a minimal
//! test initializer for the global logger.

use log::LevelFilter;

#[doc(hidden)]
pub use log as __log;

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! desk_trace {
    ($($arg:tt)*) => {{
        $crate::__log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! desk_debug {
    ($($arg:tt)*) => {{
        $crate::__log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! desk_info {
    ($($arg:tt)*) => {{
        $crate::__log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! desk_warn {
    ($($arg:tt)*) => {{
        $crate::__log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! desk_error {
    ($($arg:tt)*) => {{
        $crate::__log::error!($($arg)*);
    }};
}

/// Raises `base` by one level per `-v` flag, saturating at `Trace`.
///
/// `Off` stays off: an explicitly silenced configuration is not re-enabled
/// by verbosity flags.
pub fn raise_level(base: LevelFilter, verbosity: u8) -> LevelFilter {
    if base == LevelFilter::Off {
        return base;
    }
    let mut level = base;
    for _ in 0..verbosity {
        level = match level {
            LevelFilter::Error => LevelFilter::Warn,
            LevelFilter::Warn => LevelFilter::Info,
            LevelFilter::Info => LevelFilter::Debug,
            LevelFilter::Debug | LevelFilter::Trace => LevelFilter::Trace,
            LevelFilter::Off => LevelFilter::Off,
        };
    }
    level
}

/// Parses a case-insensitive level name (`"info"`, `"DEBUG"`, `"off"`, ...).
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}
