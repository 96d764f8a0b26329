//! Logging macros for the ranking engine with verbosity level control.
//!
//! Provides zero-cost logging when disabled (verbosity=0).
//! Verbosity levels match the host's logger:
//! - 0: SILENT
//! - 1: ISSUES (data-quality problems: unknown labels, bad dates, dangling dependencies)
//! - 2: DETAILS (per-task score breakdowns, filter and alert decisions)
//! - 3: DEBUG (full ordering internals)

/// Verbosity level constants.
pub const VERBOSITY_SILENT: u8 = 0;
pub const VERBOSITY_ISSUES: u8 = 1;
pub const VERBOSITY_DETAILS: u8 = 2;
pub const VERBOSITY_DEBUG: u8 = 3;

/// Log at ISSUES level (verbosity >= 1).
///
/// Used for: records that degrade to a fallback instead of failing.
#[macro_export]
macro_rules! log_issues {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_ISSUES {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DETAILS level (verbosity >= 2).
///
/// Used for: score contributions, readiness and alert classification.
#[macro_export]
macro_rules! log_details {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DETAILS {
            eprintln!($($arg)*);
        }
    };
}

/// Log at DEBUG level (verbosity >= 3).
#[macro_export]
macro_rules! log_debug {
    ($verbosity:expr, $($arg:tt)*) => {
        if $verbosity >= $crate::logging::VERBOSITY_DEBUG {
            eprintln!($($arg)*);
        }
    };
}
