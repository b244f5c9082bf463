//! FILENAME: core/drill-engine/src/logging.rs
// PURPOSE: Category-tagged logging for the drill-down engine.
// CONTEXT: Lines are formatted as `seq|level|category|message` and forwarded
//          to the `log` facade. The host decides where they end up.

use std::sync::atomic::{AtomicU64, Ordering};

use log::Level;

// ============================================================================
// SEQUENCED LOG LINES
// ============================================================================

/// Log target used for every line emitted by this crate.
pub const LOG_TARGET: &str = "drill_engine";

/// Global sequence counter so interleaved update/toggle traces can be ordered.
static LOG_SEQ: AtomicU64 = AtomicU64::new(0);

/// Get next sequence number
pub fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst) + 1
}

/// Maps the single-letter level code used by the macros to a `log::Level`.
pub fn level_for(code: &str) -> Level {
    match code {
        "E" => Level::Error,
        "W" => Level::Warn,
        "I" => Level::Info,
        "T" => Level::Trace,
        _ => Level::Debug,
    }
}

/// Whether a line at this level code would be emitted at all.
pub fn enabled(code: &str) -> bool {
    log::log_enabled!(target: LOG_TARGET, level_for(code))
}

/// Formats a log line in the unified `seq|level|category|message` shape.
pub fn format_line(seq: u64, code: &str, category: &str, message: &str) -> String {
    format!("{}|{}|{}|{}", seq, code, category, message)
}

/// Write a log line in unified format
pub fn write_log(code: &str, category: &str, message: &str) {
    let line = format_line(next_seq(), code, category, message);
    log::log!(target: LOG_TARGET, level_for(code), "{}", line);
}

/// Write an ENTER log line for function entry
pub fn write_log_enter(code: &str, category: &str, func_name: &str, params: &str) {
    let message = if params.is_empty() {
        format!("ENTER {}", func_name)
    } else {
        format!("ENTER {} {}", func_name, params)
    };
    write_log(code, category, &message);
}

/// Write an EXIT log line for function exit
pub fn write_log_exit(code: &str, category: &str, func_name: &str, result: &str) {
    let message = if result.is_empty() {
        format!("EXIT {}", func_name)
    } else {
        format!("EXIT {} {}", func_name, result)
    };
    write_log(code, category, &message);
}

// ============================================================================
// MACRO DEFINITIONS & EXPORTS
// ============================================================================

#[macro_export]
macro_rules! log_trace {
    ($cat:expr, $($arg:tt)*) => {
        if $crate::logging::enabled("T") {
            $crate::logging::write_log("T", $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        if $crate::logging::enabled("D") {
            $crate::logging::write_log("D", $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        if $crate::logging::enabled("I") {
            $crate::logging::write_log("I", $cat, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        if $crate::logging::enabled("W") {
            $crate::logging::write_log("W", $cat, &format!($($arg)*))
        }
    };
}

// ENTER/EXIT macros for function tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        if $crate::logging::enabled("D") {
            $crate::logging::write_log_enter("D", $cat, $func, "")
        }
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        if $crate::logging::enabled("D") {
            $crate::logging::write_log_enter("D", $cat, $func, &format!($($arg)*))
        }
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        if $crate::logging::enabled("D") {
            $crate::logging::write_log_exit("D", $cat, $func, "")
        }
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        if $crate::logging::enabled("D") {
            $crate::logging::write_log_exit("D", $cat, $func, &format!($($arg)*))
        }
    };
}

// Re-export the macros so they can be imported via `use crate::logging::log_info;`
pub use crate::log_debug;
pub use crate::log_enter;
pub use crate::log_exit;
pub use crate::log_info;
pub use crate::log_trace;
pub use crate::log_warn;
