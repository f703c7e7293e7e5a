//! Internal logging system for Galaxy3D math
//!
//! This module provides a small, pluggable logging layer with:
//! - Customizable logger via Logger trait
//! - Severity levels (Trace, Debug, Info, Warn, Error)
//! - Colored console output by default (stderr)
//! - File and line information for ERROR logs
//!
//! The math routines only log from their checked paths: every error
//! returned by a `try_*` operation or by a decomposition is reported
//! here first. Unchecked paths never log.

use colored::*;
use std::time::SystemTime;
use chrono::{DateTime, Local};

/// Logger trait for custom logging implementations
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_math::galaxy3d::log::{Logger, LogEntry};
///
/// struct SilentLogger;
///
/// impl Logger for SilentLogger {
///     fn log(&self, _entry: &LogEntry) {}
/// }
/// ```
pub trait Logger: Send + Sync {
    /// Log an entry
    fn log(&self, entry: &LogEntry);
}

/// Log entry containing all information about a log message
#[derive(Debug, Clone)]
pub struct LogEntry {
    /// Severity level
    pub severity: LogSeverity,

    /// Timestamp when the log was created
    pub timestamp: SystemTime,

    /// Source (e.g., "galaxy3d::Frustum", "galaxy3d::Shrt")
    pub source: String,

    /// Log message
    pub message: String,

    /// Source file (only for ERROR logs)
    pub file: Option<&'static str>,

    /// Source line (only for ERROR logs)
    pub line: Option<u32>,
}

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogSeverity {
    /// Very verbose information
    Trace,

    /// Development/debugging information
    Debug,

    /// Informational messages
    Info,

    /// Potential issues (e.g. a degenerate input handled by a fallback)
    Warn,

    /// Errors returned to the caller
    Error,
}

/// Default logger implementation using colored console output
///
/// Format:
/// - Normal: `[timestamp] [SEVERITY] [source] message`
/// - Error: `[timestamp] [ERROR] [source] message (file:line)`
pub struct DefaultLogger;

impl DefaultLogger {
    /// Render an entry as a single line (colors included).
    pub fn format_entry(entry: &LogEntry) -> String {
        let datetime: DateTime<Local> = entry.timestamp.into();
        let timestamp = datetime.format("%Y-%m-%d %H:%M:%S%.3f").to_string();

        let severity_str = match entry.severity {
            LogSeverity::Trace => "TRACE".bright_black(),
            LogSeverity::Debug => "DEBUG".cyan(),
            LogSeverity::Info => "INFO ".green(),
            LogSeverity::Warn => "WARN ".yellow(),
            LogSeverity::Error => "ERROR".red().bold(),
        };

        let source = entry.source.bright_blue();

        match (entry.file, entry.line) {
            (Some(file), Some(line)) => format!(
                "[{}] [{}] [{}] {} ({}:{})",
                timestamp, severity_str, source, entry.message, file, line
            ),
            _ => format!("[{}] [{}] [{}] {}", timestamp, severity_str, source, entry.message),
        }
    }
}

impl Logger for DefaultLogger {
    fn log(&self, entry: &LogEntry) {
        eprintln!("{}", Self::format_entry(entry));
    }
}

// ===== LOGGING MACROS =====

/// Log a TRACE message
#[macro_export]
macro_rules! math_trace {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::Diagnostics::enabled($crate::galaxy3d::log::LogSeverity::Trace) {
            $crate::galaxy3d::Diagnostics::log(
                $crate::galaxy3d::log::LogSeverity::Trace,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log a DEBUG message
#[macro_export]
macro_rules! math_debug {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::Diagnostics::enabled($crate::galaxy3d::log::LogSeverity::Debug) {
            $crate::galaxy3d::Diagnostics::log(
                $crate::galaxy3d::log::LogSeverity::Debug,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log a WARN message
#[macro_export]
macro_rules! math_warn {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::Diagnostics::enabled($crate::galaxy3d::log::LogSeverity::Warn) {
            $crate::galaxy3d::Diagnostics::log(
                $crate::galaxy3d::log::LogSeverity::Warn,
                $source,
                format!($($arg)*)
            )
        }
    };
}

/// Log an ERROR message with file:line information
///
/// # Example
///
/// ```ignore
/// math_error!("galaxy3d::Frustum", "Bad viewing frustum: {}", reason);
/// ```
#[macro_export]
macro_rules! math_error {
    ($source:expr, $($arg:tt)*) => {
        if $crate::galaxy3d::Diagnostics::enabled($crate::galaxy3d::log::LogSeverity::Error) {
            $crate::galaxy3d::Diagnostics::log_detailed(
                $crate::galaxy3d::log::LogSeverity::Error,
                $source,
                format!($($arg)*),
                file!(),
                line!()
            )
        }
    };
}

#[cfg(test)]
#[path = "log_tests.rs"]
mod tests;
