/// Galaxy3D math diagnostics - global logger slot
///
/// The math routines are pure functions with no state of their own. The
/// only process-wide state is the logger that checked operations report
/// their errors to, stored with thread-safe static storage (RwLock).

use std::panic::Location;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{OnceLock, RwLock};
use std::time::SystemTime;
use crate::error::Error;
use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};

// ===== INTERNAL STATE =====

/// Global logger (initialized with DefaultLogger)
static LOGGER: OnceLock<RwLock<Box<dyn Logger>>> = OnceLock::new();

/// Lowest severity forwarded to the logger
static MIN_SEVERITY: AtomicU8 = AtomicU8::new(LogSeverity::Warn as u8);

fn logger() -> &'static RwLock<Box<dyn Logger>> {
    LOGGER.get_or_init(|| RwLock::new(Box::new(DefaultLogger)))
}

// ===== PUBLIC API =====

/// Logger registry shared by every module of the crate
///
/// # Example
///
/// ```no_run
/// use galaxy_3d_math::galaxy3d::Diagnostics;
/// use galaxy_3d_math::galaxy3d::log::{Logger, LogEntry, LogSeverity};
///
/// struct SilentLogger;
///
/// impl Logger for SilentLogger {
///     fn log(&self, _entry: &LogEntry) {}
/// }
///
/// Diagnostics::set_logger(SilentLogger);
/// Diagnostics::set_min_severity(LogSeverity::Debug);
/// ```
pub struct Diagnostics;

impl Diagnostics {
    /// Replace the global logger.
    pub fn set_logger<L: Logger + 'static>(logger: L) {
        if let Ok(mut lock) = self::logger().write() {
            *lock = Box::new(logger);
        }
    }

    /// Reset logger to default (DefaultLogger)
    pub fn reset_logger() {
        if let Ok(mut lock) = self::logger().write() {
            *lock = Box::new(DefaultLogger);
        }
    }

    /// Set the lowest severity that reaches the logger (default: Warn).
    pub fn set_min_severity(severity: LogSeverity) {
        MIN_SEVERITY.store(severity as u8, Ordering::Relaxed);
    }

    /// Whether a message of this severity would be forwarded.
    pub fn enabled(severity: LogSeverity) -> bool {
        severity as u8 >= MIN_SEVERITY.load(Ordering::Relaxed)
    }

    /// Internal logging method (for simple logs without file:line)
    ///
    /// Used by macros like math_debug!, math_warn!, etc.
    pub fn log(severity: LogSeverity, source: &str, message: String) {
        if let Ok(lock) = self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: None,
                line: None,
            });
        }
    }

    /// Internal logging method with file:line information (for ERROR logs)
    pub fn log_detailed(
        severity: LogSeverity,
        source: &str,
        message: String,
        file: &'static str,
        line: u32,
    ) {
        if let Ok(lock) = self::logger().read() {
            lock.log(&LogEntry {
                severity,
                timestamp: SystemTime::now(),
                source: source.to_string(),
                message,
                file: Some(file),
                line: Some(line),
            });
        }
    }

    /// Log an error at the caller's location, then hand it back.
    ///
    /// Every checked operation funnels its failures through here, so the
    /// error reaches the logger before it reaches the caller.
    #[track_caller]
    pub(crate) fn log_and_return_error(source: &str, error: Error) -> Error {
        if Self::enabled(LogSeverity::Error) {
            let location = Location::caller();
            Self::log_detailed(
                LogSeverity::Error,
                source,
                error.to_string(),
                location.file(),
                location.line(),
            );
        }
        error
    }
}

#[cfg(test)]
#[path = "diagnostics_tests.rs"]
mod tests;
