//! Integration tests for the math logging system
//!
//! These tests verify that failed checked operations reach the logger
//! before they reach the caller, and that unchecked operations stay silent.
//!
//! Run with: cargo test --test logging_integration_tests

use galaxy_3d_math::galaxy3d::camera::Frustum;
use galaxy_3d_math::galaxy3d::log::{Logger, LogEntry, LogSeverity};
use galaxy_3d_math::galaxy3d::transform::{Affine, Extraction};
use galaxy_3d_math::galaxy3d::{Diagnostics, Error};
use galaxy_3d_math::glam::{Mat4, Vec3};
use std::sync::{Arc, Mutex};
use serial_test::serial;

// ============================================================================
// TEST LOGGER IMPLEMENTATION
// ============================================================================

/// Test logger that captures log entries for verification
struct TestLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl TestLogger {
    fn new() -> (Self, Arc<Mutex<Vec<LogEntry>>>) {
        let entries = Arc::new(Mutex::new(Vec::new()));
        (Self { entries: entries.clone() }, entries)
    }
}

impl Logger for TestLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

fn install() -> Arc<Mutex<Vec<LogEntry>>> {
    let (test_logger, entries) = TestLogger::new();
    Diagnostics::set_logger(test_logger);
    Diagnostics::set_min_severity(LogSeverity::Warn);
    entries
}

fn restore() {
    Diagnostics::reset_logger();
    Diagnostics::set_min_severity(LogSeverity::Warn);
}

// ============================================================================
// LOGGING TESTS
// ============================================================================

#[test]
#[serial]
fn test_integration_frustum_error_is_logged() {
    let entries = install();

    let result = Frustum::new(1.7, 1.7, -3.5, 2.0, 0.9, -1.3, false).try_projection_matrix();
    let error = result.unwrap_err();

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);

    let entry = &captured[0];
    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.source, "galaxy3d::Frustum");
    assert_eq!(entry.message, error.to_string());
    assert!(entry.file.unwrap().ends_with("frustum.rs"));
    assert!(entry.line.is_some());
    drop(captured);

    restore();
}

#[test]
#[serial]
fn test_integration_decomposition_error_is_logged() {
    let entries = install();

    let result = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0)).extract_shrt(Extraction::Robust);
    assert!(matches!(result, Err(Error::DecompositionFailed(_))));

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Error);
    assert_eq!(captured[0].source, "galaxy3d::Shrt");
    assert!(captured[0].message.starts_with("Decomposition failed"));
    drop(captured);

    restore();
}

#[test]
#[serial]
fn test_integration_unchecked_operations_are_silent() {
    let entries = install();

    let bad = Frustum::new(1.7, 1.7, -3.5, -3.5, 0.9, 0.9, false);
    let _ = bad.projection_matrix();
    let _ = bad.planes();
    let _ = bad.normalized_z_to_depth(0.5);

    assert!(entries.lock().unwrap().is_empty());

    restore();
}

#[test]
#[serial]
fn test_integration_warning_for_ambiguous_field_of_view() {
    let entries = install();

    let mut f = Frustum::default();
    f.set_fov(1.0, 100.0, 1.0, 1.0, 1.0);

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Warn);
    assert_eq!(captured[0].source, "galaxy3d::Frustum");
    drop(captured);

    restore();
}

#[test]
#[serial]
fn test_integration_debug_messages_need_lower_threshold() {
    let entries = install();
    let mirror = Mat4::from_scale(Vec3::new(1.0, -1.0, 1.0));

    mirror.extract_shrt(Extraction::Fast).unwrap();
    assert!(entries.lock().unwrap().is_empty());

    Diagnostics::set_min_severity(LogSeverity::Debug);
    mirror.extract_shrt(Extraction::Fast).unwrap();

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Debug);
    assert_eq!(captured[0].source, "galaxy3d::Shrt");
    assert_eq!(captured[0].file, None);
    drop(captured);

    restore();
}

#[test]
#[serial]
fn test_integration_errors_filtered_out_above_error() {
    let entries = install();
    // Nothing is above Error, so the lowest possible filter still passes errors.
    Diagnostics::set_min_severity(LogSeverity::Error);

    let _ = Frustum::new(1.0, 1.0, -1.0, 1.0, 1.0, -1.0, false).try_aspect();
    assert_eq!(entries.lock().unwrap().len(), 1);

    restore();
}

#[test]
#[serial]
fn test_integration_decomposition_errors_report_failing_check() {
    let entries = install();

    let mut non_finite = Mat4::IDENTITY;
    non_finite.x_axis.y = f32::NAN;
    let flat = Mat4::from_scale(Vec3::new(1.0, 0.0, 1.0));

    assert!(non_finite.extract_shrt(Extraction::Fast).is_err());
    assert!(flat.extract_shrt(Extraction::Fast).is_err());
    assert!(flat.extract_shrt(Extraction::Robust).is_err());

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 3);
    for entry in captured.iter() {
        assert_eq!(entry.source, "galaxy3d::Shrt");
        assert!(entry.file.unwrap().ends_with("shrt.rs"));
    }

    // Non-finite input, zero scale and rank check each log their own line.
    let lines: Vec<u32> = captured.iter().map(|entry| entry.line.unwrap()).collect();
    assert_ne!(lines[0], lines[1]);
    assert_ne!(lines[1], lines[2]);
    assert_ne!(lines[0], lines[2]);
    drop(captured);

    restore();
}

#[test]
#[serial]
fn test_integration_rank_check_traced() {
    let entries = install();
    let m = Mat4::from_scale(Vec3::new(2.0, 3.0, 4.0));

    m.extract_shrt(Extraction::Robust).unwrap();
    assert!(entries.lock().unwrap().is_empty());

    Diagnostics::set_min_severity(LogSeverity::Trace);
    m.extract_shrt(Extraction::Fast).unwrap();
    assert!(entries.lock().unwrap().is_empty());

    m.extract_shrt(Extraction::Robust).unwrap();

    let captured = entries.lock().unwrap();
    assert_eq!(captured.len(), 1);
    assert_eq!(captured[0].severity, LogSeverity::Trace);
    assert_eq!(captured[0].source, "galaxy3d::Shrt");
    assert!(captured[0].message.starts_with("Rank check"));
    drop(captured);

    restore();
}
