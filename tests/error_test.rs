//! Tests for error types

use benchrun::Error;

#[test]
fn test_validation_error() {
    let error = Error::Validation("input validation failed".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("validation failed"));
    assert!(error_str.contains("input validation failed"));
}

#[test]
fn test_processing_error() {
    let error = Error::Processing("solver timed out".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("processing failed"));
    assert!(error_str.contains("solver timed out"));
}

#[test]
fn test_processing_constructor_wraps_any_display() {
    let cause = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.cnf");
    let error = Error::processing(cause);
    assert!(format!("{error}").contains("missing.cnf"));
}

#[test]
fn test_persistence_error() {
    let error = Error::Persistence("checkpoint decode failed".to_string());
    let error_str = format!("{error}");
    assert!(error_str.contains("persistence error"));
    assert!(error_str.contains("checkpoint decode failed"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("denied"));
}
