//! Tests for error types

use job_queue::core::SchedulerError;
use job_queue::Scheduler;

#[test]
fn test_type_constraint_message() {
    let err = SchedulerError::TypeConstraintViolation;
    assert_eq!(format!("{}", err), "\"concurrency\" should be a number");
}

#[test]
fn test_range_constraint_message() {
    let err = SchedulerError::RangeConstraintViolation;
    assert_eq!(format!("{}", err), "\"concurrency\" should be positive finite number");
}

#[test]
fn test_config_error() {
    let err = SchedulerError::Config("missing field".to_string());
    assert_eq!(format!("{}", err), "config error: missing field");
}

#[test]
fn test_zero_concurrency_rejected() {
    let err = Scheduler::new(0).unwrap_err();
    assert_eq!(err, SchedulerError::RangeConstraintViolation);
}
