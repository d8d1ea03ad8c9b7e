//! Tests for configuration validation

use job_queue::config::{Concurrency, SchedulerConfig, CONCURRENCY_ENV};
use job_queue::core::SchedulerError;
use serde_json::json;

#[test]
fn test_invalid_concurrency_numbers() {
    for bad in [-1.0, f64::INFINITY, f64::NAN, 0.0] {
        assert_eq!(
            Concurrency::try_from(bad),
            Err(SchedulerError::RangeConstraintViolation)
        );
    }
}

#[test]
fn test_non_numeric_concurrency() {
    for bad in [json!("1"), json!([]), json!({})] {
        assert_eq!(
            Concurrency::try_from(&bad),
            Err(SchedulerError::TypeConstraintViolation)
        );
    }
}

#[test]
fn test_scheduler_config_default() {
    let config = SchedulerConfig::default();
    assert_eq!(config.concurrency.get(), 10);
}

#[test]
fn test_scheduler_config_from_json() {
    let config = SchedulerConfig::from_json_str(r#"{ "concurrency": 4 }"#).unwrap();
    assert_eq!(config.concurrency.get(), 4);

    let config = SchedulerConfig::from_json_str("{}").unwrap();
    assert_eq!(config.concurrency.get(), 10);
}

#[test]
fn test_scheduler_config_from_json_violations() {
    assert_eq!(
        SchedulerConfig::from_json_str(r#"{ "concurrency": "4" }"#),
        Err(SchedulerError::TypeConstraintViolation)
    );
    assert_eq!(
        SchedulerConfig::from_json_str(r#"{ "concurrency": 0 }"#),
        Err(SchedulerError::RangeConstraintViolation)
    );
    assert_eq!(
        SchedulerConfig::from_json_str(r#"{ "concurrency": 1.5 }"#),
        Err(SchedulerError::RangeConstraintViolation)
    );
    assert!(matches!(
        SchedulerConfig::from_json_str("not json"),
        Err(SchedulerError::Config(_))
    ));
    assert!(matches!(
        SchedulerConfig::from_json_str("[1, 2]"),
        Err(SchedulerError::Config(_))
    ));
}

#[test]
fn test_scheduler_config_deserialize() {
    let config: SchedulerConfig = serde_json::from_str(r#"{ "concurrency": 2 }"#).unwrap();
    assert_eq!(config.concurrency.get(), 2);
    assert!(serde_json::from_str::<SchedulerConfig>(r#"{ "concurrency": -3 }"#).is_err());
}

#[test]
fn test_scheduler_config_from_lookup() {
    let config = SchedulerConfig::from_lookup(|key| {
        assert_eq!(key, CONCURRENCY_ENV);
        Some("6".to_string())
    })
    .unwrap();
    assert_eq!(config.concurrency.get(), 6);

    assert_eq!(
        SchedulerConfig::from_lookup(|_| Some("-1".to_string())),
        Err(SchedulerError::RangeConstraintViolation)
    );
}
