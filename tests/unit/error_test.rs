//! Tests for error types

use slurm_watch::core::WatchError;

#[test]
fn test_invalid_config_error() {
    let err = WatchError::InvalidConfig("buffer_size must be greater than 0".to_string());
    assert_eq!(
        format!("{err}"),
        "invalid configuration: buffer_size must be greater than 0"
    );
}

#[test]
fn test_config_parse_error() {
    let err = WatchError::Config("expected value".to_string());
    assert_eq!(format!("{err}"), "config parse error: expected value");
}

#[test]
fn test_spawn_error() {
    let err = WatchError::Spawn("no reactor running".to_string());
    assert_eq!(format!("{err}"), "spawn failed: no reactor running");
}

#[test]
fn test_converts_into_anyhow() {
    let err: anyhow::Error = WatchError::Spawn("x".to_string()).into();
    assert!(err.downcast_ref::<WatchError>().is_some());
}
