//! Tests for configuration loading and validation

use std::collections::HashMap;
use std::time::Duration;

use slurm_watch::config::{ColdStart, PollerConfig, WatchConfig, ENV_PREFIX};
use slurm_watch::core::WatchError;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn test_poller_config_validation() {
    assert!(PollerConfig::default().validate().is_ok());
    assert!(PollerConfig::new()
        .with_poll_interval(Duration::ZERO)
        .validate()
        .is_err());
    assert!(PollerConfig::new().with_buffer_size(0).validate().is_err());
}

#[test]
fn test_watch_config_from_json() {
    let cfg = WatchConfig::from_json_str(
        r#"{
            "jobs": {"poll_interval_ms": 2000, "buffer_size": 10},
            "nodes": {"cold_start": "baseline"}
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.jobs.poll_interval, Duration::from_secs(2));
    assert_eq!(cfg.jobs.buffer_size, 10);
    assert_eq!(cfg.nodes.cold_start, ColdStart::Baseline);
    assert_eq!(cfg.partitions, PollerConfig::default());
}

#[test]
fn test_watch_config_rejects_invalid_json_values() {
    let err = WatchConfig::from_json_str(r#"{"partitions": {"buffer_size": 0}}"#).unwrap_err();
    assert!(matches!(&err, WatchError::InvalidConfig(msg) if msg.contains("partitions")), "{err}");
    assert!(matches!(
        WatchConfig::from_json_str("{not json"),
        Err(WatchError::Config(_))
    ));
}

#[test]
fn test_env_overrides_per_resource() {
    let cfg = WatchConfig::from_lookup(lookup(&[
        ("SLURM_WATCH_POLL_INTERVAL_MS", "1000"),
        ("SLURM_WATCH_NODES_POLL_INTERVAL_MS", "30000"),
        ("SLURM_WATCH_JOBS_BUFFER_SIZE", "512"),
        ("SLURM_WATCH_PARTITIONS_COLD_START", "baseline"),
    ]))
    .unwrap();
    assert_eq!(ENV_PREFIX, "SLURM_WATCH_");
    assert_eq!(cfg.jobs.poll_interval, Duration::from_secs(1));
    assert_eq!(cfg.jobs.buffer_size, 512);
    assert_eq!(cfg.nodes.poll_interval, Duration::from_secs(30));
    assert_eq!(cfg.nodes.buffer_size, 100);
    assert_eq!(cfg.partitions.cold_start, ColdStart::Baseline);
}

#[test]
fn test_env_bad_value_names_variable() {
    let err = WatchConfig::from_lookup(lookup(&[("SLURM_WATCH_BUFFER_SIZE", "lots")])).unwrap_err();
    assert!(
        matches!(&err, WatchError::Config(msg) if msg.starts_with("SLURM_WATCH_BUFFER_SIZE")),
        "{err}"
    );

    let err = WatchConfig::from_lookup(lookup(&[("SLURM_WATCH_NODES_BUFFER_SIZE", "0")])).unwrap_err();
    assert!(matches!(&err, WatchError::InvalidConfig(msg) if msg.contains("nodes")), "{err}");
}
