//! Poller and watch configuration structures.

use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::WatchError;

/// Poll interval used when none is configured.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Event buffer size used when none is configured.
pub const DEFAULT_BUFFER_SIZE: usize = 100;

/// What the first successful tick of a session does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColdStart {
    /// Emit a `New` event for every resource present on the first tick.
    #[default]
    EmitNew,
    /// Record the first listing as the baseline without emitting events.
    Baseline,
}

impl FromStr for ColdStart {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "emit_new" | "emit-new" | "new" => Ok(Self::EmitNew),
            "baseline" | "silent" => Ok(Self::Baseline),
            other => Err(format!("unknown cold start policy `{other}`")),
        }
    }
}

/// Poller configuration.
///
/// Must be settled before `watch` is called; a running session keeps the copy
/// it started with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollerConfig {
    /// Time between ticks.
    #[serde(rename = "poll_interval_ms", with = "duration_ms")]
    pub poll_interval: Duration,
    /// Capacity of the event channel.
    pub buffer_size: usize,
    /// First-tick policy.
    pub cold_start: ColdStart,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            buffer_size: DEFAULT_BUFFER_SIZE,
            cold_start: ColdStart::default(),
        }
    }
}

impl PollerConfig {
    /// Create a configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Set the event buffer size.
    #[must_use]
    pub const fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size;
        self
    }

    /// Set the cold-start policy.
    #[must_use]
    pub const fn with_cold_start(mut self, cold_start: ColdStart) -> Self {
        self.cold_start = cold_start;
        self
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns a description of the first invalid value.
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval.is_zero() {
            return Err("poll_interval must be greater than 0".into());
        }
        if self.buffer_size == 0 {
            return Err("buffer_size must be greater than 0".into());
        }
        Ok(())
    }

    /// Apply `{prefix}POLL_INTERVAL_MS`, `{prefix}BUFFER_SIZE` and
    /// `{prefix}COLD_START` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error naming the variable whose value does not parse.
    pub fn apply_env<F>(mut self, prefix: &str, lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            let key = format!("{prefix}{name}");
            lookup(&key).map(|value| (key, value))
        };

        if let Some((key, value)) = var("POLL_INTERVAL_MS") {
            let ms: u64 = value
                .trim()
                .parse()
                .map_err(|e| format!("{key}: {e}"))?;
            self.poll_interval = Duration::from_millis(ms);
        }
        if let Some((key, value)) = var("BUFFER_SIZE") {
            self.buffer_size = value
                .trim()
                .parse()
                .map_err(|e| format!("{key}: {e}"))?;
        }
        if let Some((key, value)) = var("COLD_START") {
            self.cold_start = value.parse().map_err(|e| format!("{key}: {e}"))?;
        }
        Ok(self)
    }
}

/// Poller configuration for each resource kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Job poller.
    pub jobs: PollerConfig,
    /// Node poller.
    pub nodes: PollerConfig,
    /// Partition poller.
    pub partitions: PollerConfig,
}

/// Prefix shared by all watch environment variables.
pub const ENV_PREFIX: &str = "SLURM_WATCH_";

impl WatchConfig {
    /// Validate every poller configuration.
    ///
    /// # Errors
    ///
    /// Returns the first invalid value, prefixed with the resource it belongs to.
    pub fn validate(&self) -> Result<(), String> {
        for (name, cfg) in [
            ("jobs", &self.jobs),
            ("nodes", &self.nodes),
            ("partitions", &self.partitions),
        ] {
            cfg.validate()
                .map_err(|e| format!("poller `{name}` invalid: {e}"))?;
        }
        Ok(())
    }

    /// Parse watch configuration from a JSON string and validate.
    ///
    /// # Errors
    ///
    /// [`WatchError::Config`] when the input does not parse,
    /// [`WatchError::InvalidConfig`] when a value is out of range.
    pub fn from_json_str(input: &str) -> Result<Self, WatchError> {
        let cfg: Self =
            serde_json::from_str(input).map_err(|e| WatchError::Config(e.to_string()))?;
        cfg.validate().map_err(WatchError::InvalidConfig)?;
        Ok(cfg)
    }

    /// Load configuration from the process environment, reading a `.env` file
    /// first if one exists.
    ///
    /// # Errors
    ///
    /// See [`from_lookup`](Self::from_lookup).
    pub fn from_env() -> Result<Self, WatchError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from variables supplied by `lookup`.
    ///
    /// `SLURM_WATCH_*` sets all pollers; `SLURM_WATCH_JOBS_*`,
    /// `SLURM_WATCH_NODES_*` and `SLURM_WATCH_PARTITIONS_*` override one.
    ///
    /// # Errors
    ///
    /// [`WatchError::Config`] naming the variable that does not parse,
    /// [`WatchError::InvalidConfig`] when a value is out of range.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, WatchError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load = |base: PollerConfig, prefix: &str| {
            base.apply_env(prefix, &lookup).map_err(WatchError::Config)
        };
        let base = load(PollerConfig::default(), ENV_PREFIX)?;
        let cfg = Self {
            jobs: load(base.clone(), &format!("{ENV_PREFIX}JOBS_"))?,
            nodes: load(base.clone(), &format!("{ENV_PREFIX}NODES_"))?,
            partitions: load(base, &format!("{ENV_PREFIX}PARTITIONS_"))?,
        };
        cfg.validate().map_err(WatchError::InvalidConfig)?;
        Ok(cfg)
    }
}

mod duration_ms {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
