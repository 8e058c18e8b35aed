use std::time::Duration;

use crate::error::{EngineError, Result};
use crate::trend::TREND_BUCKETS;

/// Tuning for the aggregation engine.
#[derive(Debug, Clone)]
pub struct Config {
    /// Total duration covered by each group's trend window.
    pub trend: Duration,
    /// Maximum edit distance between canonical strings for two records to
    /// fold into the same group. Zero means exact grouping.
    pub distance: usize,
    /// Ordered key fields. Leave empty to derive the key set from the
    /// first ingested record.
    pub keys: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trend: Duration::from_secs(10),
            distance: 3,
            keys: Vec::new(),
        }
    }
}

impl Config {
    /// Reject configurations the engine cannot run with. Called by
    /// [`Store::new`](crate::Store::new), so startup is the only place
    /// this can fail.
    pub fn validate(&self) -> Result<()> {
        if self.trend.is_zero() {
            return Err(EngineError::ZeroTrendDuration);
        }
        Ok(())
    }

    /// Cadence at which every trend window advances by one bucket.
    pub fn shift_interval(&self) -> Duration {
        (self.trend / TREND_BUCKETS as u32).max(Duration::from_millis(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.trend, Duration::from_secs(10));
        assert_eq!(config.distance, 3);
        assert!(config.keys.is_empty());
    }

    #[test]
    fn zero_trend_duration_is_rejected() {
        let config = Config {
            trend: Duration::ZERO,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shift_interval_divides_trend_by_bucket_count() {
        let config = Config::default();
        assert_eq!(config.shift_interval(), Duration::from_millis(500));
    }

    #[test]
    fn shift_interval_never_drops_below_one_millisecond() {
        let config = Config {
            trend: Duration::from_micros(50),
            ..Config::default()
        };
        assert_eq!(config.shift_interval(), Duration::from_millis(1));
    }
}
