//! Health check configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);
const DEFAULT_FAILURES_TO_CLOSE: u32 = 5;

/// Parameters for active connection health checks.
///
/// A zero `interval` disables monitoring entirely — it is the sole enable
/// switch. The other fields are filled from defaults by
/// [`with_defaults`](HealthCheckConfig::with_defaults) and treated as
/// read-only afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthCheckConfig {
    /// Period between probes. Zero means health checks are disabled.
    pub interval: Duration,

    /// Deadline for a single probe attempt. Defaults to 1 second.
    pub timeout: Duration,

    /// Consecutive probe failures that cause the connection to be closed.
    /// Defaults to 5.
    pub failures_to_close: u32,
}

impl HealthCheckConfig {
    /// Whether health checks should run at all.
    pub fn enabled(&self) -> bool {
        self.interval > Duration::ZERO
    }

    /// Return a copy with zero `timeout` and `failures_to_close` replaced
    /// by their defaults. `interval` is never defaulted: zero stays zero,
    /// keeping the monitor disabled.
    pub fn with_defaults(mut self) -> Self {
        if self.timeout == Duration::ZERO {
            self.timeout = DEFAULT_TIMEOUT;
        }
        if self.failures_to_close == 0 {
            self.failures_to_close = DEFAULT_FAILURES_TO_CLOSE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enabled_iff_interval_positive() {
        let config = HealthCheckConfig::default();
        assert!(!config.enabled());

        let config = HealthCheckConfig {
            interval: Duration::from_millis(1),
            ..Default::default()
        };
        assert!(config.enabled());

        // Other fields have no bearing on the switch.
        let config = HealthCheckConfig {
            interval: Duration::ZERO,
            timeout: Duration::from_secs(3),
            failures_to_close: 10,
        };
        assert!(!config.enabled());
    }

    #[test]
    fn with_defaults_fills_zero_fields() {
        let config = HealthCheckConfig {
            interval: Duration::from_secs(5),
            ..Default::default()
        }
        .with_defaults();

        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(config.failures_to_close, 5);
        assert_eq!(config.interval, Duration::from_secs(5));
    }

    #[test]
    fn with_defaults_preserves_set_fields() {
        let original = HealthCheckConfig {
            interval: Duration::from_secs(5),
            timeout: Duration::from_millis(250),
            failures_to_close: 2,
        };
        assert_eq!(original.with_defaults(), original);
    }

    #[test]
    fn with_defaults_never_enables_a_disabled_config() {
        let config = HealthCheckConfig::default().with_defaults();
        assert_eq!(config.interval, Duration::ZERO);
        assert!(!config.enabled());
        // But the other defaults are still applied.
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(config.failures_to_close, 5);
    }

    #[test]
    fn with_defaults_is_pure() {
        let original = HealthCheckConfig {
            interval: Duration::from_secs(5),
            ..Default::default()
        };
        let resolved = original.with_defaults();
        // The caller's value is untouched.
        assert_eq!(original.timeout, Duration::ZERO);
        assert_ne!(original, resolved);
    }

    #[test]
    fn partial_config_deserializes_with_zero_fields() {
        // A config block that only sets the interval: missing fields land as
        // zero and are filled by with_defaults afterwards.
        let config: HealthCheckConfig =
            serde_json::from_str(r#"{"interval":{"secs":5,"nanos":0}}"#).unwrap();
        assert_eq!(config.interval, Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::ZERO);

        let config = config.with_defaults();
        assert_eq!(config.timeout, Duration::from_secs(1));
        assert_eq!(config.failures_to_close, 5);
    }
}
