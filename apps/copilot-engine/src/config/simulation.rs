//! Artificial latencies and timings of the mock workflow.

use std::time::Duration;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Delay before an account connection resolves.
    #[serde(default = "default_account_latency_ms")]
    pub account_latency_ms: u64,
    /// Delay before a suggestion is generated.
    #[serde(default = "default_suggestion_latency_ms")]
    pub suggestion_latency_ms: u64,
    /// Delay before an approval is recorded.
    #[serde(default = "default_approval_latency_ms")]
    pub approval_latency_ms: u64,
    /// Delay before a mock execution completes.
    #[serde(default = "default_execution_latency_ms")]
    pub execution_latency_ms: u64,
    /// How long a suggestion stays actionable.
    #[serde(default = "default_suggestion_ttl_secs")]
    pub suggestion_ttl_secs: u64,
}

impl SimulationConfig {
    /// No artificial delay anywhere.
    #[must_use]
    pub fn instant() -> Self {
        Self {
            account_latency_ms: 0,
            suggestion_latency_ms: 0,
            approval_latency_ms: 0,
            execution_latency_ms: 0,
            ..Self::default()
        }
    }

    /// Account connection latency.
    #[must_use]
    pub const fn account_latency(&self) -> Duration {
        Duration::from_millis(self.account_latency_ms)
    }

    /// Suggestion generation latency.
    #[must_use]
    pub const fn suggestion_latency(&self) -> Duration {
        Duration::from_millis(self.suggestion_latency_ms)
    }

    /// Approval recording latency.
    #[must_use]
    pub const fn approval_latency(&self) -> Duration {
        Duration::from_millis(self.approval_latency_ms)
    }

    /// Mock execution latency.
    #[must_use]
    pub const fn execution_latency(&self) -> Duration {
        Duration::from_millis(self.execution_latency_ms)
    }

    /// Suggestion time-to-live. Saturates at `TimeDelta::MAX`.
    #[must_use]
    pub fn suggestion_ttl(&self) -> TimeDelta {
        i64::try_from(self.suggestion_ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .unwrap_or(TimeDelta::MAX)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            account_latency_ms: default_account_latency_ms(),
            suggestion_latency_ms: default_suggestion_latency_ms(),
            approval_latency_ms: default_approval_latency_ms(),
            execution_latency_ms: default_execution_latency_ms(),
            suggestion_ttl_secs: default_suggestion_ttl_secs(),
        }
    }
}

const fn default_account_latency_ms() -> u64 {
    500
}

const fn default_suggestion_latency_ms() -> u64 {
    600
}

const fn default_approval_latency_ms() -> u64 {
    450
}

const fn default_execution_latency_ms() -> u64 {
    700
}

const fn default_suggestion_ttl_secs() -> u64 {
    5 * 60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_mock_timings() {
        let config = SimulationConfig::default();
        assert_eq!(config.account_latency(), Duration::from_millis(500));
        assert_eq!(config.suggestion_latency(), Duration::from_millis(600));
        assert_eq!(config.approval_latency(), Duration::from_millis(450));
        assert_eq!(config.execution_latency(), Duration::from_millis(700));
        assert_eq!(config.suggestion_ttl().num_minutes(), 5);
    }

    #[test]
    fn instant_keeps_ttl() {
        let config = SimulationConfig::instant();
        assert_eq!(config.execution_latency(), Duration::ZERO);
        assert_eq!(config.suggestion_ttl_secs, 300);
    }

    #[test]
    fn huge_ttl_saturates() {
        let config = SimulationConfig {
            suggestion_ttl_secs: u64::MAX,
            ..SimulationConfig::instant()
        };
        assert_eq!(config.suggestion_ttl(), TimeDelta::MAX);

        let config = SimulationConfig {
            suggestion_ttl_secs: 10_000_000_000_000,
            ..SimulationConfig::instant()
        };
        assert_eq!(config.suggestion_ttl(), TimeDelta::MAX);
    }
}
