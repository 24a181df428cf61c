//! Simulated reply latency.

use std::time::Duration;

use memoria_config::AssistantConfig;
use memoria_core::random::RandomSource;

/// Uniform delay in `[min, max]`; the lower bound is always reachable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyPolicy {
    min: Duration,
    max: Duration,
}

impl LatencyPolicy {
    /// Bounds are swapped if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_millis(min_ms: u64, max_ms: u64) -> Self {
        Self::new(Duration::from_millis(min_ms), Duration::from_millis(max_ms))
    }

    pub fn from_config(config: &AssistantConfig) -> Self {
        Self::from_millis(config.latency_min_ms, config.latency_max_ms)
    }

    /// No delay at all.
    pub fn immediate() -> Self {
        Self::new(Duration::ZERO, Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.min
    }

    pub fn max(&self) -> Duration {
        self.max
    }

    pub fn contains(&self, delay: Duration) -> bool {
        delay >= self.min && delay <= self.max
    }

    pub fn draw(&self, rng: &mut dyn RandomSource) -> Duration {
        let min_ms = self.min.as_millis() as u64;
        let max_ms = self.max.as_millis() as u64;
        Duration::from_millis(rng.between(min_ms, max_ms))
    }
}

impl Default for LatencyPolicy {
    fn default() -> Self {
        Self::from_millis(1000, 3000)
    }
}
