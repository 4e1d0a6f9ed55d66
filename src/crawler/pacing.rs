//! Polite delay between consecutive requests

use rand::Rng;
use std::time::Duration;

/// Source of the pause taken before the next request
pub trait Pacer: Send + Sync {
    fn next_delay(&self) -> Duration;
}

/// Uniformly random delay within inclusive bounds
#[derive(Debug, Clone, Copy)]
pub struct RandomPacer {
    min: Duration,
    max: Duration,
}

impl RandomPacer {
    /// Bounds are swapped if given in the wrong order
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn bounds(&self) -> (Duration, Duration) {
        (self.min, self.max)
    }
}

impl Default for RandomPacer {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), Duration::from_secs(3))
    }
}

impl Pacer for RandomPacer {
    fn next_delay(&self) -> Duration {
        let min = self.min.as_millis() as u64;
        let max = self.max.as_millis() as u64;
        if min == max {
            return self.min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min..=max))
    }
}

/// Constant delay; `FixedPacer::none()` disables pacing
#[derive(Debug, Clone, Copy)]
pub struct FixedPacer(pub Duration);

impl FixedPacer {
    pub fn none() -> Self {
        Self(Duration::ZERO)
    }
}

impl Pacer for FixedPacer {
    fn next_delay(&self) -> Duration {
        self.0
    }
}
