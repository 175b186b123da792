//! Frame-rate independent fixed-interval triggers.

use serde::{Deserialize, Serialize};

/// How an interval behaves when one update spans several periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntervalPolicy {
    /// Fire once per elapsed period, keeping the remainder.
    #[default]
    CatchUp,
    /// Fire at most once and discard all accumulated time.
    SingleShot,
}

/// Advances `elapsed` by `delta` and returns how many times the interval fired.
///
/// A non-positive `interval` never fires.
pub fn advance(elapsed: &mut f32, delta: f32, interval: f32, policy: IntervalPolicy) -> u32 {
    if delta.is_finite() && delta > 0.0 {
        *elapsed += delta;
    }

    if interval <= 0.0 || *elapsed < interval {
        return 0;
    }

    match policy {
        IntervalPolicy::CatchUp => {
            let mut fired = 0;
            while *elapsed >= interval {
                *elapsed -= interval;
                fired += 1;
            }
            fired
        }
        IntervalPolicy::SingleShot => {
            *elapsed = 0.0;
            1
        }
    }
}

/// Owned accumulator for triggers that are global to a system.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FixedInterval {
    pub interval: f32,
    pub elapsed: f32,
    pub policy: IntervalPolicy,
}

impl FixedInterval {
    #[must_use]
    pub fn new(interval: f32, policy: IntervalPolicy) -> Self {
        Self {
            interval,
            elapsed: 0.0,
            policy,
        }
    }

    pub fn tick(&mut self, delta: f32) -> u32 {
        advance(&mut self.elapsed, delta, self.interval, self.policy)
    }
}
