//! The shared physics clock.
//!
//! Every peer (server and render clients) measures "physics time" as
//! milliseconds elapsed since one fixed reference epoch. All closed-form
//! position functions take this value, so two machines that agree on the
//! epoch and the wall clock agree on every position with no synchronization.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Default reference epoch, ms since the Unix epoch (2024-01-01T00:00:00Z).
/// Every process sharing this constant shares the physics timeline.
pub const DEFAULT_EPOCH_MS: u64 = 1_704_067_200_000;

/// Fixed reference epoch from which physics time is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhysicsClock {
    /// Epoch in ms since the Unix epoch.
    pub epoch_ms: u64,
}

impl Default for PhysicsClock {
    fn default() -> Self {
        Self {
            epoch_ms: DEFAULT_EPOCH_MS,
        }
    }
}

impl PhysicsClock {
    pub fn new(epoch_ms: u64) -> Self {
        Self { epoch_ms }
    }

    /// Physics time for a wall-clock instant given in ms since the Unix
    /// epoch. Instants before the epoch clamp to 0 rather than going
    /// negative, so a misconfigured clock cannot run orbits backwards.
    pub fn physics_time(&self, now_unix_ms: u64) -> f64 {
        now_unix_ms.saturating_sub(self.epoch_ms) as f64
    }

    /// Physics time for the current system clock.
    pub fn now(&self) -> f64 {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(self.epoch_ms);
        self.physics_time(now_ms)
    }
}

/// Clamp a caller-supplied physics time to a finite, non-negative value.
/// Non-finite input (NaN, ±inf) maps to 0 so per-frame queries never see a
/// poisoned timeline.
pub fn sanitize_time(t_ms: f64) -> f64 {
    if t_ms.is_finite() {
        t_ms.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn physics_time_clamps_before_epoch() {
        let clock = PhysicsClock::new(1000);
        assert_eq!(clock.physics_time(500), 0.0);
        assert_eq!(clock.physics_time(1500), 500.0);
    }

    #[test]
    fn sanitize_rejects_non_finite() {
        assert_eq!(sanitize_time(f64::NAN), 0.0);
        assert_eq!(sanitize_time(f64::INFINITY), 0.0);
        assert_eq!(sanitize_time(-5.0), 0.0);
        assert_eq!(sanitize_time(42.0), 42.0);
    }
}
