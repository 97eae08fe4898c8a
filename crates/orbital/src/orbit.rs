//! Circular orbits: planets, belt asteroids, and orbit-anchored bases.

use glam::DVec2;
use world_core::{sanitize_time, Orbit};

/// Orbit angle at a physics time: `phase + speed · t`, with t in seconds.
pub fn orbit_angle(orbit: &Orbit, t_ms: f64) -> f64 {
    let t_s = sanitize_time(t_ms) / 1000.0;
    let speed = if orbit.speed.is_finite() {
        orbit.speed
    } else {
        0.0
    };
    let phase = if orbit.phase.is_finite() {
        orbit.phase
    } else {
        0.0
    };
    phase + speed * t_s
}

/// Position of a circularly orbiting body around `anchor` at a physics time.
pub fn circular_position(anchor: DVec2, orbit: &Orbit, t_ms: f64) -> DVec2 {
    let radius = if orbit.radius.is_finite() {
        orbit.radius.max(0.0)
    } else {
        0.0
    };
    let angle = orbit_angle(orbit, t_ms);
    anchor + radius * DVec2::new(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    const EPS: f64 = 1e-6;

    #[test]
    fn half_turn_at_pi_per_second() {
        // Planet with orbit radius 100 and speed π rad/s around (500, 500):
        // at t=0 it sits at (600, 500); after 1000 ms it is at (400, 500).
        let orbit = Orbit {
            radius: 100.0,
            phase: 0.0,
            speed: PI,
        };
        let anchor = DVec2::new(500.0, 500.0);
        let at0 = circular_position(anchor, &orbit, 0.0);
        assert!((at0 - DVec2::new(600.0, 500.0)).length() < EPS);
        let at1s = circular_position(anchor, &orbit, 1000.0);
        assert!((at1s - DVec2::new(400.0, 500.0)).length() < EPS);
    }

    #[test]
    fn orbit_is_periodic() {
        let orbit = Orbit {
            radius: 250.0,
            phase: 1.2,
            speed: 0.03,
        };
        let anchor = DVec2::new(-40.0, 17.0);
        let period_ms = TAU / orbit.speed * 1000.0;
        for t in [0.0, 5_000.0, 123_456.0] {
            let a = circular_position(anchor, &orbit, t);
            let b = circular_position(anchor, &orbit, t + period_ms);
            assert!((a - b).length() < 1e-6, "t={t}: {a:?} vs {b:?}");
        }
    }

    #[test]
    fn non_finite_inputs_clamp() {
        let orbit = Orbit {
            radius: f64::NAN,
            phase: f64::INFINITY,
            speed: f64::NAN,
        };
        let anchor = DVec2::new(10.0, 20.0);
        let p = circular_position(anchor, &orbit, f64::NAN);
        assert_eq!(p, anchor);
    }

    #[test]
    fn negative_radius_clamps_to_anchor() {
        let orbit = Orbit {
            radius: -50.0,
            phase: 0.0,
            speed: 1.0,
        };
        let anchor = DVec2::ZERO;
        assert_eq!(circular_position(anchor, &orbit, 500.0), anchor);
    }
}
