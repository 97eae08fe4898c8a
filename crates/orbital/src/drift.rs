//! Free-drift bodies: closed-form bounce inside a rectangular bound, with
//! per-query gravity-capture reclassification.
//!
//! No step simulation: the triangle-wave fold gives the bounced position
//! directly from elapsed time. Capture is recomputed independently on every
//! query; a body hovering at the capture boundary can flip classification
//! between adjacent samples, which is an accepted artifact of the analytic
//! model, not latched state.

use glam::DVec2;
use world_core::{sanitize_time, DriftBody, DriftConfig, Star};

/// Rectangular drift bounds. Positions fold inside `[min+margin, max−margin]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriftBounds {
    pub min: DVec2,
    pub max: DVec2,
    pub margin: f64,
}

/// Classification of a drift body at one time sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DriftState {
    Drifting(DVec2),
    /// Inside a star's gravity radius (but outside its surface): presented
    /// as orbiting that star at the captured radius.
    Captured {
        star_index: usize,
        radius: f64,
        angle: f64,
        position: DVec2,
    },
}

impl DriftState {
    pub fn position(&self) -> DVec2 {
        match self {
            DriftState::Drifting(p) => *p,
            DriftState::Captured { position, .. } => *position,
        }
    }
}

/// Triangle-wave fold of an unbounded coordinate into [lo, hi].
/// A degenerate interval collapses to `lo`.
fn fold(value: f64, lo: f64, hi: f64) -> f64 {
    let span = hi - lo;
    if !(span > 0.0) || !value.is_finite() {
        return lo;
    }
    let period = 2.0 * span;
    let phase = (value - lo).rem_euclid(period);
    if phase <= span {
        lo + phase
    } else {
        lo + period - phase
    }
}

/// Bounced position of a drift body at a physics time.
pub fn drift_position(body: &DriftBody, bounds: &DriftBounds, t_ms: f64) -> DVec2 {
    let t_s = sanitize_time(t_ms) / 1000.0;
    let velocity = if body.velocity.is_finite() {
        body.velocity
    } else {
        DVec2::ZERO
    };
    let origin = if body.origin.is_finite() {
        body.origin
    } else {
        bounds.min
    };
    let raw = origin + velocity * t_s;
    let margin = bounds.margin.max(0.0);
    DVec2::new(
        fold(raw.x, bounds.min.x + margin, bounds.max.x - margin),
        fold(raw.y, bounds.min.y + margin, bounds.max.y - margin),
    )
}

/// Classify a drift body against nearby stars. `stars` are (live position,
/// descriptor) pairs; binary members should be passed at their solved
/// positions.
pub fn drift_state(
    body: &DriftBody,
    bounds: &DriftBounds,
    stars: &[(DVec2, &Star)],
    config: &DriftConfig,
    t_ms: f64,
) -> DriftState {
    let pos = drift_position(body, bounds, t_ms);
    for (index, (star_pos, star)) in stars.iter().enumerate() {
        let offset = pos - *star_pos;
        let distance = offset.length();
        if distance < star.gravity_radius && distance > star.size {
            let t_s = sanitize_time(t_ms) / 1000.0;
            let angle = offset.y.atan2(offset.x) + config.capture_speed * t_s;
            return DriftState::Captured {
                star_index: index,
                radius: distance,
                angle,
                position: *star_pos + distance * DVec2::new(angle.cos(), angle.sin()),
            };
        }
    }
    DriftState::Drifting(pos)
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::SpectralClass;

    fn bounds() -> DriftBounds {
        DriftBounds {
            min: DVec2::new(0.0, 0.0),
            max: DVec2::new(10_000.0, 8_000.0),
            margin: 50.0,
        }
    }

    #[test]
    fn position_stays_inside_margins_forever() {
        let body = DriftBody {
            origin: DVec2::new(300.0, 200.0),
            velocity: DVec2::new(173.0, -91.0),
            size: 12.0,
        };
        let b = bounds();
        let mut t = 0.0;
        while t < 10_000_000.0 {
            let p = drift_position(&body, &b, t);
            assert!(p.x >= b.min.x + b.margin && p.x <= b.max.x - b.margin, "t={t}");
            assert!(p.y >= b.min.y + b.margin && p.y <= b.max.y - b.margin, "t={t}");
            t += 37_501.0;
        }
    }

    #[test]
    fn reverses_direction_at_the_wall() {
        let body = DriftBody {
            origin: DVec2::new(9_900.0, 4_000.0),
            velocity: DVec2::new(100.0, 0.0),
            size: 5.0,
        };
        let b = bounds();
        // 0.5 s to the wall at x=9950, then bounce back.
        let before = drift_position(&body, &b, 0.0);
        let after = drift_position(&body, &b, 1_000.0);
        assert!((before.x - 9_900.0).abs() < 1e-9);
        assert!((after.x - 9_900.0).abs() < 1e-9, "should bounce back to 9900");
    }

    #[test]
    fn zero_velocity_is_stationary() {
        let body = DriftBody {
            origin: DVec2::new(5_000.0, 4_000.0),
            velocity: DVec2::ZERO,
            size: 5.0,
        };
        let b = bounds();
        assert_eq!(drift_position(&body, &b, 0.0), drift_position(&body, &b, 999_999.0));
    }

    #[test]
    fn non_finite_velocity_clamps_to_zero() {
        let body = DriftBody {
            origin: DVec2::new(5_000.0, 4_000.0),
            velocity: DVec2::new(f64::NAN, f64::INFINITY),
            size: 5.0,
        };
        let b = bounds();
        assert_eq!(drift_position(&body, &b, 60_000.0), DVec2::new(5_000.0, 4_000.0));
    }

    #[test]
    fn degenerate_bounds_collapse_to_min_corner() {
        let body = DriftBody {
            origin: DVec2::new(10.0, 10.0),
            velocity: DVec2::new(1.0, 1.0),
            size: 1.0,
        };
        let b = DriftBounds {
            min: DVec2::ZERO,
            max: DVec2::ZERO,
            margin: 0.0,
        };
        assert_eq!(drift_position(&body, &b, 5_000.0), DVec2::ZERO);
    }

    fn test_star(pos: DVec2) -> Star {
        Star {
            position: pos,
            size: 100.0,
            class: SpectralClass::G,
            mass: 1.0,
            gravity_radius: 800.0,
            temperature_k: 5_700.0,
            color: glam::Vec3::new(1.0, 0.95, 0.7),
        }
    }

    #[test]
    fn capture_inside_gravity_radius() {
        let star = test_star(DVec2::new(5_000.0, 4_000.0));
        let body = DriftBody {
            // 500 from the star: inside gravity radius, outside the surface.
            origin: DVec2::new(5_500.0, 4_000.0),
            velocity: DVec2::ZERO,
            size: 8.0,
        };
        let state = drift_state(
            &body,
            &bounds(),
            &[(star.position, &star)],
            &DriftConfig::default(),
            0.0,
        );
        match state {
            DriftState::Captured {
                star_index, radius, ..
            } => {
                assert_eq!(star_index, 0);
                assert!((radius - 500.0).abs() < 1e-9);
            }
            DriftState::Drifting(_) => panic!("should be captured"),
        }
    }

    #[test]
    fn captured_body_keeps_its_radius_over_time() {
        let star = test_star(DVec2::new(5_000.0, 4_000.0));
        let body = DriftBody {
            origin: DVec2::new(5_500.0, 4_000.0),
            velocity: DVec2::ZERO,
            size: 8.0,
        };
        let stars = [(star.position, &star)];
        let config = DriftConfig::default();
        for t in [0.0, 3_000.0, 9_000.0] {
            match drift_state(&body, &bounds(), &stars, &config, t) {
                DriftState::Captured { position, .. } => {
                    assert!((position.distance(star.position) - 500.0).abs() < 1e-9, "t={t}");
                }
                DriftState::Drifting(_) => panic!("should stay captured at t={t}"),
            }
        }
    }

    #[test]
    fn body_far_from_stars_keeps_drifting() {
        let star = test_star(DVec2::new(0.0, 0.0));
        let body = DriftBody {
            origin: DVec2::new(5_000.0, 4_000.0),
            velocity: DVec2::new(10.0, 0.0),
            size: 8.0,
        };
        let state = drift_state(
            &body,
            &bounds(),
            &[(star.position, &star)],
            &DriftConfig::default(),
            1_000.0,
        );
        assert!(matches!(state, DriftState::Drifting(_)));
    }
}
