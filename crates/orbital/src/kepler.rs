//! Kepler's equation and binary-star motion.
//!
//! Binary members follow elliptical paths around their barycenter. Position
//! at time t comes from solving `M = E − e·sin(E)` for the eccentric anomaly
//! with Newton–Raphson, converting to true anomaly, and scaling each star's
//! radius by its own semi-major axis. The two stars are always exactly π
//! apart in true anomaly.

use glam::DVec2;
use std::f64::consts::{PI, TAU};
use world_core::{sanitize_time, BinaryInfo};

/// Newton–Raphson iteration cap. Every call is O(1).
const MAX_ITERATIONS: u32 = 10;
/// Convergence tolerance on Kepler's equation residual.
const TOLERANCE: f64 = 1e-8;
/// Below this eccentricity the orbit is treated as circular (E = M).
const CIRCULAR_EPS: f64 = 1e-3;

/// Solve `M = E − e·sin(E)` for E. Eccentricity is clamped into [0, 0.99]
/// and non-finite mean anomaly collapses to 0 (degenerate input policy).
pub fn solve_eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    let m = if mean_anomaly.is_finite() {
        mean_anomaly
    } else {
        0.0
    };
    let e = if eccentricity.is_finite() {
        eccentricity.clamp(0.0, 0.99)
    } else {
        0.0
    };
    if e < CIRCULAR_EPS {
        return m;
    }
    let mut ecc_anomaly = m;
    for _ in 0..MAX_ITERATIONS {
        let residual = ecc_anomaly - e * ecc_anomaly.sin() - m;
        let derivative = 1.0 - e * ecc_anomaly.cos();
        let delta = residual / derivative;
        ecc_anomaly -= delta;
        if delta.abs() < TOLERANCE {
            break;
        }
    }
    ecc_anomaly
}

/// True anomaly from eccentric anomaly, half-angle form:
/// ν = 2·atan2(√(1+e)·sin(E/2), √(1−e)·cos(E/2)).
pub fn true_anomaly(ecc_anomaly: f64, eccentricity: f64) -> f64 {
    let e = eccentricity.clamp(0.0, 0.99);
    let half = ecc_anomaly * 0.5;
    2.0 * ((1.0 + e).sqrt() * half.sin()).atan2((1.0 - e).sqrt() * half.cos())
}

/// Ellipse radius at true anomaly θ: `r = a(1−e²)/(1+e·cosθ)`.
pub fn ellipse_radius(semi_major: f64, eccentricity: f64, theta: f64) -> f64 {
    let e = eccentricity.clamp(0.0, 0.99);
    semi_major * (1.0 - e * e) / (1.0 + e * theta.cos())
}

/// True anomaly of the secondary star at a physics time. The primary's is
/// this plus π.
pub fn binary_true_anomaly(binary: &BinaryInfo, t_ms: f64) -> f64 {
    let period_s = (binary.orbit_period_ms / 1000.0).max(1e-6);
    let t_s = sanitize_time(t_ms) / 1000.0;
    let mean = (binary.orbit_phase + TAU * t_s / period_s).rem_euclid(TAU);
    let ecc = solve_eccentric_anomaly(mean, binary.eccentricity);
    true_anomaly(ecc, binary.eccentricity)
}

/// Positions of (primary, secondary) at a physics time, around the
/// barycenter, radii scaled inversely to the mass ratio.
pub fn binary_positions(binary: &BinaryInfo, t_ms: f64) -> (DVec2, DVec2) {
    let theta = binary_true_anomaly(binary, t_ms);
    let e = binary.eccentricity;

    let r_secondary = ellipse_radius(binary.secondary_orbit_radius, e, theta);
    let secondary =
        binary.barycenter + r_secondary * DVec2::new(theta.cos(), theta.sin());

    let theta_primary = theta + PI;
    let r_primary = ellipse_radius(binary.primary_orbit_radius, e, theta_primary);
    let primary =
        binary.barycenter + r_primary * DVec2::new(theta_primary.cos(), theta_primary.sin());

    (primary, secondary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::prelude::*;
    use world_core::{SpectralClass, Star};

    fn companion(eccentricity: f64) -> BinaryInfo {
        let secondary = Star {
            position: DVec2::new(1_060.0, 2_000.0),
            size: 40.0,
            class: SpectralClass::M,
            mass: 0.4,
            gravity_radius: 320.0,
            temperature_k: 3_200.0,
            color: glam::Vec3::new(1.0, 0.4, 0.2),
        };
        BinaryInfo {
            secondary,
            barycenter: DVec2::new(1_000.0, 2_000.0),
            separation: 210.0,
            eccentricity,
            orbit_period_ms: 90_000.0,
            orbit_phase: 0.7,
            primary_orbit_radius: 60.0,
            secondary_orbit_radius: 150.0,
        }
    }

    #[test]
    fn kepler_residual_converges_across_eccentricities() {
        // Sweep e ∈ [0, 0.9] with randomized mean anomalies; the solved E
        // must satisfy Kepler's equation to 1e-6.
        let mut rng = StdRng::seed_from_u64(0xBEEF);
        for step in 0..=9 {
            let e = step as f64 * 0.1;
            for _ in 0..200 {
                let m: f64 = rng.gen_range(-10.0..10.0);
                let ecc = solve_eccentric_anomaly(m, e);
                if e < CIRCULAR_EPS {
                    assert_eq!(ecc, m);
                } else {
                    let residual = ecc - e * ecc.sin() - m;
                    assert!(
                        residual.abs() < 1e-6,
                        "residual {residual} at e={e}, M={m}"
                    );
                }
            }
        }
    }

    #[test]
    fn circular_orbit_short_circuits() {
        assert_eq!(solve_eccentric_anomaly(2.5, 0.0), 2.5);
        assert_eq!(solve_eccentric_anomaly(2.5, 0.000_5), 2.5);
    }

    #[test]
    fn non_finite_inputs_collapse() {
        assert_eq!(solve_eccentric_anomaly(f64::NAN, 0.3), 0.0);
        assert_eq!(solve_eccentric_anomaly(1.0, f64::NAN), 1.0);
    }

    #[test]
    fn members_stay_pi_apart_in_true_anomaly() {
        let binary = companion(0.4);
        for t in [0.0, 1_000.0, 12_345.0, 80_000.0, 200_000.0] {
            let theta = binary_true_anomaly(&binary, t);
            let (primary, secondary) = binary_positions(&binary, t);
            // Both stars lie on the line through the barycenter at angle θ,
            // on opposite sides.
            let to_secondary = (secondary - binary.barycenter).normalize();
            let to_primary = (primary - binary.barycenter).normalize();
            assert!((to_secondary + to_primary).length() < 1e-9, "t={t}");
            let expected = DVec2::new(theta.cos(), theta.sin());
            assert!((to_secondary - expected).length() < 1e-9, "t={t}");
        }
    }

    #[test]
    fn radii_scale_with_mass_split() {
        let binary = companion(0.25);
        let (primary, secondary) = binary_positions(&binary, 42_000.0);
        let rp = (primary - binary.barycenter).length();
        let rs = (secondary - binary.barycenter).length();
        // Same true-anomaly geometry on both ellipses: distances keep the
        // semi-major-axis ratio only for e=0, but the ratio of r to the
        // instantaneous ellipse radius is 1 on both sides.
        let theta = binary_true_anomaly(&binary, 42_000.0);
        assert!((rs - ellipse_radius(150.0, 0.25, theta)).abs() < 1e-9);
        assert!(
            (rp - ellipse_radius(60.0, 0.25, theta + PI)).abs() < 1e-9
        );
    }

    #[test]
    fn binary_motion_is_periodic() {
        let binary = companion(0.4);
        let (p0, s0) = binary_positions(&binary, 5_000.0);
        let (p1, s1) = binary_positions(&binary, 5_000.0 + binary.orbit_period_ms);
        assert!((p0 - p1).length() < 1e-6);
        assert!((s0 - s1).length() < 1e-6);
    }

    #[test]
    fn zero_period_clamps_instead_of_dividing_by_zero() {
        let mut binary = companion(0.2);
        binary.orbit_period_ms = 0.0;
        let (p, s) = binary_positions(&binary, 1_000.0);
        assert!(p.is_finite() && s.is_finite());
    }
}
