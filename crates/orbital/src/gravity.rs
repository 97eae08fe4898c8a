//! Star gravity fields.

use glam::DVec2;
use world_core::{GravityConfig, Star};

/// Result of a gravity query: either the ship is outside the field, or a
/// directional impulse toward the star.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GravityEffect {
    /// Outside the star's gravity radius (or degenerate input).
    NotInField,
    Pull {
        /// Unit vector toward the star.
        direction: DVec2,
        /// Impulse magnitude after falloff and tier resistance.
        strength: f64,
    },
}

/// Gravity pull on a ship at `pos`. `star_pos` is the star's live position
/// (binary members move; pass the Kepler-solved position). Higher engine
/// tiers feel less pull, floored at the configured minimum factor.
pub fn gravity_pull(
    star: &Star,
    star_pos: DVec2,
    pos: DVec2,
    engine_tier: u32,
    config: &GravityConfig,
) -> GravityEffect {
    if !pos.is_finite() || !star_pos.is_finite() || star.size <= 0.0 {
        return GravityEffect::NotInField;
    }
    let offset = star_pos - pos;
    let distance = offset.length();
    if distance > star.gravity_radius || distance <= f64::EPSILON {
        return GravityEffect::NotInField;
    }

    let ratio = (distance / star.size).max(config.min_ratio);
    let resistance = (1.0 - engine_tier as f64 * config.tier_resistance)
        .max(config.tier_resistance_floor);
    let strength = config.base_strength / ratio.powf(config.falloff_power) * resistance;

    GravityEffect::Pull {
        direction: offset / distance,
        strength,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use world_core::SpectralClass;

    fn star(size: f64) -> Star {
        Star {
            position: DVec2::ZERO,
            size,
            class: SpectralClass::G,
            mass: 1.0,
            gravity_radius: size * 8.0,
            temperature_k: 5_700.0,
            color: glam::Vec3::new(1.0, 0.95, 0.7),
        }
    }

    #[test]
    fn no_pull_outside_gravity_radius() {
        let s = star(100.0);
        let effect = gravity_pull(
            &s,
            s.position,
            DVec2::new(900.0, 0.0),
            0,
            &GravityConfig::default(),
        );
        assert_eq!(effect, GravityEffect::NotInField);
    }

    #[test]
    fn pull_points_toward_the_star_and_grows_closer() {
        let s = star(100.0);
        let config = GravityConfig::default();
        let far = gravity_pull(&s, s.position, DVec2::new(700.0, 0.0), 0, &config);
        let near = gravity_pull(&s, s.position, DVec2::new(300.0, 0.0), 0, &config);
        let (GravityEffect::Pull { direction: d_far, strength: s_far },
             GravityEffect::Pull { direction: d_near, strength: s_near }) = (far, near)
        else {
            panic!("expected pulls inside the field");
        };
        assert!((d_far - DVec2::new(-1.0, 0.0)).length() < 1e-12);
        assert!((d_near - DVec2::new(-1.0, 0.0)).length() < 1e-12);
        assert!(s_near > s_far);
    }

    #[test]
    fn ratio_floor_caps_surface_pull() {
        let s = star(100.0);
        let config = GravityConfig::default();
        let at_floor = gravity_pull(&s, s.position, DVec2::new(50.0, 0.0), 0, &config);
        let below_floor = gravity_pull(&s, s.position, DVec2::new(10.0, 0.0), 0, &config);
        match (at_floor, below_floor) {
            (
                GravityEffect::Pull { strength: a, .. },
                GravityEffect::Pull { strength: b, .. },
            ) => assert!((a - b).abs() < 1e-9, "pull should cap at the ratio floor"),
            other => panic!("expected pulls, got {other:?}"),
        }
    }

    #[test]
    fn higher_tiers_feel_less_pull_with_a_floor() {
        let s = star(100.0);
        let config = GravityConfig::default();
        let probe = DVec2::new(400.0, 0.0);
        let strengths: Vec<f64> = (0..=10)
            .map(|tier| match gravity_pull(&s, s.position, probe, tier, &config) {
                GravityEffect::Pull { strength, .. } => strength,
                GravityEffect::NotInField => panic!("inside the field"),
            })
            .collect();
        for pair in strengths.windows(2) {
            assert!(pair[1] <= pair[0]);
        }
        // Tier 5 already hits the floor of 0.25 with the default 0.15/tier.
        assert!((strengths[5] - strengths[10]).abs() < 1e-12);
    }

    #[test]
    fn non_finite_position_is_not_in_field() {
        let s = star(100.0);
        let effect = gravity_pull(
            &s,
            s.position,
            DVec2::new(f64::NAN, 0.0),
            0,
            &GravityConfig::default(),
        );
        assert_eq!(effect, GravityEffect::NotInField);
    }
}
