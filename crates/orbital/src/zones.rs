//! Star danger zones and their damage mapping.
//!
//! The distance/star-size ratio is bucketed into surface < hot < warm <
//! corona < safe. Corona is a visual warning only; warm drains shields; hot
//! drains shields and burns hull, scaling linearly with proximity; surface
//! contact is near-instant destruction.

use glam::DVec2;
use world_core::ZoneConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DangerZone {
    Surface,
    Hot,
    Warm,
    Corona,
    Safe,
}

/// Damage rates per second for a zone sample.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ZoneDamage {
    pub shield_drain: f64,
    pub hull_damage: f64,
}

/// Bucket a distance/star-size ratio. Degenerate star size (≤ 0 or
/// non-finite) reads as safe.
pub fn danger_zone(star_size: f64, distance: f64, config: &ZoneConfig) -> DangerZone {
    if !(star_size > 0.0) || !star_size.is_finite() || !distance.is_finite() {
        return DangerZone::Safe;
    }
    let ratio = distance.max(0.0) / star_size;
    if ratio <= config.surface_max {
        DangerZone::Surface
    } else if ratio <= config.hot_max {
        DangerZone::Hot
    } else if ratio <= config.warm_max {
        DangerZone::Warm
    } else if ratio <= config.corona_max {
        DangerZone::Corona
    } else {
        DangerZone::Safe
    }
}

/// Zone at a position relative to a star's live position.
pub fn danger_zone_at(
    star_size: f64,
    star_pos: DVec2,
    pos: DVec2,
    config: &ZoneConfig,
) -> DangerZone {
    if !pos.is_finite() || !star_pos.is_finite() {
        return DangerZone::Safe;
    }
    danger_zone(star_size, star_pos.distance(pos), config)
}

/// Damage for a zone sample. `ratio` is the same distance/star-size ratio
/// the zone was derived from. Inside the hot band hull damage scales
/// linearly with proximity, from 0 at the hot boundary up to `hot_hull_max`
/// at the surface boundary, so the mapping is non-decreasing as the ship
/// falls inward.
pub fn zone_damage(zone: DangerZone, ratio: f64, config: &ZoneConfig) -> ZoneDamage {
    match zone {
        DangerZone::Safe | DangerZone::Corona => ZoneDamage::default(),
        DangerZone::Warm => ZoneDamage {
            shield_drain: config.warm_shield_drain,
            hull_damage: 0.0,
        },
        DangerZone::Hot => {
            let band = (config.hot_max - config.surface_max).max(f64::EPSILON);
            let clamped = ratio.clamp(config.surface_max, config.hot_max);
            let proximity = (config.hot_max - clamped) / band;
            ZoneDamage {
                shield_drain: config.hot_shield_drain,
                hull_damage: config.hot_hull_max * proximity,
            }
        }
        DangerZone::Surface => ZoneDamage {
            shield_drain: config.hot_shield_drain,
            hull_damage: config.surface_hull,
        },
    }
}

/// Zone and damage in one call, for the collision/damage handlers.
pub fn star_damage(
    star_size: f64,
    star_pos: DVec2,
    pos: DVec2,
    config: &ZoneConfig,
) -> (DangerZone, ZoneDamage) {
    let zone = danger_zone_at(star_size, star_pos, pos, config);
    let ratio = if star_size > 0.0 && pos.is_finite() && star_pos.is_finite() {
        star_pos.distance(pos) / star_size
    } else {
        f64::INFINITY
    };
    (zone, zone_damage(zone, ratio, config))
}
