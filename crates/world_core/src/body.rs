//! Immutable body descriptors.
//!
//! Everything here is produced once by the generators and then only read.
//! Orbit-anchored bodies store orbital elements, never positions: the
//! `orbital` crate turns (descriptor, physics time) into a concrete position
//! identically on every peer. Descriptors are serde-serializable because the
//! network layer ships them to clients verbatim.

use glam::{DVec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::coord::SectorCoord;

/// Star spectral class, hot/blue to cool/red.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

/// A star (primary or binary companion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Star {
    /// Nominal position. For binary members this is the epoch position; the
    /// live position comes from the Kepler solver.
    pub position: DVec2,
    /// Star radius in world units. Drives influence, exclusion, gravity and
    /// danger-zone scaling.
    pub size: f64,
    pub class: SpectralClass,
    /// Mass in solar-equivalent game units.
    pub mass: f64,
    /// Distance within which the star exerts gravity.
    pub gravity_radius: f64,
    /// Surface temperature in kelvin (flavor + client tinting).
    pub temperature_k: f64,
    /// Render color, linear RGB.
    pub color: Vec3,
}

/// Binary companion data attached to a system whose star has a partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryInfo {
    pub secondary: Star,
    /// Common center of mass both stars revolve around.
    pub barycenter: DVec2,
    /// Distance between the two stars (semi-major axis of the relative orbit).
    pub separation: f64,
    pub eccentricity: f64,
    /// Full orbital period in ms.
    pub orbit_period_ms: f64,
    /// Mean anomaly at the physics epoch, radians.
    pub orbit_phase: f64,
    /// Semi-major axis of the primary's path around the barycenter.
    pub primary_orbit_radius: f64,
    /// Semi-major axis of the secondary's path around the barycenter.
    pub secondary_orbit_radius: f64,
}

/// Circular orbital elements for planets, belt asteroids and orbit-anchored
/// bases. The anchor is the owning system's star position (or barycenter for
/// binaries).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orbit {
    /// Orbital radius in world units.
    pub radius: f64,
    /// Phase angle at the physics epoch, radians.
    pub phase: f64,
    /// Angular speed, rad/s.
    pub speed: f64,
}

/// Planet visual/structural type. Fixes size range and feature flags via the
/// planet catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlanetKind {
    Rocky,
    GasGiant,
    IceGiant,
    Lava,
    Ocean,
    Desert,
    Jungle,
    Tundra,
    Toxic,
    Crystalline,
    Metallic,
    Carbon,
    Barren,
    Shattered,
    Radiated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Planet {
    pub id: String,
    pub kind: PlanetKind,
    /// Planet radius in world units.
    pub size: f64,
    pub orbit: Orbit,
    pub has_rings: bool,
    pub has_atmosphere: bool,
    /// Whether gameplay allows surface interaction.
    pub landable: bool,
}

/// Mineral quality of a belt or asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ResourceTier {
    Common,
    Uncommon,
    Rare,
    Exotic,
}

/// One asteroid inside a belt annulus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BeltAsteroid {
    pub orbit: Orbit,
    pub size: f64,
}

/// An annular asteroid belt around a star.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AsteroidBelt {
    pub inner_radius: f64,
    pub outer_radius: f64,
    /// Asteroids per 1000 world units of mean circumference.
    pub density: f64,
    pub resource_tier: ResourceTier,
    /// Shared angular speed of the annulus, rad/s (Kepler-like falloff:
    /// farther belts turn slower).
    pub angular_speed: f64,
    pub asteroids: Vec<BeltAsteroid>,
}

impl AsteroidBelt {
    /// Mean radius of the annulus.
    pub fn average_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) * 0.5
    }

    /// Whether a radial distance falls inside the annulus.
    pub fn contains_radius(&self, r: f64) -> bool {
        r >= self.inner_radius && r <= self.outer_radius
    }
}

/// Faction that can hold an outpost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Federation,
    MinersGuild,
    Nomads,
    Scavengers,
}

/// Where a faction prefers to put its outposts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlacementStrategy {
    /// Anchored to the outermost belt.
    OuterBelt,
    /// Inner belt with the best resource tier.
    ResourceRich,
    /// Far from the star, static position.
    DeepSpace,
    /// Scattered among belt debris.
    DebrisField,
}

/// How a base sits in its system: on a circular orbit, or parked at a fixed
/// point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BasePlacement {
    Orbiting(Orbit),
    Static(DVec2),
}

/// A faction outpost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Base {
    pub id: String,
    pub faction: Faction,
    pub strategy: PlacementStrategy,
    pub placement: BasePlacement,
}

/// A wormhole gate. Position is fixed at generation (L4 of the binary pair,
/// or an outer-system point); the destination is a distant sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wormhole {
    pub position: DVec2,
    pub destination: SectorCoord,
}

/// A comet on a repeating quadratic-Bezier pass through the system.
///
/// Each cycle of `orbit_period_ms` starts with a silent warning window of
/// `warning_ms`, then a visible traversal of `traversal_ms` from `entry`
/// through `perihelion` to `exit`, then nothing until the next cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comet {
    pub entry: DVec2,
    pub perihelion: DVec2,
    pub exit: DVec2,
    pub size: f64,
    pub orbit_period_ms: f64,
    /// Offset into the cycle at the physics epoch, ms.
    pub phase_offset_ms: f64,
    pub warning_ms: f64,
    pub traversal_ms: f64,
}

/// A free-drifting body (loose asteroid, wreckage). Not produced by system
/// generation; gameplay hands these out and the `orbital` crate computes the
/// bounce path.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftBody {
    /// Position at the physics epoch.
    pub origin: DVec2,
    /// Linear velocity, world units per second.
    pub velocity: DVec2,
    pub size: f64,
}
