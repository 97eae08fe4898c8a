//! The tunable configuration surface: catalogs and constants for every
//! generator and mechanics function. Loaded from `galaxy.ron` at startup or
//! built from `Default`. Validation is eager and happens exactly once; after
//! that, nothing in the subsystem can fail per-query.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::body::{Faction, PlacementStrategy, PlanetKind, ResourceTier, SpectralClass};
use crate::coord::SuperSectorCoord;
use crate::error::ConfigError;
use crate::time::PhysicsClock;

/// Gravitational parameter in game units, tuned so a planet at orbit radius
/// ~10000 around a 1-mass star moves at ~0.02 rad/s. Kepler: ω = √(μ·m / a³).
pub const GRAVITATIONAL_PARAM: f64 = 4e8;

/// Star-size bucket used by influence radius and belt-count tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeBucket {
    Small,
    Medium,
    Large,
}

impl SizeBucket {
    pub fn index(self) -> usize {
        match self {
            SizeBucket::Small => 0,
            SizeBucket::Medium => 1,
            SizeBucket::Large => 2,
        }
    }
}

/// One spectral class entry in the star catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpectralClassSpec {
    pub class: SpectralClass,
    /// Rarity weight for the cumulative draw.
    pub weight: f64,
    /// Star radius range in world units.
    pub size_range: (f64, f64),
    /// Mass multiplier relative to a reference star.
    pub mass_mult: f64,
    pub temperature_k: f64,
    pub color: Vec3,
}

/// One entry in the 15-type planet catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetTypeSpec {
    pub kind: PlanetKind,
    pub weight: f64,
    pub size_range: (f64, f64),
    pub has_rings: bool,
    pub has_atmosphere: bool,
    pub landable: bool,
}

/// One resource-tier entry for belt draws.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceTierSpec {
    pub tier: ResourceTier,
    pub weight: f64,
}

/// One faction entry in the base placement table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseSpec {
    pub faction: Faction,
    pub strategy: PlacementStrategy,
    /// Roll gating outpost creation, per system.
    pub spawn_chance: f64,
    /// Distance-from-star bounds, × primary star size.
    pub min_dist_mult: f64,
    pub max_dist_mult: f64,
}

/// Super-sector layout and placement constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Edge length of a super-sector in world units.
    pub super_sector_size: f64,
    /// Edge length of a sector (the influence-radius unit).
    pub sector_size: f64,
    /// Minimum distance between any two star primaries in a neighborhood.
    pub min_star_separation: f64,
    /// Systems drawn per super-sector, inclusive.
    pub systems_per_super_sector: (u32, u32),
    /// Inset from the super-sector edge as a fraction of its size, keeping
    /// stars away from cell boundaries.
    pub placement_margin_frac: f64,
    /// Bounded cache of generated super-sectors (insertion-order eviction).
    pub cache_capacity: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            super_sector_size: 20_000.0,
            sector_size: 2_000.0,
            min_star_separation: 4_500.0,
            systems_per_super_sector: (1, 3),
            placement_margin_frac: 0.35,
            cache_capacity: 64,
        }
    }
}

/// Star generation: spectral catalog, influence buckets, binary companions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StarConfig {
    pub spectral: Vec<SpectralClassSpec>,
    /// Bucket thresholds on final star size: below the first is Small,
    /// below the second Medium, otherwise Large.
    pub bucket_thresholds: (f64, f64),
    /// Influence radius per bucket, in whole sectors.
    pub influence_sectors: [u32; 3],
    /// Exclusion radius as a multiple of star size.
    pub exclusion_mult: f64,
    /// Probability that a system has a binary companion.
    pub binary_chance: f64,
    /// Companion size as a fraction of the primary's.
    pub binary_size_frac: (f64, f64),
    /// Orbital separation as a multiple of primary size.
    pub binary_separation_mult: (f64, f64),
    pub binary_eccentricity_max: f64,
    /// Period scale: period = base · (separation / primary size)^1.5.
    pub binary_period_base_ms: f64,
}

impl Default for StarConfig {
    fn default() -> Self {
        Self {
            spectral: vec![
                SpectralClassSpec {
                    class: SpectralClass::O,
                    weight: 1.0,
                    size_range: (140.0, 180.0),
                    mass_mult: 12.0,
                    temperature_k: 35_000.0,
                    color: Vec3::new(0.6, 0.7, 1.0),
                },
                SpectralClassSpec {
                    class: SpectralClass::B,
                    weight: 3.0,
                    size_range: (120.0, 150.0),
                    mass_mult: 8.0,
                    temperature_k: 18_000.0,
                    color: Vec3::new(0.7, 0.8, 1.0),
                },
                SpectralClassSpec {
                    class: SpectralClass::A,
                    weight: 6.0,
                    size_range: (100.0, 130.0),
                    mass_mult: 4.0,
                    temperature_k: 8_500.0,
                    color: Vec3::new(0.85, 0.9, 1.0),
                },
                SpectralClassSpec {
                    class: SpectralClass::F,
                    weight: 12.0,
                    size_range: (85.0, 110.0),
                    mass_mult: 2.0,
                    temperature_k: 6_800.0,
                    color: Vec3::new(1.0, 0.97, 0.9),
                },
                SpectralClassSpec {
                    class: SpectralClass::G,
                    weight: 20.0,
                    size_range: (70.0, 95.0),
                    mass_mult: 1.0,
                    temperature_k: 5_700.0,
                    color: Vec3::new(1.0, 0.95, 0.7),
                },
                SpectralClassSpec {
                    class: SpectralClass::K,
                    weight: 25.0,
                    size_range: (55.0, 80.0),
                    mass_mult: 0.7,
                    temperature_k: 4_500.0,
                    color: Vec3::new(1.0, 0.75, 0.45),
                },
                SpectralClassSpec {
                    class: SpectralClass::M,
                    weight: 33.0,
                    size_range: (40.0, 65.0),
                    mass_mult: 0.4,
                    temperature_k: 3_200.0,
                    color: Vec3::new(1.0, 0.4, 0.2),
                },
            ],
            bucket_thresholds: (70.0, 110.0),
            influence_sectors: [2, 3, 4],
            exclusion_mult: 2.5,
            binary_chance: 0.15,
            binary_size_frac: (0.3, 0.8),
            binary_separation_mult: (1.5, 3.0),
            binary_eccentricity_max: 0.5,
            binary_period_base_ms: 120_000.0,
        }
    }
}

impl StarConfig {
    /// Bucket a final star size.
    pub fn size_bucket(&self, size: f64) -> SizeBucket {
        if size < self.bucket_thresholds.0 {
            SizeBucket::Small
        } else if size < self.bucket_thresholds.1 {
            SizeBucket::Medium
        } else {
            SizeBucket::Large
        }
    }
}

/// Asteroid belt generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BeltConfig {
    /// Belt count range per star-size bucket (Small/Medium/Large).
    pub count_by_bucket: [(u32, u32); 3],
    /// Inner radius of the innermost belt, × star size.
    pub first_inner_mult: (f64, f64),
    /// Gap between consecutive belts, × star size.
    pub gap_mult: (f64, f64),
    /// Annulus width, × star size.
    pub width_mult: (f64, f64),
    /// Asteroids per 1000 units of mean circumference.
    pub density: (f64, f64),
    /// ω = speed_scale · √(mass / average radius).
    pub speed_scale: f64,
    pub asteroid_size: (f64, f64),
    /// Hard cap on descriptors per belt.
    pub max_asteroids_per_belt: usize,
    pub resource_tiers: Vec<ResourceTierSpec>,
}

impl Default for BeltConfig {
    fn default() -> Self {
        Self {
            count_by_bucket: [(1, 1), (1, 2), (2, 3)],
            first_inner_mult: (5.0, 8.0),
            gap_mult: (2.0, 4.0),
            width_mult: (1.0, 2.0),
            density: (0.5, 2.0),
            speed_scale: 0.5,
            asteroid_size: (4.0, 18.0),
            max_asteroids_per_belt: 64,
            resource_tiers: vec![
                ResourceTierSpec {
                    tier: ResourceTier::Common,
                    weight: 50.0,
                },
                ResourceTierSpec {
                    tier: ResourceTier::Uncommon,
                    weight: 30.0,
                },
                ResourceTierSpec {
                    tier: ResourceTier::Rare,
                    weight: 15.0,
                },
                ResourceTierSpec {
                    tier: ResourceTier::Exotic,
                    weight: 5.0,
                },
            ],
        }
    }
}

/// Planet generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanetConfig {
    /// Planets per system, inclusive.
    pub count: (u32, u32),
    /// Orbit radius bounds, × star size.
    pub orbit_mult: (f64, f64),
    /// Minimum spacing between planet orbits as a fraction of star size.
    pub spacing_frac: f64,
    pub catalog: Vec<PlanetTypeSpec>,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            count: (1, 5),
            orbit_mult: (8.0, 60.0),
            spacing_frac: 0.3,
            catalog: vec![
                PlanetTypeSpec {
                    kind: PlanetKind::Rocky,
                    weight: 16.0,
                    size_range: (18.0, 34.0),
                    has_rings: false,
                    has_atmosphere: true,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::GasGiant,
                    weight: 10.0,
                    size_range: (55.0, 90.0),
                    has_rings: true,
                    has_atmosphere: true,
                    landable: false,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::IceGiant,
                    weight: 8.0,
                    size_range: (45.0, 75.0),
                    has_rings: true,
                    has_atmosphere: true,
                    landable: false,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Lava,
                    weight: 7.0,
                    size_range: (18.0, 36.0),
                    has_rings: false,
                    has_atmosphere: false,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Ocean,
                    weight: 8.0,
                    size_range: (24.0, 44.0),
                    has_rings: false,
                    has_atmosphere: true,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Desert,
                    weight: 9.0,
                    size_range: (18.0, 38.0),
                    has_rings: false,
                    has_atmosphere: true,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Jungle,
                    weight: 6.0,
                    size_range: (24.0, 42.0),
                    has_rings: false,
                    has_atmosphere: true,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Tundra,
                    weight: 7.0,
                    size_range: (18.0, 36.0),
                    has_rings: false,
                    has_atmosphere: true,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Toxic,
                    weight: 6.0,
                    size_range: (20.0, 40.0),
                    has_rings: false,
                    has_atmosphere: true,
                    landable: false,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Crystalline,
                    weight: 4.0,
                    size_range: (16.0, 32.0),
                    has_rings: false,
                    has_atmosphere: false,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Metallic,
                    weight: 5.0,
                    size_range: (16.0, 34.0),
                    has_rings: false,
                    has_atmosphere: false,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Carbon,
                    weight: 4.0,
                    size_range: (18.0, 36.0),
                    has_rings: false,
                    has_atmosphere: false,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Barren,
                    weight: 6.0,
                    size_range: (12.0, 28.0),
                    has_rings: false,
                    has_atmosphere: false,
                    landable: true,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Shattered,
                    weight: 2.0,
                    size_range: (10.0, 24.0),
                    has_rings: false,
                    has_atmosphere: false,
                    landable: false,
                },
                PlanetTypeSpec {
                    kind: PlanetKind::Radiated,
                    weight: 2.0,
                    size_range: (16.0, 30.0),
                    has_rings: false,
                    has_atmosphere: false,
                    landable: false,
                },
            ],
        }
    }
}

/// Wormhole generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WormholeConfig {
    pub spawn_chance: f64,
    /// Super-sector that always rolls a wormhole for its first system.
    pub guaranteed_cell: SuperSectorCoord,
    /// Destination offset magnitude range, in sectors.
    pub dest_offset_sectors: (i32, i32),
    /// Outer-system placement distance for non-binary systems, × star size.
    pub outer_point_mult: f64,
}

impl Default for WormholeConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.02,
            guaranteed_cell: SuperSectorCoord::new(0, 0),
            dest_offset_sectors: (400, 1600),
            outer_point_mult: 15.0,
        }
    }
}

/// Comet generation and timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CometConfig {
    pub spawn_chance: f64,
    pub size: (f64, f64),
    /// Silent warning window before each traversal.
    pub warning_ms: f64,
    pub traversal_ms: (f64, f64),
    pub period_ms: (f64, f64),
    /// Entry/exit distance from the star, × star size.
    pub span_mult: f64,
    /// Closest-approach distance, × star size.
    pub perihelion_mult: (f64, f64),
}

impl Default for CometConfig {
    fn default() -> Self {
        Self {
            spawn_chance: 0.01,
            size: (6.0, 20.0),
            warning_ms: 10_000.0,
            traversal_ms: (20_000.0, 40_000.0),
            period_ms: (180_000.0, 420_000.0),
            span_mult: 30.0,
            perihelion_mult: (2.0, 4.0),
        }
    }
}

/// Star gravity-field constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GravityConfig {
    /// Pull magnitude at the reference ratio.
    pub base_strength: f64,
    /// Falloff exponent on the distance/size ratio.
    pub falloff_power: f64,
    /// Gravity radius as a multiple of star size.
    pub influence_factor: f64,
    /// The distance/size ratio is floored here so the pull stays finite at
    /// the surface.
    pub min_ratio: f64,
    /// Pull reduction per engine tier.
    pub tier_resistance: f64,
    /// Floor on the tier resistance factor.
    pub tier_resistance_floor: f64,
}

impl Default for GravityConfig {
    fn default() -> Self {
        Self {
            base_strength: 120.0,
            falloff_power: 2.0,
            influence_factor: 8.0,
            min_ratio: 0.5,
            tier_resistance: 0.15,
            tier_resistance_floor: 0.25,
        }
    }
}

/// Danger-zone thresholds (on the distance/size ratio) and damage constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ZoneConfig {
    pub surface_max: f64,
    pub hot_max: f64,
    pub warm_max: f64,
    pub corona_max: f64,
    /// Shield drain per second in the warm band.
    pub warm_shield_drain: f64,
    /// Shield drain per second in the hot band and below.
    pub hot_shield_drain: f64,
    /// Hull damage per second at the inner edge of the hot band.
    pub hot_hull_max: f64,
    /// Hull damage per second at the surface (near-instant kill).
    pub surface_hull: f64,
}

impl Default for ZoneConfig {
    fn default() -> Self {
        Self {
            surface_max: 0.6,
            hot_max: 1.0,
            warm_max: 1.3,
            corona_max: 1.6,
            warm_shield_drain: 4.0,
            hot_shield_drain: 10.0,
            hot_hull_max: 25.0,
            surface_hull: 500.0,
        }
    }
}

/// Free-drift bounce and gravity-capture constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DriftConfig {
    /// Orbital angular speed assigned to a captured drifter, rad/s.
    pub capture_speed: f64,
    /// Inset from the drift bounds.
    pub bounce_margin: f64,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            capture_speed: 0.1,
            bounce_margin: 50.0,
        }
    }
}

/// The whole configuration surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Process-wide generation seed. All content is a pure function of
    /// (seed, coordinates).
    pub seed: String,
    pub clock: PhysicsClock,
    pub layout: LayoutConfig,
    pub stars: StarConfig,
    pub belts: BeltConfig,
    pub planets: PlanetConfig,
    pub bases: Vec<BaseSpec>,
    pub wormholes: WormholeConfig,
    pub comets: CometConfig,
    pub gravity: GravityConfig,
    pub zones: ZoneConfig,
    pub drift: DriftConfig,
}

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            seed: "andromeda-7".to_string(),
            clock: PhysicsClock::default(),
            layout: LayoutConfig::default(),
            stars: StarConfig::default(),
            belts: BeltConfig::default(),
            planets: PlanetConfig::default(),
            bases: vec![
                BaseSpec {
                    faction: Faction::Federation,
                    strategy: PlacementStrategy::OuterBelt,
                    spawn_chance: 0.35,
                    min_dist_mult: 6.0,
                    max_dist_mult: 14.0,
                },
                BaseSpec {
                    faction: Faction::MinersGuild,
                    strategy: PlacementStrategy::ResourceRich,
                    spawn_chance: 0.3,
                    min_dist_mult: 4.0,
                    max_dist_mult: 9.0,
                },
                BaseSpec {
                    faction: Faction::Nomads,
                    strategy: PlacementStrategy::DeepSpace,
                    spawn_chance: 0.15,
                    min_dist_mult: 20.0,
                    max_dist_mult: 40.0,
                },
                BaseSpec {
                    faction: Faction::Scavengers,
                    strategy: PlacementStrategy::DebrisField,
                    spawn_chance: 0.2,
                    min_dist_mult: 5.0,
                    max_dist_mult: 12.0,
                },
            ],
            wormholes: WormholeConfig::default(),
            comets: CometConfig::default(),
            gravity: GravityConfig::default(),
            zones: ZoneConfig::default(),
            drift: DriftConfig::default(),
        }
    }
}

impl GalaxyConfig {
    /// Parse a RON string and validate it.
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Load config from a RON file. Missing file falls back to defaults with
    /// a warning; an invalid file is a hard error (bad tuning should not
    /// silently vanish on a game server).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(data) => Self::from_ron_str(&data),
            Err(e) => {
                log::warn!("No config at {:?} ({}), using defaults", path, e);
                Ok(Self::default())
            }
        }
    }

    /// Eager startup validation. This is the only place the subsystem
    /// rejects anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.seed.is_empty() {
            return Err(ConfigError::EmptySeed);
        }
        Self::positive(self.layout.super_sector_size, "layout.super_sector_size")?;
        Self::positive(self.layout.sector_size, "layout.sector_size")?;
        Self::positive(self.layout.min_star_separation, "layout.min_star_separation")?;
        if self.layout.cache_capacity == 0 {
            return Err(ConfigError::NonPositive {
                field: "layout.cache_capacity",
            });
        }
        Self::ordered_u32(
            self.layout.systems_per_super_sector,
            "layout.systems_per_super_sector",
        )?;
        if !(0.0..0.5).contains(&self.layout.placement_margin_frac) {
            return Err(ConfigError::InvertedRange {
                field: "layout.placement_margin_frac",
            });
        }

        Self::catalog(
            self.stars.spectral.iter().map(|s| s.weight),
            "stars.spectral",
        )?;
        for spec in &self.stars.spectral {
            Self::ordered(spec.size_range, "stars.spectral.size_range")?;
        }
        Self::ordered(self.stars.binary_size_frac, "stars.binary_size_frac")?;
        Self::ordered(
            self.stars.binary_separation_mult,
            "stars.binary_separation_mult",
        )?;

        Self::catalog(
            self.belts.resource_tiers.iter().map(|t| t.weight),
            "belts.resource_tiers",
        )?;
        Self::ordered(self.belts.first_inner_mult, "belts.first_inner_mult")?;
        Self::ordered(self.belts.width_mult, "belts.width_mult")?;
        Self::ordered(self.belts.density, "belts.density")?;

        Self::catalog(
            self.planets.catalog.iter().map(|p| p.weight),
            "planets.catalog",
        )?;
        for spec in &self.planets.catalog {
            Self::ordered(spec.size_range, "planets.catalog.size_range")?;
        }
        Self::ordered_u32(self.planets.count, "planets.count")?;
        Self::ordered(self.planets.orbit_mult, "planets.orbit_mult")?;

        for base in &self.bases {
            if base.min_dist_mult > base.max_dist_mult {
                return Err(ConfigError::InvertedRange {
                    field: "bases.dist_mult",
                });
            }
        }

        let (offset_lo, offset_hi) = self.wormholes.dest_offset_sectors;
        if offset_lo < 0 || offset_hi < 0 {
            return Err(ConfigError::NonPositive {
                field: "wormholes.dest_offset_sectors",
            });
        }
        if offset_lo > offset_hi {
            return Err(ConfigError::InvertedRange {
                field: "wormholes.dest_offset_sectors",
            });
        }

        Self::positive(self.gravity.base_strength, "gravity.base_strength")?;
        Self::positive(self.gravity.influence_factor, "gravity.influence_factor")?;

        let z = &self.zones;
        if !(z.surface_max < z.hot_max && z.hot_max < z.warm_max && z.warm_max < z.corona_max) {
            return Err(ConfigError::UnorderedZones);
        }

        Ok(())
    }

    /// Absolute influence radius for a star size, in world units.
    pub fn influence_radius(&self, star_size: f64) -> f64 {
        let bucket = self.stars.size_bucket(star_size);
        self.stars.influence_sectors[bucket.index()] as f64 * self.layout.sector_size
    }

    fn positive(v: f64, field: &'static str) -> Result<(), ConfigError> {
        if v > 0.0 {
            Ok(())
        } else {
            Err(ConfigError::NonPositive { field })
        }
    }

    fn ordered(range: (f64, f64), field: &'static str) -> Result<(), ConfigError> {
        if range.0 <= range.1 {
            Ok(())
        } else {
            Err(ConfigError::InvertedRange { field })
        }
    }

    fn ordered_u32(range: (u32, u32), field: &'static str) -> Result<(), ConfigError> {
        if range.0 <= range.1 {
            Ok(())
        } else {
            Err(ConfigError::InvertedRange { field })
        }
    }

    fn catalog(
        weights: impl Iterator<Item = f64>,
        name: &'static str,
    ) -> Result<(), ConfigError> {
        let mut total = 0.0;
        let mut count = 0usize;
        for w in weights {
            if w < 0.0 {
                return Err(ConfigError::BadWeights { name });
            }
            total += w;
            count += 1;
        }
        if count == 0 {
            return Err(ConfigError::EmptyCatalog { name });
        }
        if total <= 0.0 {
            return Err(ConfigError::BadWeights { name });
        }
        Ok(())
    }
}
