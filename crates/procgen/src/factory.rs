//! Star-system assembly.
//!
//! `StarSystemFactory::create` builds one complete system from a placement
//! and an RNG stream seeded once per system. The draw order below is fixed:
//! it is part of what makes generation reproducible, so new sub-steps go at
//! the end, never in the middle.

use glam::DVec2;
use std::f64::consts::{FRAC_PI_3, PI, TAU};

use world_core::{
    AsteroidBelt, Base, BasePlacement, BeltAsteroid, BinaryInfo, Comet, ConfigError, GalaxyConfig,
    Orbit, Planet, PlanetTypeSpec, PlacementStrategy, ResourceTier, SectorCoord,
    SpectralClassSpec, Star, StarSystem, Wormhole, GRAVITATIONAL_PARAM,
};

use crate::rng::{SeededRandom, WeightedTable};

/// Attempt budget for one planet orbital slot.
const MAX_SLOT_ATTEMPTS: u32 = 20;

/// Builds complete star systems from validated configuration.
pub struct StarSystemFactory {
    config: GalaxyConfig,
    spectral: WeightedTable<SpectralClassSpec>,
    planet_types: WeightedTable<PlanetTypeSpec>,
    resource_tiers: WeightedTable<ResourceTier>,
}

impl StarSystemFactory {
    /// Build the weighted catalogs. The config must already have passed
    /// `validate`; a catalog that still fails here reports `BadWeights`.
    pub fn new(config: GalaxyConfig) -> Result<Self, ConfigError> {
        let spectral = WeightedTable::new(
            config
                .stars
                .spectral
                .iter()
                .map(|s| (s.weight, s.clone())),
        )
        .ok_or(ConfigError::BadWeights {
            name: "stars.spectral",
        })?;
        let planet_types = WeightedTable::new(
            config
                .planets
                .catalog
                .iter()
                .map(|p| (p.weight, p.clone())),
        )
        .ok_or(ConfigError::BadWeights {
            name: "planets.catalog",
        })?;
        let resource_tiers = WeightedTable::new(
            config
                .belts
                .resource_tiers
                .iter()
                .map(|t| (t.weight, t.tier)),
        )
        .ok_or(ConfigError::BadWeights {
            name: "belts.resource_tiers",
        })?;
        Ok(Self {
            config,
            spectral,
            planet_types,
            resource_tiers,
        })
    }

    pub fn config(&self) -> &GalaxyConfig {
        &self.config
    }

    /// Build one star system at `position`. `guarantee_wormhole` is set by
    /// the sector generator for the first system of the designated spawn
    /// cell; the chance roll is consumed either way so the stream stays
    /// aligned across cells.
    pub fn create(
        &self,
        position: DVec2,
        id: String,
        rng: &mut SeededRandom,
        guarantee_wormhole: bool,
    ) -> StarSystem {
        let primary = self.primary_star(position, rng);
        let influence_radius = self.config.influence_radius(primary.size);
        let exclusion_radius = primary.size * self.config.stars.exclusion_mult;

        let binary = if rng.chance(self.config.stars.binary_chance) {
            Some(self.binary_companion(&primary, rng))
        } else {
            None
        };

        let belts = self.belts(&primary, exclusion_radius, rng);
        let planets = self.planets(&id, &primary, exclusion_radius, &belts, rng);
        let bases = self.bases(&id, &primary, exclusion_radius, &belts, rng);
        let wormholes = self.wormholes(&primary, binary.as_ref(), guarantee_wormhole, rng);
        let comets = self.comets(&primary, rng);

        StarSystem {
            id,
            primary,
            binary,
            influence_radius,
            exclusion_radius,
            belts,
            planets,
            bases,
            wormholes,
            comets,
        }
    }

    fn primary_star(&self, position: DVec2, rng: &mut SeededRandom) -> Star {
        let spec = self.spectral.sample(rng).clone();
        let size = rng.range(spec.size_range.0, spec.size_range.1);
        Star {
            position,
            size,
            class: spec.class,
            mass: spec.mass_mult,
            gravity_radius: size * self.config.gravity.influence_factor,
            temperature_k: spec.temperature_k,
            color: spec.color,
        }
    }

    /// Catalog entry whose size range contains `size`, or the one with the
    /// closest range midpoint. Used to classify binary companions, whose
    /// size is derived from the primary rather than drawn from the catalog.
    fn class_for_size(&self, size: f64) -> &SpectralClassSpec {
        let catalog = &self.config.stars.spectral;
        catalog
            .iter()
            .find(|s| size >= s.size_range.0 && size <= s.size_range.1)
            .unwrap_or_else(|| {
                let mut best = &catalog[0];
                let mut best_err = f64::INFINITY;
                for spec in catalog {
                    let mid = (spec.size_range.0 + spec.size_range.1) * 0.5;
                    let err = (mid - size).abs();
                    if err < best_err {
                        best_err = err;
                        best = spec;
                    }
                }
                best
            })
    }

    fn binary_companion(&self, primary: &Star, rng: &mut SeededRandom) -> BinaryInfo {
        let sc = &self.config.stars;
        let size = primary.size * rng.range(sc.binary_size_frac.0, sc.binary_size_frac.1);
        let spec = self.class_for_size(size).clone();
        let separation =
            primary.size * rng.range(sc.binary_separation_mult.0, sc.binary_separation_mult.1);
        let eccentricity = rng.range(0.0, sc.binary_eccentricity_max);
        let orbit_phase = rng.angle();
        let orbit_period_ms =
            sc.binary_period_base_ms * (separation / primary.size).powf(1.5);

        // Orbital radii split inversely to the mass ratio around the
        // barycenter at the primary's nominal position.
        let total_mass = primary.mass + spec.mass_mult;
        let primary_orbit_radius = separation * spec.mass_mult / total_mass;
        let secondary_orbit_radius = separation * primary.mass / total_mass;

        let barycenter = primary.position;
        let epoch_dir = DVec2::new(orbit_phase.cos(), orbit_phase.sin());
        let secondary = Star {
            position: barycenter + secondary_orbit_radius * epoch_dir,
            size,
            class: spec.class,
            mass: spec.mass_mult,
            gravity_radius: size * self.config.gravity.influence_factor,
            temperature_k: spec.temperature_k,
            color: spec.color,
        };

        BinaryInfo {
            secondary,
            barycenter,
            separation,
            eccentricity,
            orbit_period_ms,
            orbit_phase,
            primary_orbit_radius,
            secondary_orbit_radius,
        }
    }

    fn belts(
        &self,
        primary: &Star,
        exclusion_radius: f64,
        rng: &mut SeededRandom,
    ) -> Vec<AsteroidBelt> {
        let bc = &self.config.belts;
        let bucket = self.config.stars.size_bucket(primary.size);
        let (lo, hi) = bc.count_by_bucket[bucket.index()];
        let count = rng.range_u32(lo, hi);

        let mut belts = Vec::with_capacity(count as usize);
        // The innermost annulus must clear the exclusion radius even when the
        // configured multiplier range dips below it.
        let mut inner = (primary.size * rng.range(bc.first_inner_mult.0, bc.first_inner_mult.1))
            .max(exclusion_radius);
        for _ in 0..count {
            let width = primary.size * rng.range(bc.width_mult.0, bc.width_mult.1);
            let outer = inner + width;
            let density = rng.range(bc.density.0, bc.density.1);
            let resource_tier = *self.resource_tiers.sample(rng);

            let average = (inner + outer) * 0.5;
            // Kepler-like falloff: farther annuli turn slower.
            let angular_speed = bc.speed_scale * (primary.mass / average).sqrt();

            let circumference = TAU * average;
            let target = (density * circumference / 1000.0) as usize;
            let n = target.clamp(1, bc.max_asteroids_per_belt);
            let asteroids = (0..n)
                .map(|_| BeltAsteroid {
                    orbit: Orbit {
                        radius: rng.range(inner, outer),
                        phase: rng.angle(),
                        speed: angular_speed,
                    },
                    size: rng.range(bc.asteroid_size.0, bc.asteroid_size.1),
                })
                .collect();

            belts.push(AsteroidBelt {
                inner_radius: inner,
                outer_radius: outer,
                density,
                resource_tier,
                angular_speed,
                asteroids,
            });
            inner = outer + primary.size * rng.range(bc.gap_mult.0, bc.gap_mult.1);
        }
        belts
    }

    fn planets(
        &self,
        system_id: &str,
        primary: &Star,
        exclusion_radius: f64,
        belts: &[AsteroidBelt],
        rng: &mut SeededRandom,
    ) -> Vec<Planet> {
        let pc = &self.config.planets;
        let count = rng.range_u32(pc.count.0, pc.count.1);
        let min_radius = (primary.size * pc.orbit_mult.0).max(exclusion_radius);
        let max_radius = primary.size * pc.orbit_mult.1;
        let spacing = pc.spacing_frac * primary.size;

        let mut planets: Vec<Planet> = Vec::with_capacity(count as usize);
        for slot in 0..count {
            let mut radius = None;
            for _ in 0..MAX_SLOT_ATTEMPTS {
                let candidate = rng.range(min_radius, max_radius);
                if belts.iter().any(|b| b.contains_radius(candidate)) {
                    continue;
                }
                if planets
                    .iter()
                    .any(|p| (p.orbit.radius - candidate).abs() < spacing)
                {
                    continue;
                }
                radius = Some(candidate);
                break;
            }
            let Some(radius) = radius else {
                // Crowded system; the slot is simply omitted.
                log::debug!("{system_id}: no free orbit for planet slot {slot}");
                continue;
            };

            let spec = self.planet_types.sample(rng).clone();
            let size = rng.range(spec.size_range.0, spec.size_range.1);
            let speed = (GRAVITATIONAL_PARAM * primary.mass / (radius * radius * radius)).sqrt();
            planets.push(Planet {
                id: format!("{system_id}-p{slot}"),
                kind: spec.kind,
                size,
                orbit: Orbit {
                    radius,
                    phase: rng.angle(),
                    speed,
                },
                has_rings: spec.has_rings,
                has_atmosphere: spec.has_atmosphere,
                landable: spec.landable,
            });
        }
        planets
    }

    fn bases(
        &self,
        system_id: &str,
        primary: &Star,
        exclusion_radius: f64,
        belts: &[AsteroidBelt],
        rng: &mut SeededRandom,
    ) -> Vec<Base> {
        let mut bases = Vec::new();
        for (i, spec) in self.config.bases.iter().enumerate() {
            if !rng.chance(spec.spawn_chance) {
                continue;
            }
            let min_d = (primary.size * spec.min_dist_mult).max(exclusion_radius);
            let max_d = (primary.size * spec.max_dist_mult).max(min_d);

            let placement = match spec.strategy {
                PlacementStrategy::OuterBelt => belts.last().map(|belt| {
                    BasePlacement::Orbiting(Orbit {
                        radius: rng
                            .range(belt.inner_radius, belt.outer_radius)
                            .clamp(min_d, max_d),
                        phase: rng.angle(),
                        speed: belt.angular_speed,
                    })
                }),
                PlacementStrategy::ResourceRich => belts
                    .iter()
                    .max_by_key(|b| b.resource_tier)
                    .map(|belt| {
                        BasePlacement::Orbiting(Orbit {
                            radius: rng
                                .range(belt.inner_radius, belt.outer_radius)
                                .clamp(min_d, max_d),
                            phase: rng.angle(),
                            speed: belt.angular_speed,
                        })
                    }),
                PlacementStrategy::DeepSpace => {
                    let radius = rng.range(min_d, max_d);
                    let angle = rng.angle();
                    Some(BasePlacement::Static(
                        primary.position + radius * DVec2::new(angle.cos(), angle.sin()),
                    ))
                }
                PlacementStrategy::DebrisField => {
                    if belts.is_empty() {
                        None
                    } else {
                        let belt = &belts[rng.range_u32(0, belts.len() as u32 - 1) as usize];
                        let radius = rng
                            .range(belt.inner_radius, belt.outer_radius)
                            .clamp(min_d, max_d);
                        let angle = rng.angle();
                        Some(BasePlacement::Static(
                            primary.position + radius * DVec2::new(angle.cos(), angle.sin()),
                        ))
                    }
                }
            };

            match placement {
                Some(placement) => bases.push(Base {
                    id: format!("{system_id}-b{i}"),
                    faction: spec.faction,
                    strategy: spec.strategy,
                    placement,
                }),
                // A belt-anchored strategy in a beltless system is omitted,
                // not an error.
                None => log::debug!(
                    "{system_id}: no belt for {:?} outpost, omitted",
                    spec.faction
                ),
            }
        }
        bases
    }

    fn wormholes(
        &self,
        primary: &Star,
        binary: Option<&BinaryInfo>,
        guarantee: bool,
        rng: &mut SeededRandom,
    ) -> Vec<Wormhole> {
        let wc = &self.config.wormholes;
        let rolled = rng.chance(wc.spawn_chance);
        if !(rolled || guarantee) {
            return Vec::new();
        }

        // Binaries get the trailing L4 point of the epoch configuration;
        // single stars get an outer-system point.
        let position = match binary {
            Some(b) => {
                let angle = b.orbit_phase + FRAC_PI_3;
                b.barycenter + b.separation * DVec2::new(angle.cos(), angle.sin())
            }
            None => {
                let angle = rng.angle();
                primary.position
                    + wc.outer_point_mult * primary.size * DVec2::new(angle.cos(), angle.sin())
            }
        };

        let here = SectorCoord::from_position(primary.position, self.config.layout.sector_size);
        let (lo, hi) = wc.dest_offset_sectors;
        let dx = rng.range_u32(lo as u32, hi as u32) as i32;
        let dy = rng.range_u32(lo as u32, hi as u32) as i32;
        let sx = if rng.chance(0.5) { 1 } else { -1 };
        let sy = if rng.chance(0.5) { 1 } else { -1 };
        let destination = SectorCoord::new(here.x + sx * dx, here.y + sy * dy);

        vec![Wormhole {
            position,
            destination,
        }]
    }

    fn comets(&self, primary: &Star, rng: &mut SeededRandom) -> Vec<Comet> {
        let cc = &self.config.comets;
        if !rng.chance(cc.spawn_chance) {
            return Vec::new();
        }

        let span = cc.span_mult * primary.size;
        let entry_angle = rng.angle();
        let exit_angle = entry_angle + PI + rng.range(-0.5, 0.5);
        let peri_angle = entry_angle + FRAC_PI_3 + rng.range(-0.4, 0.4);
        let peri_dist = primary.size * rng.range(cc.perihelion_mult.0, cc.perihelion_mult.1);

        let entry = primary.position + span * DVec2::new(entry_angle.cos(), entry_angle.sin());
        let exit = primary.position + span * DVec2::new(exit_angle.cos(), exit_angle.sin());
        let perihelion =
            primary.position + peri_dist * DVec2::new(peri_angle.cos(), peri_angle.sin());

        let orbit_period_ms = rng.range(cc.period_ms.0, cc.period_ms.1);
        let traversal_ms = rng.range(cc.traversal_ms.0, cc.traversal_ms.1);
        let phase_offset_ms = rng.next_f64() * orbit_period_ms;

        vec![Comet {
            entry,
            perihelion,
            exit,
            size: rng.range(cc.size.0, cc.size.1),
            orbit_period_ms,
            phase_offset_ms,
            warning_ms: cc.warning_ms,
            traversal_ms,
        }]
    }
}
