//! Lazy super-sector generation with a bounded cache.
//!
//! The galaxy plane is an infinite grid of super-sectors. A cell is
//! generated on first request, cached, and evicted in insertion order when
//! the cache is over capacity. Eviction never loses anything: identical
//! (seed, coordinates) regenerate identical content, so it only affects
//! cost.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use world_core::{ConfigError, GalaxyConfig, StarSystem, SuperSectorCoord};

use crate::factory::StarSystemFactory;
use crate::rng::{cell_hash, SeededRandom};

/// Attempt budget for placing one star system inside a super-sector.
const PLACEMENT_ATTEMPTS: u32 = 30;

/// One generated super-sector: an ordered list of star systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuperSector {
    pub coord: SuperSectorCoord,
    pub systems: Vec<StarSystem>,
}

/// Bounded cache of generated super-sectors. Insertion order is tracked in
/// an explicit queue; the oldest entry is dropped first. Never relies on
/// map iteration order.
pub struct SectorCache {
    map: HashMap<SuperSectorCoord, Arc<SuperSector>>,
    order: VecDeque<SuperSectorCoord>,
    capacity: usize,
}

impl SectorCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            map: HashMap::with_capacity(capacity.min(1024)),
            order: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn get(&self, coord: &SuperSectorCoord) -> Option<Arc<SuperSector>> {
        self.map.get(coord).cloned()
    }

    pub fn contains(&self, coord: &SuperSectorCoord) -> bool {
        self.map.contains_key(coord)
    }

    /// Insert, evicting the oldest entry when over capacity. Re-inserting a
    /// present key keeps its original queue position (the data is identical
    /// by construction).
    pub fn insert(&mut self, sector: Arc<SuperSector>) {
        let coord = sector.coord;
        if self.map.insert(coord, sector).is_none() {
            self.order.push_back(coord);
        }
        while self.map.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.map.remove(&oldest);
            log::debug!("evicted super-sector {oldest}");
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn clear(&mut self) {
        self.map.clear();
        self.order.clear();
    }
}

/// The generation service: owns the config, the factory, and the cache.
///
/// Generation is a pure function of (seed, coordinates); the only mutable
/// state is the cache, and a duplicated generation of the same cell would
/// produce identical data, so wrapping this in a lock is a throughput
/// concern, not a correctness one.
pub struct GalaxyGenerator {
    factory: StarSystemFactory,
    cache: SectorCache,
}

impl GalaxyGenerator {
    /// Validate the config and build the catalogs. The only fallible call
    /// in the subsystem.
    pub fn new(config: GalaxyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let cache = SectorCache::new(config.layout.cache_capacity);
        let factory = StarSystemFactory::new(config)?;
        Ok(Self { factory, cache })
    }

    pub fn config(&self) -> &GalaxyConfig {
        self.factory.config()
    }

    pub fn cache(&self) -> &SectorCache {
        &self.cache
    }

    /// Drop all cached cells (tests and memory pressure; regeneration is
    /// always possible).
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Resolve a super-sector, generating and caching it on first request.
    pub fn super_sector(&mut self, coord: SuperSectorCoord) -> Arc<SuperSector> {
        if let Some(hit) = self.cache.get(&coord) {
            return hit;
        }
        let sector = Arc::new(self.generate(coord));
        self.cache.insert(sector.clone());
        sector
    }

    /// The 3×3 neighborhood around a cell, generating cells as needed.
    /// This is the query gameplay uses for "what exists near here".
    pub fn neighborhood(&mut self, center: SuperSectorCoord) -> Vec<Arc<SuperSector>> {
        let mut out = Vec::with_capacity(9);
        for dy in -1..=1 {
            for dx in -1..=1 {
                out.push(self.super_sector(SuperSectorCoord::new(center.x + dx, center.y + dy)));
            }
        }
        out
    }

    /// All star systems in the 3×3 neighborhood, flattened.
    pub fn systems_near(&mut self, center: SuperSectorCoord) -> Vec<StarSystem> {
        self.neighborhood(center)
            .iter()
            .flat_map(|sector| sector.systems.iter().cloned())
            .collect()
    }

    fn generate(&self, coord: SuperSectorCoord) -> SuperSector {
        let config = self.factory.config();
        let layout = &config.layout;
        let seed = &config.seed;

        let mut rng = SeededRandom::new(cell_hash(
            &format!("{seed}_super"),
            coord.x as i64,
            coord.y as i64,
        ));
        let (lo, hi) = layout.systems_per_super_sector;
        let target = rng.range_u32(lo, hi);

        let origin = coord.origin(layout.super_sector_size);
        let margin = layout.super_sector_size * layout.placement_margin_frac;
        let span = layout.super_sector_size - 2.0 * margin;

        let mut systems: Vec<StarSystem> = Vec::with_capacity(target as usize);
        for index in 0..target {
            let mut placed = false;
            for _ in 0..PLACEMENT_ATTEMPTS {
                let candidate = DVec2::new(
                    origin.x + margin + rng.next_f64() * span,
                    origin.y + margin + rng.next_f64() * span,
                );
                if !self.can_place_star(candidate, &systems, coord) {
                    continue;
                }
                let id = format!("sys_{}_{}_{}", coord.x, coord.y, index);
                // The guarantee rides on the first system that actually
                // places, so an exhausted first slot cannot swallow it.
                let guarantee = systems.is_empty() && coord == config.wormholes.guaranteed_cell;
                let mut system_rng = SeededRandom::new(cell_hash(
                    &format!("{seed}_system"),
                    candidate.x.round() as i64,
                    candidate.y.round() as i64,
                ));
                systems.push(self.factory.create(candidate, id, &mut system_rng, guarantee));
                placed = true;
                break;
            }
            if !placed {
                // Attempt budget exhausted; the system is omitted.
                log::debug!("super-sector {coord}: no room for system {index}");
            }
        }

        log::debug!("generated super-sector {coord}: {} systems", systems.len());
        SuperSector { coord, systems }
    }

    /// Minimum-separation check against systems already placed in this cell
    /// (including binary companions) and against any of the 8 neighbors
    /// that happen to be cached. Uncached neighbors are treated as empty:
    /// best-effort by design, since materializing them here would recurse
    /// forever on an infinite plane.
    fn can_place_star(
        &self,
        candidate: DVec2,
        placed: &[StarSystem],
        coord: SuperSectorCoord,
    ) -> bool {
        let min_sep = self.factory.config().layout.min_star_separation;
        let min_sep_sq = min_sep * min_sep;

        let too_close = |system: &StarSystem| {
            system
                .star_epoch_positions()
                .iter()
                .any(|p| p.distance_squared(candidate) < min_sep_sq)
        };

        if placed.iter().any(too_close) {
            return false;
        }
        for neighbor in coord.neighbors() {
            if let Some(sector) = self.cache.get(&neighbor) {
                if sector.systems.iter().any(too_close) {
                    return false;
                }
            }
        }
        true
    }
}
