//! The complete star-system descriptor.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::body::{AsteroidBelt, Base, BinaryInfo, Comet, Planet, Star, Wormhole};

/// One fully generated star system. Identical (seed, coordinates) always
/// regenerate an identical value, so systems are never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: String,
    pub primary: Star,
    pub binary: Option<BinaryInfo>,
    /// Distance within which this system counts as present for
    /// sector-overlap queries (a whole number of sectors at generation).
    pub influence_radius: f64,
    /// Minimum distance from the primary where other objects may spawn.
    pub exclusion_radius: f64,
    pub belts: Vec<AsteroidBelt>,
    pub planets: Vec<Planet>,
    pub bases: Vec<Base>,
    pub wormholes: Vec<Wormhole>,
    pub comets: Vec<Comet>,
}

impl StarSystem {
    /// Nominal system position (the primary's epoch position).
    pub fn position(&self) -> DVec2 {
        self.primary.position
    }

    /// The anchor every circular orbit in this system revolves around:
    /// the barycenter for binaries, otherwise the primary.
    pub fn orbit_anchor(&self) -> DVec2 {
        match &self.binary {
            Some(b) => b.barycenter,
            None => self.primary.position,
        }
    }

    /// Whether a point falls within this system's influence radius.
    pub fn influences(&self, pos: DVec2) -> bool {
        self.primary.position.distance_squared(pos) <= self.influence_radius * self.influence_radius
    }

    /// Epoch positions of every star in the system (one or two points).
    /// Used by placement checks; live positions come from the Kepler solver.
    pub fn star_epoch_positions(&self) -> Vec<DVec2> {
        let mut out = vec![self.primary.position];
        if let Some(b) = &self.binary {
            out.push(b.secondary.position);
        }
        out
    }
}
