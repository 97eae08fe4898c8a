//! Integer coordinates on the infinite galaxy plane.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Coordinate of a super-sector: a large fixed-size cell, the unit of lazy
/// generation and caching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SuperSectorCoord {
    pub x: i32,
    pub y: i32,
}

impl SuperSectorCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Super-sector containing a world position, given the super-sector size.
    pub fn from_position(pos: DVec2, super_sector_size: f64) -> Self {
        Self {
            x: (pos.x / super_sector_size).floor() as i32,
            y: (pos.y / super_sector_size).floor() as i32,
        }
    }

    /// World-space origin (minimum corner) of this super-sector.
    pub fn origin(&self, super_sector_size: f64) -> DVec2 {
        DVec2::new(
            self.x as f64 * super_sector_size,
            self.y as f64 * super_sector_size,
        )
    }

    /// The 8 neighboring super-sector coordinates.
    pub fn neighbors(&self) -> [SuperSectorCoord; 8] {
        let mut out = [*self; 8];
        let mut i = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                out[i] = SuperSectorCoord::new(self.x + dx, self.y + dy);
                i += 1;
            }
        }
        out
    }
}

impl fmt::Display for SuperSectorCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Coordinate of a sector: the smaller grid unit used for influence-radius
/// queries and wormhole destinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SectorCoord {
    pub x: i32,
    pub y: i32,
}

impl SectorCoord {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sector containing a world position, given the sector size.
    pub fn from_position(pos: DVec2, sector_size: f64) -> Self {
        Self {
            x: (pos.x / sector_size).floor() as i32,
            y: (pos.y / sector_size).floor() as i32,
        }
    }
}

impl fmt::Display for SectorCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn super_sector_from_position_negative_floors() {
        let c = SuperSectorCoord::from_position(DVec2::new(-0.5, 19_999.0), 20_000.0);
        assert_eq!(c, SuperSectorCoord::new(-1, 0));
    }

    #[test]
    fn neighbors_exclude_self() {
        let c = SuperSectorCoord::new(3, -2);
        let n = c.neighbors();
        assert_eq!(n.len(), 8);
        assert!(!n.contains(&c));
    }

    #[test]
    fn origin_round_trips() {
        let c = SuperSectorCoord::new(-4, 7);
        let origin = c.origin(20_000.0);
        assert_eq!(SuperSectorCoord::from_position(origin, 20_000.0), c);
    }
}
