//! L4/L5 points of a binary pair, used for wormhole and base placement.
//!
//! Placement only, not dynamics: the points are ±60° offsets at the
//! companion separation radius from the current binary phase around the
//! barycenter.

use glam::DVec2;
use std::f64::consts::FRAC_PI_3;
use world_core::BinaryInfo;

use crate::kepler::binary_true_anomaly;

/// The two triangular Lagrange points at a physics time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LagrangePoints {
    /// Leading point, 60° ahead of the companion.
    pub l4: DVec2,
    /// Trailing point, 60° behind.
    pub l5: DVec2,
}

/// L4/L5 of a binary at a physics time.
pub fn lagrange_points(binary: &BinaryInfo, t_ms: f64) -> LagrangePoints {
    let theta = binary_true_anomaly(binary, t_ms);
    let r = binary.separation.max(0.0);
    let at = |angle: f64| binary.barycenter + r * DVec2::new(angle.cos(), angle.sin());
    LagrangePoints {
        l4: at(theta + FRAC_PI_3),
        l5: at(theta - FRAC_PI_3),
    }
}
