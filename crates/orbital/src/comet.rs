//! Comet trajectories: a quadratic Bezier pass on a repeating cycle.

use glam::DVec2;
use world_core::{sanitize_time, Comet};

/// Sampled comet state at one physics time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CometState {
    /// Whether the comet is currently traversing (and should be rendered).
    pub visible: bool,
    /// Whether the cycle is in its pre-traversal warning window.
    pub warning: bool,
    /// Progress through the traversal, 0 at entry, 1 at exit.
    pub progress: f64,
    pub position: DVec2,
    /// Unit travel direction (zero when not visible).
    pub direction: DVec2,
}

fn bezier(entry: DVec2, perihelion: DVec2, exit: DVec2, p: f64) -> DVec2 {
    let q = 1.0 - p;
    q * q * entry + 2.0 * q * p * perihelion + p * p * exit
}

fn bezier_tangent(entry: DVec2, perihelion: DVec2, exit: DVec2, p: f64) -> DVec2 {
    let q = 1.0 - p;
    2.0 * q * (perihelion - entry) + 2.0 * p * (exit - perihelion)
}

/// Comet state at a physics time. Each cycle: a silent warning window, then
/// the visible traversal, then nothing until the cycle repeats.
pub fn comet_state(comet: &Comet, t_ms: f64) -> CometState {
    let t = sanitize_time(t_ms);
    let period = if comet.orbit_period_ms.is_finite() {
        comet.orbit_period_ms.max(1.0)
    } else {
        1.0
    };
    let offset = if comet.phase_offset_ms.is_finite() {
        comet.phase_offset_ms
    } else {
        0.0
    };
    let warning = comet.warning_ms.max(0.0);
    let traversal = comet.traversal_ms.max(1.0);
    let cycle = (t + offset).rem_euclid(period);

    if cycle < warning {
        return CometState {
            visible: false,
            warning: true,
            progress: 0.0,
            position: comet.entry,
            direction: DVec2::ZERO,
        };
    }
    if cycle <= warning + traversal {
        let progress = ((cycle - warning) / traversal).clamp(0.0, 1.0);
        let position = bezier(comet.entry, comet.perihelion, comet.exit, progress);
        let direction = bezier_tangent(comet.entry, comet.perihelion, comet.exit, progress)
            .normalize_or_zero();
        return CometState {
            visible: true,
            warning: false,
            progress,
            position,
            direction,
        };
    }
    CometState {
        visible: false,
        warning: false,
        progress: 1.0,
        position: comet.exit,
        direction: DVec2::ZERO,
    }
}
