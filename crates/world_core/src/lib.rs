//! Core types for the galaxy world-generation and orbital-physics subsystem.
//!
//! This crate provides the foundational types used across the generation and
//! mechanics crates:
//! - Super-sector and sector coordinates on the infinite galaxy plane
//! - The shared physics clock (one fixed epoch for every peer)
//! - The full tunable configuration surface (catalogs and constants)
//! - Immutable body descriptors (stars, planets, belts, bases, wormholes, comets)
//!
//! Descriptors are produced once by generation and then only read; every
//! position is recomputed from (descriptor, physics time) by the `orbital`
//! crate.

pub mod body;
pub mod config;
pub mod coord;
pub mod error;
pub mod system;
pub mod time;

pub use body::*;
pub use config::*;
pub use coord::*;
pub use error::*;
pub use system::*;
pub use time::*;

// Re-export commonly used math types
pub use glam::DVec2;
