//! Closed-form orbital mechanics over immutable descriptors.
//!
//! Every function here maps (descriptor, physics time in ms) to a position,
//! force, or zone in O(1), with no iteration over intervening ticks. All
//! functions are referentially transparent and read only immutable data, so
//! they are safe to call concurrently from any number of threads.
//!
//! Failure semantics: these run on every frame of every client, so they
//! never panic and never return errors. Malformed input (non-finite time,
//! degenerate ranges) clamps to the nearest valid value.

pub mod comet;
pub mod drift;
pub mod gravity;
pub mod kepler;
pub mod lagrange;
pub mod orbit;
pub mod zones;

pub use comet::*;
pub use drift::*;
pub use gravity::*;
pub use kepler::*;
pub use lagrange::*;
pub use orbit::*;
pub use zones::*;
