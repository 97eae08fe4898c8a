//! Deterministic world generation: seeded random streams, lazy super-sector
//! placement, and complete star-system assembly.
//!
//! Everything here is a pure function of (seed, coordinates). The server and
//! every render client run the same generation from the same seed and agree
//! on every descriptor without exchanging a byte of generated content.

pub mod factory;
pub mod rng;
pub mod sector;

pub use factory::*;
pub use rng::*;
pub use sector::*;
