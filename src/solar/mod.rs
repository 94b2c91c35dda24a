//! Solar system collaborators consumed by the anchor subsystem.
//!
//! Only what anchors need is modelled: body radius, position and rotation,
//! a black-box orbit position function, and a creator that builds orbits
//! from parameters.

/// Bodies with radius, orbit and rotation.
pub mod body;
/// Orbit position functions.
pub mod orbit;
/// Parameter-driven orbit construction.
pub mod orbit_creator;
/// Body registry.
pub mod system;

pub use body::Body;
pub use orbit::{CircularOrbit, EllipticalOrbit, Orbit, StillOrbit};
pub use orbit_creator::{DefaultOrbitCreator, OrbitCreator};
pub use system::SolarSystem;
