//! Shared utilities for frame computations.
//!
//! Helpers for travel easing curves, rotation matrices between the local,
//! equatorial and VSOP87 frames, and astronomical unit conversions.

pub mod easing;
pub mod frame;
pub mod params;
