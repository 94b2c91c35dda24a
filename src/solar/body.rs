//! Solar system bodies as seen by the anchor subsystem.
//!
//! Bodies are owned by the [`SolarSystem`](super::SolarSystem) behind `Rc`;
//! anchors keep `Weak` handles to them. A body's heliocentric position is
//! cached per tick by [`Body::compute_position`] and can also be evaluated
//! at any other date with [`Body::position_at`].

use std::cell::Cell;
use std::rc::{Rc, Weak};

use glam::{DMat4, DVec3};

use super::orbit::Orbit;
use crate::util::frame::{self, J2000_JD};

/// A body with a radius, an orbit around an optional parent, and a
/// rotation about its own axis.
#[derive(Debug)]
pub struct Body {
    english_name: String,
    radius: f64,
    orbit: Box<dyn Orbit>,
    parent: Option<Weak<Body>>,
    sidereal_period: f64,
    rotation_offset: f64,
    rot_equatorial_to_vsop87: DMat4,
    heliocentric_pos: Cell<DVec3>,
}

impl Body {
    /// Non-rotating body of `radius_km` following `orbit` around the Sun.
    #[must_use]
    pub fn new(
        english_name: impl Into<String>,
        radius_km: f64,
        orbit: Box<dyn Orbit>,
    ) -> Self {
        Self {
            english_name: english_name.into(),
            radius: frame::km_to_au(radius_km),
            orbit,
            parent: None,
            sidereal_period: 0.0,
            rotation_offset: 0.0,
            rot_equatorial_to_vsop87: DMat4::IDENTITY,
            heliocentric_pos: Cell::new(DVec3::ZERO),
        }
    }

    /// Make the orbit relative to `parent`.
    #[must_use]
    pub fn with_parent(mut self, parent: &Rc<Body>) -> Self {
        self.parent = Some(Rc::downgrade(parent));
        self
    }

    /// Rotate once every `sidereal_period` days, starting from
    /// `rotation_offset` degrees at J2000.
    #[must_use]
    pub fn with_rotation(
        mut self,
        sidereal_period: f64,
        rotation_offset: f64,
    ) -> Self {
        self.sidereal_period = sidereal_period;
        self.rotation_offset = rotation_offset;
        self
    }

    /// Set the fixed rotation from the body's equatorial frame to VSOP87.
    #[must_use]
    pub fn with_equatorial_frame(mut self, rot: DMat4) -> Self {
        self.rot_equatorial_to_vsop87 = rot;
        self
    }

    /// English name used for lookups.
    #[must_use]
    pub fn english_name(&self) -> &str {
        &self.english_name
    }

    /// Mean radius in AU.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Parent body, if it is still alive.
    #[must_use]
    pub fn parent(&self) -> Option<Rc<Body>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    /// Heliocentric ecliptic position cached by the last
    /// [`compute_position`](Self::compute_position).
    #[must_use]
    pub fn heliocentric_ecliptic_pos(&self) -> DVec3 {
        self.heliocentric_pos.get()
    }

    /// Heliocentric ecliptic position at `jd`, evaluated through the parent
    /// chain without touching the cache.
    #[must_use]
    pub fn position_at(&self, jd: f64) -> DVec3 {
        let local = self.orbit.position_at(jd);
        match self.parent() {
            Some(parent) => parent.position_at(jd) + local,
            None => local,
        }
    }

    /// Refresh the cached heliocentric position for `jd`.
    pub fn compute_position(&self, jd: f64) {
        self.heliocentric_pos.set(self.position_at(jd));
    }

    /// Rotation angle of the prime meridian at `jd`, degrees in `[0, 360)`.
    #[must_use]
    pub fn sidereal_time(&self, jd: f64) -> f64 {
        if self.sidereal_period == 0.0 {
            return frame::wrap_degrees(self.rotation_offset);
        }
        let turns = (jd - J2000_JD) / self.sidereal_period;
        frame::wrap_degrees(self.rotation_offset + 360.0 * turns.fract())
    }

    /// Local (zenith = +Z) to body-equatorial rotation for a surface point.
    #[must_use]
    pub fn rot_local_to_equatorial(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        _alt: f64,
    ) -> DMat4 {
        frame::local_to_equatorial(self.sidereal_time(jd) + lon, lat)
    }

    /// Fixed rotation from the body's equatorial frame to VSOP87.
    #[must_use]
    pub fn rot_equatorial_to_vsop87(&self) -> DMat4 {
        self.rot_equatorial_to_vsop87
    }
}
