//! Anchor standing on a body owned by the solar system.

use std::rc::{Rc, Weak};

use glam::{DMat4, DVec3};

use crate::solar::Body;

/// Anchor whose frame is the frame of a [`Body`]. Holds a weak handle: the
/// body belongs to the solar system, and the manager drops these anchors
/// when the body goes away.
#[derive(Debug, Clone)]
pub struct BodyAnchor {
    body: Weak<Body>,
}

impl BodyAnchor {
    /// Anchor on `body`.
    #[must_use]
    pub fn new(body: &Rc<Body>) -> Self {
        Self {
            body: Rc::downgrade(body),
        }
    }

    /// Anchor from a weak handle; `None` if the body is already gone.
    #[must_use]
    pub fn from_weak(body: &Weak<Body>) -> Option<Self> {
        body.upgrade().map(|body| Self::new(&body))
    }

    /// The referenced body, if still alive.
    #[must_use]
    pub fn body(&self) -> Option<Rc<Body>> {
        self.body.upgrade()
    }

    /// Whether this anchor references `body`.
    #[must_use]
    pub fn is_on(&self, body: &Body) -> bool {
        std::ptr::eq(self.body.as_ptr(), body)
    }

    /// The body's cached heliocentric position.
    #[must_use]
    pub fn heliocentric_ecliptic_pos(&self) -> DVec3 {
        self.body()
            .map_or(DVec3::ZERO, |b| b.heliocentric_ecliptic_pos())
    }

    /// The body's local → equatorial rotation at the observer coordinates.
    #[must_use]
    pub fn rot_local_to_equatorial(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        alt: f64,
    ) -> DMat4 {
        self.body().map_or(DMat4::IDENTITY, |b| {
            b.rot_local_to_equatorial(jd, lat, lon, alt)
        })
    }

    /// The body's equatorial → VSOP87 rotation.
    #[must_use]
    pub fn rot_equatorial_to_vsop87(&self) -> DMat4 {
        self.body()
            .map_or(DMat4::IDENTITY, |b| b.rot_equatorial_to_vsop87())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::StillOrbit;

    #[test]
    fn delegates_to_body_and_tracks_identity() {
        let earth = Rc::new(Body::new(
            "Earth",
            6371.0,
            Box::new(StillOrbit {
                offset: DVec3::new(1.0, 0.0, 0.0),
            }),
        ));
        earth.compute_position(0.0);
        let other = Body::new(
            "Mars",
            3389.0,
            Box::new(StillOrbit { offset: DVec3::Y }),
        );

        let anchor = BodyAnchor::new(&earth);
        assert_eq!(anchor.heliocentric_ecliptic_pos(), DVec3::X);
        assert!(anchor.is_on(&earth));
        assert!(!anchor.is_on(&other));

        let weak = Rc::downgrade(&earth);
        drop(earth);
        assert!(anchor.body().is_none());
        assert!(BodyAnchor::from_weak(&weak).is_none());
    }
}
