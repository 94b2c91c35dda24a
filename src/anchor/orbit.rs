//! Anchor riding a computed orbit.

use std::rc::{Rc, Weak};

use glam::DVec3;

use super::point::PointAnchor;
use crate::solar::{Body, Orbit};
use crate::util::frame;

/// Centre an orbit anchor's orbit is expressed around.
#[derive(Debug, Clone)]
pub enum OrbitCenter {
    /// The orbit is relative to a body (weak handle).
    Parent(Weak<Body>),
    /// The orbit is relative to a fixed heliocentric point, e.g. a
    /// barycenter.
    Fixed(DVec3),
}

/// Anchor that owns an [`Orbit`] and moves along it with the clock.
#[derive(Debug)]
pub struct OrbitAnchor {
    frame: PointAnchor,
    orbit: Box<dyn Orbit>,
    center: OrbitCenter,
    parent_lost: bool,
}

impl OrbitAnchor {
    /// Orbit around `parent`.
    #[must_use]
    pub fn with_parent(orbit: Box<dyn Orbit>, parent: &Rc<Body>) -> Self {
        Self {
            frame: PointAnchor::new(DVec3::ZERO),
            orbit,
            center: OrbitCenter::Parent(Rc::downgrade(parent)),
            parent_lost: false,
        }
    }

    /// Parentless orbit around the fixed point `center`.
    #[must_use]
    pub fn with_center(orbit: Box<dyn Orbit>, center: DVec3) -> Self {
        Self {
            frame: PointAnchor::new(center),
            orbit,
            center: OrbitCenter::Fixed(center),
            parent_lost: false,
        }
    }

    /// Evaluate the orbit at `jd`, take it out of VSOP87 through the fixed
    /// J2000 rotation and add the centre position. Once the parent body is
    /// gone the anchor stays at its last position.
    pub fn update(&mut self, jd: f64) {
        let center = match &self.center {
            OrbitCenter::Parent(parent) => {
                let Some(parent) = parent.upgrade() else {
                    if !self.parent_lost {
                        log::warn!(
                            "orbit parent is gone, anchor frozen at {}",
                            self.frame.heliocentric_ecliptic_pos()
                        );
                        self.parent_lost = true;
                    }
                    return;
                };
                parent.heliocentric_ecliptic_pos()
            }
            OrbitCenter::Fixed(center) => *center,
        };
        let local = frame::j2000_to_vsop87()
            .transpose()
            .transform_vector3(self.orbit.position_at(jd));
        self.frame.set_heliocentric_ecliptic_pos(local + center);
    }

    /// Whether the orbit is expressed around `body`.
    #[must_use]
    pub fn is_around(&self, body: &Body) -> bool {
        match &self.center {
            OrbitCenter::Parent(parent) => std::ptr::eq(parent.as_ptr(), body),
            OrbitCenter::Fixed(_) => false,
        }
    }

    /// Stored rotations and last computed position.
    #[must_use]
    pub fn frame(&self) -> &PointAnchor {
        &self.frame
    }

    /// Mutable stored rotations and position.
    pub fn frame_mut(&mut self) -> &mut PointAnchor {
        &mut self.frame
    }

    /// The owned orbit.
    #[must_use]
    pub fn orbit(&self) -> &dyn Orbit {
        self.orbit.as_ref()
    }

    /// Orbit centre.
    #[must_use]
    pub fn center(&self) -> &OrbitCenter {
        &self.center
    }

    /// The parent body, if the orbit has one and it is still alive.
    #[must_use]
    pub fn parent(&self) -> Option<Rc<Body>> {
        match &self.center {
            OrbitCenter::Parent(parent) => parent.upgrade(),
            OrbitCenter::Fixed(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::StillOrbit;

    #[test]
    fn parentless_orbit_adds_fixed_center() {
        let offset = DVec3::new(0.0, 0.0, 1.0);
        let mut anchor = OrbitAnchor::with_center(
            Box::new(StillOrbit { offset }),
            DVec3::new(5.0, 0.0, 0.0),
        );
        anchor.update(0.0);
        let expected = DVec3::new(5.0, 0.0, 0.0)
            + frame::j2000_to_vsop87().transpose().transform_vector3(offset);
        let pos = anchor.frame().heliocentric_ecliptic_pos();
        assert!(pos.abs_diff_eq(expected, 1e-15));
        // The ecliptic pole is tilted away from +Z by the obliquity.
        let tilt = (pos - DVec3::new(5.0, 0.0, 0.0))
            .angle_between(DVec3::Z)
            .to_degrees();
        assert!((tilt - frame::VSOP87_OBLIQUITY_DEG).abs() < 1e-9);
    }

    #[test]
    fn parent_orbit_follows_parent_position() {
        let parent = Rc::new(Body::new(
            "Jupiter",
            69_911.0,
            Box::new(StillOrbit {
                offset: DVec3::new(5.2, 0.0, 0.0),
            }),
        ));
        parent.compute_position(0.0);
        let mut anchor = OrbitAnchor::with_parent(
            Box::new(StillOrbit { offset: DVec3::ZERO }),
            &parent,
        );
        anchor.update(0.0);
        assert!(anchor
            .frame()
            .heliocentric_ecliptic_pos()
            .abs_diff_eq(DVec3::new(5.2, 0.0, 0.0), 1e-15));
        assert!(anchor.parent().is_some());
    }

    #[test]
    fn orphaned_orbit_stays_where_it_was() {
        let parent = Rc::new(Body::new(
            "Jupiter",
            69_911.0,
            Box::new(StillOrbit {
                offset: DVec3::new(5.2, 0.0, 0.0),
            }),
        ));
        parent.compute_position(0.0);
        let mut anchor = OrbitAnchor::with_parent(
            Box::new(StillOrbit {
                offset: DVec3::new(0.0, 0.01, 0.0),
            }),
            &parent,
        );
        anchor.update(0.0);
        assert!(anchor.is_around(&parent));
        let last = anchor.frame().heliocentric_ecliptic_pos();

        drop(parent);
        anchor.update(1.0);
        anchor.update(2.0);
        assert!(anchor.parent().is_none());
        assert_eq!(anchor.frame().heliocentric_ecliptic_pos(), last);
    }
}
