//! Anchor points: the coordinate frames the observer is expressed in.
//!
//! An [`AnchorPoint`] is a closed set of variants sharing one capability
//! surface: a heliocentric ecliptic position, a local → equatorial rotation
//! (which may depend on the observer's latitude/longitude), an equatorial →
//! VSOP87 rotation, and whether the frame sits on a body.

/// Anchor standing on a body.
pub mod body;
/// Ordered `type -> builder` list turning parameter maps into anchors.
pub mod creator;
/// Registry, travel engine, surface alignment and persistence.
pub mod manager;
/// Anchor riding an orbit.
pub mod orbit;
/// Free points and observatories.
pub mod point;

use std::fmt;
use std::rc::Rc;

use glam::{DMat4, DVec3};

pub use body::BodyAnchor;
pub use orbit::{OrbitAnchor, OrbitCenter};
pub use point::{ObservatoryAnchor, PointAnchor};

use crate::solar::Body;

/// Discriminator of the anchor variants, also the `type` parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorKind {
    /// Free-floating point.
    Point,
    /// On a body's surface.
    Body,
    /// Riding an orbit.
    Orbit,
    /// Fixed observatory.
    Observatory,
}

impl AnchorKind {
    /// The `type` tag used in parameter maps and saved files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Point => "point",
            Self::Body => "body",
            Self::Orbit => "orbit",
            Self::Observatory => "observatory",
        }
    }
}

impl fmt::Display for AnchorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A coordinate frame for the observer.
#[derive(Debug)]
pub enum AnchorPoint {
    /// Free-floating point.
    Point(PointAnchor),
    /// On a body's surface.
    Body(BodyAnchor),
    /// Riding an orbit.
    Orbit(OrbitAnchor),
    /// Fixed observatory.
    Observatory(ObservatoryAnchor),
}

impl AnchorPoint {
    /// Free point at `pos`.
    #[must_use]
    pub fn point(pos: DVec3) -> Self {
        Self::Point(PointAnchor::new(pos))
    }

    /// Anchor on `body`.
    #[must_use]
    pub fn on_body(body: &Rc<Body>) -> Self {
        Self::Body(BodyAnchor::new(body))
    }

    /// Observatory at `pos`.
    #[must_use]
    pub fn observatory(pos: DVec3) -> Self {
        Self::Observatory(ObservatoryAnchor::new(pos))
    }

    /// Variant tag.
    #[must_use]
    pub fn kind(&self) -> AnchorKind {
        match self {
            Self::Point(_) => AnchorKind::Point,
            Self::Body(_) => AnchorKind::Body,
            Self::Orbit(_) => AnchorKind::Orbit,
            Self::Observatory(_) => AnchorKind::Observatory,
        }
    }

    /// Recompute the frame for `jd`. Only orbit anchors move on their own;
    /// body anchors read the body's cache.
    pub fn update(&mut self, jd: f64) {
        match self {
            Self::Point(point) => point.update(jd),
            Self::Orbit(orbit) => orbit.update(jd),
            Self::Body(_) | Self::Observatory(_) => {}
        }
    }

    /// Heliocentric ecliptic position of the frame origin, AU.
    #[must_use]
    pub fn heliocentric_ecliptic_pos(&self) -> DVec3 {
        match self {
            Self::Point(point) => point.heliocentric_ecliptic_pos(),
            Self::Body(body) => body.heliocentric_ecliptic_pos(),
            Self::Orbit(orbit) => orbit.frame().heliocentric_ecliptic_pos(),
            Self::Observatory(obs) => obs.point().heliocentric_ecliptic_pos(),
        }
    }

    /// Move the frame origin. Body anchors follow their body and ignore
    /// this.
    pub fn set_heliocentric_ecliptic_pos(&mut self, pos: DVec3) {
        match self {
            Self::Point(point) => point.set_heliocentric_ecliptic_pos(pos),
            Self::Orbit(orbit) => {
                orbit.frame_mut().set_heliocentric_ecliptic_pos(pos);
            }
            Self::Observatory(obs) => {
                obs.point_mut().set_heliocentric_ecliptic_pos(pos);
            }
            Self::Body(_) => {
                log::debug!("ignoring position change on a body anchor");
            }
        }
    }

    /// Local → equatorial rotation for an observer at `lat`/`lon` degrees
    /// and `alt` metres.
    #[must_use]
    pub fn rot_local_to_equatorial(
        &self,
        jd: f64,
        lat: f64,
        lon: f64,
        alt: f64,
    ) -> DMat4 {
        match self {
            Self::Point(point) => point.rot_local_to_equatorial(),
            Self::Body(body) => body.rot_local_to_equatorial(jd, lat, lon, alt),
            Self::Orbit(orbit) => orbit.frame().rot_local_to_equatorial(),
            Self::Observatory(obs) => obs.rot_local_to_equatorial(lat, lon),
        }
    }

    /// Replace the stored local → equatorial rotation. Ignored by variants
    /// that compute it.
    pub fn set_rot_local_to_equatorial(&mut self, rot: DMat4) {
        let kind = self.kind();
        match self {
            Self::Point(point) => point.set_rot_local_to_equatorial(rot),
            Self::Orbit(orbit) => {
                orbit.frame_mut().set_rot_local_to_equatorial(rot);
            }
            Self::Body(_) | Self::Observatory(_) => {
                log::debug!("ignoring local rotation change on a {kind} anchor");
            }
        }
    }

    /// Equatorial → VSOP87 rotation.
    #[must_use]
    pub fn rot_equatorial_to_vsop87(&self) -> DMat4 {
        match self {
            Self::Point(point) => point.rot_equatorial_to_vsop87(),
            Self::Body(body) => body.rot_equatorial_to_vsop87(),
            Self::Orbit(orbit) => orbit.frame().rot_equatorial_to_vsop87(),
            Self::Observatory(obs) => obs.point().rot_equatorial_to_vsop87(),
        }
    }

    /// Replace the stored equatorial → VSOP87 rotation. Body anchors
    /// ignore this.
    pub fn set_rot_equatorial_to_vsop87(&mut self, rot: DMat4) {
        match self {
            Self::Point(point) => point.set_rot_equatorial_to_vsop87(rot),
            Self::Orbit(orbit) => {
                orbit.frame_mut().set_rot_equatorial_to_vsop87(rot);
            }
            Self::Observatory(obs) => {
                obs.point_mut().set_rot_equatorial_to_vsop87(rot);
            }
            Self::Body(_) => {
                log::debug!("ignoring frame rotation change on a body anchor");
            }
        }
    }

    /// Whether the frame sits on a (live) body.
    #[must_use]
    pub fn is_on_body(&self) -> bool {
        self.body().is_some()
    }

    /// Whether the frame sits on `body`.
    #[must_use]
    pub fn is_on_given_body(&self, body: &Body) -> bool {
        match self {
            Self::Body(anchor) => anchor.is_on(body),
            _ => false,
        }
    }

    /// Whether the frame cannot outlive `body`: it sits on it or orbits it.
    #[must_use]
    pub fn depends_on(&self, body: &Body) -> bool {
        match self {
            Self::Body(anchor) => anchor.is_on(body),
            Self::Orbit(anchor) => anchor.is_around(body),
            _ => false,
        }
    }

    /// Body the frame sits on.
    #[must_use]
    pub fn body(&self) -> Option<Rc<Body>> {
        match self {
            Self::Body(anchor) => anchor.body(),
            _ => None,
        }
    }

    /// `key -> value` pairs describing the anchor, `type` first, in the
    /// form accepted by the anchor creators.
    #[must_use]
    pub fn save_anchor(&self) -> Vec<(String, String)> {
        let mut out = vec![("type".to_owned(), self.kind().as_str().to_owned())];
        match self {
            Self::Point(_) | Self::Observatory(_) => {
                push_vector(&mut out, ["x", "y", "z"], self.heliocentric_ecliptic_pos());
            }
            Self::Body(anchor) => {
                let name = anchor
                    .body()
                    .map(|b| b.english_name().to_owned())
                    .unwrap_or_default();
                out.push(("body_name".to_owned(), name));
            }
            Self::Orbit(anchor) => {
                out.push((
                    "coord_func".to_owned(),
                    anchor.orbit().coord_func().to_owned(),
                ));
                out.extend(anchor.orbit().params());
                match anchor.center() {
                    OrbitCenter::Parent(_) => {
                        let name = anchor
                            .parent()
                            .map(|b| b.english_name().to_owned())
                            .unwrap_or_default();
                        out.push(("parent".to_owned(), name));
                    }
                    OrbitCenter::Fixed(center) => push_vector(
                        &mut out,
                        ["orbit_center_x", "orbit_center_y", "orbit_center_z"],
                        *center,
                    ),
                }
            }
        }
        out
    }
}

fn push_vector(out: &mut Vec<(String, String)>, keys: [&str; 3], v: DVec3) {
    for (key, value) in keys.into_iter().zip(v.to_array()) {
        out.push((key.to_owned(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::StillOrbit;

    #[test]
    fn capability_defaults_for_free_variants() {
        let point = AnchorPoint::point(DVec3::X);
        assert_eq!(point.kind(), AnchorKind::Point);
        assert!(!point.is_on_body());
        assert!(point.body().is_none());

        let obs = AnchorPoint::observatory(DVec3::Y);
        assert_eq!(obs.kind(), AnchorKind::Observatory);
        assert!(!obs.is_on_body());
    }

    #[test]
    fn body_variant_reports_its_body() {
        let earth = Rc::new(Body::new(
            "Earth",
            6371.0,
            Box::new(StillOrbit { offset: DVec3::X }),
        ));
        let anchor = AnchorPoint::on_body(&earth);
        assert!(anchor.is_on_body());
        assert!(anchor.is_on_given_body(&earth));
        assert_eq!(anchor.body().unwrap().english_name(), "Earth");
    }

    #[test]
    fn setters_only_touch_free_frames() {
        let earth = Rc::new(Body::new(
            "Earth",
            6371.0,
            Box::new(StillOrbit { offset: DVec3::X }),
        ));
        earth.compute_position(0.0);
        let mut on_body = AnchorPoint::on_body(&earth);
        on_body.set_heliocentric_ecliptic_pos(DVec3::Z);
        assert_eq!(on_body.heliocentric_ecliptic_pos(), DVec3::X);

        let mut point = AnchorPoint::point(DVec3::ZERO);
        let rot = DMat4::from_rotation_z(0.3);
        point.set_heliocentric_ecliptic_pos(DVec3::Z);
        point.set_rot_local_to_equatorial(rot);
        assert_eq!(point.heliocentric_ecliptic_pos(), DVec3::Z);
        assert_eq!(point.rot_local_to_equatorial(0.0, 10.0, 20.0, 0.0), rot);
    }

    #[test]
    fn save_anchor_describes_each_variant() {
        let saved = AnchorPoint::point(DVec3::new(1.0, 2.0, 3.0)).save_anchor();
        assert_eq!(saved[0], ("type".to_owned(), "point".to_owned()));
        assert!(saved.contains(&("y".to_owned(), "2".to_owned())));

        let earth = Rc::new(Body::new(
            "Earth",
            6371.0,
            Box::new(StillOrbit { offset: DVec3::X }),
        ));
        let saved = AnchorPoint::on_body(&earth).save_anchor();
        assert!(saved.contains(&("body_name".to_owned(), "Earth".to_owned())));

        let orbit = AnchorPoint::Orbit(OrbitAnchor::with_center(
            Box::new(StillOrbit { offset: DVec3::ZERO }),
            DVec3::new(0.5, 0.0, 0.0),
        ));
        let saved = orbit.save_anchor();
        assert!(saved.contains(&("type".to_owned(), "orbit".to_owned())));
        assert!(saved
            .contains(&("coord_func".to_owned(), "still_orbit".to_owned())));
        assert!(saved
            .contains(&("orbit_center_x".to_owned(), "0.5".to_owned())));
    }
}
