//! The observer: a latitude/longitude/altitude relative to the current
//! anchor.
//!
//! The observer does not hold the anchor itself. The manager owns every
//! anchor and hands out an [`ObserverView`] that borrows the observer
//! together with the current anchor for the duration of a query.

use std::rc::Rc;

use glam::{DMat4, DVec3};

use crate::anchor::AnchorPoint;
use crate::solar::Body;
use crate::util::frame;

/// Position of the viewpoint inside its anchor frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Observer {
    latitude: f64,
    longitude: f64,
    altitude: f64,
}

impl Observer {
    /// Observer at the frame origin.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Latitude in degrees.
    #[must_use]
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Set the latitude in degrees.
    pub fn set_latitude(&mut self, lat: f64) {
        self.latitude = lat;
    }

    /// Longitude in degrees.
    #[must_use]
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Set the longitude in degrees.
    pub fn set_longitude(&mut self, lon: f64) {
        self.longitude = lon;
    }

    /// Altitude in metres above the body surface, or above the frame
    /// origin when not on a body.
    #[must_use]
    pub fn altitude(&self) -> f64 {
        self.altitude
    }

    /// Set the altitude in metres.
    pub fn set_altitude(&mut self, alt: f64) {
        self.altitude = alt;
    }

    /// Borrow the observer together with the anchor it is expressed in.
    #[must_use]
    pub fn view<'a>(&'a self, anchor: &'a AnchorPoint) -> ObserverView<'a> {
        ObserverView {
            observer: self,
            anchor,
        }
    }
}

/// An [`Observer`] paired with its current anchor.
#[derive(Debug, Clone, Copy)]
pub struct ObserverView<'a> {
    observer: &'a Observer,
    anchor: &'a AnchorPoint,
}

impl<'a> ObserverView<'a> {
    /// The observer.
    #[must_use]
    pub fn observer(&self) -> &'a Observer {
        self.observer
    }

    /// The anchor the observer is expressed in.
    #[must_use]
    pub fn anchor(&self) -> &'a AnchorPoint {
        self.anchor
    }

    /// Whether the observer stands on a body.
    #[must_use]
    pub fn is_on_body(&self) -> bool {
        self.anchor.is_on_body()
    }

    /// Body the observer stands on.
    #[must_use]
    pub fn home_body(&self) -> Option<Rc<Body>> {
        self.anchor.body()
    }

    /// Distance from the frame origin along local zenith, AU: body radius
    /// plus altitude on a body, altitude alone otherwise.
    #[must_use]
    pub fn distance_from_center(&self) -> f64 {
        let alt = frame::metres_to_au(self.observer.altitude);
        match self.anchor.body() {
            Some(body) => body.radius() + alt,
            None => alt,
        }
    }

    /// Local → equatorial rotation at `jd`.
    #[must_use]
    pub fn rot_local_to_equatorial(&self, jd: f64) -> DMat4 {
        self.anchor.rot_local_to_equatorial(
            jd,
            self.observer.latitude,
            self.observer.longitude,
            self.observer.altitude,
        )
    }

    /// Equatorial → VSOP87 rotation.
    #[must_use]
    pub fn rot_equatorial_to_vsop87(&self) -> DMat4 {
        self.anchor.rot_equatorial_to_vsop87()
    }

    /// Rotation from the observer's local frame straight to VSOP87.
    #[must_use]
    pub fn rot_local_to_vsop87(&self, jd: f64) -> DMat4 {
        self.rot_equatorial_to_vsop87() * self.rot_local_to_equatorial(jd)
    }

    /// Heliocentric ecliptic position of the observer at `jd`, AU.
    #[must_use]
    pub fn heliocentric_position(&self, jd: f64) -> DVec3 {
        let local_to_helio =
            DMat4::from_translation(self.anchor.heliocentric_ecliptic_pos())
                * self.rot_local_to_vsop87(jd);
        local_to_helio
            .transform_point3(DVec3::new(0.0, 0.0, self.distance_from_center()))
    }
}
