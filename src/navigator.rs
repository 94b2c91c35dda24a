//! Navigator: world transforms and view direction derived from the
//! observer.

use glam::{DMat4, DVec3};

use crate::observer::ObserverView;

/// Caches the observer's world transforms for the current tick and holds
/// the view direction in the observer's local frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Navigator {
    heading: f64,
    local_vision: DVec3,
    mat_local_to_vsop87: DMat4,
    heliocentric_position: DVec3,
}

impl Default for Navigator {
    fn default() -> Self {
        Self {
            heading: 0.0,
            local_vision: DVec3::X,
            mat_local_to_vsop87: DMat4::IDENTITY,
            heliocentric_position: DVec3::ZERO,
        }
    }
}

impl Navigator {
    /// Navigator looking along local +X with no heading.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recompute every cached transform for `view` at `jd`.
    pub fn update_transform_matrices(&mut self, view: &ObserverView<'_>, jd: f64) {
        self.mat_local_to_vsop87 = view.rot_local_to_vsop87(jd);
        self.heliocentric_position = view.heliocentric_position(jd);
    }

    /// Observer heliocentric position from the last update, AU.
    #[must_use]
    pub fn heliocentric_position(&self) -> DVec3 {
        self.heliocentric_position
    }

    /// Local → VSOP87 rotation from the last update.
    #[must_use]
    pub fn mat_local_to_vsop87(&self) -> DMat4 {
        self.mat_local_to_vsop87
    }

    /// Heliocentric → local transform from the last update, computed on
    /// each call.
    #[must_use]
    pub fn mat_helio_to_local(&self) -> DMat4 {
        (DMat4::from_translation(self.heliocentric_position)
            * self.mat_local_to_vsop87)
            .inverse()
    }

    /// Heading of the navigation direction, degrees.
    #[must_use]
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Set the heading, degrees.
    pub fn set_heading(&mut self, heading: f64) {
        self.heading = heading;
    }

    /// View direction in the observer's local frame (unit length).
    #[must_use]
    pub fn local_vision(&self) -> DVec3 {
        self.local_vision
    }

    /// Set the view direction; zero vectors are ignored.
    pub fn set_local_vision(&mut self, vision: DVec3) {
        match vision.try_normalize() {
            Some(v) => self.local_vision = v,
            None => log::warn!("ignoring zero-length vision vector"),
        }
    }

    /// View direction in VSOP87 coordinates from the last update.
    #[must_use]
    pub fn world_vision(&self) -> DVec3 {
        self.mat_local_to_vsop87.transform_vector3(self.local_vision)
    }

    /// Re-express the view direction after the local frame changed from
    /// `old_local_to_vsop87` to `new_local_to_vsop87`, so that the world
    /// direction stays put while the new local zenith becomes "up".
    pub fn align_up_vector_to(
        &mut self,
        old_local_to_vsop87: DMat4,
        new_local_to_vsop87: DMat4,
    ) {
        let world = old_local_to_vsop87.transform_vector3(self.local_vision);
        let local = new_local_to_vsop87.transpose().transform_vector3(world);
        self.set_local_vision(local);
    }
}
