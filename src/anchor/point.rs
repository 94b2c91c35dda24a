//! Free-floating anchors: plain points and fixed observatories.

use glam::{DMat4, DVec3};

use crate::util::frame;

/// A fixed position in space with explicitly stored rotations.
///
/// [`update`](Self::update) is a no-op; the frame only changes through the
/// setters, which the manager uses when travelling or when converting the
/// live view into a free point.
#[derive(Debug, Clone, PartialEq)]
pub struct PointAnchor {
    heliocentric_pos: DVec3,
    rot_local_to_equatorial: DMat4,
    rot_equatorial_to_vsop87: DMat4,
}

impl PointAnchor {
    /// Point at `pos` (heliocentric ecliptic, AU) with identity rotations.
    #[must_use]
    pub fn new(pos: DVec3) -> Self {
        Self {
            heliocentric_pos: pos,
            rot_local_to_equatorial: DMat4::IDENTITY,
            rot_equatorial_to_vsop87: DMat4::IDENTITY,
        }
    }

    /// Nothing to recompute.
    pub fn update(&mut self, _jd: f64) {}

    /// Heliocentric ecliptic position, AU.
    #[must_use]
    pub fn heliocentric_ecliptic_pos(&self) -> DVec3 {
        self.heliocentric_pos
    }

    /// Move the point.
    pub fn set_heliocentric_ecliptic_pos(&mut self, pos: DVec3) {
        self.heliocentric_pos = pos;
    }

    /// Stored local → equatorial rotation (observer coordinates ignored).
    #[must_use]
    pub fn rot_local_to_equatorial(&self) -> DMat4 {
        self.rot_local_to_equatorial
    }

    /// Replace the local → equatorial rotation.
    pub fn set_rot_local_to_equatorial(&mut self, rot: DMat4) {
        self.rot_local_to_equatorial = rot;
    }

    /// Stored equatorial → VSOP87 rotation.
    #[must_use]
    pub fn rot_equatorial_to_vsop87(&self) -> DMat4 {
        self.rot_equatorial_to_vsop87
    }

    /// Replace the equatorial → VSOP87 rotation.
    pub fn set_rot_equatorial_to_vsop87(&mut self, rot: DMat4) {
        self.rot_equatorial_to_vsop87 = rot;
    }
}

/// A fixed point whose local frame follows the observer's latitude and
/// longitude, like a ground station with no body underneath.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservatoryAnchor {
    point: PointAnchor,
}

impl ObservatoryAnchor {
    /// Observatory at `pos` (heliocentric ecliptic, AU).
    #[must_use]
    pub fn new(pos: DVec3) -> Self {
        Self {
            point: PointAnchor::new(pos),
        }
    }

    /// Underlying point frame.
    #[must_use]
    pub fn point(&self) -> &PointAnchor {
        &self.point
    }

    /// Mutable underlying point frame.
    pub fn point_mut(&mut self) -> &mut PointAnchor {
        &mut self.point
    }

    /// `zrot(lon) · yrot(90 - lat)` with latitude clamped to ±89.5° to keep
    /// away from the pole singularity.
    #[must_use]
    pub fn rot_local_to_equatorial(&self, lat: f64, lon: f64) -> DMat4 {
        frame::local_to_equatorial(lon, frame::clamp_latitude(lat))
    }
}
