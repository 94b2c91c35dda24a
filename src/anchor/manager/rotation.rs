//! Rotation following while standing on a body.
//!
//! Close to a body the observer is glued to the ground and turns with it.
//! Far above it (beyond `radius · multiplier`) the observer stops co-rotating:
//! every tick the longitude is pulled back by the body's sidereal rotation
//! since the previous tick, so distant planets don't visibly spin the camera
//! around. The two thresholds coincide; switching happens on each crossing.

use super::AnchorManager;
use crate::util::frame::{self, AU_M};

#[derive(Debug, Clone)]
pub(super) struct RotationFollow {
    following: bool,
    last_update: f64,
    multiplier: f64,
    override_condition: bool,
}

impl RotationFollow {
    pub(super) fn new(multiplier: f64, now: f64) -> Self {
        Self {
            following: true,
            last_update: now,
            multiplier,
            override_condition: false,
        }
    }

    /// Start over after a change of frame.
    pub(super) fn reset(&mut self, now: f64) {
        self.following = true;
        self.last_update = now;
    }
}

impl AnchorManager {
    /// Whether the observer currently turns with the body it stands on.
    #[must_use]
    pub fn is_following_rotation(&self) -> bool {
        self.rotation.following
    }

    /// Altitude multiple of the body radius above which rotation following
    /// stops.
    #[must_use]
    pub fn rotation_multiplier_condition(&self) -> f64 {
        self.rotation.multiplier
    }

    /// Set the altitude multiple of the body radius above which rotation
    /// following stops.
    pub fn set_rotation_multiplier_condition(&mut self, multiplier: f64) {
        self.rotation.multiplier = multiplier;
    }

    /// Force the longitude correction regardless of altitude, keeping the
    /// observer inertially fixed even near the ground.
    pub fn set_override_rotation_condition(&mut self, enabled: bool) {
        self.rotation.override_condition = enabled;
        self.rotation.last_update = self.time.jday();
    }

    /// Apply one tick of the hysteresis and the longitude correction.
    pub(super) fn follow_body_rotation(&mut self, jd: f64) {
        let Some(body) = self.home_body() else {
            return;
        };
        let threshold = body.radius() * self.rotation.multiplier * AU_M;
        let altitude = self.observer.altitude();
        let rotation = &mut self.rotation;

        if rotation.following && altitude > threshold {
            rotation.following = false;
            rotation.last_update = jd;
            log::debug!(
                "stopped following the rotation of '{}'",
                body.english_name()
            );
        } else if !rotation.following && altitude < threshold {
            rotation.following = true;
            log::debug!(
                "following the rotation of '{}'",
                body.english_name()
            );
        }

        if !rotation.following || rotation.override_condition {
            let correction =
                body.sidereal_time(rotation.last_update) - body.sidereal_time(jd);
            rotation.last_update = jd;
            let lon = frame::wrap_longitude(self.observer.longitude() + correction);
            self.observer.set_longitude(lon);
        }
    }
}
