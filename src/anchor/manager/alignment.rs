//! Frame changes that keep the observer where it is.
//!
//! [`AnchorManager::transition_to_point`] freezes the live view into a free
//! point. [`AnchorManager::transition_to_body`] lands on a body at the
//! latitude/longitude whose world position is closest to the current one,
//! found by two successive dichotomies. At a fixed latitude the squared
//! distance to the target is `c - k·cos(lon - lon*)`, symmetric around its
//! minimum, so comparing the quarter points of an interval tells which half
//! holds the minimum. The same holds for latitude at a fixed longitude.

use glam::DVec3;

use super::{AnchorManager, TravelState};
use crate::anchor::{AnchorKind, AnchorPoint};
use crate::error::AnchorError;
use crate::util::frame::AU_M;

/// Narrow `[lo, hi]` around the minimum of `f` until narrower than `tol`.
/// `f` must be symmetric and increasing away from its minimum inside the
/// interval.
fn bisect(mut lo: f64, mut hi: f64, tol: f64, mut f: impl FnMut(f64) -> f64) -> f64 {
    while hi - lo > tol {
        let quarter = (hi - lo) / 4.0;
        let mid = lo + 2.0 * quarter;
        if f(lo + quarter) < f(hi - quarter) {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    (lo + hi) / 2.0
}

impl AnchorManager {
    /// Make the point anchor `name` current, placed and oriented exactly
    /// like the live view, with the observer at altitude zero. The anchor is
    /// created if it does not exist. Cancels any travel.
    ///
    /// # Errors
    ///
    /// [`AnchorError::StateConflict`] without a current anchor,
    /// [`AnchorError::Validation`] if `name` is registered as another kind.
    pub fn transition_to_point(&mut self, name: &str) -> Result<(), AnchorError> {
        let jd = self.time.jday();
        let view = self
            .view()
            .ok_or_else(|| AnchorError::conflict("no current anchor"))?;
        let position = view.heliocentric_position(jd);
        let local_to_equatorial = view.rot_local_to_equatorial(jd);
        let equatorial_to_vsop87 = view.rot_equatorial_to_vsop87();

        match self.anchors.get(name).map(AnchorPoint::kind) {
            Some(AnchorKind::Point) => {}
            Some(kind) => {
                return Err(AnchorError::validation(format!(
                    "'{name}' is a {kind} anchor, not a point"
                )));
            }
            None => {
                if name.is_empty() {
                    return Err(AnchorError::validation("anchor name is empty"));
                }
                let _ = self
                    .anchors
                    .insert(name.to_owned(), AnchorPoint::point(position));
            }
        }

        if let Some(anchor) = self.anchors.get_mut(name) {
            anchor.set_heliocentric_ecliptic_pos(position);
            anchor.set_rot_local_to_equatorial(local_to_equatorial);
            anchor.set_rot_equatorial_to_vsop87(equatorial_to_vsop87);
        }
        self.travel = TravelState::Idle;
        self.current = Some(name.to_owned());
        self.observer.set_altitude(0.0);
        self.rotation.reset(jd);
        self.update_transform_matrices();
        log::info!("transitioned to free point '{name}'");
        Ok(())
    }

    /// Make the body anchor `name` current, choosing the altitude,
    /// latitude and longitude that keep the observer's world position. The
    /// view direction is preserved and the heading reset. Cancels any
    /// travel.
    ///
    /// # Errors
    ///
    /// [`AnchorError::StateConflict`] without a current anchor,
    /// [`AnchorError::Lookup`] if `name` is unknown or its body is gone,
    /// [`AnchorError::Validation`] if it is not a body anchor.
    pub fn transition_to_body(&mut self, name: &str) -> Result<(), AnchorError> {
        let jd = self.time.jday();
        let view = self
            .view()
            .ok_or_else(|| AnchorError::conflict("no current anchor"))?;
        let target = view.heliocentric_position(jd);
        let old_local_to_vsop87 = view.rot_local_to_vsop87(jd);

        let anchor = self
            .anchors
            .get(name)
            .ok_or_else(|| AnchorError::lookup(format!("unknown anchor '{name}'")))?;
        if anchor.kind() != AnchorKind::Body {
            return Err(AnchorError::validation(format!(
                "'{name}' is a {} anchor, not a body",
                anchor.kind()
            )));
        }
        let body = anchor.body().ok_or_else(|| {
            AnchorError::lookup(format!("body of anchor '{name}' is gone"))
        })?;

        let altitude =
            target.distance(body.heliocentric_ecliptic_pos()) - body.radius();
        self.travel = TravelState::Idle;
        self.current = Some(name.to_owned());
        self.observer.set_altitude(altitude * AU_M);
        self.observer.set_latitude(0.0);

        let (lon_tol, lat_tol) = (
            self.alignment_options.longitude_tolerance_deg,
            self.alignment_options.latitude_tolerance_deg,
        );
        let east = self.distance_at(jd, 0.0, 90.0, target);
        let west = self.distance_at(jd, 0.0, -90.0, target);
        let (lo, hi) = if east < west { (0.0, 180.0) } else { (-180.0, 0.0) };
        let lon = bisect(lo, hi, lon_tol, |lon| self.distance_at(jd, 0.0, lon, target));
        let lat = bisect(-90.0, 90.0, lat_tol, |lat| {
            self.distance_at(jd, lat, lon, target)
        });
        self.observer.set_longitude(lon);
        self.observer.set_latitude(lat);
        self.update_transform_matrices();

        let new_local_to_vsop87 = self.navigator.mat_local_to_vsop87();
        self.navigator
            .align_up_vector_to(old_local_to_vsop87, new_local_to_vsop87);
        self.navigator.set_heading(0.0);
        self.rotation.reset(jd);
        log::info!(
            "transitioned to '{}' at lat {lat:.4}, lon {lon:.6}, alt {:.0} m",
            body.english_name(),
            self.observer.altitude()
        );
        Ok(())
    }

    /// Squared distance from `target` of the observer placed at `lat`/`lon`
    /// on the current anchor, through a full transform update.
    fn distance_at(&mut self, jd: f64, lat: f64, lon: f64, target: DVec3) -> f64 {
        self.observer.set_latitude(lat);
        self.observer.set_longitude(lon);
        let Some(anchor) = self.current.as_deref().and_then(|n| self.anchors.get(n))
        else {
            return f64::INFINITY;
        };
        self.navigator
            .update_transform_matrices(&self.observer.view(anchor), jd);
        self.navigator.heliocentric_position().distance_squared(target)
    }
}
