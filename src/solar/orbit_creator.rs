//! Builds orbits from parameter maps.
//!
//! The default creator is an ordered list of `coord_func -> builder`
//! matchers; the first matching tag wins.

use super::orbit::{CircularOrbit, EllipticalOrbit, Orbit, StillOrbit};
use crate::util::params::{self, Params};

/// Something that can turn orbit parameters into an [`Orbit`].
pub trait OrbitCreator {
    /// Build an orbit from `params`, or `None` if the parameters do not
    /// describe one this creator understands.
    fn handle(&self, params: &Params) -> Option<Box<dyn Orbit>>;
}

type OrbitBuilder = fn(&Params) -> Option<Box<dyn Orbit>>;

/// Orbit creator matching `params["coord_func"]` against `still_orbit`,
/// `circular_orbit` and `ell_orbit`.
pub struct DefaultOrbitCreator {
    builders: Vec<(&'static str, OrbitBuilder)>,
}

impl DefaultOrbitCreator {
    /// Creator with the built-in orbit kinds.
    #[must_use]
    pub fn new() -> Self {
        let builders: [(&'static str, OrbitBuilder); 3] = [
            ("still_orbit", build_still),
            ("circular_orbit", build_circular),
            ("ell_orbit", build_elliptical),
        ];
        Self {
            builders: builders.to_vec(),
        }
    }
}

impl Default for DefaultOrbitCreator {
    fn default() -> Self {
        Self::new()
    }
}

impl OrbitCreator for DefaultOrbitCreator {
    fn handle(&self, params: &Params) -> Option<Box<dyn Orbit>> {
        let coord_func = params::text(params, "coord_func").unwrap_or("");
        let Some((_, build)) =
            self.builders.iter().find(|(tag, _)| *tag == coord_func)
        else {
            log::warn!("orbit creator: unknown coord_func '{coord_func}'");
            return None;
        };
        let orbit = build(params);
        if orbit.is_none() {
            log::warn!(
                "orbit creator: missing or invalid parameters for \
                 '{coord_func}'"
            );
        }
        orbit
    }
}

fn build_still(params: &Params) -> Option<Box<dyn Orbit>> {
    let offset = params::vector(params, ["orbit_x", "orbit_y", "orbit_z"])?;
    Some(Box::new(StillOrbit { offset }))
}

fn build_circular(params: &Params) -> Option<Box<dyn Orbit>> {
    Some(Box::new(CircularOrbit {
        radius: params::number(params, "orbit_radius")?,
        period: params::number(params, "orbit_period")?,
        epoch: params::number_or(
            params,
            "orbit_epoch",
            crate::util::frame::J2000_JD,
        ),
        phase: params::number_or(params, "orbit_phase", 0.0),
        inclination: params::number_or(params, "orbit_inclination", 0.0),
    }))
}

fn build_elliptical(params: &Params) -> Option<Box<dyn Orbit>> {
    let eccentricity = params::number(params, "orbit_eccentricity")?;
    if !(0.0..1.0).contains(&eccentricity) {
        log::warn!("ell_orbit: eccentricity {eccentricity} outside [0, 1)");
        return None;
    }
    Some(Box::new(EllipticalOrbit {
        semi_major_axis: params::number(params, "orbit_semimajoraxis")?,
        eccentricity,
        inclination: params::number_or(params, "orbit_inclination", 0.0),
        ascending_node: params::number_or(params, "orbit_ascendingnode", 0.0),
        arg_of_pericenter: params::number_or(
            params,
            "orbit_argofpericenter",
            0.0,
        ),
        mean_anomaly: params::number_or(params, "orbit_meananomaly", 0.0),
        period: params::number(params, "orbit_period")?,
        epoch: params::number_or(
            params,
            "orbit_epoch",
            crate::util::frame::J2000_JD,
        ),
    }))
}
