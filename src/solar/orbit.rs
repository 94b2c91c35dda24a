//! Orbit position functions.
//!
//! An orbit is a black box mapping a Julian day to a position in VSOP87
//! ecliptic coordinates (AU) relative to its centre. Orbits also describe
//! themselves as parameters so that orbit anchors can be saved and rebuilt.

use std::f64::consts::TAU;
use std::fmt;

use glam::DVec3;

/// Position function of an orbiting object.
pub trait Orbit: fmt::Debug {
    /// Position at `jd` in VSOP87 coordinates, relative to the orbit centre.
    fn position_at(&self, jd: f64) -> DVec3;

    /// The `coord_func` tag this orbit is created from.
    fn coord_func(&self) -> &'static str;

    /// `key -> value` pairs that rebuild this orbit through the orbit
    /// creator, `coord_func` excluded.
    fn params(&self) -> Vec<(String, String)>;
}

/// Orbit that never moves: a fixed offset from its centre.
#[derive(Debug, Clone, PartialEq)]
pub struct StillOrbit {
    /// Constant offset in AU.
    pub offset: DVec3,
}

impl Orbit for StillOrbit {
    fn position_at(&self, _jd: f64) -> DVec3 {
        self.offset
    }

    fn coord_func(&self) -> &'static str {
        "still_orbit"
    }

    fn params(&self) -> Vec<(String, String)> {
        vec![
            ("orbit_x".to_owned(), self.offset.x.to_string()),
            ("orbit_y".to_owned(), self.offset.y.to_string()),
            ("orbit_z".to_owned(), self.offset.z.to_string()),
        ]
    }
}

/// Uniform circular orbit, optionally inclined about the X axis.
#[derive(Debug, Clone, PartialEq)]
pub struct CircularOrbit {
    /// Orbit radius in AU.
    pub radius: f64,
    /// Orbital period in days.
    pub period: f64,
    /// Julian day at which the orbit is at `phase`.
    pub epoch: f64,
    /// Angle along the orbit at `epoch`, degrees.
    pub phase: f64,
    /// Inclination of the orbital plane, degrees.
    pub inclination: f64,
}

impl Orbit for CircularOrbit {
    fn position_at(&self, jd: f64) -> DVec3 {
        let turns = if self.period == 0.0 {
            0.0
        } else {
            (jd - self.epoch) / self.period
        };
        let angle = self.phase.to_radians() + TAU * turns;
        let (sin_i, cos_i) = self.inclination.to_radians().sin_cos();
        let (sin_a, cos_a) = angle.sin_cos();
        DVec3::new(
            self.radius * cos_a,
            self.radius * sin_a * cos_i,
            self.radius * sin_a * sin_i,
        )
    }

    fn coord_func(&self) -> &'static str {
        "circular_orbit"
    }

    fn params(&self) -> Vec<(String, String)> {
        vec![
            ("orbit_radius".to_owned(), self.radius.to_string()),
            ("orbit_period".to_owned(), self.period.to_string()),
            ("orbit_epoch".to_owned(), self.epoch.to_string()),
            ("orbit_phase".to_owned(), self.phase.to_string()),
            ("orbit_inclination".to_owned(), self.inclination.to_string()),
        ]
    }
}

/// Keplerian elliptical orbit. Angles are stored in degrees.
#[derive(Debug, Clone, PartialEq)]
pub struct EllipticalOrbit {
    /// Semi-major axis in AU.
    pub semi_major_axis: f64,
    /// Eccentricity, `0 <= e < 1`.
    pub eccentricity: f64,
    /// Inclination, degrees.
    pub inclination: f64,
    /// Longitude of the ascending node, degrees.
    pub ascending_node: f64,
    /// Argument of pericenter, degrees.
    pub arg_of_pericenter: f64,
    /// Mean anomaly at `epoch`, degrees.
    pub mean_anomaly: f64,
    /// Orbital period in days.
    pub period: f64,
    /// Julian day of the elements.
    pub epoch: f64,
}

/// Solve Kepler's equation `E - e sin E = M` by Newton iteration.
fn solve_kepler(mean_anomaly: f64, e: f64) -> f64 {
    let mut ea = if e > 0.8 { std::f64::consts::PI } else { mean_anomaly };
    for _ in 0..12 {
        let delta = (ea - e * ea.sin() - mean_anomaly) / (1.0 - e * ea.cos());
        ea -= delta;
        if delta.abs() < 1e-14 {
            break;
        }
    }
    ea
}

impl Orbit for EllipticalOrbit {
    fn position_at(&self, jd: f64) -> DVec3 {
        let mean_motion = if self.period == 0.0 {
            0.0
        } else {
            TAU / self.period
        };
        let ma = (self.mean_anomaly.to_radians()
            + mean_motion * (jd - self.epoch))
            .rem_euclid(TAU);
        let e = self.eccentricity;
        let ea = solve_kepler(ma, e);

        let x_orb = self.semi_major_axis * (ea.cos() - e);
        let y_orb = self.semi_major_axis * (1.0 - e * e).sqrt() * ea.sin();

        let (sin_w, cos_w) = self.arg_of_pericenter.to_radians().sin_cos();
        let (sin_om, cos_om) = self.ascending_node.to_radians().sin_cos();
        let (sin_i, cos_i) = self.inclination.to_radians().sin_cos();

        DVec3::new(
            (cos_om * cos_w - sin_om * sin_w * cos_i) * x_orb
                + (-cos_om * sin_w - sin_om * cos_w * cos_i) * y_orb,
            (sin_om * cos_w + cos_om * sin_w * cos_i) * x_orb
                + (-sin_om * sin_w + cos_om * cos_w * cos_i) * y_orb,
            (sin_w * sin_i) * x_orb + (cos_w * sin_i) * y_orb,
        )
    }

    fn coord_func(&self) -> &'static str {
        "ell_orbit"
    }

    fn params(&self) -> Vec<(String, String)> {
        vec![
            (
                "orbit_semimajoraxis".to_owned(),
                self.semi_major_axis.to_string(),
            ),
            ("orbit_eccentricity".to_owned(), self.eccentricity.to_string()),
            ("orbit_inclination".to_owned(), self.inclination.to_string()),
            (
                "orbit_ascendingnode".to_owned(),
                self.ascending_node.to_string(),
            ),
            (
                "orbit_argofpericenter".to_owned(),
                self.arg_of_pericenter.to_string(),
            ),
            ("orbit_meananomaly".to_owned(), self.mean_anomaly.to_string()),
            ("orbit_period".to_owned(), self.period.to_string()),
            ("orbit_epoch".to_owned(), self.epoch.to_string()),
        ]
    }
}
