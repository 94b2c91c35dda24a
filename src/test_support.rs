//! Shared fixtures for unit tests.

use std::rc::Rc;

use glam::DVec3;

use crate::solar::{Body, CircularOrbit, SolarSystem, StillOrbit};
use crate::util::frame::{self, J2000_JD};

/// Julian day every fixture starts at.
pub(crate) const EPOCH: f64 = J2000_JD;

/// Sun, Earth (6371 km, rotating) and Moon (orbiting Earth), with
/// positions computed at [`EPOCH`].
pub(crate) fn solar_system() -> SolarSystem {
    let system = SolarSystem::new();
    let _sun = system.add_body(Body::new(
        "Sun",
        696_000.0,
        Box::new(StillOrbit { offset: DVec3::ZERO }),
    ));
    let earth = system.add_body(
        Body::new(
            "Earth",
            6371.0,
            Box::new(CircularOrbit {
                radius: 1.0,
                period: 365.25,
                epoch: J2000_JD,
                phase: 100.0,
                inclination: 0.0,
            }),
        )
        .with_rotation(0.997_269_68, 280.46)
        .with_equatorial_frame(frame::j2000_to_vsop87()),
    );
    let _moon = system.add_body(
        Body::new(
            "Moon",
            1737.4,
            Box::new(CircularOrbit {
                radius: 0.002_57,
                period: 27.32,
                epoch: J2000_JD,
                phase: 0.0,
                inclination: 5.1,
            }),
        )
        .with_parent(&earth)
        .with_rotation(27.32, 0.0),
    );
    system.compute_positions(EPOCH);
    system
}

/// [`solar_system`] behind an `Rc`.
pub(crate) fn shared_solar_system() -> Rc<SolarSystem> {
    Rc::new(solar_system())
}
