//! Rotation and unit helpers shared by anchors, bodies and the observer.
//!
//! Angles are passed in degrees at the API surface and converted here, so
//! that callers can keep latitude/longitude in the units they are displayed
//! in.

use glam::{DMat4, DVec3};

/// Kilometres per astronomical unit.
pub const AU_KM: f64 = 149_597_870.7;

/// Metres per astronomical unit.
pub const AU_M: f64 = AU_KM * 1000.0;

/// Seconds per day, used to express travel durations in Julian days.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Julian day of the J2000.0 epoch.
pub const J2000_JD: f64 = 2_451_545.0;

/// Obliquity of the ecliptic used for the J2000 ↔ VSOP87 rotation, degrees.
pub const VSOP87_OBLIQUITY_DEG: f64 = 23.439_280_305_555_556;

/// Small equinox correction applied after the obliquity rotation, degrees.
pub const VSOP87_EQUINOX_CORRECTION_DEG: f64 = 0.000_027_5;

/// Latitude limit (degrees) used to keep local frames away from the pole
/// singularity.
pub const MAX_LATITUDE_DEG: f64 = 89.5;

/// Rotation from the J2000 equatorial frame to VSOP87 ecliptic coordinates.
/// Its transpose takes VSOP87 back to J2000.
#[must_use]
pub fn j2000_to_vsop87() -> DMat4 {
    DMat4::from_rotation_x(-VSOP87_OBLIQUITY_DEG.to_radians())
        * DMat4::from_rotation_z(VSOP87_EQUINOX_CORRECTION_DEG.to_radians())
}

/// Local (zenith = +Z) to equatorial rotation for a point at `lon`/`lat`
/// degrees: `zrot(lon) · yrot(90 - lat)`.
#[must_use]
pub fn local_to_equatorial(lon_deg: f64, lat_deg: f64) -> DMat4 {
    DMat4::from_rotation_z(lon_deg.to_radians())
        * DMat4::from_rotation_y((90.0 - lat_deg).to_radians())
}

/// Clamp a latitude into `[-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG]`.
#[must_use]
pub fn clamp_latitude(lat_deg: f64) -> f64 {
    lat_deg.clamp(-MAX_LATITUDE_DEG, MAX_LATITUDE_DEG)
}

/// Convert metres to astronomical units.
#[must_use]
pub fn metres_to_au(metres: f64) -> f64 {
    metres / AU_M
}

/// Convert kilometres to astronomical units.
#[must_use]
pub fn km_to_au(km: f64) -> f64 {
    km / AU_KM
}

/// Wrap an angle in degrees into `[0, 360)`.
#[must_use]
pub fn wrap_degrees(deg: f64) -> f64 {
    deg.rem_euclid(360.0)
}

/// Wrap a longitude in degrees into `[-180, 180)`.
#[must_use]
pub fn wrap_longitude(deg: f64) -> f64 {
    (deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Rotation part of `m` applied to `v` (translation ignored).
#[must_use]
pub fn rotate(m: &DMat4, v: DVec3) -> DVec3 {
    m.transform_vector3(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_zenith_points_along_lat_lon() {
        let m = local_to_equatorial(90.0, 0.0);
        let zenith = rotate(&m, DVec3::Z);
        assert!(zenith.abs_diff_eq(DVec3::Y, 1e-12));

        let pole = rotate(&local_to_equatorial(0.0, 90.0), DVec3::Z);
        assert!(pole.abs_diff_eq(DVec3::Z, 1e-12));
    }

    #[test]
    fn j2000_rotation_tilts_pole_by_obliquity() {
        let m = j2000_to_vsop87();
        let pole = rotate(&m, DVec3::Z);
        let tilt = pole.angle_between(DVec3::Z).to_degrees();
        assert!((tilt - VSOP87_OBLIQUITY_DEG).abs() < 1e-9);
        // Orthonormal: transpose is the inverse.
        let id = m.transpose() * m;
        assert!(id.abs_diff_eq(DMat4::IDENTITY, 1e-12));
    }

    #[test]
    fn latitude_clamp_and_wrap() {
        assert_eq!(clamp_latitude(90.0), MAX_LATITUDE_DEG);
        assert_eq!(clamp_latitude(-95.0), -MAX_LATITUDE_DEG);
        assert_eq!(clamp_latitude(12.0), 12.0);
        assert!((wrap_degrees(-30.0) - 330.0).abs() < 1e-12);
        assert!((wrap_degrees(725.0) - 5.0).abs() < 1e-12);
        assert!((wrap_longitude(190.0) + 170.0).abs() < 1e-12);
        assert!((wrap_longitude(-540.0) + 180.0).abs() < 1e-12);
        assert_eq!(wrap_longitude(45.0), 45.0);
    }

    #[test]
    fn unit_conversions() {
        assert!((metres_to_au(AU_M) - 1.0).abs() < 1e-15);
        assert!((km_to_au(AU_KM * 2.0) - 2.0).abs() < 1e-15);
    }
}
