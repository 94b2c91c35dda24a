//! Anchor ini files and saved camera positions.
//!
//! Anchor files hold one `[name]` section per anchor with `key = value`
//! lines. Camera position files are flat `key value` lines describing the
//! live view: the current anchor, observer coordinates, simulation time and
//! view direction.

use std::fmt::Write as _;
use std::path::Path;

use glam::DVec3;

use super::AnchorManager;
use crate::anchor::{AnchorKind, AnchorPoint};
use crate::error::AnchorError;
use crate::util::params::{self, Params};

fn parse_error(msg: String) -> AnchorError {
    log::warn!("{msg}");
    AnchorError::Parse(msg)
}

fn read(path: &Path) -> Result<String, AnchorError> {
    std::fs::read_to_string(path).map_err(|e| {
        log::error!("cannot read {}: {e}", path.display());
        AnchorError::Io(e)
    })
}

/// Split an anchor ini file into one parameter map per section, each
/// carrying its section name under `name`.
///
/// Exactly one space is stripped on each side of `=`. Lines starting with
/// `#` and blank lines are skipped.
///
/// # Errors
///
/// [`AnchorError::Parse`] for a line that is neither a header nor
/// `key = value`, or a value outside any section.
fn parse_anchor_ini(text: &str) -> Result<Vec<Params>, AnchorError> {
    let mut sections = Vec::new();
    let mut current: Option<Params> = None;

    for (number, raw) in text.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }
        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            sections.extend(current.take());
            current = Some(params::from_pairs([("name", name)]));
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            return Err(parse_error(format!(
                "line {}: expected 'key = value', got '{line}'",
                number + 1
            )));
        };
        let key = key.strip_suffix(' ').unwrap_or(key);
        let value = value.strip_prefix(' ').unwrap_or(value);
        let Some(section) = current.as_mut() else {
            return Err(parse_error(format!(
                "line {}: '{key}' outside any section",
                number + 1
            )));
        };
        let _ = section.insert(key.to_owned(), value.to_owned());
    }
    sections.extend(current);
    Ok(sections)
}

/// Parse `key value` lines, splitting at the first space.
fn parse_camera_position(text: &str) -> Result<Params, AnchorError> {
    let mut params = Params::default();
    for (number, raw) in text.lines().enumerate() {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if line.trim().is_empty() {
            continue;
        }
        let Some((key, value)) = line.split_once(' ') else {
            return Err(parse_error(format!(
                "line {}: expected 'key value', got '{line}'",
                number + 1
            )));
        };
        let _ = params.insert(key.to_owned(), value.to_owned());
    }
    Ok(params)
}

fn required(params: &Params, key: &str) -> Result<f64, AnchorError> {
    params::number(params, key)
        .filter(|value| value.is_finite())
        .ok_or_else(|| parse_error(format!("missing or malformed '{key}'")))
}

/// What loading a camera position does to the registry.
enum Restore {
    /// Registered anchor whose frame follows its own source.
    Keep,
    /// Registered free anchor moved back to the saved position.
    Position(DVec3),
    /// Anchor rebuilt from the saved fields.
    Register(AnchorPoint),
}

impl AnchorManager {
    /// Register every anchor described in the ini file at `path`. Sections
    /// that fail to build are logged and skipped. Returns how many anchors
    /// were added.
    ///
    /// # Errors
    ///
    /// I/O failure, or [`AnchorError::Parse`] for a malformed file, in
    /// which case nothing is registered.
    pub fn load(&mut self, path: &Path) -> Result<usize, AnchorError> {
        let sections = parse_anchor_ini(&read(path)?)?;
        let mut added = 0;
        for section in &sections {
            match self.add_anchor_from_params(section) {
                Ok(()) => added += 1,
                Err(e) => log::warn!(
                    "skipping anchor '{}': {e}",
                    params::text(section, "name").unwrap_or_default()
                ),
            }
        }
        log::info!(
            "loaded {added} of {} anchors from {}",
            sections.len(),
            path.display()
        );
        Ok(added)
    }

    /// Write the live view to `path`: anchor name and fields, observer
    /// altitude, longitude and latitude, simulation time and view
    /// direction.
    ///
    /// # Errors
    ///
    /// [`AnchorError::StateConflict`] without a current anchor, or I/O
    /// failure.
    pub fn save_camera_position(&self, path: &Path) -> Result<(), AnchorError> {
        let anchor = self.require_current()?;
        let name = self.current.as_deref().unwrap_or_default();
        let vision = self.navigator.local_vision();

        let mut fields = vec![("name".to_owned(), name.to_owned())];
        fields.extend(anchor.save_anchor());
        fields.extend(
            [
                ("alt", self.observer.altitude()),
                ("lon", self.observer.longitude()),
                ("lat", self.observer.latitude()),
                ("time", self.time.jday()),
                ("vx", vision.x),
                ("vy", vision.y),
                ("vz", vision.z),
            ]
            .map(|(key, value)| (key.to_owned(), value.to_string())),
        );

        let mut text = String::new();
        for (key, value) in &fields {
            let _ = writeln!(text, "{key} {value}");
        }
        std::fs::write(path, text).map_err(|e| {
            log::error!("cannot write {}: {e}", path.display());
            AnchorError::Io(e)
        })?;
        log::info!("saved camera position on '{name}' to {}", path.display());
        Ok(())
    }

    /// Restore a view written by
    /// [`save_camera_position`](Self::save_camera_position). The clock is
    /// set first, then the anchor is made current: a registered free
    /// anchor is moved back to its saved position, an unknown one is
    /// rebuilt from the saved fields.
    ///
    /// # Errors
    ///
    /// [`AnchorError::StateConflict`] while moving, I/O failure,
    /// [`AnchorError::Parse`] or [`AnchorError::Validation`] for missing
    /// fields, or the anchor creators' errors. State is untouched on error.
    pub fn load_camera_position(&mut self, path: &Path) -> Result<(), AnchorError> {
        if self.is_moving() {
            return Err(AnchorError::conflict(
                "cannot load a camera position while moving",
            ));
        }
        let params = parse_camera_position(&read(path)?)?;
        let name = params::text(&params, "name")
            .ok_or_else(|| AnchorError::validation("camera position has no name"))?
            .to_owned();
        let altitude = required(&params, "alt")?;
        let longitude = required(&params, "lon")?;
        let latitude = required(&params, "lat")?;
        let time = required(&params, "time")?;
        let vision = params::vector(&params, ["vx", "vy", "vz"]);

        let restore = match self.anchors.get(&name).map(AnchorPoint::kind) {
            Some(AnchorKind::Point | AnchorKind::Observatory) => {
                let pos = params::vector(&params, ["x", "y", "z"]).ok_or_else(|| {
                    AnchorError::validation(format!("'{name}' has no saved position"))
                })?;
                Restore::Position(pos)
            }
            Some(_) => Restore::Keep,
            None => Restore::Register(self.build_anchor(&params)?),
        };

        self.time.set_jday(time);
        self.solar_system.compute_positions(time);
        match restore {
            Restore::Keep => {}
            Restore::Position(pos) => {
                if let Some(anchor) = self.anchors.get_mut(&name) {
                    anchor.set_heliocentric_ecliptic_pos(pos);
                }
            }
            Restore::Register(anchor) => {
                log::debug!("registered {} anchor '{name}'", anchor.kind());
                let _ = self.anchors.insert(name.clone(), anchor);
            }
        }
        self.make_current(&name);
        self.observer.set_altitude(altitude);
        self.observer.set_longitude(longitude);
        self.observer.set_latitude(latitude);
        if let Some(vision) = vision {
            self.navigator.set_local_vision(vision);
        }
        self.update_transform_matrices();
        log::info!("restored camera position on '{name}' at JD {time}");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::super::tests::manager;
    use super::*;
    use crate::util::params::from_pairs;

    fn write_file(text: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(text.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn ini_sections_become_parameter_maps() {
        let text = "# anchors\n\
                    \n\
                    [Home]\n\
                    type = body\n\
                    body_name = Earth\n\
                    [Far Out]\r\n\
                    type = point\r\n\
                    x =  1\n\
                    y = 2\n\
                    # trailing comment\n\
                    z = 3\n";
        let sections = parse_anchor_ini(text).unwrap();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0]["name"], "Home");
        assert_eq!(sections[0]["body_name"], "Earth");
        assert_eq!(sections[1]["name"], "Far Out");
        assert_eq!(sections[1]["type"], "point");
        // Only one space is stripped on each side.
        assert_eq!(sections[1]["x"], " 1");
        assert_eq!(sections[1]["z"], "3");
    }

    #[test]
    fn malformed_ini_is_rejected() {
        assert!(matches!(
            parse_anchor_ini("type = point\n"),
            Err(AnchorError::Parse(_))
        ));
        assert!(matches!(
            parse_anchor_ini("[A]\njust words\n"),
            Err(AnchorError::Parse(_))
        ));
        assert!(parse_anchor_ini("").unwrap().is_empty());
    }

    #[test]
    fn load_registers_each_valid_section() {
        let file = write_file(
            "[Lagrange]\n\
             type = point\n\
             x = 1.01\n\
             y = 0\n\
             z = 0\n\
             \n\
             [Paranal]\n\
             type = observatory\n\
             x = 0.5\n\
             y = 0.5\n\
             z = 0\n\
             \n\
             [Station]\n\
             type = orbit\n\
             coord_func = circular_orbit\n\
             orbit_radius = 0.0001\n\
             orbit_period = 0.06\n\
             parent = Earth\n\
             \n\
             [Barycenter]\n\
             type = orbit\n\
             coord_func = still_orbit\n\
             orbit_x = 0\n\
             orbit_y = 0\n\
             orbit_z = 0\n\
             orbit_center_x = 0.001\n\
             orbit_center_y = 0\n\
             orbit_center_z = 0\n\
             \n\
             [Luna]\n\
             type = body\n\
             body_name = Moon\n\
             \n\
             [Broken]\n\
             type = body\n\
             body_name = Vulcan\n",
        );
        let mut m = manager();
        let added = m.load(file.path()).unwrap();
        assert_eq!(added, 5);
        assert_eq!(m.anchor("Paranal").unwrap().kind(), AnchorKind::Observatory);
        assert_eq!(m.anchor("Station").unwrap().kind(), AnchorKind::Orbit);
        assert_eq!(m.anchor("Luna").unwrap().kind(), AnchorKind::Body);
        assert!(m.anchor("Broken").is_none());
        assert_eq!(m.len(), 7);
    }

    #[test]
    fn load_reports_missing_files() {
        let mut m = manager();
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            m.load(&dir.path().join("absent.ini")),
            Err(AnchorError::Io(_))
        ));
    }

    fn prepare(m: &mut AnchorManager, name: &str) {
        m.switch_to_anchor(name).unwrap();
        m.time().advance(12_345.0);
        m.observer_mut().set_altitude(1_234.5);
        m.observer_mut().set_longitude(-71.25);
        m.observer_mut().set_latitude(12.125);
        m.navigator_mut().set_local_vision(DVec3::new(0.0, 1.0, 1.0));
    }

    fn with_every_variant() -> AnchorManager {
        let mut m = manager();
        m.init_first_anchor("Earth").unwrap();
        m.add_anchor("Paranal", AnchorPoint::observatory(DVec3::new(0.2, 0.9, 0.0)))
            .unwrap();
        m.add_anchor_from_params(&from_pairs([
            ("name", "Station"),
            ("type", "orbit"),
            ("coord_func", "circular_orbit"),
            ("orbit_radius", "0.0001"),
            ("orbit_period", "0.06"),
            ("parent", "Earth"),
        ]))
        .unwrap();
        m
    }

    #[test]
    fn camera_position_round_trips_for_every_variant() {
        for name in ["Earth", "Deep Space", "Paranal", "Station"] {
            let mut m = with_every_variant();
            prepare(&mut m, name);
            let jd = m.time().jday();
            let saved_anchor = m.anchor(name).unwrap().save_anchor();
            let vision = m.navigator().local_vision();
            let file = tempfile::NamedTempFile::new().unwrap();
            m.save_camera_position(file.path()).unwrap();

            // Same manager, after wandering off.
            m.switch_to_anchor("Earth").unwrap();
            m.observer_mut().set_altitude(0.0);
            m.time().advance(99.0);
            m.load_camera_position(file.path()).unwrap();
            assert_eq!(m.current_anchor_name(), Some(name));
            assert_eq!(m.observer().altitude(), 1_234.5);
            assert_eq!(m.observer().longitude(), -71.25);
            assert_eq!(m.observer().latitude(), 12.125);
            assert_eq!(m.time().jday(), jd);
            assert!(m.navigator().local_vision().abs_diff_eq(vision, 1e-15));

            // Fresh manager that has never heard of the anchor.
            let mut fresh = manager();
            let _ = fresh.remove_anchor(name);
            fresh.load_camera_position(file.path()).unwrap();
            assert_eq!(fresh.current_anchor_name(), Some(name));
            assert_eq!(fresh.observer().altitude(), 1_234.5);
            assert_eq!(fresh.observer().longitude(), -71.25);
            assert_eq!(fresh.observer().latitude(), 12.125);
            assert_eq!(fresh.time().jday(), jd);
            assert_eq!(fresh.current_anchor().unwrap().save_anchor(), saved_anchor);
        }
    }

    #[test]
    fn saved_file_lists_the_view() {
        let mut m = with_every_variant();
        prepare(&mut m, "Deep Space");
        let file = tempfile::NamedTempFile::new().unwrap();
        m.save_camera_position(file.path()).unwrap();
        let text = std::fs::read_to_string(file.path()).unwrap();
        let keys: Vec<&str> = text
            .lines()
            .map(|line| line.split_once(' ').unwrap().0)
            .collect();
        assert_eq!(
            keys,
            ["name", "type", "x", "y", "z", "alt", "lon", "lat", "time", "vx", "vy", "vz"]
        );
        assert!(text.starts_with("name Deep Space\ntype point\n"));
    }

    #[test]
    fn loading_is_refused_while_moving_or_incomplete() {
        let mut m = with_every_variant();
        m.switch_to_anchor("Deep Space").unwrap();
        let file = tempfile::NamedTempFile::new().unwrap();
        m.save_camera_position(file.path()).unwrap();

        m.move_to(DVec3::ZERO, 30.0).unwrap();
        assert!(matches!(
            m.load_camera_position(file.path()),
            Err(AnchorError::StateConflict(_))
        ));
        assert!(m.cancel_move());

        let jd = m.time().jday();
        let partial = write_file("name Earth\ntype body\nbody_name Earth\nalt 10\n");
        assert!(matches!(
            m.load_camera_position(partial.path()),
            Err(AnchorError::Parse(_))
        ));
        assert_eq!(m.current_anchor_name(), Some("Deep Space"));
        assert_eq!(m.time().jday(), jd);
    }

    #[test]
    fn non_finite_camera_values_are_parse_errors() {
        let mut m = with_every_variant();
        m.switch_to_anchor("Deep Space").unwrap();
        m.observer_mut().set_altitude(42.0);
        let jd = m.time().jday();

        for (alt, time) in [("nan", "2451545.0"), ("10", "inf"), ("-inf", "2451545.0")] {
            let text = format!(
                "name Earth\ntype body\nbody_name Earth\n\
                 alt {alt}\nlon 0\nlat 0\ntime {time}\n"
            );
            let file = write_file(&text);
            assert!(matches!(
                m.load_camera_position(file.path()),
                Err(AnchorError::Parse(_))
            ));
            assert_eq!(m.current_anchor_name(), Some("Deep Space"));
            assert_eq!(m.time().jday(), jd);
            assert_eq!(m.observer().altitude(), 42.0);
        }
    }
}
