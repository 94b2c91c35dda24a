//! Registry of the bodies the viewpoint can stand on or travel to.

use std::cell::RefCell;
use std::rc::Rc;

use super::body::Body;

/// Owns every [`Body`]. Bodies are added parents-first so that a single
/// pass of [`compute_positions`](Self::compute_positions) sees parents
/// before their children.
#[derive(Debug, Default)]
pub struct SolarSystem {
    bodies: RefCell<Vec<Rc<Body>>>,
}

impl SolarSystem {
    /// Empty solar system.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `body` and return a shared handle to it.
    pub fn add_body(&self, body: Body) -> Rc<Body> {
        let body = Rc::new(body);
        self.bodies.borrow_mut().push(Rc::clone(&body));
        body
    }

    /// Remove the body named `name` and hand back the last strong
    /// reference. Callers must drop anchors referencing it first, see
    /// [`AnchorManager::remove_body_anchors`].
    ///
    /// [`AnchorManager::remove_body_anchors`]: crate::anchor::manager::AnchorManager::remove_body_anchors
    pub fn remove_body(&self, name: &str) -> Option<Rc<Body>> {
        let mut bodies = self.bodies.borrow_mut();
        let idx = bodies.iter().position(|b| b.english_name() == name)?;
        Some(bodies.remove(idx))
    }

    /// Look a body up by its English name.
    #[must_use]
    pub fn search_by_english_name(&self, name: &str) -> Option<Rc<Body>> {
        self.bodies
            .borrow()
            .iter()
            .find(|b| b.english_name() == name)
            .cloned()
    }

    /// Refresh every body's cached heliocentric position for `jd`.
    pub fn compute_positions(&self, jd: f64) {
        for body in self.bodies.borrow().iter() {
            body.compute_position(jd);
        }
    }

    /// Number of bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.borrow().len()
    }

    /// Whether the system has no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use glam::DVec3;

    use super::*;
    use crate::solar::orbit::StillOrbit;

    #[test]
    fn add_search_remove() {
        let system = SolarSystem::new();
        let earth = system.add_body(Body::new(
            "Earth",
            6371.0,
            Box::new(StillOrbit { offset: DVec3::X }),
        ));
        assert_eq!(system.len(), 1);

        let found = system.search_by_english_name("Earth").unwrap();
        assert!(Rc::ptr_eq(&found, &earth));
        assert!(system.search_by_english_name("Vulcan").is_none());

        system.compute_positions(0.0);
        assert_eq!(earth.heliocentric_ecliptic_pos(), DVec3::X);

        let removed = system.remove_body("Earth").unwrap();
        assert!(Rc::ptr_eq(&removed, &earth));
        assert!(system.is_empty());
        assert!(system.remove_body("Earth").is_none());
    }
}
