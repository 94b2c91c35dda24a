//! The anchor manager: named registry and current-viewpoint state machine.
//!
//! The manager exclusively owns every [`AnchorPoint`] in a name-keyed
//! registry. The current anchor is a registry key, so removing or replacing
//! an entry can never leave the observer pointing at a freed frame, and the
//! current entry itself cannot be removed.
//!
//! Per tick, [`AnchorManager::update`] either advances an in-flight travel
//! or refreshes the current anchor's frame, then applies the rotation-follow
//! correction when standing on a body.

mod alignment;
mod persistence;
mod rotation;
mod travel;

use std::rc::{Rc, Weak};

use glam::DVec3;
use rustc_hash::FxHashMap;

use self::rotation::RotationFollow;
pub use self::travel::{Travel, TravelState};
use super::creator::{AnchorCreators, CreatorContext};
use super::{AnchorKind, AnchorPoint, BodyAnchor};
use crate::error::AnchorError;
use crate::navigator::Navigator;
use crate::observer::{Observer, ObserverView};
use crate::options::{AlignmentOptions, Options, TravelOptions};
use crate::solar::{Body, DefaultOrbitCreator, OrbitCreator, SolarSystem};
use crate::time::TimeMgr;
use crate::util::params::{self, Params};

/// Owns the anchors, the observer and the navigator, and moves the
/// viewpoint between frames.
pub struct AnchorManager {
    anchors: FxHashMap<String, AnchorPoint>,
    current: Option<String>,
    creators: AnchorCreators,
    orbit_creator: Box<dyn OrbitCreator>,
    solar_system: Rc<SolarSystem>,
    time: Rc<TimeMgr>,
    observer: Observer,
    navigator: Navigator,
    travel: TravelState,
    rotation: RotationFollow,
    travel_options: TravelOptions,
    alignment_options: AlignmentOptions,
}

impl AnchorManager {
    /// Empty manager resolving bodies against `solar_system` and reading
    /// the clock from `time`.
    #[must_use]
    pub fn new(
        solar_system: Rc<SolarSystem>,
        time: Rc<TimeMgr>,
        options: &Options,
    ) -> Self {
        let now = time.jday();
        Self {
            anchors: FxHashMap::default(),
            current: None,
            creators: AnchorCreators::new(),
            orbit_creator: Box::new(DefaultOrbitCreator::new()),
            solar_system,
            time,
            observer: Observer::new(),
            navigator: Navigator::new(),
            travel: TravelState::Idle,
            rotation: RotationFollow::new(
                options.anchors.rotation_multiplier_condition,
                now,
            ),
            travel_options: options.travel.clone(),
            alignment_options: options.alignment.clone(),
        }
    }

    /// Replace the orbit creator used for `type = orbit` anchors.
    #[must_use]
    pub fn with_orbit_creator(mut self, creator: Box<dyn OrbitCreator>) -> Self {
        self.orbit_creator = creator;
        self
    }

    // ── Registry ────────────────────────────────────────────────────────

    /// Register `anchor` under `name`.
    ///
    /// # Errors
    ///
    /// [`AnchorError::Validation`] for an empty name,
    /// [`AnchorError::StateConflict`] if the name is taken. The registry is
    /// left untouched on error.
    pub fn add_anchor(
        &mut self,
        name: &str,
        anchor: AnchorPoint,
    ) -> Result<(), AnchorError> {
        if name.is_empty() {
            return Err(AnchorError::validation("anchor name is empty"));
        }
        if self.anchors.contains_key(name) {
            return Err(AnchorError::conflict(format!(
                "anchor '{name}' already registered"
            )));
        }
        log::debug!("registered {} anchor '{name}'", anchor.kind());
        let _ = self.anchors.insert(name.to_owned(), anchor);
        Ok(())
    }

    /// Register a body anchor on `body` under `name`.
    ///
    /// # Errors
    ///
    /// [`AnchorError::Lookup`] if the body no longer exists, otherwise as
    /// [`add_anchor`](Self::add_anchor).
    pub fn add_body_anchor(
        &mut self,
        name: &str,
        body: &Weak<Body>,
    ) -> Result<(), AnchorError> {
        let anchor = BodyAnchor::from_weak(body).ok_or_else(|| {
            AnchorError::lookup(format!("body for anchor '{name}' is gone"))
        })?;
        self.add_anchor(name, AnchorPoint::Body(anchor))
    }

    /// Build an anchor from `params` and register it under
    /// `params["name"]`.
    ///
    /// # Errors
    ///
    /// [`AnchorError::Validation`] when the name is missing, otherwise the
    /// creator's or [`add_anchor`](Self::add_anchor)'s error.
    pub fn add_anchor_from_params(
        &mut self,
        params: &Params,
    ) -> Result<(), AnchorError> {
        let name = params::text(params, "name")
            .ok_or_else(|| AnchorError::validation("anchor has no name"))?
            .to_owned();
        if self.anchors.contains_key(&name) {
            return Err(AnchorError::conflict(format!(
                "anchor '{name}' already registered"
            )));
        }
        let anchor = self.build_anchor(params)?;
        self.add_anchor(&name, anchor)
    }

    fn build_anchor(&self, params: &Params) -> Result<AnchorPoint, AnchorError> {
        let ctx = CreatorContext {
            solar_system: &self.solar_system,
            orbit_creator: self.orbit_creator.as_ref(),
        };
        self.creators.handle(params, ctx)
    }

    /// Remove and drop the anchor registered under `name`.
    ///
    /// # Errors
    ///
    /// [`AnchorError::StateConflict`] if it is the current anchor,
    /// [`AnchorError::Lookup`] if unknown.
    pub fn remove_anchor(&mut self, name: &str) -> Result<(), AnchorError> {
        if self.current.as_deref() == Some(name) {
            return Err(AnchorError::conflict(format!(
                "cannot remove '{name}': it is the current anchor"
            )));
        }
        match self.anchors.remove(name) {
            Some(anchor) => {
                log::debug!("removed {} anchor '{name}'", anchor.kind());
                Ok(())
            }
            None => Err(AnchorError::lookup(format!("unknown anchor '{name}'"))),
        }
    }

    /// Remove every anchor that depends on `body` (body anchors on it and
    /// orbit anchors around it), for when the body is about to be deleted.
    /// If the current anchor is one of them, the live view is first frozen
    /// into a free point named `"<body>-point"`, or `"<body>-point-<n>"`
    /// when that name is taken by another kind of anchor. Returns the
    /// removed names.
    pub fn remove_body_anchors(&mut self, body: &Body) -> Vec<String> {
        let mut doomed: Vec<String> = self
            .anchors
            .iter()
            .filter(|(_, anchor)| anchor.depends_on(body))
            .map(|(name, _)| name.clone())
            .collect();
        doomed.sort();

        if let Some(current) = self.current.clone() {
            if doomed.contains(&current) {
                let refuge = self.free_point_name(body.english_name());
                if let Err(e) = self.transition_to_point(&refuge) {
                    log::error!(
                        "cannot leave '{current}' before its body goes \
                         away: {e}"
                    );
                    doomed.retain(|name| *name != current);
                }
            }
        }

        for name in &doomed {
            let _ = self.anchors.remove(name);
        }
        if !doomed.is_empty() {
            log::info!(
                "removed anchors on '{}': {}",
                body.english_name(),
                doomed.join(", ")
            );
        }
        doomed
    }

    /// First of `"<body>-point"`, `"<body>-point-2"`, ... that is unused or
    /// already a point anchor.
    fn free_point_name(&self, body_name: &str) -> String {
        let base = format!("{body_name}-point");
        let mut name = base.clone();
        let mut n = 2_u32;
        while self
            .anchors
            .get(&name)
            .is_some_and(|anchor| anchor.kind() != AnchorKind::Point)
        {
            name = format!("{base}-{n}");
            n += 1;
        }
        name
    }

    // ── Current anchor ──────────────────────────────────────────────────

    /// Select the first anchor at startup.
    ///
    /// # Errors
    ///
    /// [`AnchorError::Lookup`] if `name` is unknown. Callers treat this as
    /// fatal: nothing can be rendered without a viewpoint.
    pub fn init_first_anchor(&mut self, name: &str) -> Result<(), AnchorError> {
        if !self.anchors.contains_key(name) {
            return Err(AnchorError::lookup(format!(
                "initial anchor '{name}' is not registered"
            )));
        }
        self.make_current(name);
        log::info!("initial anchor '{name}'");
        Ok(())
    }

    /// Jump instantly to the anchor registered under `name`, keeping the
    /// observer's latitude, longitude and altitude.
    ///
    /// # Errors
    ///
    /// [`AnchorError::StateConflict`] while travelling,
    /// [`AnchorError::Lookup`] if unknown.
    pub fn switch_to_anchor(&mut self, name: &str) -> Result<(), AnchorError> {
        if self.is_moving() {
            return Err(AnchorError::conflict(format!(
                "cannot switch to '{name}' while moving"
            )));
        }
        if !self.anchors.contains_key(name) {
            return Err(AnchorError::lookup(format!("unknown anchor '{name}'")));
        }
        self.make_current(name);
        log::info!("switched to anchor '{name}'");
        Ok(())
    }

    fn make_current(&mut self, name: &str) {
        let jd = self.time.jday();
        if let Some(anchor) = self.anchors.get_mut(name) {
            anchor.update(jd);
        }
        self.current = Some(name.to_owned());
        self.rotation.reset(jd);
    }

    /// Name of the current anchor.
    #[must_use]
    pub fn current_anchor_name(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// The current anchor.
    #[must_use]
    pub fn current_anchor(&self) -> Option<&AnchorPoint> {
        self.anchors.get(self.current.as_deref()?)
    }

    fn current_anchor_mut(&mut self) -> Option<&mut AnchorPoint> {
        self.anchors.get_mut(self.current.as_deref()?)
    }

    fn require_current(&self) -> Result<&AnchorPoint, AnchorError> {
        self.current_anchor()
            .ok_or_else(|| AnchorError::conflict("no current anchor"))
    }

    /// Anchor registered under `name`.
    #[must_use]
    pub fn anchor(&self, name: &str) -> Option<&AnchorPoint> {
        self.anchors.get(name)
    }

    /// Registered anchor names, sorted.
    #[must_use]
    pub fn anchor_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> =
            self.anchors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered anchors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.anchors.len()
    }

    /// Whether no anchor is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.anchors.is_empty()
    }

    /// Kind of the current anchor.
    #[must_use]
    pub fn current_kind(&self) -> Option<AnchorKind> {
        self.current_anchor().map(AnchorPoint::kind)
    }

    // ── Observer ────────────────────────────────────────────────────────

    /// The observer.
    #[must_use]
    pub fn observer(&self) -> &Observer {
        &self.observer
    }

    /// Mutable observer, for navigation input (latitude, longitude,
    /// altitude).
    pub fn observer_mut(&mut self) -> &mut Observer {
        &mut self.observer
    }

    /// The navigator.
    #[must_use]
    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Mutable navigator, for view direction input.
    pub fn navigator_mut(&mut self) -> &mut Navigator {
        &mut self.navigator
    }

    /// Observer paired with the current anchor.
    #[must_use]
    pub fn view(&self) -> Option<ObserverView<'_>> {
        Some(self.observer.view(self.current_anchor()?))
    }

    /// Observer heliocentric position now.
    #[must_use]
    pub fn observer_heliocentric_position(&self) -> Option<DVec3> {
        let jd = self.time.jday();
        self.view().map(|view| view.heliocentric_position(jd))
    }

    /// Whether the observer stands on a body.
    #[must_use]
    pub fn is_on_body(&self) -> bool {
        self.current_anchor().is_some_and(AnchorPoint::is_on_body)
    }

    /// Body the observer stands on.
    #[must_use]
    pub fn home_body(&self) -> Option<Rc<Body>> {
        self.current_anchor().and_then(AnchorPoint::body)
    }

    /// Recompute the navigator's transforms for the current view.
    pub fn update_transform_matrices(&mut self) {
        let jd = self.time.jday();
        let Some(name) = self.current.as_deref() else {
            return;
        };
        if let Some(anchor) = self.anchors.get(name) {
            self.navigator
                .update_transform_matrices(&self.observer.view(anchor), jd);
        }
    }

    /// The shared clock.
    #[must_use]
    pub fn time(&self) -> &Rc<TimeMgr> {
        &self.time
    }

    /// The solar system bodies are resolved against.
    #[must_use]
    pub fn solar_system(&self) -> &Rc<SolarSystem> {
        &self.solar_system
    }

    // ── Tick ────────────────────────────────────────────────────────────

    /// Advance one simulation tick.
    pub fn update(&mut self) {
        let jd = self.time.jday();
        if self.is_moving() {
            self.advance_travel(jd);
        } else if let Some(anchor) = self.current_anchor_mut() {
            anchor.update(jd);
        }
        self.follow_body_rotation(jd);
        self.update_transform_matrices();
    }
}
