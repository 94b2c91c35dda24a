//! Eased straight-line travel of the current anchor.

use glam::DVec3;

use super::AnchorManager;
use crate::error::AnchorError;
use crate::solar::Body;
use crate::util::frame::{self, SECONDS_PER_DAY};

/// A travel in progress. Times are Julian days, positions heliocentric AU.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Travel {
    /// Anchor position when the travel started.
    pub start_position: DVec3,
    /// Unit vector from start to destination.
    pub direction: DVec3,
    /// Distance from start to destination, AU.
    pub distance: f64,
    /// Julian day the travel started.
    pub start_time: f64,
    /// Duration in days.
    pub travel_time: f64,
    /// Julian day the travel ends.
    pub arrival_time: f64,
}

impl Travel {
    fn new(start: DVec3, destination: DVec3, now: f64, seconds: f64) -> Self {
        let offset = destination - start;
        let travel_time = seconds / SECONDS_PER_DAY;
        Self {
            start_position: start,
            direction: offset.normalize_or_zero(),
            distance: offset.length(),
            start_time: now,
            travel_time,
            arrival_time: now + travel_time,
        }
    }

    /// Fraction of the travel time elapsed at `jd`, clamped to [0, 1].
    fn progress(&self, jd: f64) -> f64 {
        if self.travel_time <= 0.0 {
            return 1.0;
        }
        let t = jd.clamp(self.start_time, self.arrival_time);
        (t - self.start_time) / self.travel_time
    }

    /// Position after covering the eased fraction `eased` of the distance.
    fn position(&self, eased: f64) -> DVec3 {
        self.start_position + self.direction * (self.distance * eased)
    }

    /// Where the travel ends.
    #[must_use]
    pub fn destination(&self) -> DVec3 {
        self.position(1.0)
    }
}

/// Viewpoint motion state.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TravelState {
    /// Not travelling.
    #[default]
    Idle,
    /// Travelling toward a destination.
    Moving(Travel),
}

/// Travel durations are finite and non-negative seconds.
fn check_duration(duration: f64) -> Result<(), AnchorError> {
    if duration.is_finite() && duration >= 0.0 {
        Ok(())
    } else {
        Err(AnchorError::validation(format!(
            "invalid travel duration {duration}"
        )))
    }
}

impl AnchorManager {
    /// Whether a travel is in progress.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        matches!(self.travel, TravelState::Moving(_))
    }

    /// The travel in progress.
    #[must_use]
    pub fn travel(&self) -> Option<&Travel> {
        match &self.travel {
            TravelState::Moving(travel) => Some(travel),
            TravelState::Idle => None,
        }
    }

    fn check_can_move(&self) -> Result<DVec3, AnchorError> {
        if self.is_moving() {
            return Err(AnchorError::conflict("already moving"));
        }
        let anchor = self.require_current()?;
        if anchor.is_on_body() {
            return Err(AnchorError::conflict(
                "cannot move while standing on a body",
            ));
        }
        Ok(anchor.heliocentric_ecliptic_pos())
    }

    /// Travel the current anchor to `target` over `duration` seconds.
    /// A zero duration snaps immediately and stays idle.
    ///
    /// # Errors
    ///
    /// [`AnchorError::StateConflict`] if already moving or on a body,
    /// [`AnchorError::Validation`] for a negative or non-finite duration, or a
    /// non-finite target.
    pub fn move_to(
        &mut self,
        target: DVec3,
        duration: f64,
    ) -> Result<(), AnchorError> {
        let start = self.check_can_move()?;
        check_duration(duration)?;
        if !target.is_finite() {
            return Err(AnchorError::validation(format!(
                "invalid travel target {target}"
            )));
        }
        self.start_travel(start, target, duration);
        Ok(())
    }

    /// Travel toward `body`, stopping `altitude_km` above its surface at the
    /// position it will have on arrival. A negative altitude stops at
    /// `approach_radii` body radii from its centre.
    ///
    /// # Errors
    ///
    /// As [`move_to`](Self::move_to), and [`AnchorError::Validation`] for a
    /// non-finite altitude.
    pub fn move_to_body(
        &mut self,
        body: &Body,
        duration: f64,
        altitude_km: f64,
    ) -> Result<(), AnchorError> {
        let start = self.check_can_move()?;
        check_duration(duration)?;
        if !altitude_km.is_finite() {
            return Err(AnchorError::validation(format!(
                "invalid travel altitude {altitude_km}"
            )));
        }
        let arrival = self.time.jday() + duration / SECONDS_PER_DAY;
        let body_pos = body.position_at(arrival);
        let approach = (body_pos - start).normalize_or_zero();
        let stand_off = if altitude_km < 0.0 {
            body.radius() * self.travel_options.approach_radii
        } else {
            body.radius() + frame::km_to_au(altitude_km)
        };
        log::debug!(
            "approaching '{}' to {stand_off} AU from its centre",
            body.english_name()
        );
        self.start_travel(start, body_pos - approach * stand_off, duration);
        Ok(())
    }

    /// [`move_to_body`](Self::move_to_body) resolving the body by English
    /// name.
    ///
    /// # Errors
    ///
    /// [`AnchorError::Lookup`] for an unknown body, otherwise as
    /// [`move_to_body`](Self::move_to_body).
    pub fn move_to_body_named(
        &mut self,
        name: &str,
        duration: f64,
        altitude_km: f64,
    ) -> Result<(), AnchorError> {
        let body = self
            .solar_system
            .search_by_english_name(name)
            .ok_or_else(|| AnchorError::lookup(format!("unknown body '{name}'")))?;
        self.move_to_body(&body, duration, altitude_km)
    }

    /// Stop a travel in progress where it currently is. Returns whether a
    /// travel was cancelled.
    pub fn cancel_move(&mut self) -> bool {
        if self.is_moving() {
            log::info!("travel cancelled");
            self.travel = TravelState::Idle;
            true
        } else {
            false
        }
    }

    fn start_travel(&mut self, start: DVec3, destination: DVec3, seconds: f64) {
        let now = self.time.jday();
        if seconds == 0.0 {
            if let Some(anchor) = self.current_anchor_mut() {
                anchor.set_heliocentric_ecliptic_pos(destination);
            }
            log::debug!("snapped to {destination}");
            return;
        }
        let travel = Travel::new(start, destination, now, seconds);
        log::info!(
            "travelling {} AU over {seconds} s, arriving at JD {}",
            travel.distance,
            travel.arrival_time
        );
        self.travel = TravelState::Moving(travel);
    }

    /// Place the current anchor along the travel for `jd`, going idle on
    /// arrival.
    pub(super) fn advance_travel(&mut self, jd: f64) {
        let TravelState::Moving(travel) = self.travel else {
            return;
        };
        let eased = self
            .travel_options
            .easing
            .evaluate(travel.progress(jd));
        let arrived = jd >= travel.arrival_time;
        let pos = if arrived {
            travel.destination()
        } else {
            travel.position(eased)
        };
        if let Some(anchor) = self.current_anchor_mut() {
            anchor.set_heliocentric_ecliptic_pos(pos);
        }
        if arrived {
            log::info!("arrived at {pos}");
            self.travel = TravelState::Idle;
        }
    }
}
