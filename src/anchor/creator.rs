//! Anchor construction from loosely-typed parameter maps.
//!
//! [`AnchorCreators`] is an ordered list of `type -> builder` matchers,
//! tried in the order point, body, orbit, observatory. The first builder
//! whose tag equals `params["type"]` decides the outcome; an unknown type
//! is rejected once the list is exhausted.

use glam::DVec3;

use super::{AnchorKind, AnchorPoint, ObservatoryAnchor, OrbitAnchor};
use crate::error::AnchorError;
use crate::solar::{OrbitCreator, SolarSystem};
use crate::util::params::{self, Params};

/// Collaborators the builders resolve names against.
#[derive(Clone, Copy)]
pub struct CreatorContext<'a> {
    /// Where `body_name` and `parent` are looked up.
    pub solar_system: &'a SolarSystem,
    /// Builds the orbit of `type = orbit` anchors.
    pub orbit_creator: &'a dyn OrbitCreator,
}

type AnchorBuilder =
    fn(&Params, CreatorContext<'_>) -> Result<AnchorPoint, AnchorError>;

/// Ordered anchor builders.
pub struct AnchorCreators {
    builders: Vec<(AnchorKind, AnchorBuilder)>,
}

impl AnchorCreators {
    /// Builders for every anchor kind in the fixed order point, body,
    /// orbit, observatory.
    #[must_use]
    pub fn new() -> Self {
        let builders: [(AnchorKind, AnchorBuilder); 4] = [
            (AnchorKind::Point, build_point),
            (AnchorKind::Body, build_body),
            (AnchorKind::Orbit, build_orbit),
            (AnchorKind::Observatory, build_observatory),
        ];
        Self {
            builders: builders.to_vec(),
        }
    }

    /// Build the anchor described by `params`.
    ///
    /// # Errors
    ///
    /// [`AnchorError::Validation`] for an unknown type or missing fields,
    /// [`AnchorError::Lookup`] when a body or parent cannot be resolved.
    pub fn handle(
        &self,
        params: &Params,
        ctx: CreatorContext<'_>,
    ) -> Result<AnchorPoint, AnchorError> {
        let kind = params::text(params, "type").unwrap_or("");
        for (tag, build) in &self.builders {
            if tag.as_str() == kind {
                return build(params, ctx);
            }
        }
        Err(AnchorError::validation(format!(
            "anchor creator: unknown type '{kind}'"
        )))
    }
}

impl Default for AnchorCreators {
    fn default() -> Self {
        Self::new()
    }
}

fn position(params: &Params, kind: AnchorKind) -> Result<DVec3, AnchorError> {
    params::vector(params, ["x", "y", "z"]).ok_or_else(|| {
        AnchorError::validation(format!(
            "{kind} anchor: x, y and z must all be set"
        ))
    })
}

fn build_point(
    params: &Params,
    _ctx: CreatorContext<'_>,
) -> Result<AnchorPoint, AnchorError> {
    Ok(AnchorPoint::point(position(params, AnchorKind::Point)?))
}

fn build_observatory(
    params: &Params,
    _ctx: CreatorContext<'_>,
) -> Result<AnchorPoint, AnchorError> {
    let pos = position(params, AnchorKind::Observatory)?;
    Ok(AnchorPoint::Observatory(ObservatoryAnchor::new(pos)))
}

fn build_body(
    params: &Params,
    ctx: CreatorContext<'_>,
) -> Result<AnchorPoint, AnchorError> {
    let name = params::text(params, "body_name").unwrap_or("");
    let body = ctx.solar_system.search_by_english_name(name).ok_or_else(|| {
        AnchorError::lookup(format!("body anchor: unknown body '{name}'"))
    })?;
    Ok(AnchorPoint::on_body(&body))
}

fn build_orbit(
    params: &Params,
    ctx: CreatorContext<'_>,
) -> Result<AnchorPoint, AnchorError> {
    let orbit = ctx.orbit_creator.handle(params).ok_or_else(|| {
        AnchorError::validation("orbit anchor: could not create the orbit")
    })?;

    let anchor = match params::text(params, "parent") {
        None => {
            let center = params::vector(
                params,
                ["orbit_center_x", "orbit_center_y", "orbit_center_z"],
            )
            .ok_or_else(|| {
                AnchorError::validation(
                    "orbit anchor: parentless orbit needs orbit_center_x, \
                     orbit_center_y and orbit_center_z",
                )
            })?;
            OrbitAnchor::with_center(orbit, center)
        }
        Some(parent) => {
            let body = ctx
                .solar_system
                .search_by_english_name(parent)
                .ok_or_else(|| {
                    AnchorError::lookup(format!(
                        "orbit anchor: unknown parent '{parent}'"
                    ))
                })?;
            OrbitAnchor::with_parent(orbit, &body)
        }
    };
    Ok(AnchorPoint::Orbit(anchor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solar::DefaultOrbitCreator;
    use crate::test_support;
    use crate::util::params::from_pairs;

    fn build_in(
        system: &SolarSystem,
        params: &Params,
    ) -> Result<AnchorPoint, AnchorError> {
        let orbits = DefaultOrbitCreator::new();
        let ctx = CreatorContext {
            solar_system: system,
            orbit_creator: &orbits,
        };
        AnchorCreators::new().handle(params, ctx)
    }

    /// Builds against a throwaway system: only the outcome's kind survives.
    fn build(params: &Params) -> Result<AnchorPoint, AnchorError> {
        build_in(&test_support::solar_system(), params)
    }

    #[test]
    fn point_and_observatory_need_all_coordinates() {
        let ok = from_pairs([("type", "point"), ("x", "1"), ("y", "0"), ("z", "0")]);
        assert_eq!(build(&ok).unwrap().kind(), AnchorKind::Point);

        let obs = from_pairs([
            ("type", "observatory"),
            ("x", "1"),
            ("y", "0"),
            ("z", "0"),
        ]);
        assert_eq!(build(&obs).unwrap().kind(), AnchorKind::Observatory);

        let missing = from_pairs([("type", "point"), ("x", "1"), ("y", "0")]);
        assert!(matches!(build(&missing), Err(AnchorError::Validation(_))));

        let empty = from_pairs([
            ("type", "observatory"),
            ("x", "1"),
            ("y", ""),
            ("z", "0"),
        ]);
        assert!(matches!(build(&empty), Err(AnchorError::Validation(_))));
    }

    #[test]
    fn body_needs_a_known_body() {
        let system = test_support::solar_system();
        let ok = from_pairs([("type", "body"), ("body_name", "Earth")]);
        let anchor = build_in(&system, &ok).unwrap();
        assert_eq!(anchor.kind(), AnchorKind::Body);
        assert!(anchor.is_on_body());
        assert_eq!(anchor.body().unwrap().english_name(), "Earth");

        // The anchor only holds the body weakly.
        drop(system);
        assert!(!anchor.is_on_body());

        let unknown = from_pairs([("type", "body"), ("body_name", "Vulcan")]);
        assert!(matches!(build(&unknown), Err(AnchorError::Lookup(_))));
    }

    #[test]
    fn orbit_with_parent_or_fixed_center() {
        let with_parent = from_pairs([
            ("type", "orbit"),
            ("coord_func", "circular_orbit"),
            ("orbit_radius", "0.001"),
            ("orbit_period", "1"),
            ("parent", "Earth"),
        ]);
        let anchor = build(&with_parent).unwrap();
        assert_eq!(anchor.kind(), AnchorKind::Orbit);
        assert!(!anchor.is_on_body());

        let centered = from_pairs([
            ("type", "orbit"),
            ("coord_func", "still_orbit"),
            ("orbit_x", "0"),
            ("orbit_y", "0"),
            ("orbit_z", "0"),
            ("orbit_center_x", "1"),
            ("orbit_center_y", "1"),
            ("orbit_center_z", "0"),
        ]);
        assert_eq!(build(&centered).unwrap().kind(), AnchorKind::Orbit);
    }

    #[test]
    fn orbit_failures() {
        let bad_orbit = from_pairs([("type", "orbit"), ("coord_func", "nope")]);
        assert!(matches!(build(&bad_orbit), Err(AnchorError::Validation(_))));

        let no_center = from_pairs([
            ("type", "orbit"),
            ("coord_func", "circular_orbit"),
            ("orbit_radius", "1"),
            ("orbit_period", "1"),
        ]);
        assert!(matches!(build(&no_center), Err(AnchorError::Validation(_))));

        let bad_parent = from_pairs([
            ("type", "orbit"),
            ("coord_func", "circular_orbit"),
            ("orbit_radius", "1"),
            ("orbit_period", "1"),
            ("parent", "Vulcan"),
        ]);
        assert!(matches!(build(&bad_parent), Err(AnchorError::Lookup(_))));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let params = from_pairs([("type", "wormhole")]);
        assert!(matches!(build(&params), Err(AnchorError::Validation(_))));
        assert!(build(&Params::default()).is_err());
    }
}
