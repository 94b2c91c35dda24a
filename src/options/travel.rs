use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::util::easing::EasingFunction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Travel", inline)]
#[serde(default)]
/// Eased travel parameters.
pub struct TravelOptions {
    /// Curve mapping travel time to travelled distance.
    #[schemars(title = "Easing")]
    pub easing: EasingFunction,
    /// Stand-off distance, in body radii, when travelling to a body without
    /// an explicit altitude.
    #[schemars(
        title = "Approach Distance (radii)",
        range(min = 1.0, max = 100.0),
        extend("step" = 0.5)
    )]
    pub approach_radii: f64,
}

impl Default for TravelOptions {
    fn default() -> Self {
        Self {
            easing: EasingFunction::DEFAULT,
            approach_radii: 5.0,
        }
    }
}
