use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Anchors", inline)]
#[serde(default)]
/// Anchor registry and rotation-follow parameters.
pub struct AnchorOptions {
    /// Anchor selected at startup.
    #[schemars(skip)]
    pub first_anchor: String,
    /// The camera stops co-rotating with its body above
    /// `radius * rotation_multiplier_condition` of altitude.
    #[schemars(
        title = "Rotation Follow Limit (radii)",
        range(min = 0.5, max = 50.0),
        extend("step" = 0.5)
    )]
    pub rotation_multiplier_condition: f64,
}

impl Default for AnchorOptions {
    fn default() -> Self {
        Self {
            first_anchor: "Earth".to_owned(),
            rotation_multiplier_condition: 4.0,
        }
    }
}
