use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Surface Alignment", inline)]
#[serde(default)]
/// Stop widths of the longitude/latitude search used when landing on a
/// body.
pub struct AlignmentOptions {
    /// Longitude interval width at which the search stops, degrees.
    #[schemars(skip)]
    pub longitude_tolerance_deg: f64,
    /// Latitude interval width at which the search stops, degrees.
    #[schemars(skip)]
    pub latitude_tolerance_deg: f64,
}

impl Default for AlignmentOptions {
    fn default() -> Self {
        Self {
            longitude_tolerance_deg: 1e-5,
            latitude_tolerance_deg: 1e-2,
        }
    }
}
