//! Centralized anchor, travel and alignment options with TOML support.
//!
//! Options serialize to/from TOML so a session can ship its own presets.

mod alignment;
mod anchors;
mod travel;

use std::path::Path;

pub use alignment::AlignmentOptions;
pub use anchors::AnchorOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
pub use travel::TravelOptions;

use crate::error::AnchorError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[travel]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Registry and rotation-follow parameters.
    pub anchors: AnchorOptions,
    /// Eased travel parameters.
    pub travel: TravelOptions,
    /// Surface alignment search parameters.
    #[schemars(skip)]
    pub alignment: AlignmentOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// I/O failure or malformed TOML.
    pub fn load(path: &Path) -> Result<Self, AnchorError> {
        let content = std::fs::read_to_string(path).map_err(AnchorError::Io)?;
        toml::from_str(&content)
            .map_err(|e| AnchorError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Serialization or I/O failure.
    pub fn save(&self, path: &Path) -> Result<(), AnchorError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| AnchorError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(AnchorError::Io)?;
        }
        std::fs::write(path, content).map_err(AnchorError::Io)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::EasingFunction;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r#"
[travel]
easing = "linear"
"#;
        let opts: Options = toml::from_str(toml_str).unwrap();
        assert_eq!(opts.travel.easing, EasingFunction::Linear);
        assert_eq!(opts.travel.approach_radii, 5.0);
        assert_eq!(opts.anchors.rotation_multiplier_condition, 4.0);
        assert_eq!(opts.alignment.latitude_tolerance_deg, 1e-2);
    }

    #[test]
    fn save_then_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("presets").join("session.toml");
        let mut opts = Options::default();
        opts.anchors.first_anchor = "Moon".to_owned();
        opts.travel.easing = EasingFunction::CubicHermite { c1: 0.33, c2: 1.0 };
        opts.save(&path).unwrap();
        assert_eq!(Options::load(&path).unwrap(), opts);
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("anchors"));
        assert!(props.contains_key("travel"));
        assert!(!props.contains_key("alignment"));

        let anchors = &props["anchors"]["properties"];
        assert!(anchors.get("rotation_multiplier_condition").is_some());
        assert!(anchors.get("first_anchor").is_none());
    }
}
