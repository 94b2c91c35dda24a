//! Loosely-typed `key -> value` parameter maps.
//!
//! Anchors and orbits are described by string maps coming from ini files,
//! scripts or saved camera positions. These helpers pull typed values out
//! of them; a key that is missing or empty counts as absent.

use glam::DVec3;
use rustc_hash::FxHashMap;

/// String parameter map keyed by field name.
pub type Params = FxHashMap<String, String>;

/// Non-empty string value for `key`.
#[must_use]
pub fn text<'a>(params: &'a Params, key: &str) -> Option<&'a str> {
    params
        .get(key)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

/// Floating point value for `key`; `None` when missing, empty or not a
/// number.
#[must_use]
pub fn number(params: &Params, key: &str) -> Option<f64> {
    let raw = text(params, key)?;
    match raw.trim().parse::<f64>() {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("parameter '{key}' = '{raw}' is not a number: {e}");
            None
        }
    }
}

/// Floating point value for `key`, or `default` when absent.
#[must_use]
pub fn number_or(params: &Params, key: &str, default: f64) -> f64 {
    number(params, key).unwrap_or(default)
}

/// Vector built from three numeric keys; `None` if any is absent.
#[must_use]
pub fn vector(params: &Params, keys: [&str; 3]) -> Option<DVec3> {
    Some(DVec3::new(
        number(params, keys[0])?,
        number(params, keys[1])?,
        number(params, keys[2])?,
    ))
}

/// Build a parameter map from literal pairs.
pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Params
where
    K: Into<String>,
    V: Into<String>,
{
    pairs
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}
