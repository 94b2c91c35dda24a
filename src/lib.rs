// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Observer reference frames for an astronomical viewpoint.
//!
//! Vantage decides, at any simulated instant, where the viewpoint is and how
//! it is oriented: standing on a rotating body, floating at a fixed point,
//! riding an orbit, or sitting at a fixed observatory.
//!
//! # Key entry points
//!
//! - [`anchor::AnchorPoint`] - the coordinate frame the camera is expressed in
//! - [`anchor::creator::AnchorCreators`] - builds anchors from string
//!   parameter maps
//! - [`anchor::manager::AnchorManager`] - named registry, eased travel,
//!   rotation following, surface alignment and persistence
//! - [`observer::ObserverView`] - world-space pose of the observer relative
//!   to the current anchor
//! - [`options::Options`] - runtime configuration (TOML)
//!
//! # Architecture
//!
//! Everything advances once per simulation tick on the calling thread. The
//! manager owns every anchor; the current anchor is a registry key, never a
//! second owner. Bodies live in the [`solar::SolarSystem`] and are referenced
//! weakly by body and orbit anchors.

pub mod anchor;
pub mod error;
pub mod navigator;
pub mod observer;
pub mod options;
pub mod solar;
pub mod time;
pub mod util;

#[cfg(test)]
pub(crate) mod test_support;
