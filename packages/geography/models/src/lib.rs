#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Portuguese district and zone types.
//!
//! The ad dataset covers mainland Portugal; districts are grouped into
//! three zones (Norte, Centro, Sul) for the choropleth view. Island
//! districts never reach the zone lookup because the pipeline filters
//! them out beforehand.

pub mod zones;

pub use zones::{Zone, ZoneMap};
