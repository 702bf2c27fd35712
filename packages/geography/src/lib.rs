#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District-name normalization and boundary-map enrichment.
//!
//! Takes the district boundary `GeoJSON` and rewrites each feature's
//! properties with the normalized district name, its zone, and the
//! per-district aggregates and quartile labels computed from the
//! cleaned ad table.

pub mod enrich;
pub mod normalize;
