#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Cleaning and transformation pipeline for real-estate ad records.
//!
//! The pipeline is an ordered chain of pure `Table -> Table` stages:
//! filters (vacation ads, missing values, oversized areas, islands),
//! derivations (annualized rent, price per square meter, district and
//! municipality from the location string, zone, id), and 3-sigma
//! outlier removal. The chain itself is data ([`composer::Stage`] and
//! [`composer::PipelineConfig`]), so pipeline variants are a
//! configuration edit rather than new code.
//!
//! Row-local problems (a non-numeric room count, a zero area) drop the
//! offending row; structural problems (a missing column) abort the run.

pub mod composer;
pub mod outliers;
pub mod stages;

use property_map_table::TableError;
use thiserror::Error;

/// Errors that can occur while running the pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The table schema did not match what a stage expects.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// A pipeline configuration file failed to parse.
    #[error("Invalid pipeline config: {0}")]
    Config(#[from] toml::de::Error),
}
