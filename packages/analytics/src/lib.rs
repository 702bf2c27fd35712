#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District aggregation and quartile binning over the cleaned table.
//!
//! The aggregator groups the final table by district and computes the
//! triple (count, mean area, mean price per square meter); the binner
//! labels each district Q1-Q4 per metric with equal-frequency cuts.

pub mod aggregate;
pub mod quartiles;

use property_map_table::TableError;
use thiserror::Error;

/// Errors that can occur during analytics operations.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The table schema did not match what the aggregator expects.
    #[error("Table error: {0}")]
    Table(#[from] TableError),

    /// Too few distinct values for a quartile cut.
    #[error("Insufficient data for quartiles: {distinct} distinct values, need {required}")]
    InsufficientData {
        /// Distinct values present.
        distinct: usize,
        /// Distinct values required.
        required: usize,
    },
}
