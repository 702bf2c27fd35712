#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! File ingestion and export for the ad-cleaning pipeline.
//!
//! The pipeline itself only sees in-memory tables and feature
//! collections; everything that touches the filesystem lives here.

pub mod boundaries;
pub mod tabular;

use thiserror::Error;

/// Errors that can occur while reading or writing pipeline files.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// `GeoJSON` parsing failed.
    #[error("GeoJSON error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// Parsed rows did not fit the table schema.
    #[error("Table error: {0}")]
    Table(#[from] property_map_table::TableError),
}
