#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory record table for the ad-cleaning pipeline.
//!
//! Rows are ads, columns are name-addressable dynamic cells. Every
//! table operation returns a new table so the pipeline stages stay
//! referentially transparent; nothing here mutates in place.

mod table;
mod value;

pub use table::{Row, Table};
pub use value::Value;

use thiserror::Error;

/// Errors that can occur during table operations.
///
/// Missing columns are structural: the input schema does not match what
/// the pipeline expects, and the run aborts.
#[derive(Debug, Error)]
pub enum TableError {
    /// A stage addressed a column the table does not have.
    #[error("Missing column: {name}")]
    MissingColumn {
        /// Name of the absent column.
        name: String,
    },

    /// A column with this name already exists.
    #[error("Column already exists: {name}")]
    DuplicateColumn {
        /// Name of the clashing column.
        name: String,
    },

    /// A row or column had the wrong number of values.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Number of values required.
        expected: usize,
        /// Number of values provided.
        actual: usize,
    },
}
