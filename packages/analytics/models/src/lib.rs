#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! District aggregate and quartile result types.
//!
//! Outputs of the aggregation step that feed the map enrichment and
//! the quartile summary file.

use serde::{Deserialize, Serialize};

/// Per-district summary statistics over the cleaned table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistrictAggregate {
    /// Number of ads in the district.
    pub count: u64,
    /// Arithmetic mean of `Area`.
    pub area_mean: f64,
    /// Arithmetic mean of `PricePerSquareMeter`.
    pub price_per_square_meter_mean: f64,
}

/// Equal-frequency quartile label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuartileLabel {
    /// Lowest quarter.
    Q1,
    /// Second quarter.
    Q2,
    /// Third quarter.
    Q3,
    /// Highest quarter.
    Q4,
}

impl std::fmt::Display for QuartileLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Q1 => write!(f, "Q1"),
            Self::Q2 => write!(f, "Q2"),
            Self::Q3 => write!(f, "Q3"),
            Self::Q4 => write!(f, "Q4"),
        }
    }
}

/// Quartile bin edges for the three per-district metrics, rounded to
/// one decimal. This is the content of the summary output file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuartileSummary {
    /// Edges for the per-district ad count.
    pub count: [f64; 4],
    /// Edges for the per-district mean area.
    pub area_mean: [f64; 4],
    /// Edges for the per-district mean price per square meter.
    pub price_per_square_meter: [f64; 4],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quartile_labels_are_ordered() {
        assert!(QuartileLabel::Q1 < QuartileLabel::Q4);
    }

    #[test]
    fn quartile_label_display() {
        assert_eq!(QuartileLabel::Q3.to_string(), "Q3");
    }

    #[test]
    fn summary_serializes_camel_case() {
        let summary = QuartileSummary {
            count: [1.0, 2.0, 3.0, 4.0],
            area_mean: [10.0, 20.0, 30.0, 40.0],
            price_per_square_meter: [0.1, 0.2, 0.3, 0.4],
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("areaMean").is_some());
        assert!(json.get("pricePerSquareMeter").is_some());
    }
}
