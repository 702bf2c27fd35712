//! The pipeline composer: the stage chain as data.
//!
//! A [`Stage`] names one transform with its parameters; a
//! [`PipelineConfig`] is an ordered list of stages, loadable from TOML.
//! The composer folds the table through the chain with no branching and
//! no recovery: the first stage error aborts the run.
//!
//! Order is load-bearing. Derivations run before the filters that read
//! their outputs (location splitting before the missing-value filter),
//! and outlier stages run after annualization and the per-area
//! derivation. The default chain applies the area outlier stage twice
//! in a row, which tightens the band on the second pass.

use std::time::Instant;

use property_map_dataset_models::{AdsType, Condition, columns};
use property_map_geography_models::ZoneMap;
use property_map_table::Table;
use serde::{Deserialize, Serialize};

use crate::{PipelineError, outliers, stages};

/// Default cap on usable area, in square meters.
pub const DEFAULT_MAX_AREA: f64 = 30_000.0;

fn default_exclude() -> Vec<AdsType> {
    vec![AdsType::Vacation]
}

fn default_allowed() -> Vec<Condition> {
    vec![Condition::Used, Condition::New, Condition::Renovated]
}

fn default_max_area() -> f64 {
    DEFAULT_MAX_AREA
}

fn default_drop() -> Vec<String> {
    vec![
        columns::PROPRIETY_TYPE.to_owned(),
        columns::LOCATION.to_owned(),
    ]
}

/// One named stage of the cleaning pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "snake_case")]
pub enum Stage {
    /// Parse `Rooms` as a number, dropping unparseable rows.
    CoerceNumericRooms,
    /// Multiply rental prices by 12.
    AnnualizeRent,
    /// Derive `PricePerSquareMeter`.
    DerivePricePerArea,
    /// Keep only city-level (two-segment) locations.
    FilterPrincipalCities,
    /// Derive `District` and `Municipality` from `Location`.
    SplitLocation,
    /// Drop rows with missing values.
    DropMissing,
    /// Keep rows with `Area` at most `max_area`.
    FilterAreaMax {
        /// Inclusive area cap in square meters.
        #[serde(default = "default_max_area")]
        max_area: f64,
    },
    /// Drop rows whose ads type is in the exclude set.
    FilterAdsType {
        /// Ads types to remove.
        #[serde(default = "default_exclude")]
        exclude: Vec<AdsType>,
    },
    /// Project out unused columns.
    DropColumns {
        /// Column names to remove.
        #[serde(default = "default_drop")]
        columns: Vec<String>,
    },
    /// 3-sigma removal on `PricePerSquareMeter`.
    PricePerAreaOutliers,
    /// 3-sigma removal on `Price`.
    PriceOutliers,
    /// 3-sigma removal on `Price`, rent rows only.
    RentPriceOutliers,
    /// 3-sigma removal on `Area`.
    AreaOutliers,
    /// Assign ordinal row ids.
    AssignId,
    /// Drop island districts.
    FilterIslands,
    /// Keep rows whose condition is in the allowed set.
    FilterCondition {
        /// Conditions to keep.
        #[serde(default = "default_allowed")]
        allowed: Vec<Condition>,
    },
    /// Assign each district its zone.
    AssignZone,
}

impl Stage {
    /// The stage's configuration name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CoerceNumericRooms => "coerce_numeric_rooms",
            Self::AnnualizeRent => "annualize_rent",
            Self::DerivePricePerArea => "derive_price_per_area",
            Self::FilterPrincipalCities => "filter_principal_cities",
            Self::SplitLocation => "split_location",
            Self::DropMissing => "drop_missing",
            Self::FilterAreaMax { .. } => "filter_area_max",
            Self::FilterAdsType { .. } => "filter_ads_type",
            Self::DropColumns { .. } => "drop_columns",
            Self::PricePerAreaOutliers => "price_per_area_outliers",
            Self::PriceOutliers => "price_outliers",
            Self::RentPriceOutliers => "rent_price_outliers",
            Self::AreaOutliers => "area_outliers",
            Self::AssignId => "assign_id",
            Self::FilterIslands => "filter_islands",
            Self::FilterCondition { .. } => "filter_condition",
            Self::AssignZone => "assign_zone",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// An ordered stage chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Stages to apply, first to last.
    pub stages: Vec<Stage>,
}

impl Default for PipelineConfig {
    /// The full cleaning chain. The doubled `area_outliers` entry is
    /// intentional; the second pass runs against the tighter band.
    fn default() -> Self {
        Self {
            stages: vec![
                Stage::CoerceNumericRooms,
                Stage::AnnualizeRent,
                Stage::DerivePricePerArea,
                Stage::FilterPrincipalCities,
                Stage::SplitLocation,
                Stage::DropMissing,
                Stage::FilterAreaMax {
                    max_area: DEFAULT_MAX_AREA,
                },
                Stage::FilterAdsType {
                    exclude: default_exclude(),
                },
                Stage::DropColumns {
                    columns: default_drop(),
                },
                Stage::PricePerAreaOutliers,
                Stage::PriceOutliers,
                Stage::RentPriceOutliers,
                Stage::AreaOutliers,
                Stage::AreaOutliers,
                Stage::AssignId,
                Stage::FilterIslands,
                Stage::FilterCondition {
                    allowed: default_allowed(),
                },
                Stage::AssignZone,
            ],
        }
    }
}

impl PipelineConfig {
    /// Parses a stage chain from TOML.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::Config`] if the document is malformed.
    pub fn from_toml(s: &str) -> Result<Self, PipelineError> {
        Ok(toml::from_str(s)?)
    }
}

/// Applies one stage.
fn apply(table: &Table, stage: &Stage, zone_map: &ZoneMap) -> Result<Table, PipelineError> {
    match stage {
        Stage::CoerceNumericRooms => stages::coerce_numeric_rooms(table),
        Stage::AnnualizeRent => stages::annualize_rent(table),
        Stage::DerivePricePerArea => stages::derive_price_per_area(table),
        Stage::FilterPrincipalCities => stages::filter_principal_cities(table),
        Stage::SplitLocation => stages::split_location(table),
        Stage::DropMissing => Ok(stages::drop_missing(table)),
        Stage::FilterAreaMax { max_area } => stages::filter_area_max(table, *max_area),
        Stage::FilterAdsType { exclude } => stages::filter_by_ads_type(table, exclude),
        Stage::DropColumns { columns } => {
            let names: Vec<&str> = columns.iter().map(String::as_str).collect();
            stages::drop_columns(table, &names)
        }
        Stage::PricePerAreaOutliers => {
            outliers::remove_numeric_outliers(table, columns::PRICE_PER_SQUARE_METER, |_| true)
        }
        Stage::PriceOutliers => {
            outliers::remove_numeric_outliers(table, columns::PRICE, |_| true)
        }
        Stage::RentPriceOutliers => {
            let ads_type = table.column_index(columns::ADS_TYPE)?;
            outliers::remove_numeric_outliers(table, columns::PRICE, |row| {
                row[ads_type].as_text().and_then(AdsType::parse) == Some(AdsType::Rent)
            })
        }
        Stage::AreaOutliers => outliers::remove_numeric_outliers(table, columns::AREA, |_| true),
        Stage::AssignId => stages::assign_id(table),
        Stage::FilterIslands => stages::filter_islands(table),
        Stage::FilterCondition { allowed } => stages::filter_condition(table, allowed),
        Stage::AssignZone => stages::assign_zone(table, zone_map),
    }
}

/// Runs the configured chain over the table.
///
/// # Errors
///
/// Returns the first stage error; nothing downstream runs after a
/// failure.
pub fn run(
    table: &Table,
    config: &PipelineConfig,
    zone_map: &ZoneMap,
) -> Result<Table, PipelineError> {
    let start = Instant::now();
    let mut current = table.clone();

    for stage in &config.stages {
        let before = current.len();
        current = apply(&current, stage, zone_map)?;
        log::info!("stage {stage}: {before} -> {} rows", current.len());
    }

    log::info!(
        "pipeline complete: {} -> {} rows in {:?}",
        table.len(),
        current.len(),
        start.elapsed()
    );
    Ok(current)
}
