//! Filtering and derivation stages.
//!
//! Each stage takes the current table by reference and returns a new
//! one. Column lookups happen up front so a schema mismatch aborts
//! before any row work.

use property_map_dataset_models::{AdsType, Condition, columns};
use property_map_geography_models::{ZoneMap, zones};
use property_map_table::{Table, Value};

use crate::PipelineError;

/// Rounds to one decimal place.
pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Keeps rows whose `AdsType` is not in the exclude set.
///
/// Rows with an unparseable or missing ads type pass through; only
/// positive matches against the exclude set are removed.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if the `AdsType` column is absent.
pub fn filter_by_ads_type(table: &Table, exclude: &[AdsType]) -> Result<Table, PipelineError> {
    let ads_type = table.column_index(columns::ADS_TYPE)?;
    Ok(table.retain_rows(|row| {
        row[ads_type]
            .as_text()
            .and_then(AdsType::parse)
            .is_none_or(|t| !exclude.contains(&t))
    }))
}

/// Removes rows containing a null in any column.
pub fn drop_missing(table: &Table) -> Table {
    table.retain_rows(|row| !row.iter().any(Value::is_null))
}

/// Projects out the named columns.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if any name does not exist.
pub fn drop_columns(table: &Table, names: &[&str]) -> Result<Table, PipelineError> {
    Ok(table.drop_columns(names)?)
}

/// Parses `Rooms` as a number, dropping rows where parsing fails.
///
/// This is a filter as much as a cast: a room count of "Studio" removes
/// the row rather than defaulting it.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if the `Rooms` column is absent.
pub fn coerce_numeric_rooms(table: &Table) -> Result<Table, PipelineError> {
    let rooms = table.column_index(columns::ROOMS)?;
    let mut out = Table::new(table.columns().to_vec());
    for row in table.rows() {
        let parsed = match &row[rooms] {
            Value::Number(n) => Some(*n),
            Value::Text(s) => s.trim().parse::<f64>().ok(),
            Value::Null => None,
        };
        if let Some(n) = parsed {
            let mut row = row.clone();
            row[rooms] = Value::Number(n);
            out.push_row(row)?;
        }
    }
    Ok(out)
}

/// Keeps rows whose `Location` splits on commas into exactly two
/// segments, which are city-level addresses rather than street-level
/// ones.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if the `Location` column is absent.
pub fn filter_principal_cities(table: &Table) -> Result<Table, PipelineError> {
    let location = table.column_index(columns::LOCATION)?;
    Ok(table.retain_rows(|row| {
        row[location]
            .as_text()
            .is_some_and(|s| s.split(',').count() == 2)
    }))
}

/// Keeps rows with `Area` at most `max_area`.
///
/// Rows with a non-numeric area fail the comparison and are removed.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if the `Area` column is absent.
pub fn filter_area_max(table: &Table, max_area: f64) -> Result<Table, PipelineError> {
    let area = table.column_index(columns::AREA)?;
    Ok(table.retain_rows(|row| row[area].as_number().is_some_and(|a| a <= max_area)))
}

/// Keeps rows whose `Condition` is in the allowed set.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if the `Condition` column is absent.
pub fn filter_condition(table: &Table, allowed: &[Condition]) -> Result<Table, PipelineError> {
    let condition = table.column_index(columns::CONDITION)?;
    Ok(table.retain_rows(|row| {
        row[condition]
            .as_text()
            .and_then(Condition::parse)
            .is_some_and(|c| allowed.contains(&c))
    }))
}

/// Drops rows whose `District` contains the island marker ("Ilha").
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if the `District` column is absent.
pub fn filter_islands(table: &Table) -> Result<Table, PipelineError> {
    let district = table.column_index(columns::DISTRICT)?;
    Ok(table.retain_rows(|row| {
        !row[district]
            .as_text()
            .is_some_and(|d| d.contains(columns::ISLAND_MARKER))
    }))
}

/// Converts rental prices from monthly to annual (x12).
///
/// Non-rent rows are untouched. Must run exactly once, before any
/// stage that reasons over annual prices.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if `AdsType` or `Price` is absent.
pub fn annualize_rent(table: &Table) -> Result<Table, PipelineError> {
    let ads_type = table.column_index(columns::ADS_TYPE)?;
    let price = table.column_index(columns::PRICE)?;
    Ok(table.map_rows(|mut row| {
        let is_rent = row[ads_type].as_text().and_then(AdsType::parse) == Some(AdsType::Rent);
        if is_rent && let Some(p) = row[price].as_number() {
            row[price] = Value::Number(p * 12.0);
        }
        row
    }))
}

/// Derives `PricePerSquareMeter = Price / Area`, rounded to one
/// decimal.
///
/// A zero or missing area yields a null cell, which the downstream
/// missing-value filter removes.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if `Price` or `Area` is absent, or
/// if the derived column already exists.
pub fn derive_price_per_area(table: &Table) -> Result<Table, PipelineError> {
    let price = table.column_index(columns::PRICE)?;
    let area = table.column_index(columns::AREA)?;
    let values = table
        .rows()
        .iter()
        .map(|row| match (row[price].as_number(), row[area].as_number()) {
            (Some(p), Some(a)) if a != 0.0 => Value::Number(round1(p / a)),
            _ => Value::Null,
        })
        .collect();
    Ok(table.with_column(columns::PRICE_PER_SQUARE_METER, values)?)
}

/// Splits `Location` into `District` (last comma segment) and
/// `Municipality` (second-to-last), both trimmed.
///
/// Comma-less locations yield nulls in both derived columns.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if `Location` is absent or a
/// derived column already exists.
pub fn split_location(table: &Table) -> Result<Table, PipelineError> {
    let location = table.column_index(columns::LOCATION)?;

    let segment = |row: &[Value], from_end: usize| -> Value {
        row[location]
            .as_text()
            .filter(|s| s.contains(','))
            .and_then(|s| {
                let parts: Vec<&str> = s.split(',').collect();
                parts
                    .len()
                    .checked_sub(from_end)
                    .and_then(|i| parts.get(i))
                    .map(|p| Value::text(p.trim()))
            })
            .unwrap_or(Value::Null)
    };

    let districts = table.rows().iter().map(|row| segment(row, 1)).collect();
    let municipalities = table.rows().iter().map(|row| segment(row, 2)).collect();

    let table = table.with_column(columns::DISTRICT, districts)?;
    Ok(table.with_column(columns::MUNICIPALITY, municipalities)?)
}

/// Assigns each district its zone, writing the named "Unmatched"
/// sentinel for districts without a zone entry.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if `District` is absent or the
/// `Zone` column already exists.
pub fn assign_zone(table: &Table, zone_map: &ZoneMap) -> Result<Table, PipelineError> {
    let district = table.column_index(columns::DISTRICT)?;
    let values = table
        .rows()
        .iter()
        .map(|row| {
            row[district]
                .as_text()
                .and_then(|d| zone_map.zone_of(d))
                .map_or_else(
                    || Value::text(zones::UNMATCHED_ZONE),
                    |z| Value::text(z.to_string()),
                )
        })
        .collect();
    Ok(table.with_column(columns::ZONE, values)?)
}

/// Assigns each row its current ordinal position as `id`.
///
/// The id is only positional: re-running the pipeline or reordering
/// rows produces different ids, so it must not be used for joins
/// across runs.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if the `id` column already exists.
pub fn assign_id(table: &Table) -> Result<Table, PipelineError> {
    #[allow(clippy::cast_precision_loss)]
    let values = (0..table.len()).map(|i| Value::Number(i as f64)).collect();
    Ok(table.with_column(columns::ID, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
        let mut t = Table::new(columns.iter().map(ToString::to_string).collect());
        for row in rows {
            t.push_row(row).unwrap();
        }
        t
    }

    #[test]
    fn filters_vacation_ads() {
        let t = table(
            &[columns::ADS_TYPE],
            vec![
                vec![Value::text("Rent")],
                vec![Value::text("Vacation")],
                vec![Value::text("Sale")],
            ],
        );
        let out = filter_by_ads_type(&t, &[AdsType::Vacation]).unwrap();
        assert_eq!(out.len(), 2);
        assert!(
            out.rows()
                .iter()
                .all(|r| r[0].as_text() != Some("Vacation"))
        );
    }

    #[test]
    fn ads_type_filter_requires_the_column() {
        let t = table(&[columns::PRICE], vec![]);
        assert!(filter_by_ads_type(&t, &[AdsType::Vacation]).is_err());
    }

    #[test]
    fn drops_rows_with_any_null() {
        let t = table(
            &[columns::PRICE, columns::AREA],
            vec![
                vec![Value::Number(1.0), Value::Number(2.0)],
                vec![Value::Number(1.0), Value::Null],
            ],
        );
        assert_eq!(drop_missing(&t).len(), 1);
    }

    #[test]
    fn coerces_numeric_rooms_and_drops_failures() {
        let t = table(
            &[columns::ROOMS],
            vec![
                vec![Value::text("3")],
                vec![Value::text("T2")],
                vec![Value::Number(4.0)],
                vec![Value::Null],
            ],
        );
        let out = coerce_numeric_rooms(&t).unwrap();
        assert_eq!(out.len(), 2);
        assert_eq!(out.rows()[0][0], Value::Number(3.0));
        assert_eq!(out.rows()[1][0], Value::Number(4.0));
    }

    #[test]
    fn keeps_only_city_level_locations() {
        let t = table(
            &[columns::LOCATION],
            vec![
                vec![Value::text("Cascais, Lisboa")],
                vec![Value::text("Rua X, Cascais, Lisboa")],
                vec![Value::text("Lisboa")],
            ],
        );
        let out = filter_principal_cities(&t).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows()[0][0].as_text(), Some("Cascais, Lisboa"));
    }

    #[test]
    fn filters_oversized_areas() {
        let t = table(
            &[columns::AREA],
            vec![
                vec![Value::Number(120.0)],
                vec![Value::Number(30_000.0)],
                vec![Value::Number(30_001.0)],
            ],
        );
        let out = filter_area_max(&t, 30_000.0).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn filters_conditions_outside_allowed_set() {
        let allowed = [Condition::Used, Condition::New, Condition::Renovated];
        let t = table(
            &[columns::CONDITION],
            vec![
                vec![Value::text("Used")],
                vec![Value::text("Under Construction")],
                vec![Value::text("Renovated")],
            ],
        );
        let out = filter_condition(&t, &allowed).unwrap();
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn filters_island_districts() {
        let t = table(
            &[columns::DISTRICT],
            vec![
                vec![Value::text("Ilha da Madeira")],
                vec![Value::text("Porto")],
            ],
        );
        let out = filter_islands(&t).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows()[0][0].as_text(), Some("Porto"));
    }

    #[test]
    fn annualizes_rent_prices_only() {
        let t = table(
            &[columns::ADS_TYPE, columns::PRICE],
            vec![
                vec![Value::text("Rent"), Value::Number(1_000.0)],
                vec![Value::text("Sale"), Value::Number(200_000.0)],
            ],
        );
        let out = annualize_rent(&t).unwrap();
        assert_eq!(out.rows()[0][1], Value::Number(12_000.0));
        assert_eq!(out.rows()[1][1], Value::Number(200_000.0));
    }

    #[test]
    fn annualization_is_a_single_application_not_idempotent() {
        let t = table(
            &[columns::ADS_TYPE, columns::PRICE],
            vec![vec![Value::text("Rent"), Value::Number(1_000.0)]],
        );
        let once = annualize_rent(&t).unwrap();
        let twice = annualize_rent(&once).unwrap();
        assert_eq!(once.rows()[0][1], Value::Number(12_000.0));
        // Applying the stage again multiplies again; the composer must
        // schedule it exactly once per run.
        assert_eq!(twice.rows()[0][1], Value::Number(144_000.0));
    }

    #[test]
    fn derives_price_per_square_meter() {
        let t = table(
            &[columns::PRICE, columns::AREA],
            vec![vec![Value::Number(120_000.0), Value::Number(100.0)]],
        );
        let out = derive_price_per_area(&t).unwrap();
        let col = out.column_index(columns::PRICE_PER_SQUARE_METER).unwrap();
        assert_eq!(out.rows()[0][col], Value::Number(1_200.0));
    }

    #[test]
    fn zero_area_yields_null_price_per_square_meter() {
        let t = table(
            &[columns::PRICE, columns::AREA],
            vec![vec![Value::Number(120_000.0), Value::Number(0.0)]],
        );
        let out = derive_price_per_area(&t).unwrap();
        let col = out.column_index(columns::PRICE_PER_SQUARE_METER).unwrap();
        assert!(out.rows()[0][col].is_null());
    }

    #[test]
    fn splits_location_into_district_and_municipality() {
        let t = table(
            &[columns::LOCATION],
            vec![vec![Value::text("Rua X, Lisboa , Lisboa")]],
        );
        let out = split_location(&t).unwrap();
        let district = out.column_index(columns::DISTRICT).unwrap();
        let municipality = out.column_index(columns::MUNICIPALITY).unwrap();
        assert_eq!(out.rows()[0][district].as_text(), Some("Lisboa"));
        assert_eq!(out.rows()[0][municipality].as_text(), Some("Lisboa"));
    }

    #[test]
    fn comma_less_location_yields_nulls() {
        let t = table(&[columns::LOCATION], vec![vec![Value::text("Lisboa")]]);
        let out = split_location(&t).unwrap();
        let district = out.column_index(columns::DISTRICT).unwrap();
        let municipality = out.column_index(columns::MUNICIPALITY).unwrap();
        assert!(out.rows()[0][district].is_null());
        assert!(out.rows()[0][municipality].is_null());
    }

    #[test]
    fn assigns_zones_with_unmatched_sentinel() {
        let zone_map = ZoneMap::portugal();
        let t = table(
            &[columns::DISTRICT],
            vec![vec![Value::text("Porto")], vec![Value::text("Atlantis")]],
        );
        let out = assign_zone(&t, &zone_map).unwrap();
        let zone = out.column_index(columns::ZONE).unwrap();
        assert_eq!(out.rows()[0][zone].as_text(), Some("Norte"));
        assert_eq!(out.rows()[1][zone].as_text(), Some(zones::UNMATCHED_ZONE));
    }

    #[test]
    fn assigns_ordinal_ids() {
        let t = table(
            &[columns::PRICE],
            vec![vec![Value::Number(1.0)], vec![Value::Number(2.0)]],
        );
        let out = assign_id(&t).unwrap();
        let id = out.column_index(columns::ID).unwrap();
        assert_eq!(out.rows()[0][id], Value::Number(0.0));
        assert_eq!(out.rows()[1][id], Value::Number(1.0));
    }
}
