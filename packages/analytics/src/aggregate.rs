//! Per-district aggregation.

use std::collections::BTreeMap;

use property_map_analytics_models::DistrictAggregate;
use property_map_dataset_models::columns;
use property_map_table::Table;

use crate::AnalyticsError;

/// Groups the cleaned table by `District` and computes the count, mean
/// area, and mean price per square meter for each.
///
/// Districts with no surviving rows simply do not appear in the map;
/// rows with a missing district or non-numeric metrics are skipped
/// (the pipeline removes those before this runs).
///
/// # Errors
///
/// Returns [`AnalyticsError::Table`] if `District`, `Area`, or
/// `PricePerSquareMeter` is absent.
pub fn aggregate_by_district(
    table: &Table,
) -> Result<BTreeMap<String, DistrictAggregate>, AnalyticsError> {
    let district = table.column_index(columns::DISTRICT)?;
    let area = table.column_index(columns::AREA)?;
    let ppsm = table.column_index(columns::PRICE_PER_SQUARE_METER)?;

    struct Acc {
        count: u64,
        area_sum: f64,
        ppsm_sum: f64,
    }

    let mut groups: BTreeMap<String, Acc> = BTreeMap::new();

    for row in table.rows() {
        let (Some(name), Some(a), Some(p)) = (
            row[district].as_text(),
            row[area].as_number(),
            row[ppsm].as_number(),
        ) else {
            continue;
        };
        let acc = groups.entry(name.to_owned()).or_insert(Acc {
            count: 0,
            area_sum: 0.0,
            ppsm_sum: 0.0,
        });
        acc.count += 1;
        acc.area_sum += a;
        acc.ppsm_sum += p;
    }

    log::info!("aggregated {} rows into {} districts", table.len(), groups.len());

    Ok(groups
        .into_iter()
        .map(|(name, acc)| {
            #[allow(clippy::cast_precision_loss)]
            let n = acc.count as f64;
            (
                name,
                DistrictAggregate {
                    count: acc.count,
                    area_mean: acc.area_sum / n,
                    price_per_square_meter_mean: acc.ppsm_sum / n,
                },
            )
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use property_map_table::Value;

    use super::*;

    fn table(rows: &[(&str, f64, f64)]) -> Table {
        let mut t = Table::new(vec![
            columns::DISTRICT.to_owned(),
            columns::AREA.to_owned(),
            columns::PRICE_PER_SQUARE_METER.to_owned(),
        ]);
        for &(district, area, ppsm) in rows {
            t.push_row(vec![
                Value::text(district),
                Value::Number(area),
                Value::Number(ppsm),
            ])
            .unwrap();
        }
        t
    }

    #[test]
    fn groups_and_averages_by_district() {
        let t = table(&[
            ("Lisboa", 100.0, 1_200.0),
            ("Lisboa", 80.0, 1_000.0),
            ("Porto", 90.0, 900.0),
        ]);
        let aggregates = aggregate_by_district(&t).unwrap();

        let lisboa = &aggregates["Lisboa"];
        assert_eq!(lisboa.count, 2);
        assert!((lisboa.area_mean - 90.0).abs() < f64::EPSILON);
        assert!((lisboa.price_per_square_meter_mean - 1_100.0).abs() < f64::EPSILON);

        assert_eq!(aggregates["Porto"].count, 1);
    }

    #[test]
    fn filtered_out_districts_are_absent() {
        let t = table(&[("Lisboa", 100.0, 1_200.0)]);
        let aggregates = aggregate_by_district(&t).unwrap();
        assert!(!aggregates.contains_key("Faro"));
        assert_eq!(aggregates.len(), 1);
    }

    #[test]
    fn empty_table_yields_empty_map() {
        let t = table(&[]);
        assert!(aggregate_by_district(&t).unwrap().is_empty());
    }

    #[test]
    fn missing_metric_column_is_an_error() {
        let t = Table::new(vec![columns::DISTRICT.to_owned()]);
        assert!(aggregate_by_district(&t).is_err());
    }
}
