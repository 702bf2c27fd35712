//! Boundary-map enrichment.
//!
//! Rewrites each feature's property set in place: the raw district-name
//! property is replaced by the normalized `District`, the feature's
//! `Zone`, and the aggregate values and quartile labels for that
//! district. Districts missing from the aggregates (everything was
//! filtered out) get zero counts and "Unknown" labels rather than
//! being dropped from the map.

use std::collections::BTreeMap;

use geojson::FeatureCollection;
use property_map_analytics_models::{DistrictAggregate, QuartileLabel};
use property_map_geography_models::{ZoneMap, zones};

use crate::normalize::normalize_district;

/// Quartile label written for districts with no binning entry.
pub const UNKNOWN_QUARTILE: &str = "Unknown";

/// Per-district statistics injected into the boundary map.
#[derive(Debug, Clone)]
pub struct DistrictStats {
    /// Aggregates from the cleaned table.
    pub aggregates: BTreeMap<String, DistrictAggregate>,
    /// Quartile label per district for the ad count.
    pub count_quartiles: BTreeMap<String, QuartileLabel>,
    /// Quartile label per district for the mean area.
    pub area_quartiles: BTreeMap<String, QuartileLabel>,
    /// Quartile label per district for the mean price per square meter.
    pub price_quartiles: BTreeMap<String, QuartileLabel>,
}

fn quartile_property(labels: &BTreeMap<String, QuartileLabel>, district: &str) -> String {
    labels
        .get(district)
        .map_or_else(|| UNKNOWN_QUARTILE.to_owned(), ToString::to_string)
}

/// Enriches every feature carrying the district-name property.
///
/// Features without that property are skipped and left untouched; the
/// collection never loses features. Returns the number of features
/// enriched.
pub fn enrich_features(
    collection: &mut FeatureCollection,
    district_property: &str,
    zone_map: &ZoneMap,
    stats: &DistrictStats,
) -> usize {
    let mut enriched = 0;

    for feature in &mut collection.features {
        let Some(properties) = feature.properties.as_mut() else {
            continue;
        };
        let Some(raw) = properties
            .get(district_property)
            .and_then(serde_json::Value::as_str)
        else {
            continue;
        };

        let district = normalize_district(raw);
        let zone = zone_map.zone_of(&district).map_or_else(
            || zones::UNKNOWN_ZONE_LABEL.to_owned(),
            |z| z.to_string(),
        );

        let (count, area_mean, price_mean) = stats.aggregates.get(&district).map_or(
            (0, 0.0, 0.0),
            |agg| (agg.count, agg.area_mean, agg.price_per_square_meter_mean),
        );

        properties.remove(district_property);
        properties.insert("District".to_owned(), district.clone().into());
        properties.insert("Zone".to_owned(), zone.into());
        properties.insert("Count".to_owned(), count.into());
        properties.insert("AreaMean".to_owned(), area_mean.into());
        properties.insert("PriceMean".to_owned(), price_mean.into());
        properties.insert(
            "NumberOfAvailabilityQuartile".to_owned(),
            quartile_property(&stats.count_quartiles, &district).into(),
        );
        properties.insert(
            "AreaQuartile".to_owned(),
            quartile_property(&stats.area_quartiles, &district).into(),
        );
        properties.insert(
            "PriceQuartile".to_owned(),
            quartile_property(&stats.price_quartiles, &district).into(),
        );

        enriched += 1;
    }

    log::info!(
        "enriched {enriched} of {} boundary features",
        collection.features.len()
    );
    enriched
}
