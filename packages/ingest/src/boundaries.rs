//! `GeoJSON` boundary files and the quartile summary.

use std::fs;
use std::path::Path;

use geojson::{FeatureCollection, GeoJson};
use property_map_analytics_models::QuartileSummary;

use crate::IngestError;

/// Parses a `GeoJSON` feature collection from a string.
///
/// # Errors
///
/// Returns [`IngestError::GeoJson`] if the document is not a feature
/// collection.
pub fn parse_feature_collection(s: &str) -> Result<FeatureCollection, IngestError> {
    Ok(s.parse::<FeatureCollection>()?)
}

/// Reads the district boundary file.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or parsed.
pub fn read_feature_collection_file(path: &Path) -> Result<FeatureCollection, IngestError> {
    let collection = parse_feature_collection(&fs::read_to_string(path)?)?;
    log::info!(
        "read {} boundary features from {}",
        collection.features.len(),
        path.display()
    );
    Ok(collection)
}

/// Writes the enriched boundary file.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be written.
pub fn write_feature_collection_file(
    collection: FeatureCollection,
    path: &Path,
) -> Result<(), IngestError> {
    let count = collection.features.len();
    fs::write(path, GeoJson::from(collection).to_string())?;
    log::info!("wrote {count} boundary features to {}", path.display());
    Ok(())
}

/// Writes the quartile-edge summary file.
///
/// # Errors
///
/// Returns [`IngestError`] if serialization or the write fails.
pub fn write_quartile_summary_file(
    summary: &QuartileSummary,
    path: &Path,
) -> Result<(), IngestError> {
    fs::write(path, serde_json::to_string_pretty(summary)?)?;
    log::info!("wrote quartile summary to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            {
                "type": "Feature",
                "properties": { "NAME_1": "LISBOA" },
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[-9.2, 38.7], [-9.1, 38.7], [-9.1, 38.8], [-9.2, 38.7]]]
                }
            }
        ]
    }"#;

    #[test]
    fn parses_feature_collection() {
        let collection = parse_feature_collection(SAMPLE).unwrap();
        assert_eq!(collection.features.len(), 1);
        let props = collection.features[0].properties.as_ref().unwrap();
        assert_eq!(props["NAME_1"], "LISBOA");
    }

    #[test]
    fn rejects_bare_geometry() {
        assert!(parse_feature_collection(r#"{"type": "Point", "coordinates": [0, 0]}"#).is_err());
    }

    #[test]
    fn feature_collection_round_trips_through_string() {
        let collection = parse_feature_collection(SAMPLE).unwrap();
        let serialized = GeoJson::from(collection).to_string();
        let reparsed = parse_feature_collection(&serialized).unwrap();
        assert_eq!(reparsed.features.len(), 1);
    }
}
