//! Canonical column names for the ad dataset.
//!
//! The raw CSV uses these exact headers; derived columns are appended
//! by the pipeline under the names below. Stages address columns by
//! name, so the constants live here rather than being scattered as
//! string literals.

/// Listing kind: `Rent`, `Sale`, or `Vacation`.
pub const ADS_TYPE: &str = "AdsType";

/// Listing price in euros. Monthly for rentals until annualized.
pub const PRICE: &str = "Price";

/// Usable area in square meters.
pub const AREA: &str = "Area";

/// Room count. Raw data mixes numbers with sentinel strings.
pub const ROOMS: &str = "Rooms";

/// Advertised condition of the property.
pub const CONDITION: &str = "Condition";

/// Comma-separated location hierarchy, least significant last.
pub const LOCATION: &str = "Location";

/// Raw propriety-type column; dropped by the pipeline.
pub const PROPRIETY_TYPE: &str = "ProprietyType";

/// Derived: last segment of `Location`.
pub const DISTRICT: &str = "District";

/// Derived: second-to-last segment of `Location`.
pub const MUNICIPALITY: &str = "Municipality";

/// Derived: `Price / Area`, rounded to one decimal.
pub const PRICE_PER_SQUARE_METER: &str = "PricePerSquareMeter";

/// Derived: zone the district belongs to.
pub const ZONE: &str = "Zone";

/// Derived: ordinal row id. Not stable across runs.
pub const ID: &str = "id";

/// Substring marking island districts, which the pipeline removes.
pub const ISLAND_MARKER: &str = "Ilha";
