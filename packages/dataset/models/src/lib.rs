#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Domain types for real-estate ad records.
//!
//! The ad dataset itself is carried as a dynamic table (see
//! `property_map_table`); these enums give the cleaning stages typed
//! views of the categorical columns they filter on.

use serde::{Deserialize, Serialize};

pub mod columns;

/// The kind of listing an ad represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdsType {
    /// Monthly rental listing.
    Rent,
    /// Property for sale.
    Sale,
    /// Short-term vacation rental. Removed by the cleaning pipeline.
    Vacation,
}

impl AdsType {
    /// Parses the raw `AdsType` column value.
    ///
    /// Returns `None` for values outside the known set; those rows pass
    /// through the ads-type filter untouched.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Rent" => Some(Self::Rent),
            "Sale" => Some(Self::Sale),
            "Vacation" => Some(Self::Vacation),
            _ => None,
        }
    }
}

impl std::fmt::Display for AdsType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rent => write!(f, "Rent"),
            Self::Sale => write!(f, "Sale"),
            Self::Vacation => write!(f, "Vacation"),
        }
    }
}

/// The advertised condition of a property.
///
/// Only the three variants here survive the cleaning pipeline; the raw
/// data also contains values like "Under Construction" and free-form
/// strings, which the condition filter removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    /// Previously occupied.
    Used,
    /// Newly built.
    New,
    /// Refurbished.
    Renovated,
}

impl Condition {
    /// Parses the raw `Condition` column value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Used" => Some(Self::Used),
            "New" => Some(Self::New),
            "Renovated" => Some(Self::Renovated),
            _ => None,
        }
    }
}

impl std::fmt::Display for Condition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Used => write!(f, "Used"),
            Self::New => write!(f, "New"),
            Self::Renovated => write!(f, "Renovated"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_ads_types() {
        assert_eq!(AdsType::parse("Rent"), Some(AdsType::Rent));
        assert_eq!(AdsType::parse("Sale"), Some(AdsType::Sale));
        assert_eq!(AdsType::parse("Vacation"), Some(AdsType::Vacation));
    }

    #[test]
    fn rejects_unknown_ads_type() {
        assert_eq!(AdsType::parse("Lease"), None);
    }

    #[test]
    fn ads_type_display_round_trips() {
        assert_eq!(AdsType::parse(&AdsType::Rent.to_string()), Some(AdsType::Rent));
    }

    #[test]
    fn parses_known_conditions() {
        assert_eq!(Condition::parse("Used"), Some(Condition::Used));
        assert_eq!(Condition::parse("New"), Some(Condition::New));
        assert_eq!(Condition::parse("Renovated"), Some(Condition::Renovated));
    }

    #[test]
    fn rejects_other_conditions() {
        assert_eq!(Condition::parse("Under Construction"), None);
        assert_eq!(Condition::parse("Ruin"), None);
    }
}
