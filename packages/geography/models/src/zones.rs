//! Zone membership tables for the mainland districts.
//!
//! Provides the static zone→district mapping and a `ZoneMap` with the
//! district→zone inverse index built once at construction. The map is
//! plain configuration data: it is constructed explicitly and handed
//! to the stages that need it, never read from a global.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// The three mainland zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Zone {
    /// Northern districts.
    Norte,
    /// Central districts.
    Centro,
    /// Southern districts.
    Sul,
}

impl std::fmt::Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Norte => write!(f, "Norte"),
            Self::Centro => write!(f, "Centro"),
            Self::Sul => write!(f, "Sul"),
        }
    }
}

/// Column value written for districts with no zone entry.
///
/// Deliberately not a real zone name so unmatched districts stay
/// distinguishable downstream.
pub const UNMATCHED_ZONE: &str = "Unmatched";

/// Zone label written into enriched map features whose district has no
/// zone entry.
pub const UNKNOWN_ZONE_LABEL: &str = "Zona Desconhecida";

/// Districts in the Norte zone.
pub const NORTE_DISTRICTS: &[&str] =
    &["Viana do Castelo", "Braga", "Porto", "Vila Real", "Bragança"];

/// Districts in the Centro zone.
pub const CENTRO_DISTRICTS: &[&str] = &[
    "Aveiro",
    "Viseu",
    "Guarda",
    "Coimbra",
    "Castelo Branco",
    "Leiria",
];

/// Districts in the Sul zone.
pub const SUL_DISTRICTS: &[&str] = &[
    "Lisboa",
    "Santarém",
    "Portalegre",
    "Setúbal",
    "Évora",
    "Beja",
    "Faro",
];

/// Bidirectional zone/district lookup.
#[derive(Debug, Clone)]
pub struct ZoneMap {
    by_district: BTreeMap<&'static str, Zone>,
}

impl ZoneMap {
    /// Builds the zone map for mainland Portugal.
    #[must_use]
    pub fn portugal() -> Self {
        let mut by_district = BTreeMap::new();
        for &d in NORTE_DISTRICTS {
            by_district.insert(d, Zone::Norte);
        }
        for &d in CENTRO_DISTRICTS {
            by_district.insert(d, Zone::Centro);
        }
        for &d in SUL_DISTRICTS {
            by_district.insert(d, Zone::Sul);
        }
        Self { by_district }
    }

    /// Looks up the zone a district belongs to.
    #[must_use]
    pub fn zone_of(&self, district: &str) -> Option<Zone> {
        self.by_district.get(district).copied()
    }

    /// The districts belonging to a zone.
    #[must_use]
    pub const fn districts(zone: Zone) -> &'static [&'static str] {
        match zone {
            Zone::Norte => NORTE_DISTRICTS,
            Zone::Centro => CENTRO_DISTRICTS,
            Zone::Sul => SUL_DISTRICTS,
        }
    }
}
