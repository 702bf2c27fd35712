//! District-name normalization.
//!
//! Boundary files carry district names in inconsistent case (often all
//! caps); ad records carry them title-cased. Normalizing on the
//! boundary side keeps the join keyed on the ad-side spelling.

/// Normalizes a raw district name to title case.
///
/// Each whitespace-separated word gets an uppercase first letter and
/// lowercase remainder. "VIANA DO CASTELO" is special-cased because
/// its connective "do" must stay lowercase, which plain title-casing
/// cannot produce.
#[must_use]
pub fn normalize_district(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("VIANA DO CASTELO") {
        return "Viana do Castelo".to_owned();
    }

    trimmed
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
            })
        })
        .collect::<Vec<String>>()
        .join(" ")
}
