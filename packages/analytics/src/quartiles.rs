//! Equal-frequency quartile binning.

use std::collections::BTreeMap;

use property_map_analytics_models::QuartileLabel;

use crate::AnalyticsError;

/// Quartile cut points and per-district labels for one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct QuartileBinning {
    /// Bin edges at the 0.25, 0.5, 0.75, and 1.0 quantiles, rounded to
    /// one decimal for reporting.
    pub edges: [f64; 4],
    /// Quartile label per district.
    pub labels: BTreeMap<String, QuartileLabel>,
}

fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Linear-interpolated quantile over a sorted, non-empty slice.
fn quantile(sorted: &[f64], p: f64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let h = (sorted.len() - 1) as f64 * p;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let lo = h.floor() as usize;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let hi = h.ceil() as usize;
    sorted[lo] + (h - h.floor()) * (sorted[hi] - sorted[lo])
}

/// Bins a district-indexed numeric series into four equal-frequency
/// quartiles.
///
/// Cut points sit at the 0.25/0.5/0.75/1.0 quantiles (linear
/// interpolation); each district gets the label of the first bin whose
/// edge its value does not exceed.
///
/// # Errors
///
/// Returns [`AnalyticsError::InsufficientData`] when the series has
/// fewer than four distinct values, which makes four cuts ill-defined.
pub fn bin_quartiles(
    series: &BTreeMap<String, f64>,
) -> Result<QuartileBinning, AnalyticsError> {
    let mut sorted: Vec<f64> = series.values().copied().collect();
    sorted.sort_by(f64::total_cmp);

    let mut distinct = sorted.clone();
    distinct.dedup();
    if distinct.len() < 4 {
        return Err(AnalyticsError::InsufficientData {
            distinct: distinct.len(),
            required: 4,
        });
    }

    let cuts = [
        quantile(&sorted, 0.25),
        quantile(&sorted, 0.5),
        quantile(&sorted, 0.75),
        quantile(&sorted, 1.0),
    ];

    let label_of = |v: f64| {
        if v <= cuts[0] {
            QuartileLabel::Q1
        } else if v <= cuts[1] {
            QuartileLabel::Q2
        } else if v <= cuts[2] {
            QuartileLabel::Q3
        } else {
            QuartileLabel::Q4
        }
    };

    let labels = series
        .iter()
        .map(|(district, &v)| (district.clone(), label_of(v)))
        .collect();

    Ok(QuartileBinning {
        edges: cuts.map(round1),
        labels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
        entries
            .iter()
            .map(|&(k, v)| (k.to_owned(), v))
            .collect()
    }

    #[test]
    fn four_districts_map_one_per_quartile() {
        let s = series(&[("A", 10.0), ("B", 20.0), ("C", 30.0), ("D", 40.0)]);
        let binning = bin_quartiles(&s).unwrap();
        assert_eq!(binning.labels["A"], QuartileLabel::Q1);
        assert_eq!(binning.labels["B"], QuartileLabel::Q2);
        assert_eq!(binning.labels["C"], QuartileLabel::Q3);
        assert_eq!(binning.labels["D"], QuartileLabel::Q4);
    }

    #[test]
    fn edges_are_interpolated_and_rounded() {
        let s = series(&[("A", 10.0), ("B", 20.0), ("C", 30.0), ("D", 40.0)]);
        let binning = bin_quartiles(&s).unwrap();
        assert_eq!(binning.edges, [17.5, 25.0, 32.5, 40.0]);
    }

    #[test]
    fn larger_series_distributes_evenly() {
        let s = series(&[
            ("A", 1.0),
            ("B", 2.0),
            ("C", 3.0),
            ("D", 4.0),
            ("E", 5.0),
            ("F", 6.0),
            ("G", 7.0),
            ("H", 8.0),
        ]);
        let binning = bin_quartiles(&s).unwrap();
        let mut counts = BTreeMap::new();
        for label in binning.labels.values() {
            *counts.entry(*label).or_insert(0) += 1;
        }
        assert_eq!(counts[&QuartileLabel::Q1], 2);
        assert_eq!(counts[&QuartileLabel::Q2], 2);
        assert_eq!(counts[&QuartileLabel::Q3], 2);
        assert_eq!(counts[&QuartileLabel::Q4], 2);
    }

    #[test]
    fn too_few_distinct_values_fail() {
        let s = series(&[("A", 10.0), ("B", 10.0), ("C", 10.0), ("D", 40.0)]);
        let err = bin_quartiles(&s).unwrap_err();
        assert!(
            err.to_string()
                .contains("2 distinct values, need 4")
        );
    }

    #[test]
    fn empty_series_fails() {
        assert!(bin_quartiles(&BTreeMap::new()).is_err());
    }
}
