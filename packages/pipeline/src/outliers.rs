//! 3-sigma outlier removal.
//!
//! Computes mean and sample standard deviation over a numeric column
//! (optionally restricted to a row subset) and drops subset rows more
//! than three deviations from the mean. Rows outside the subset are
//! never touched, and their relative order is preserved.

use property_map_table::{Row, Table};

use crate::PipelineError;

/// Mean and sample (ddof = 1) standard deviation.
///
/// Returns `None` for fewer than two values, where the deviation is
/// undefined.
fn mean_and_std(values: &[f64]) -> Option<(f64, f64)> {
    if values.len() < 2 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some((mean, variance.sqrt()))
}

/// Removes subset rows whose `column` value lies outside the 3-sigma
/// band computed over that same subset.
///
/// With zero or one subset row the band is undefined and the table
/// passes through unchanged. Subset rows with a non-numeric or
/// non-finite value fail the band check and are removed; such values
/// are also excluded from the mean and deviation, so one NaN cell
/// cannot widen or poison the band for every other row.
///
/// # Errors
///
/// Returns [`PipelineError::Table`] if the column is absent.
pub fn remove_numeric_outliers(
    table: &Table,
    column: &str,
    subset: impl Fn(&Row) -> bool,
) -> Result<Table, PipelineError> {
    let col = table.column_index(column)?;

    let values: Vec<f64> = table
        .rows()
        .iter()
        .filter(|row| subset(row))
        .filter_map(|row| row[col].as_number())
        .filter(|v| v.is_finite())
        .collect();

    let Some((mean, std)) = mean_and_std(&values) else {
        return Ok(table.clone());
    };
    let band = 3.0 * std;

    Ok(table.retain_rows(|row| {
        if !subset(row) {
            return true;
        }
        row[col].as_number().is_some_and(|v| (v - mean).abs() <= band)
    }))
}
