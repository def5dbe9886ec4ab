//! Utilities for comparing one-dimensional measurement series.

use ndarray::{Array1, ArrayView1};

use crate::shared::error::{StatsError, StatsResult};

/// Population mean and standard deviation (ddof = 0).
pub fn mean_std(values: ArrayView1<'_, f64>) -> StatsResult<(f64, f64)> {
    let mean = values
        .mean()
        .ok_or_else(|| StatsError::InvalidArgument("empty series".into()))?;
    let variance = values.mapv(|v| (v - mean) * (v - mean)).sum() / values.len() as f64;
    Ok((mean, variance.sqrt()))
}

/// Rescales `target` against `reference`.
///
/// `alpha = mean(ref) / std(ref) * std(target) - mean(target)` and each
/// element becomes `(target + alpha) / std(target) * std(ref)`. This is
/// not an exact mean/std match in general; callers depend on this exact
/// formula.
pub fn normalize(
    reference: ArrayView1<'_, f64>,
    target: ArrayView1<'_, f64>,
) -> StatsResult<Array1<f64>> {
    let (ref_mean, ref_std) = mean_std(reference)?;
    let (target_mean, target_std) = mean_std(target)?;
    if ref_std == 0.0 {
        return Err(StatsError::DivideByZero("reference series is constant"));
    }
    if target_std == 0.0 {
        return Err(StatsError::DivideByZero("target series is constant"));
    }

    let alpha = ref_mean / ref_std * target_std - target_mean;
    Ok(target.mapv(|g| (g + alpha) / target_std * ref_std))
}

/// Mean absolute element-wise difference.
pub fn l1_distance(a: ArrayView1<'_, f64>, b: ArrayView1<'_, f64>) -> StatsResult<f64> {
    if a.len() != b.len() {
        return Err(StatsError::LengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    (&a - &b)
        .mapv(f64::abs)
        .mean()
        .ok_or_else(|| StatsError::InvalidArgument("empty series".into()))
}
