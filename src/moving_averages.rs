//! Moving Average helpers
//!
//! - RMA: recursive moving average computed as an adjusted exponentially
//!   weighted mean, matching the dataframe `ewm(alpha).mean()` convention

use crate::series::Series;

/// Recursive Moving Average (RMA) in the dataframe `ewm` convention
///
/// # Formula
/// alpha = 1 / length (0.5 when length is 0)
/// RMA_t = Σ (1-alpha)^i × x_{t-i} / Σ (1-alpha)^i
///
/// Missing values keep their slot in the decay but do not count as
/// observations. Output is NaN until `length` observations have been seen.
///
/// # Example
/// ```
/// use ta_utils::{rma_pandas, Series};
/// let s = Series::new(vec![1.0, 2.0, 3.0]);
/// let rma = rma_pandas(&s, 2);
/// assert!(rma.values()[0].is_nan());
/// assert!((rma.values()[1] - 5.0 / 3.0).abs() < 1e-12);
/// ```
pub fn rma_pandas(series: &Series, length: usize) -> Series {
    let alpha = if length > 0 { 1.0 / length as f64 } else { 0.5 };
    Series::from_parts(ewm_mean(series.values(), alpha, length), series.index().clone())
}

/// Adjusted exponentially weighted mean with a minimum observation count.
pub fn ewm_mean(values: &[f64], alpha: f64, min_periods: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = Vec::with_capacity(n);
    if n == 0 {
        return result;
    }

    let min_periods = min_periods.max(1);
    let decay = 1.0 - alpha;

    let mut weighted = values[0];
    let mut old_weight = 1.0;
    let mut observations = usize::from(!weighted.is_nan());
    result.push(if observations >= min_periods { weighted } else { f64::NAN });

    for &current in &values[1..] {
        let observed = !current.is_nan();
        observations += usize::from(observed);

        if !weighted.is_nan() {
            old_weight *= decay;
            if observed {
                if weighted != current {
                    weighted = (old_weight * weighted + current) / (old_weight + 1.0);
                }
                old_weight += 1.0;
            }
        } else if observed {
            weighted = current;
        }

        result.push(if observations >= min_periods { weighted } else { f64::NAN });
    }

    result
}
