//! Difference-based helpers
//!
//! Ranges and directional masks built from (lagged) differences. These feed
//! ratio indicators that must not divide by zero and up/down counting
//! indicators.

use crate::common::diff;
use crate::error::Result;
use crate::series::Series;
use crate::validation::ArgValue;

/// `high - low`, nudged away from zero.
///
/// When any difference is exactly zero (common in crypto data where
/// high == low), `f64::EPSILON` is added to every element, not only to the
/// zero ones.
///
/// # Example
/// ```
/// use ta_utils::{non_zero_range, Series};
/// let high = Series::new(vec![2.0, 3.0]);
/// let low = Series::new(vec![2.0, 1.0]);
/// let range = non_zero_range(&high, &low).unwrap();
/// assert_eq!(range.values(), &[f64::EPSILON, 2.0 + f64::EPSILON]);
/// ```
pub fn non_zero_range(high: &Series, low: &Series) -> Result<Series> {
    let range = high.zip_with(low, |h, l| h - l)?;
    if range.values().iter().any(|&v| v == 0.0) {
        return Ok(range.map(|v| v + f64::EPSILON));
    }
    Ok(range)
}

/// Sign of the `lag`-step difference: 1, -1 or 0, NaN where undefined.
///
/// The first position is always replaced with `initial` (NaN when `None`).
/// A text `lag` is treated as a marker: the lag falls back to 1 and
/// `initial` is discarded. Any other non-integer lag also means 1.
///
/// # Example
/// ```
/// use ta_utils::{signed_series, Series};
/// let s = Series::new(vec![3.0, 2.0, 2.0, 5.0]);
/// let sign = signed_series(&s, Some(0.0), 1);
/// assert_eq!(sign.values(), &[0.0, -1.0, 0.0, 1.0]);
/// ```
pub fn signed_series(series: &Series, initial: Option<f64>, lag: impl Into<ArgValue>) -> Series {
    let lag = lag.into();
    let initial = if lag.is_text() { None } else { initial };
    let lag = lag.as_int().unwrap_or(1);

    let mut sign = diff(series.values(), lag);
    for v in sign.iter_mut() {
        if *v > 0.0 {
            *v = 1.0;
        } else if *v < 0.0 {
            *v = -1.0;
        }
    }
    if let Some(first) = sign.first_mut() {
        *first = initial.unwrap_or(f64::NAN);
    }

    Series::from_parts(sign, series.index().clone())
}

/// Up and down masks returned by [`unsigned_differences`].
#[derive(Debug, Clone, PartialEq)]
pub enum DifferenceMasks {
    Float { positive: Series, negative: Series },
    Int { positive: Series<i64>, negative: Series<i64> },
}

impl DifferenceMasks {
    /// Masks as 0/1 integers regardless of the variant.
    pub fn to_int(&self) -> (Series<i64>, Series<i64>) {
        match self {
            DifferenceMasks::Float { positive, negative } => (positive.to_int(), negative.to_int()),
            DifferenceMasks::Int { positive, negative } => (positive.clone(), negative.clone()),
        }
    }
}

/// Split the `amount`-step differences into increase and decrease masks.
///
/// `positive[i]` is 1 where the difference is above zero, `negative[i]` is
/// 1 where it is below zero; everything else, including undefined
/// differences, is 0. `amount` defaults to 1. With `asint` the masks are
/// returned as integers.
///
/// # Example
/// ```
/// use ta_utils::{unsigned_differences, DifferenceMasks, Series};
/// let s = Series::new(vec![3.0, 2.0, 2.0, 5.0]);
/// match unsigned_differences(&s, None, true) {
///     DifferenceMasks::Int { positive, negative } => {
///         assert_eq!(positive.values(), &[0, 0, 0, 1]);
///         assert_eq!(negative.values(), &[0, 1, 0, 0]);
///     }
///     DifferenceMasks::Float { .. } => unreachable!(),
/// }
/// ```
pub fn unsigned_differences(series: &Series, amount: Option<i64>, asint: bool) -> DifferenceMasks {
    let amount = amount.unwrap_or(1);
    let changes: Vec<f64> = diff(series.values(), amount)
        .into_iter()
        .map(|v| if v.is_nan() { 0.0 } else { v })
        .collect();

    let mask = |up: bool| -> Series {
        let values = changes
            .iter()
            .map(|&v| {
                let hit = if up { v > 0.0 } else { v < 0.0 };
                if hit {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        Series::from_parts(values, series.index().clone())
    };
    let (positive, negative) = (mask(true), mask(false));

    if asint {
        DifferenceMasks::Int {
            positive: positive.to_int(),
            negative: negative.to_int(),
        }
    } else {
        DifferenceMasks::Float { positive, negative }
    }
}
