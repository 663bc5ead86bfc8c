//! Property-based tests for the series helpers using proptest.
//!
//! These tests verify invariant properties that must hold for all valid inputs,
//! using randomly generated test data to find edge cases.

use approx::assert_relative_eq;
use proptest::prelude::*;

use ta_utils::{
    get_drift, get_offset, hl2, non_zero_range, recent_maximum_index, recent_minimum_index,
    rma_pandas, signed_series, unsigned_differences, verify_series, Series,
};

/// Generate a random price series (all positive values)
fn arb_price_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

/// Generate high/low pairs with high >= low
fn arb_high_low(min_len: usize, max_len: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((1.0..1000.0_f64, 0.0..0.1_f64), min_len..=max_len).prop_map(|data| {
        let high: Vec<f64> = data.iter().map(|(base, pct)| base * (1.0 + pct)).collect();
        let low: Vec<f64> = data.iter().map(|(base, _)| *base).collect();
        (high, low)
    })
}

/// Price series rounded to whole numbers so flat steps are common
fn arb_stepped_series(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0i32..5, min_len..=max_len)
        .prop_map(|v| v.into_iter().map(f64::from).collect::<Vec<f64>>())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// HL2 is the elementwise midpoint
    #[test]
    fn prop_hl2_midpoint((high, low) in arb_high_low(1, 100)) {
        let result = hl2(&Series::new(high.clone()), &Series::new(low.clone()), 0).unwrap();
        prop_assert_eq!(result.len(), high.len());
        for i in 0..high.len() {
            prop_assert_eq!(result.values()[i], 0.5 * (high[i] + low[i]));
        }
    }

    /// Shifted HL2 is the unshifted result moved right by `offset`
    #[test]
    fn prop_hl2_offset((high, low) in arb_high_low(1, 60), offset in 1i64..20) {
        let high = Series::new(high);
        let low = Series::new(low);
        let base = hl2(&high, &low, 0).unwrap();
        let shifted = hl2(&high, &low, offset).unwrap();
        for i in 0..base.len() {
            if (i as i64) < offset {
                prop_assert!(shifted.values()[i].is_nan());
            } else {
                prop_assert_eq!(shifted.values()[i], base.values()[i - offset as usize]);
            }
        }
    }

    /// Without zeros the range is the plain difference
    #[test]
    fn prop_non_zero_range_exact((high, low) in arb_high_low(1, 100)) {
        prop_assume!(high.iter().zip(low.iter()).all(|(h, l)| h - l != 0.0));
        let result = non_zero_range(&Series::new(high.clone()), &Series::new(low.clone())).unwrap();
        for i in 0..high.len() {
            prop_assert_eq!(result.values()[i], high[i] - low[i]);
        }
    }

    /// One zero bumps every element by epsilon
    #[test]
    fn prop_non_zero_range_uniform_bump((high, low) in arb_high_low(2, 100), at in any::<prop::sample::Index>()) {
        let mut high = high;
        let k = at.index(high.len());
        high[k] = low[k];
        let result = non_zero_range(&Series::new(high.clone()), &Series::new(low.clone())).unwrap();
        for i in 0..high.len() {
            prop_assert_eq!(result.values()[i], (high[i] - low[i]) + f64::EPSILON);
        }
        prop_assert!(result.values().iter().all(|&v| v > 0.0));
    }

    /// Signs are in {-1, 0, 1} after the first position
    #[test]
    fn prop_signed_series_values(data in arb_stepped_series(2, 100)) {
        let sign = signed_series(&Series::new(data.clone()), None, 1);
        prop_assert!(sign.values()[0].is_nan());
        for i in 1..data.len() {
            let expected = (data[i] - data[i - 1]).signum();
            let expected = if data[i] == data[i - 1] { 0.0 } else { expected };
            prop_assert_eq!(sign.values()[i], expected);
        }
    }

    /// Up and down masks never overlap and agree with signed_series
    #[test]
    fn prop_unsigned_masks_partition(data in arb_stepped_series(1, 100)) {
        let series = Series::new(data);
        let (positive, negative) = unsigned_differences(&series, None, false).to_int();
        let sign = signed_series(&series, Some(0.0), 1);
        for i in 0..series.len() {
            let p = positive.values()[i];
            let n = negative.values()[i];
            prop_assert!(p + n <= 1);
            prop_assert_eq!(p - n, sign.values()[i] as i64);
        }
    }

    /// RMA of constant input is that constant once defined
    #[test]
    fn prop_rma_constant(constant in 1.0..1000.0_f64, len in 1usize..80, length in 1usize..20) {
        let result = rma_pandas(&Series::new(vec![constant; len]), length);
        for (i, v) in result.values().iter().enumerate() {
            if i + 1 < length {
                prop_assert!(v.is_nan());
            } else {
                prop_assert!((v - constant).abs() < 1e-9 * constant);
            }
        }
    }

    /// RMA stays inside the range of what it has seen
    #[test]
    fn prop_rma_bounded(data in arb_price_series(1, 100), length in 1usize..20) {
        let result = rma_pandas(&Series::new(data.clone()), length);
        let lo = data.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        for v in result.values().iter().filter(|v| !v.is_nan()) {
            prop_assert!(*v >= lo - 1e-9 && *v <= hi + 1e-9);
        }
    }

    /// The reported index points at an extreme, and nothing later ties it
    #[test]
    fn prop_recent_extremes(window in arb_stepped_series(1, 30)) {
        let n = window.len();
        let max_at = n - 1 - recent_maximum_index(&window);
        let min_at = n - 1 - recent_minimum_index(&window);
        let hi = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let lo = window.iter().copied().fold(f64::INFINITY, f64::min);
        prop_assert_eq!(window[max_at], hi);
        prop_assert_eq!(window[min_at], lo);
        prop_assert!(window[max_at + 1..].iter().all(|&v| v < hi));
        prop_assert!(window[min_at + 1..].iter().all(|&v| v > lo));
    }

    /// verify_series accepts exactly the long-enough inputs
    #[test]
    fn prop_verify_series(len in 0usize..50, min_length in 0usize..50) {
        let s = Series::new(vec![1.0; len]);
        prop_assert_eq!(verify_series(&s, Some(min_length)).is_some(), len >= min_length);
    }

    /// Integer offsets and non-zero drifts pass through
    #[test]
    fn prop_offset_drift_identity(x in -1000i64..1000) {
        prop_assert_eq!(get_offset(x), x);
        prop_assert_eq!(get_drift(x), if x == 0 { 1 } else { x });
    }
}

#[test]
fn test_documented_signed_series() {
    let s = Series::new(vec![3.0, 2.0, 2.0, 1.0, 1.0, 5.0, 6.0, 6.0, 7.0, 5.0]);
    let sign = signed_series(&s, None, 1);
    assert!(sign.values()[0].is_nan());
    assert_eq!(
        &sign.values()[1..],
        &[-1.0, 0.0, -1.0, 0.0, 1.0, 1.0, 0.0, 1.0, -1.0]
    );
}

#[test]
fn test_documented_unsigned_differences() {
    let s = Series::new(vec![3.0, 2.0, 2.0, 1.0, 1.0, 5.0, 6.0, 6.0, 7.0, 5.0, 3.0]);
    let (positive, negative) = unsigned_differences(&s, None, true).to_int();
    assert_eq!(positive.values(), &[0, 0, 0, 0, 0, 1, 1, 0, 1, 0, 0]);
    assert_eq!(negative.values(), &[0, 1, 0, 1, 0, 0, 0, 0, 0, 1, 1]);
}

#[test]
fn test_documented_parameter_defaults() {
    assert_eq!(get_offset(3.5), 0);
    assert_eq!(get_offset(5), 5);
    assert_eq!(get_drift(0), 1);
    assert_eq!(get_drift(-3), -3);
}

#[test]
fn test_rma_against_closed_form() {
    // alpha = 1/3, weights (2/3)^k
    let s = Series::new(vec![10.0, 20.0, 30.0]);
    let result = rma_pandas(&s, 3);
    let w = [4.0 / 9.0, 2.0 / 3.0, 1.0];
    let expected = (w[0] * 10.0 + w[1] * 20.0 + w[2] * 30.0) / (w[0] + w[1] + w[2]);
    assert!(result.values()[1].is_nan());
    assert_relative_eq!(result.values()[2], expected, epsilon = 1e-12);
}
