//! # TA Utils
//!
//! Series helpers and indicator timing for technical analysis.
//!
//! ## Features
//! - Typed [`Series`] with positional or datetime index and union alignment
//! - Soft validation: bad parameters fall back to safe defaults
//! - HL2, zero-safe ranges, signed and unsigned difference masks, RMA
//! - Named indicator registry and a ranked performance report
//! - Compiles to native and WASM
//!
//! ## Example
//! ```
//! use ta_utils::{hl2, non_zero_range, signed_series, Series};
//!
//! let high = Series::new(vec![10.0, 11.0, 11.0, 12.5]);
//! let low = Series::new(vec![9.0, 10.0, 11.0, 11.5]);
//!
//! let mid = hl2(&high, &low, None::<i64>).unwrap();
//! let range = non_zero_range(&high, &low).unwrap();
//! let sign = signed_series(&high, None, 1);
//!
//! assert_eq!(mid.values()[0], 9.5);
//! assert!(range.values()[2] > 0.0);
//! assert!(sign.values()[0].is_nan());
//! ```

pub mod common;
pub mod differences;
pub mod error;
pub mod ma_type;
pub mod moving_averages;
pub mod overlap;
pub mod performance;
pub mod registry;
pub mod series;
pub mod validation;

// Re-export commonly used items at crate root
pub use common::{camel_case_to_title, recent_maximum_index, recent_minimum_index};
pub use differences::{non_zero_range, signed_series, unsigned_differences, DifferenceMasks};
pub use error::{Error, Result};
pub use ma_type::{tal_ma, MaType, StaticTalib, TalibCapability};
pub use moving_averages::rma_pandas;
pub use overlap::hl2;
pub use performance::{
    performance, PerformanceOptions, PerformanceOutcome, PerformanceRecord, PerformanceTable,
    SortBy, TimeStats,
};
pub use registry::{IndicatorRegistry, IndicatorSource, TimedOutput};
pub use series::{Category, Index, Series};
pub use validation::{get_drift, get_offset, is_percent, verify_series, ArgValue};

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

/// WASM bindings for browser/Node.js use. Inputs are positional; undefined
/// values are NaN.
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct SeriesUtils;

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl SeriesUtils {
    #[wasm_bindgen]
    pub fn hl2(high: &[f64], low: &[f64], offset: i32) -> Vec<f64> {
        let high = Series::new(high.to_vec());
        let low = Series::new(low.to_vec());
        // range indices always align
        overlap::hl2(&high, &low, offset)
            .map(Series::into_values)
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn non_zero_range(high: &[f64], low: &[f64]) -> Vec<f64> {
        let high = Series::new(high.to_vec());
        let low = Series::new(low.to_vec());
        differences::non_zero_range(&high, &low)
            .map(Series::into_values)
            .unwrap_or_default()
    }

    #[wasm_bindgen]
    pub fn signed_series(values: &[f64], initial: Option<f64>, lag: i32) -> Vec<f64> {
        differences::signed_series(&Series::new(values.to_vec()), initial, lag).into_values()
    }

    #[wasm_bindgen]
    pub fn unsigned_positive(values: &[f64], amount: i32) -> Vec<f64> {
        match differences::unsigned_differences(&Series::new(values.to_vec()), Some(i64::from(amount)), false) {
            DifferenceMasks::Float { positive, .. } => positive.into_values(),
            DifferenceMasks::Int { positive, .. } => positive.map(|v| v as f64).into_values(),
        }
    }

    #[wasm_bindgen]
    pub fn unsigned_negative(values: &[f64], amount: i32) -> Vec<f64> {
        match differences::unsigned_differences(&Series::new(values.to_vec()), Some(i64::from(amount)), false) {
            DifferenceMasks::Float { negative, .. } => negative.into_values(),
            DifferenceMasks::Int { negative, .. } => negative.map(|v| v as f64).into_values(),
        }
    }

    #[wasm_bindgen]
    pub fn rma(values: &[f64], length: usize) -> Vec<f64> {
        moving_averages::rma_pandas(&Series::new(values.to_vec()), length).into_values()
    }

    #[wasm_bindgen]
    pub fn recent_maximum_index(window: &[f64]) -> usize {
        common::recent_maximum_index(window)
    }

    #[wasm_bindgen]
    pub fn recent_minimum_index(window: &[f64]) -> usize {
        common::recent_minimum_index(window)
    }

    #[wasm_bindgen]
    pub fn tal_ma(name: &str) -> i32 {
        // no TA-Lib backend in the browser
        ma_type::tal_ma(name, None)
    }
}
