//! Input validation and parameter normalization
//!
//! Indicator parameters arrive from loosely typed sources (JSON options,
//! bindings), so they are modelled as [`ArgValue`] and normalized to safe
//! integer defaults instead of being rejected.

use serde::{Deserialize, Serialize};

use crate::series::Series;

/// A loosely typed indicator argument.
///
/// Deserializes from JSON `null`, integers, floats and strings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArgValue {
    #[default]
    None,
    Int(i64),
    Float(f64),
    Text(String),
}

impl ArgValue {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ArgValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, ArgValue::Text(_))
    }
}

impl From<i64> for ArgValue {
    fn from(v: i64) -> Self {
        ArgValue::Int(v)
    }
}

impl From<i32> for ArgValue {
    fn from(v: i32) -> Self {
        ArgValue::Int(i64::from(v))
    }
}

impl From<usize> for ArgValue {
    fn from(v: usize) -> Self {
        i64::try_from(v).map_or(ArgValue::None, ArgValue::Int)
    }
}

impl From<f64> for ArgValue {
    fn from(v: f64) -> Self {
        ArgValue::Float(v)
    }
}

impl From<&str> for ArgValue {
    fn from(v: &str) -> Self {
        ArgValue::Text(v.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(v: String) -> Self {
        ArgValue::Text(v)
    }
}

impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(ArgValue::None, Into::into)
    }
}

/// Returns the series when it holds at least `min_length` values.
///
/// # Example
/// ```
/// use ta_utils::{verify_series, Series};
/// let s = Series::new(vec![1.0; 12]);
/// assert!(verify_series(&s, Some(10)).is_some());
/// assert!(verify_series(&s, Some(20)).is_none());
/// ```
pub fn verify_series(series: &Series, min_length: Option<usize>) -> Option<&Series> {
    match min_length {
        Some(required) if series.len() < required => None,
        _ => Some(series),
    }
}

/// Integer offset, 0 unless `x` is an integer.
pub fn get_offset(x: impl Into<ArgValue>) -> i64 {
    x.into().as_int().unwrap_or(0)
}

/// Integer drift, 1 unless `x` is a non-zero integer.
pub fn get_drift(x: impl Into<ArgValue>) -> i64 {
    match x.into().as_int() {
        Some(v) if v != 0 => v,
        _ => 1,
    }
}

/// True for values in `[0, 100]`.
#[inline]
pub fn is_percent(x: f64) -> bool {
    (0.0..=100.0).contains(&x)
}
