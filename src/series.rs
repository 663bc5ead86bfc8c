//! Ordered, indexed value sequences
//!
//! [`Series`] is the common currency of this crate: a vector of values with
//! a positional or datetime index, plus optional name and category tags that
//! downstream catalogs read. Undefined values are `f64::NAN`.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use chrono::NaiveDateTime;
use polars::prelude::{DataFrame, DataType, NamedFrom, Series as PolarsSeries};
use serde::{Deserialize, Serialize};

use crate::common::{nan_vec, shift};
use crate::error::{Error, Result};

/// Index of a [`Series`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Index {
    /// Positions `0..len`
    Range(usize),
    /// One timestamp per value
    Datetime(Vec<NaiveDateTime>),
}

impl Index {
    pub fn len(&self) -> usize {
        match self {
            Index::Range(len) => *len,
            Index::Datetime(stamps) => stamps.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Short name used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Index::Range(_) => "range",
            Index::Datetime(_) => "datetime",
        }
    }
}

/// Indicator family a result belongs to. Metadata only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Candles,
    Cycles,
    Momentum,
    Overlap,
    Performance,
    Statistics,
    Trend,
    Utility,
    Volatility,
    Volume,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Candles => "candles",
            Category::Cycles => "cycles",
            Category::Momentum => "momentum",
            Category::Overlap => "overlap",
            Category::Performance => "performance",
            Category::Statistics => "statistics",
            Category::Trend => "trend",
            Category::Utility => "utility",
            Category::Volatility => "volatility",
            Category::Volume => "volume",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered sequence of values with an index and optional tags.
///
/// # Example
/// ```
/// use ta_utils::Series;
/// let s = Series::new(vec![1.0, 2.0, 3.0]).with_name("close");
/// assert_eq!(s.len(), 3);
/// assert_eq!(s.name(), Some("close"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series<T = f64> {
    values: Vec<T>,
    index: Index,
    name: Option<String>,
    category: Option<Category>,
}

impl<T> Series<T> {
    /// Series with a positional index
    pub fn new(values: Vec<T>) -> Self {
        let index = Index::Range(values.len());
        Series {
            values,
            index,
            name: None,
            category: None,
        }
    }

    /// Series indexed by timestamps, one per value
    pub fn with_datetime_index(values: Vec<T>, index: Vec<NaiveDateTime>) -> Result<Self> {
        if values.len() != index.len() {
            return Err(Error::LengthMismatch {
                index: index.len(),
                values: values.len(),
            });
        }
        Ok(Series {
            values,
            index: Index::Datetime(index),
            name: None,
            category: None,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn into_values(self) -> Vec<T> {
        self.values
    }

    pub fn index(&self) -> &Index {
        &self.index
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Returns the series if it holds at least `min_length` values.
    pub fn verified(self, min_length: Option<usize>) -> Result<Self> {
        match min_length {
            Some(required) if self.len() < required => Err(Error::InsufficientData {
                required,
                actual: self.len(),
            }),
            _ => Ok(self),
        }
    }

    /// True when the index is datetime and its first stamp precedes its last.
    pub fn is_datetime_ordered(&self) -> bool {
        match &self.index {
            Index::Datetime(stamps) => match (stamps.first(), stamps.last()) {
                (Some(first), Some(last)) => first < last,
                _ => false,
            },
            Index::Range(_) => false,
        }
    }

    /// New untagged series on the same index
    pub fn map<U, F>(&self, f: F) -> Series<U>
    where
        T: Copy,
        F: Fn(T) -> U,
    {
        Series {
            values: self.values.iter().map(|&v| f(v)).collect(),
            index: self.index.clone(),
            name: None,
            category: None,
        }
    }

    pub(crate) fn from_parts(values: Vec<T>, index: Index) -> Self {
        Series {
            values,
            index,
            name: None,
            category: None,
        }
    }
}

impl Series<f64> {
    /// Read a numeric column out of a polars frame. Nulls become NaN.
    pub fn from_frame(df: &DataFrame, column: &str) -> Result<Self> {
        let column = df
            .column(column)
            .map_err(|_| Error::MissingColumn(column.to_string()))?;
        Self::from_polars(column.as_materialized_series())
    }

    /// Convert any numeric polars series, casting to `f64`.
    pub fn from_polars(series: &PolarsSeries) -> Result<Self> {
        let cast = series.cast(&DataType::Float64)?;
        let values = cast
            .f64()?
            .into_iter()
            .map(|v| v.unwrap_or(f64::NAN))
            .collect();
        Ok(Series::new(values).with_name(series.name().as_str()))
    }

    pub fn to_polars(&self) -> PolarsSeries {
        let name = self.name.as_deref().unwrap_or("");
        PolarsSeries::new(name.into(), self.values.as_slice())
    }

    /// Positional shift that keeps the index; see [`crate::common::shift`].
    pub fn shift(&self, periods: i64) -> Self {
        Series {
            values: shift(&self.values, periods),
            index: self.index.clone(),
            name: self.name.clone(),
            category: self.category,
        }
    }

    /// Align two series on the union of their indices.
    ///
    /// Equal indices pass through. Range indices are padded to the longer
    /// length. Datetime indices are merged in ascending order; when a stamp
    /// repeats, its last value wins. Positions missing on one side are NaN.
    pub fn align(&self, other: &Series) -> Result<(Index, Vec<f64>, Vec<f64>)> {
        match (&self.index, &other.index) {
            (a, b) if a == b => Ok((a.clone(), self.values.clone(), other.values.clone())),
            (Index::Range(n), Index::Range(m)) => {
                let len = (*n).max(*m);
                Ok((
                    Index::Range(len),
                    padded(&self.values, len),
                    padded(&other.values, len),
                ))
            }
            (Index::Datetime(a), Index::Datetime(b)) => {
                let left: BTreeMap<NaiveDateTime, f64> =
                    a.iter().copied().zip(self.values.iter().copied()).collect();
                let right: BTreeMap<NaiveDateTime, f64> =
                    b.iter().copied().zip(other.values.iter().copied()).collect();
                let keys: BTreeSet<NaiveDateTime> =
                    left.keys().chain(right.keys()).copied().collect();

                let pick = |side: &BTreeMap<NaiveDateTime, f64>| -> Vec<f64> {
                    keys.iter()
                        .map(|k| side.get(k).copied().unwrap_or(f64::NAN))
                        .collect()
                };
                let (l, r) = (pick(&left), pick(&right));
                Ok((Index::Datetime(keys.into_iter().collect()), l, r))
            }
            (a, b) => Err(Error::IndexMismatch {
                left: a.kind(),
                right: b.kind(),
            }),
        }
    }

    /// Elementwise binary operation over the aligned series.
    pub fn zip_with<F>(&self, other: &Series, f: F) -> Result<Series>
    where
        F: Fn(f64, f64) -> f64,
    {
        let (index, left, right) = self.align(other)?;
        let values = left
            .iter()
            .zip(right.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Series::from_parts(values, index))
    }

    /// Cast to integers. NaN becomes 0, out of range values saturate.
    pub fn to_int(&self) -> Series<i64> {
        let mut cast = self.map(|v| v as i64);
        cast.name = self.name.clone();
        cast.category = self.category;
        cast
    }
}

impl From<Vec<f64>> for Series {
    fn from(values: Vec<f64>) -> Self {
        Series::new(values)
    }
}

fn padded(values: &[f64], len: usize) -> Vec<f64> {
    let mut out = nan_vec(len);
    out[..values.len()].copy_from_slice(values);
    out
}
