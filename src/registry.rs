//! Named indicator registry
//!
//! Indicators are registered as closures over a polars frame and resolved
//! by name. Timed invocation reports its wall-clock duration as a status
//! text whose first token is the elapsed milliseconds.

use std::collections::BTreeMap;
use std::fmt;
use std::time::{Duration, Instant};

use polars::prelude::DataFrame;

use crate::differences::{non_zero_range, signed_series, unsigned_differences, DifferenceMasks};
use crate::error::{Error, Result};
use crate::moving_averages::rma_pandas;
use crate::overlap::hl2;
use crate::series::{Category, Series};

/// Computes one indicator from a dataset. The flag asks for TA-Lib.
pub type IndicatorFn = Box<dyn Fn(&DataFrame, bool) -> Result<Series> + Send + Sync>;

/// Result of a timed computation.
#[derive(Debug, Clone)]
pub struct TimedOutput {
    pub series: Series,
    /// `"<ms> ms (<secs> s)"`
    pub timed: String,
}

/// Anything that can list indicators and run them with timing.
pub trait IndicatorSource {
    /// Sorted indicator names, minus `exclude`.
    fn indicators(&self, exclude: &[String]) -> Vec<String>;

    fn compute_timed(&self, df: &DataFrame, name: &str, talib: bool) -> Result<TimedOutput>;
}

#[derive(Default)]
pub struct IndicatorRegistry {
    entries: BTreeMap<String, IndicatorFn>,
}

impl fmt::Debug for IndicatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndicatorRegistry")
            .field("indicators", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl IndicatorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding this crate's own series helpers, reading the
    /// `high`, `low` and `close` columns.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry
            .register("hl2", |df, _| {
                let (high, low) = high_low(df)?;
                hl2(&high, &low, 0)
            })
            .register("non_zero_range", |df, _| {
                let (high, low) = high_low(df)?;
                Ok(non_zero_range(&high, &low)?
                    .with_name("NZR")
                    .with_category(Category::Utility))
            })
            .register("rma", |df, _| {
                let close = Series::from_frame(df, "close")?;
                Ok(rma_pandas(&close, 10)
                    .with_name("RMA_10")
                    .with_category(Category::Overlap))
            })
            .register("signed_series", |df, _| {
                let close = Series::from_frame(df, "close")?;
                Ok(signed_series(&close, None, 1)
                    .with_name("SIGN_1")
                    .with_category(Category::Utility))
            })
            .register("unsigned_differences", |df, _| {
                let close = Series::from_frame(df, "close")?;
                match unsigned_differences(&close, None, false) {
                    DifferenceMasks::Float { positive, .. } => Ok(positive
                        .with_name("UP_1")
                        .with_category(Category::Utility)),
                    DifferenceMasks::Int { positive, .. } => Ok(positive
                        .map(|v| v as f64)
                        .with_name("UP_1")
                        .with_category(Category::Utility)),
                }
            });
        registry
    }

    /// Add or replace an indicator.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&DataFrame, bool) -> Result<Series> + Send + Sync + 'static,
    {
        self.entries.insert(name.into(), Box::new(f));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn compute(&self, df: &DataFrame, name: &str, talib: bool) -> Result<Series> {
        let f = self
            .entries
            .get(name)
            .ok_or_else(|| Error::UnknownIndicator(name.to_string()))?;
        f(df, talib)
    }
}

impl IndicatorSource for IndicatorRegistry {
    fn indicators(&self, exclude: &[String]) -> Vec<String> {
        self.entries
            .keys()
            .filter(|name| !exclude.contains(*name))
            .cloned()
            .collect()
    }

    fn compute_timed(&self, df: &DataFrame, name: &str, talib: bool) -> Result<TimedOutput> {
        let start = Instant::now();
        let series = self.compute(df, name, talib)?;
        Ok(TimedOutput {
            series,
            timed: timing_text(start.elapsed()),
        })
    }
}

/// Status text for an elapsed duration, milliseconds first.
pub fn timing_text(elapsed: Duration) -> String {
    let ms = elapsed.as_secs_f64() * 1000.0;
    format!("{:.4} ms ({:.4} s)", ms, ms / 1000.0)
}

fn high_low(df: &DataFrame) -> Result<(Series, Series)> {
    Ok((Series::from_frame(df, "high")?, Series::from_frame(df, "low")?))
}
