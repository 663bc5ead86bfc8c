//! Indicator performance report
//!
//! Times every indicator an [`IndicatorSource`] offers on one dataset, ranks
//! them, summarizes the timings and prints a console report.

use std::cmp::Ordering;
use std::fmt;

use polars::prelude::{Column, DataFrame};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::registry::IndicatorSource;

/// Indicators that are never benchmarked.
pub const DEFAULT_EXCLUDED: [&str; 7] = [
    "above",
    "above_value",
    "below",
    "below_value",
    "cross",
    "cross_value",
    "ichimoku",
];

const DIVIDER_WIDTH: usize = 60;

const DEFAULT_PLACES: u32 = 5;

/// Beyond this many decimals an `f64` has nothing left to round.
const MAX_PLACES: u32 = f64::DIGITS + 2;

/// Cell color for timings that are not finite.
const NEUTRAL_COLOR: &str = "#ffffff";

/// Column to rank by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", rename_all = "lowercase")]
pub enum SortBy {
    #[default]
    Secs,
    Ms,
}

impl From<String> for SortBy {
    fn from(s: String) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "ms" => SortBy::Ms,
            "secs" => SortBy::Secs,
            other => {
                warn!("Unknown sort column {:?}, using secs", other);
                SortBy::Secs
            }
        }
    }
}

/// Report options. Every field has a default, so partial JSON works.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceOptions {
    /// Extra indicators to skip, on top of [`DEFAULT_EXCLUDED`]
    pub excluded: Vec<String>,
    /// Keep only the first `top` ranked rows; 0 means all
    #[serde(deserialize_with = "lenient_top")]
    pub top: Option<usize>,
    pub talib: bool,
    pub ascending: bool,
    pub sortby: SortBy,
    /// Return a color-graded table
    pub gradient: bool,
    /// Decimal places for seconds
    #[serde(deserialize_with = "lenient_places")]
    pub places: u32,
    /// Return the summary alongside the table
    pub stats: bool,
    /// Log each indicator timing at info level
    pub verbose: bool,
    pub print_report: bool,
}

impl Default for PerformanceOptions {
    fn default() -> Self {
        PerformanceOptions {
            excluded: Vec::new(),
            top: None,
            talib: false,
            ascending: false,
            sortby: SortBy::Secs,
            gradient: false,
            places: DEFAULT_PLACES,
            stats: false,
            verbose: false,
            print_report: true,
        }
    }
}

impl PerformanceOptions {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn effective_top(&self) -> Option<usize> {
        self.top.filter(|&t| t > 0)
    }
}

/// Positive integers are kept; anything else means no limit.
fn lenient_top<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let top = value.as_u64().and_then(|t| usize::try_from(t).ok());
    if top.is_none() && !value.is_null() {
        warn!("Invalid top {}, using all rows", value);
    }
    Ok(top.filter(|&t| t > 0))
}

/// Non-negative integers are kept; anything else is the default.
fn lenient_places<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value.as_u64().and_then(|p| u32::try_from(p).ok()) {
        Some(places) => Ok(places),
        None => {
            warn!("Invalid places {}, using {}", value, DEFAULT_PLACES);
            Ok(DEFAULT_PLACES)
        }
    }
}

/// One benchmarked indicator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceRecord {
    pub indicator: String,
    pub secs: f64,
    pub ms: f64,
}

impl PerformanceRecord {
    fn value(&self, by: SortBy) -> f64 {
        match by {
            SortBy::Secs => self.secs,
            SortBy::Ms => self.ms,
        }
    }
}

/// Ranked timings.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PerformanceTable {
    rows: Vec<PerformanceRecord>,
}

impl PerformanceTable {
    pub fn new(rows: Vec<PerformanceRecord>) -> Self {
        PerformanceTable { rows }
    }

    pub fn rows(&self) -> &[PerformanceRecord] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, indicator: &str) -> Option<&PerformanceRecord> {
        self.rows.iter().find(|r| r.indicator == indicator)
    }

    /// Stable sort on one column.
    pub fn sort(&mut self, by: SortBy, ascending: bool) {
        self.rows.sort_by(|a, b| {
            let ord = a
                .value(by)
                .partial_cmp(&b.value(by))
                .unwrap_or(Ordering::Equal);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        });
    }

    pub fn truncate(&mut self, top: usize) {
        self.rows.truncate(top);
    }

    fn column(&self, by: SortBy) -> Vec<f64> {
        self.rows.iter().map(|r| r.value(by)).collect()
    }

    /// `Indicator`, `secs`, `ms` columns
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let names: Vec<&str> = self.rows.iter().map(|r| r.indicator.as_str()).collect();
        let df = DataFrame::new(vec![
            Column::new("Indicator".into(), names),
            Column::new("secs".into(), self.column(SortBy::Secs)),
            Column::new("ms".into(), self.column(SortBy::Ms)),
        ])?;
        Ok(df)
    }

    fn name_width(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.indicator.len())
            .chain(std::iter::once("Indicator".len()))
            .max()
            .unwrap_or(0)
    }
}

impl fmt::Display for PerformanceTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.name_width();
        write!(f, "{:<width$} {:>12} {:>12}", "Indicator", "secs", "ms")?;
        for row in &self.rows {
            write!(f, "\n{:<width$} {:>12} {:>12.4}", row.indicator, row.secs, row.ms)?;
        }
        Ok(())
    }
}

/// Summary of one timing column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub min: f64,
    pub median: f64,
    pub mean: f64,
    pub max: f64,
    pub total: f64,
}

impl Summary {
    /// NaN everywhere except `total` (0) for an empty column.
    pub fn of(values: &[f64]) -> Self {
        if values.is_empty() {
            return Summary {
                min: f64::NAN,
                median: f64::NAN,
                mean: f64::NAN,
                max: f64::NAN,
                total: 0.0,
            };
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        let n = sorted.len();
        let median = if n % 2 == 1 {
            sorted[n / 2]
        } else {
            0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
        };
        let total: f64 = sorted.iter().sum();

        Summary {
            min: sorted[0],
            median,
            mean: total / n as f64,
            max: sorted[n - 1],
            total,
        }
    }
}

/// Summaries of both timing columns.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeStats {
    pub secs: Summary,
    pub ms: Summary,
}

impl TimeStats {
    pub fn of(table: &PerformanceTable) -> Self {
        TimeStats {
            secs: Summary::of(&table.column(SortBy::Secs)),
            ms: Summary::of(&table.column(SortBy::Ms)),
        }
    }
}

impl fmt::Display for TimeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = [
            ("min", self.secs.min, self.ms.min),
            ("50%", self.secs.median, self.ms.median),
            ("mean", self.secs.mean, self.ms.mean),
            ("max", self.secs.max, self.ms.max),
            ("total", self.secs.total, self.ms.total),
        ];
        write!(f, "{:<6} {:>12} {:>12}", "", "secs", "ms")?;
        for (label, secs, ms) in rows {
            write!(f, "\n{:<6} {:>12.6} {:>12.4}", label, secs, ms)?;
        }
        Ok(())
    }
}

/// Ranked table with one background color per timing cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientTable {
    pub table: PerformanceTable,
    /// `[secs, ms]` hex colors per row
    pub colors: Vec<[String; 2]>,
}

impl GradientTable {
    /// Column-wise reversed autumn scale: smallest yellow, largest red.
    pub fn new(table: PerformanceTable) -> Self {
        let secs = gradient_colors(&table.column(SortBy::Secs));
        let ms = gradient_colors(&table.column(SortBy::Ms));
        let colors = secs.into_iter().zip(ms).map(|(s, m)| [s, m]).collect();
        GradientTable { table, colors }
    }
}

fn gradient_colors(values: &[f64]) -> Vec<String> {
    let finite = || values.iter().copied().filter(|v| v.is_finite());
    let lo = finite().fold(f64::INFINITY, f64::min);
    let hi = finite().fold(f64::NEG_INFINITY, f64::max);
    let span = hi - lo;
    values
        .iter()
        .map(|&v| {
            if !v.is_finite() {
                return NEUTRAL_COLOR.to_string();
            }
            let x = if span > 0.0 { (v - lo) / span } else { 0.0 };
            let green = ((1.0 - x.clamp(0.0, 1.0)) * 255.0).round() as u8;
            format!("#ff{:02x}00", green)
        })
        .collect()
}

/// What [`performance`] hands back, chosen by the options.
#[derive(Debug, Clone, PartialEq)]
pub enum PerformanceOutcome {
    Table(PerformanceTable),
    WithStats {
        table: PerformanceTable,
        stats: TimeStats,
    },
    Gradient {
        table: GradientTable,
        stats: TimeStats,
    },
}

impl PerformanceOutcome {
    pub fn table(&self) -> &PerformanceTable {
        match self {
            PerformanceOutcome::Table(table) => table,
            PerformanceOutcome::WithStats { table, .. } => table,
            PerformanceOutcome::Gradient { table, .. } => &table.table,
        }
    }

    pub fn stats(&self) -> Option<&TimeStats> {
        match self {
            PerformanceOutcome::Table(_) => None,
            PerformanceOutcome::WithStats { stats, .. } => Some(stats),
            PerformanceOutcome::Gradient { stats, .. } => Some(stats),
        }
    }
}

/// Milliseconds from a timing text such as `"1.2345 ms (0.0012 s)"`.
pub fn parse_timing_ms(text: &str) -> Result<f64> {
    let token = text.split(char::is_whitespace).next().unwrap_or_default();
    token.parse::<f64>().map_err(|e| Error::TimingFormat {
        text: text.to_string(),
        reason: e.to_string(),
    })
}

/// Milliseconds to seconds, rounded to `places` decimals.
///
/// Rounding that would overflow leaves the seconds unrounded.
pub fn ms_to_secs(ms: f64, places: u32) -> f64 {
    let secs = 0.001 * ms;
    if places > MAX_PLACES {
        return secs;
    }
    let scale = 10f64.powi(places as i32);
    let rounded = (secs * scale).round() / scale;
    if rounded.is_finite() {
        rounded
    } else {
        secs
    }
}

/// Benchmark every indicator of `source` on `df`.
///
/// Returns `Ok(None)` when `df` is empty or nothing is left after the
/// exclusions. Indicators run one after another; a timing text that does
/// not start with milliseconds aborts the run.
pub fn performance<S>(
    df: &DataFrame,
    source: &S,
    opts: &PerformanceOptions,
) -> Result<Option<PerformanceOutcome>>
where
    S: IndicatorSource + ?Sized,
{
    if df.height() == 0 || df.width() == 0 {
        return Ok(None);
    }

    let mut excluded: Vec<String> = DEFAULT_EXCLUDED.iter().map(|s| s.to_string()).collect();
    excluded.extend(opts.excluded.iter().cloned());
    let indicators = source.indicators(&excluded);
    if indicators.is_empty() {
        return Ok(None);
    }

    info!(
        "Timing {} indicators on {} rows{}",
        indicators.len(),
        df.height(),
        if opts.talib { " [talib]" } else { "" }
    );

    let mut rows = Vec::with_capacity(indicators.len());
    for name in &indicators {
        let output = source.compute_timed(df, name, opts.talib)?;
        let ms = parse_timing_ms(&output.timed)?;
        if opts.verbose {
            info!("{}: {}", name, output.timed);
        } else {
            debug!("{}: {}", name, output.timed);
        }
        rows.push(PerformanceRecord {
            indicator: name.clone(),
            secs: ms_to_secs(ms, opts.places),
            ms,
        });
    }

    let mut table = PerformanceTable::new(rows);
    table.sort(opts.sortby, opts.ascending);
    let ranked = table.len();
    if let Some(top) = opts.effective_top() {
        table.truncate(top);
    }
    let stats = TimeStats::of(&table);

    if opts.print_report {
        println!("{}", render_report(df.height(), ranked, &table, &stats, opts));
    }

    let outcome = if opts.gradient {
        PerformanceOutcome::Gradient {
            table: GradientTable::new(table),
            stats,
        }
    } else if opts.stats {
        PerformanceOutcome::WithStats { table, stats }
    } else {
        PerformanceOutcome::Table(table)
    };
    Ok(Some(outcome))
}

/// Console report: header, ranked table, time stats.
pub fn render_report(
    observations: usize,
    ranked: usize,
    table: &PerformanceTable,
    stats: &TimeStats,
    opts: &PerformanceOptions,
) -> String {
    let div = "=".repeat(DIVIDER_WIDTH);
    let pace = if opts.ascending { "Quickest" } else { "Slowest" };
    let title = match opts.effective_top() {
        Some(top) => format!("  {} {} Indicators [{}]", pace, top, ranked),
        None => format!("  {} Indicators", pace),
    };
    let observed = format!(
        "  Observations{}: {}",
        if opts.talib { "[talib]" } else { "" },
        observations
    );

    format!(
        "\n{div}\n{title}\n{observed}\n{div}\n{table}\n\n{div}\nTime Stats:\n{stats}\n\n{div}\n"
    )
}
