//! Times the built-in indicators on a synthetic OHLC dataset
//! Usage: performance [options.json]
//!
//! TA_UTILS_ROWS sets the dataset length (default 1000).

use polars::prelude::{Column, DataFrame};
use ta_utils::{performance, IndicatorRegistry, PerformanceOptions};
use tracing::{info, warn};

const DEFAULT_ROWS: usize = 1000;

fn load_options(path: Option<&str>) -> PerformanceOptions {
    let Some(path) = path else {
        return PerformanceOptions::default();
    };

    match std::fs::read_to_string(path) {
        Ok(contents) => match PerformanceOptions::from_json(&contents) {
            Ok(opts) => {
                info!("Loaded options from {}", path);
                opts
            }
            Err(e) => {
                warn!("Failed to parse options file: {}. Using defaults.", e);
                PerformanceOptions::default()
            }
        },
        Err(e) => {
            warn!("Failed to read options file: {}. Using defaults.", e);
            PerformanceOptions::default()
        }
    }
}

/// Deterministic price walk so runs are comparable.
fn synthetic_ohlc(rows: usize) -> polars::prelude::PolarsResult<DataFrame> {
    let mut open = Vec::with_capacity(rows);
    let mut high = Vec::with_capacity(rows);
    let mut low = Vec::with_capacity(rows);
    let mut close = Vec::with_capacity(rows);

    let mut price = 100.0_f64;
    for i in 0..rows {
        let t = i as f64;
        price = (price + (t * 0.1).sin() * 2.0 + (t * 0.03).cos() * 1.5).max(10.0);

        open.push(price + (t * 0.04).sin() * 0.3);
        high.push(price + 1.0 + (t * 0.07).sin().abs());
        low.push(price - 1.0 - (t * 0.05).cos().abs());
        close.push(price + (t * 0.02).sin() * 0.5);
    }

    DataFrame::new(vec![
        Column::new("open".into(), open),
        Column::new("high".into(), high),
        Column::new("low".into(), low),
        Column::new("close".into(), close),
    ])
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    let opts = load_options(args.get(1).map(String::as_str));

    let rows = std::env::var("TA_UTILS_ROWS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ROWS);

    let df = match synthetic_ohlc(rows) {
        Ok(df) => df,
        Err(e) => {
            eprintln!("Failed to build dataset: {}", e);
            std::process::exit(1);
        }
    };

    let registry = IndicatorRegistry::with_defaults();
    match performance(&df, &registry, &opts) {
        Ok(Some(outcome)) => info!("Benchmarked {} indicators", outcome.table().len()),
        Ok(None) => info!("Nothing to benchmark"),
        Err(e) => {
            eprintln!("Performance run failed: {}", e);
            std::process::exit(1);
        }
    }
}
