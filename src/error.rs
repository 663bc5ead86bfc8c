//! Error types for ta-utils.
//!
//! Most helpers fail soft (NaN values, default parameters, `None`). The
//! variants here cover structural misuse and the timing text contract of
//! the performance report.

use polars::prelude::PolarsError;
use thiserror::Error;

/// The main error type for ta-utils operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The series is shorter than the caller's minimum length.
    #[error("insufficient data: required {required} elements, got {actual}")]
    InsufficientData {
        /// The number of values required.
        required: usize,
        /// The number of values provided.
        actual: usize,
    },

    /// An index and its values disagree in length.
    #[error("length mismatch: index has {index} entries, values has {values}")]
    LengthMismatch {
        /// Number of index entries.
        index: usize,
        /// Number of values.
        values: usize,
    },

    /// Two series carry index kinds that cannot be aligned.
    #[error("cannot align a {left} index with a {right} index")]
    IndexMismatch {
        /// Index kind of the left operand.
        left: &'static str,
        /// Index kind of the right operand.
        right: &'static str,
    },

    /// The dataset has no column with this name.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// No indicator is registered under this name.
    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),

    /// The timing text returned by an indicator does not start with milliseconds.
    #[error("malformed timing text {text:?}: {reason}")]
    TimingFormat {
        /// The text as returned by the indicator source.
        text: String,
        /// Parser message.
        reason: String,
    },

    /// Options could not be parsed.
    #[error("invalid options: {0}")]
    Config(#[from] serde_json::Error),

    /// Failure inside polars while reading the dataset or building a table.
    #[error(transparent)]
    Polars(#[from] PolarsError),
}

/// Convenience type alias for Results using the ta-utils Error type.
pub type Result<T> = std::result::Result<T, Error>;
