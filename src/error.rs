//! Error types for log summarisation.
//!
//! Every variant is fatal for the current run: a malformed log is rejected in
//! full rather than producing a partial report.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type for summarisation operations.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// Numeric text in a statistic line is not a valid non-negative decimal.
    #[error("malformed number '{text}'")]
    MalformedNumber { text: String },

    /// Metric prefix symbol outside the n..Y tier set.
    #[error("unknown metric prefix '{symbol}'")]
    UnknownPrefix { symbol: String },

    /// Formatting would need a prefix larger than Y.
    #[error("{seconds} s exceeds the largest metric prefix")]
    PrefixRangeExceeded { seconds: f64 },

    /// A record was flushed before all of its fields were collected.
    #[error("incomplete statistics for test {test:?} under {harness:?}: missing {missing}")]
    IncompleteStatistics {
        test: Option<String>,
        harness: Option<String>,
        missing: &'static str,
    },

    /// The baseline implementation never appeared in the log.
    #[error("baseline implementation '{baseline}' not found in log")]
    BaselineMissing { baseline: String },

    /// A test has results for other implementations but none for the baseline.
    #[error("test '{test}' has no result for baseline '{baseline}'")]
    MissingBaselineForTest { test: String, baseline: String },

    /// A test lacks a result for one of the implementations being compared.
    #[error("test '{test}' has no result for implementation '{implementation}'")]
    MissingResult { test: String, implementation: String },

    /// Baseline and implementation means give a zero or non-finite ratio.
    #[error(
        "test '{test}': cannot compare '{implementation}' (mean {impl_mean} s) \
         against baseline mean {baseline_mean} s"
    )]
    DegenerateRatio {
        test: String,
        implementation: String,
        baseline_mean: f64,
        impl_mean: f64,
    },

    /// A statistic line matched a known sub-prefix but not its pattern.
    #[error("unrecognised {kind} line format")]
    UnrecognizedLineFormat { kind: &'static str },

    /// Wraps an error raised while processing a specific log line.
    #[error("line {number}: {source} (\"{text}\")")]
    Line {
        number: usize,
        text: String,
        #[source]
        source: Box<Error>,
    },

    #[error("I/O error for '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialise JSON report: {0}")]
    Json(#[from] serde_json::Error),

    /// The external document converter could not be run or failed.
    #[error("converter '{command}' failed: {reason}")]
    Converter { command: String, reason: String },
}

impl Error {
    pub fn at_line(self, number: usize, text: &str) -> Self {
        Error::Line {
            number,
            text: text.to_string(),
            source: Box::new(self),
        }
    }

    /// The underlying error with any line context removed.
    pub fn root(&self) -> &Error {
        match self {
            Error::Line { source, .. } => source.root(),
            other => other,
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
