//! Line-driven parser for HashTest harness logs.
//!
//! The harness writes one block per implementation (`! <harness>`), one
//! sub-block per test (`+ <test>`), and three statistic lines per test:
//!
//! ```text
//! ! builtin
//! + small-input
//! : range = [1.00 ns, 2.00 ns]
//! : μ = 1.50 ns, σ = 0.10 ns
//! : 95% CI = ± 0.05 ns
//! ```
//!
//! [`ParseState`] holds everything carried between lines; [`LogParser`] drives
//! it over a line iterator and yields one [`Record`] per completed test.

use crate::error::{Error, Result};
use crate::units::parse_magnitude;
use regex::{Captures, Regex};
use std::sync::OnceLock;

const HARNESS_MARKER: &str = "! ";
const TEST_MARKER: &str = "+ ";
const STAT_MARKER: &str = ": ";

const RANGE_PREFIX: &str = ": range = ";
const MEAN_PREFIX: &str = ": μ = ";
const MEAN_PREFIX_MICRO_SIGN: &str = ": \u{b5} = ";
const CONFIDENCE_PREFIX: &str = ": 95% CI = ";

/// Timing statistics for one (test, implementation) pair, all in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StatisticBundle {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub sd: f64,
    pub ci95: f64,
}

/// One completed test block.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub test: String,
    pub harness: String,
    pub stats: StatisticBundle,
}

/// State carried across log lines within a single parse.
#[derive(Clone, Debug, Default)]
pub struct ParseState {
    pub harness: Option<String>,
    pub test: Option<String>,
    pub range: Option<(f64, f64)>,
    pub mean_sd: Option<(f64, f64)>,
    pub confidence: Option<f64>,
}

impl ParseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from the fields collected so far.
    ///
    /// Fails with [`Error::IncompleteStatistics`] if any field is unset.
    pub fn bundle(&self) -> Result<Record> {
        let missing = |missing: &'static str| Error::IncompleteStatistics {
            test: self.test.clone(),
            harness: self.harness.clone(),
            missing,
        };

        let test = self.test.clone().ok_or_else(|| missing("test signature"))?;
        let harness = self
            .harness
            .clone()
            .ok_or_else(|| missing("harness signature"))?;
        let (min, max) = self.range.ok_or_else(|| missing("range"))?;
        let (mean, sd) = self.mean_sd.ok_or_else(|| missing("mean/standard deviation"))?;
        let ci95 = self.confidence.ok_or_else(|| missing("95% confidence interval"))?;

        Ok(Record {
            test,
            harness,
            stats: StatisticBundle {
                min,
                max,
                mean,
                sd,
                ci95,
            },
        })
    }

    fn clear_test(&mut self) {
        self.test = None;
        self.range = None;
        self.mean_sd = None;
        self.confidence = None;
    }

    /// Apply one line. Returns the record for the previous test when this
    /// line closes it.
    pub fn step(&mut self, line: &str) -> Result<Option<Record>> {
        let line = line.trim();

        if let Some(harness) = line.strip_prefix(HARNESS_MARKER) {
            let flushed = self.flush_open_test()?;
            self.clear_test();
            self.harness = Some(harness.to_string());
            return Ok(flushed);
        }

        if let Some(test) = line.strip_prefix(TEST_MARKER) {
            let flushed = self.flush_open_test()?;
            self.clear_test();
            self.test = Some(test.to_string());
            return Ok(flushed);
        }

        if line.starts_with(STAT_MARKER) {
            self.apply_statistic(line)?;
        }

        Ok(None)
    }

    /// End-of-input flush. Emits a record whenever a harness has been seen,
    /// regardless of whether a test is open.
    pub fn finish(self) -> Result<Option<Record>> {
        if self.harness.is_some() {
            self.bundle().map(Some)
        } else {
            Ok(None)
        }
    }

    fn flush_open_test(&self) -> Result<Option<Record>> {
        if self.test.is_some() {
            self.bundle().map(Some)
        } else {
            Ok(None)
        }
    }

    fn apply_statistic(&mut self, line: &str) -> Result<()> {
        if line.starts_with(RANGE_PREFIX) {
            self.range = Some(parse_range(line)?);
        } else if line.starts_with(MEAN_PREFIX) || line.starts_with(MEAN_PREFIX_MICRO_SIGN) {
            self.mean_sd = Some(parse_mean_sd(line)?);
        } else if line.starts_with(CONFIDENCE_PREFIX) {
            self.confidence = Some(parse_confidence(line)?);
        } else {
            tracing::trace!(line, "ignoring unrecognised statistic line");
        }
        Ok(())
    }
}

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[(\S+) (\S*?)s, (\S+) (\S*?)s\]").expect("valid range pattern")
    })
}

fn mean_sd_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"[μ\x{b5}] = (\S+) (\S*?)s, σ = (\S+) (\S*?)s").expect("valid mean pattern")
    })
}

fn confidence_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"± (\S+) (\S*?)s").expect("valid confidence pattern"))
}

fn seconds_at(caps: &Captures<'_>, num: usize) -> Result<f64> {
    parse_magnitude(&caps[num], &caps[num + 1])
}

/// `[<num> <prefix>s, <num> <prefix>s]` as `(min, max)` seconds.
pub fn parse_range(line: &str) -> Result<(f64, f64)> {
    let caps = range_re()
        .captures(line)
        .ok_or(Error::UnrecognizedLineFormat { kind: "range" })?;
    Ok((seconds_at(&caps, 1)?, seconds_at(&caps, 3)?))
}

/// `μ = <num> <prefix>s, σ = <num> <prefix>s` as `(mean, sd)` seconds.
pub fn parse_mean_sd(line: &str) -> Result<(f64, f64)> {
    let caps = mean_sd_re()
        .captures(line)
        .ok_or(Error::UnrecognizedLineFormat { kind: "mean" })?;
    Ok((seconds_at(&caps, 1)?, seconds_at(&caps, 3)?))
}

/// `± <num> <prefix>s` as seconds.
pub fn parse_confidence(line: &str) -> Result<f64> {
    let caps = confidence_re()
        .captures(line)
        .ok_or(Error::UnrecognizedLineFormat {
            kind: "confidence interval",
        })?;
    seconds_at(&caps, 1)
}

/// Forward-only iterator of records over a sequence of log lines.
///
/// Stops after the first error; a parser is not reusable once drained.
pub struct LogParser<I> {
    lines: I,
    state: Option<ParseState>,
    line_no: usize,
}

impl<I, S> LogParser<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub fn new(lines: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            lines: lines.into_iter(),
            state: Some(ParseState::new()),
            line_no: 0,
        }
    }
}

impl<I, S> Iterator for LogParser<I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let state = self.state.as_mut()?;

            let Some(line) = self.lines.next() else {
                let state = self.state.take()?;
                return state.finish().transpose();
            };
            self.line_no += 1;

            let line = line.as_ref();
            match state.step(line) {
                Ok(Some(record)) => return Some(Ok(record)),
                Ok(None) => continue,
                Err(err) => {
                    self.state = None;
                    return Some(Err(err.at_line(self.line_no, line.trim())));
                }
            }
        }
    }
}

/// Parse a whole log held in memory.
pub fn parse_log(text: &str) -> LogParser<std::str::Lines<'_>> {
    LogParser::new(text.lines())
}
