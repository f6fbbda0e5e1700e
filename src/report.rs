//! Baseline-relative comparison rows.

use crate::aggregate::ResultsTable;
use crate::error::{Error, Result};
use crate::units::format_seconds;

pub const DEFAULT_BASELINE: &str = "builtin";
pub const DEFAULT_TITLE: &str = "Summary of results";

/// Column tag reserved for the baseline implementation.
pub const BASELINE_SHORT: &str = "bi";

/// Abbreviate an implementation name for column headers.
///
/// The baseline is always [`BASELINE_SHORT`]. Other names keep the first two
/// characters of their first hyphen-delimited segment and every later
/// segment as-is: `murmur3-x64-128` becomes `mu-x64-128`.
pub fn short_name(name: &str, baseline: &str) -> String {
    if name == baseline {
        return BASELINE_SHORT.to_string();
    }
    let mut segments = name.split('-');
    let head: String = segments.next().unwrap_or_default().chars().take(2).collect();
    std::iter::once(head)
        .chain(segments.map(str::to_string))
        .collect::<Vec<_>>()
        .join("-")
}

/// Baseline speed relative to an implementation.
///
/// Values below 1.0 are flipped to `-(1 / ratio)`, so "half as fast" reads
/// as `-2.00` rather than `0.50`. Returns `None` when either mean is zero or
/// the ratio is not finite.
pub fn speedup(baseline_mean: f64, impl_mean: f64) -> Option<f64> {
    let ratio = baseline_mean / impl_mean;
    if !ratio.is_finite() || ratio <= 0.0 {
        return None;
    }
    if ratio < 1.0 {
        Some(-(1.0 / ratio))
    } else {
        Some(ratio)
    }
}

pub fn format_speedup(factor: f64) -> String {
    format!("{factor:.2} x")
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImplementationColumn {
    pub name: String,
    pub short: String,
}

/// Header plus one row per test, every cell already formatted.
#[derive(Clone, Debug)]
pub struct SummaryTable {
    pub implementations: Vec<ImplementationColumn>,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SummaryTable {
    /// Header followed by the data rows, ready for rendering.
    pub fn all_rows(&self) -> Vec<Vec<String>> {
        std::iter::once(self.header.clone())
            .chain(self.rows.iter().cloned())
            .collect()
    }
}

#[derive(Clone, Debug)]
pub struct ReportBuilder {
    baseline: String,
}

impl Default for ReportBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_BASELINE)
    }
}

impl ReportBuilder {
    pub fn new(baseline: impl Into<String>) -> Self {
        Self {
            baseline: baseline.into(),
        }
    }

    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Baseline first, then every other implementation in lexicographic order.
    pub fn ordered_implementations(&self, table: &ResultsTable) -> Result<Vec<ImplementationColumn>> {
        if !table.implementations().contains(&self.baseline) {
            return Err(Error::BaselineMissing {
                baseline: self.baseline.clone(),
            });
        }

        let others = table
            .implementations()
            .iter()
            .filter(|name| **name != self.baseline);

        Ok(std::iter::once(&self.baseline)
            .chain(others)
            .map(|name| ImplementationColumn {
                name: name.clone(),
                short: short_name(name, &self.baseline),
            })
            .collect())
    }

    pub fn build(&self, table: &ResultsTable) -> Result<SummaryTable> {
        let implementations = self.ordered_implementations(table)?;

        let mut header = vec!["Test".to_string()];
        for column in &implementations {
            header.push(format!("{} μ", column.short));
            header.push("95% ±".to_string());
        }
        for column in &implementations[1..] {
            header.push(column.short.clone());
        }

        let mut rows = Vec::with_capacity(table.len());
        for (test, results) in table.tests() {
            let baseline = results
                .get(&self.baseline)
                .ok_or_else(|| Error::MissingBaselineForTest {
                    test: test.to_string(),
                    baseline: self.baseline.clone(),
                })?;

            let lookup = |name: &str| {
                results.get(name).ok_or_else(|| Error::MissingResult {
                    test: test.to_string(),
                    implementation: name.to_string(),
                })
            };

            let mut row = vec![test.to_string()];
            for column in &implementations {
                tracing::debug!(test, implementation = %column.name, "formatting result");
                let stats = lookup(&column.name)?;
                row.push(format_seconds(stats.mean)?);
                row.push(format_seconds(stats.ci95)?);
            }
            for column in &implementations[1..] {
                let stats = lookup(&column.name)?;
                let factor = speedup(baseline.mean, stats.mean).ok_or_else(|| {
                    Error::DegenerateRatio {
                        test: test.to_string(),
                        implementation: column.name.clone(),
                        baseline_mean: baseline.mean,
                        impl_mean: stats.mean,
                    }
                })?;
                row.push(format_speedup(factor));
            }
            rows.push(row);
        }

        Ok(SummaryTable {
            implementations,
            header,
            rows,
        })
    }
}
