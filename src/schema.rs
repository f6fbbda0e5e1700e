use serde::{Deserialize, Serialize};

use crate::aggregate::ResultsTable;
use crate::report::{speedup, SummaryTable};

pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub tool_version: String,
    pub source: String,
    pub timestamp_utc: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplementationInfo {
    pub name: String,
    pub short: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImplementationResult {
    pub implementation: String,

    pub min_s: f64,
    pub max_s: f64,
    pub mean_s: f64,
    pub sd_s: f64,
    pub ci95_s: f64,

    /// Signed factor relative to the baseline; `None` for the baseline itself.
    pub speedup: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSummary {
    pub test: String,
    pub results: Vec<ImplementationResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryReport {
    pub run: RunMeta,
    pub baseline: String,
    pub implementations: Vec<ImplementationInfo>,
    pub tests: Vec<TestSummary>,
}

impl SummaryReport {
    /// Machine-readable counterpart of `summary`, carrying raw seconds.
    ///
    /// `summary` must have been built from `table`, which guarantees every
    /// test has an entry for every implementation.
    pub fn new(run: RunMeta, table: &ResultsTable, summary: &SummaryTable) -> Self {
        let baseline = summary
            .implementations
            .first()
            .map(|c| c.name.clone())
            .unwrap_or_default();

        let tests = table
            .tests()
            .map(|(test, entries)| {
                let baseline_mean = entries.get(&baseline).map(|s| s.mean);
                let results = summary
                    .implementations
                    .iter()
                    .filter_map(|column| {
                        let stats = entries.get(&column.name)?;
                        Some(ImplementationResult {
                            implementation: column.name.clone(),
                            min_s: stats.min,
                            max_s: stats.max,
                            mean_s: stats.mean,
                            sd_s: stats.sd,
                            ci95_s: stats.ci95,
                            speedup: match baseline_mean {
                                Some(b) if column.name != baseline => speedup(b, stats.mean),
                                _ => None,
                            },
                        })
                    })
                    .collect();
                TestSummary {
                    test: test.to_string(),
                    results,
                }
            })
            .collect();

        Self {
            run,
            baseline,
            implementations: summary
                .implementations
                .iter()
                .map(|c| ImplementationInfo {
                    name: c.name.clone(),
                    short: c.short.clone(),
                })
                .collect(),
            tests,
        }
    }
}
