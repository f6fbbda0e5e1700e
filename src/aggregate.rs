//! Folding parsed records into a per-test, per-implementation table.

use crate::error::Result;
use crate::parser::{Record, StatisticBundle};
use std::collections::{BTreeMap, BTreeSet};

/// `test -> implementation -> stats`, with every implementation seen.
///
/// Keyed by the (test, implementation) pair: a pair recorded twice keeps the
/// last bundle.
#[derive(Clone, Debug, Default)]
pub struct ResultsTable {
    tests: BTreeMap<String, BTreeMap<String, StatisticBundle>>,
    implementations: BTreeSet<String>,
}

impl ResultsTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the bundle it replaced, if any.
    pub fn insert(&mut self, record: Record) -> Option<StatisticBundle> {
        tracing::debug!(test = %record.test, implementation = %record.harness, "recording result");

        self.implementations.insert(record.harness.clone());
        let previous = self
            .tests
            .entry(record.test.clone())
            .or_default()
            .insert(record.harness.clone(), record.stats);

        if previous.is_some() {
            tracing::warn!(
                test = %record.test,
                implementation = %record.harness,
                "duplicate result; keeping the later one"
            );
        }
        previous
    }

    /// Fold a fallible record stream, stopping at the first error.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = Result<Record>>,
    {
        let mut table = Self::new();
        for record in records {
            table.insert(record?);
        }
        Ok(table)
    }

    pub fn get(&self, test: &str, implementation: &str) -> Option<&StatisticBundle> {
        self.tests.get(test)?.get(implementation)
    }

    /// Tests in lexicographic order.
    pub fn tests(&self) -> impl Iterator<Item = (&str, &BTreeMap<String, StatisticBundle>)> {
        self.tests.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn implementations(&self) -> &BTreeSet<String> {
        &self.implementations
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn record(test: &str, harness: &str, mean: f64) -> Record {
        Record {
            test: test.to_string(),
            harness: harness.to_string(),
            stats: StatisticBundle {
                min: mean / 2.0,
                max: mean * 2.0,
                mean,
                sd: mean / 10.0,
                ci95: mean / 20.0,
            },
        }
    }

    #[test]
    fn groups_by_test_and_tracks_implementations() {
        let table = ResultsTable::from_records(vec![
            Ok(record("b", "builtin", 1.0)),
            Ok(record("a", "builtin", 2.0)),
            Ok(record("a", "fnv-1a", 3.0)),
        ])
        .unwrap();

        assert_eq!(table.len(), 2);
        let tests: Vec<&str> = table.tests().map(|(t, _)| t).collect();
        assert_eq!(tests, ["a", "b"]);
        assert_eq!(table.get("a", "fnv-1a").unwrap().mean, 3.0);
        assert!(table.get("b", "fnv-1a").is_none());
        assert_eq!(
            table.implementations().iter().collect::<Vec<_>>(),
            ["builtin", "fnv-1a"]
        );
    }

    #[test]
    fn duplicate_pair_keeps_last_write() {
        let mut table = ResultsTable::new();
        assert!(table.insert(record("a", "builtin", 1.0)).is_none());
        let replaced = table.insert(record("a", "builtin", 5.0)).unwrap();

        assert_eq!(replaced.mean, 1.0);
        assert_eq!(table.get("a", "builtin").unwrap().mean, 5.0);
        assert_eq!(table.implementations().len(), 1);
    }

    #[test]
    fn stops_at_first_error() {
        let err = ResultsTable::from_records(vec![
            Ok(record("a", "builtin", 1.0)),
            Err(Error::UnrecognizedLineFormat { kind: "range" }),
            Ok(record("b", "builtin", 1.0)),
        ])
        .unwrap_err();
        assert!(matches!(err, Error::UnrecognizedLineFormat { .. }));
    }
}
