use clap::ValueEnum;

pub mod aggregate;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod report;
pub mod schema;
pub mod table;
pub mod units;

pub use error::{Error, Result};

/// Format of the summary written to disk.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Title line followed by a reStructuredText grid table.
    #[default]
    Text,
    /// Pretty-printed JSON with raw seconds per implementation.
    Json,
}
