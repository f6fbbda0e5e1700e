use std::path::PathBuf;

use crate::report::{DEFAULT_BASELINE, DEFAULT_TITLE};
use crate::OutputFormat;

pub const DEFAULT_INPUT: &str = "HashTest.log";
pub const DEFAULT_OUTPUT: &str = "HashTest-Summary.txt";
pub const DEFAULT_CONVERTER: &str = "rst2html.py";

#[derive(Clone, Debug)]
pub struct SummaryConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub baseline: String,
    pub title: String,
    pub format: OutputFormat,
    /// Document converter to run on the text report, if any.
    pub html_converter: Option<String>,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output: PathBuf::from(DEFAULT_OUTPUT),
            baseline: DEFAULT_BASELINE.to_string(),
            title: DEFAULT_TITLE.to_string(),
            format: OutputFormat::Text,
            html_converter: None,
        }
    }
}

impl SummaryConfig {
    /// HTML file next to the text report, sharing its base name.
    pub fn html_output(&self) -> PathBuf {
        self.output.with_extension("html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn html_output_shares_base_name() {
        let cfg = SummaryConfig::default();
        assert_eq!(cfg.html_output(), PathBuf::from("HashTest-Summary.html"));
        assert_eq!(cfg.baseline, "builtin");
    }
}
