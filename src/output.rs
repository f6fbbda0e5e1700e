//! End-to-end pipeline: read the log, summarise, write the report, and
//! optionally hand the text report to a document converter.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::aggregate::ResultsTable;
use crate::config::SummaryConfig;
use crate::error::{Error, Result};
use crate::parser::parse_log;
use crate::report::{ReportBuilder, SummaryTable};
use crate::schema::{RunMeta, SummaryReport, SCHEMA_VERSION};
use crate::table::render_grid;
use crate::OutputFormat;

#[derive(Clone, Debug)]
pub struct RunOutcome {
    pub tests: usize,
    pub implementations: usize,
    pub written: PathBuf,
    pub html: Option<PathBuf>,
}

/// Parse, aggregate and build the comparison table for an in-memory log.
pub fn summarise(log: &str, baseline: &str) -> Result<(ResultsTable, SummaryTable)> {
    let table = ResultsTable::from_records(parse_log(log))?;
    let summary = ReportBuilder::new(baseline).build(&table)?;
    Ok((table, summary))
}

/// Title line, blank line, then the rendered table.
pub fn text_report(title: &str, summary: &SummaryTable) -> String {
    format!("{title}\n\n{}\n", render_grid(&summary.all_rows()))
}

pub fn write_text_report(path: &Path, title: &str, summary: &SummaryTable) -> Result<()> {
    fs::write(path, text_report(title, summary)).map_err(|e| Error::io(path, e))
}

/// Run `converter <input> <output>` and wait for it.
pub fn render_html(converter: &str, input: &Path, output: &Path) -> Result<()> {
    let status = Command::new(converter)
        .arg(input)
        .arg(output)
        .status()
        .map_err(|e| Error::Converter {
            command: converter.to_string(),
            reason: e.to_string(),
        })?;

    if !status.success() {
        return Err(Error::Converter {
            command: converter.to_string(),
            reason: format!("exited with {status}"),
        });
    }
    Ok(())
}

fn now_utc() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("unix:{secs}")
}

pub fn run(cfg: &SummaryConfig) -> Result<RunOutcome> {
    let log = fs::read_to_string(&cfg.input).map_err(|e| Error::io(&cfg.input, e))?;
    let (table, summary) = summarise(&log, &cfg.baseline)?;

    match cfg.format {
        OutputFormat::Text => write_text_report(&cfg.output, &cfg.title, &summary)?,
        OutputFormat::Json => {
            let run = RunMeta {
                schema_version: SCHEMA_VERSION,
                tool_version: env!("CARGO_PKG_VERSION").to_string(),
                source: cfg.input.display().to_string(),
                timestamp_utc: now_utc(),
            };
            let report = SummaryReport::new(run, &table, &summary);
            let json = serde_json::to_string_pretty(&report)?;
            fs::write(&cfg.output, json).map_err(|e| Error::io(&cfg.output, e))?;
        }
    }
    tracing::info!(
        path = %cfg.output.display(),
        tests = table.len(),
        implementations = summary.implementations.len(),
        "wrote summary"
    );

    let html = match (&cfg.html_converter, cfg.format) {
        (Some(converter), OutputFormat::Text) => {
            let html = cfg.html_output();
            render_html(converter, &cfg.output, &html)?;
            tracing::info!(path = %html.display(), "rendered HTML");
            Some(html)
        }
        (Some(_), OutputFormat::Json) => {
            tracing::warn!("HTML conversion only applies to the text report; skipping");
            None
        }
        (None, _) => None,
    };

    Ok(RunOutcome {
        tests: table.len(),
        implementations: summary.implementations.len(),
        written: cfg.output.clone(),
        html,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_report_layout() {
        let log = "\
! builtin
+ t
: range = [1.00 ns, 2.00 ns]
: μ = 1.50 ns, σ = 0.10 ns
: 95% CI = ± 0.05 ns
";
        let (_, summary) = summarise(log, "builtin").unwrap();
        let text = text_report("Summary of results", &summary);
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Summary of results"));
        assert_eq!(lines.next(), Some(""));
        assert!(lines.next().unwrap().starts_with("+---"));
        assert!(text.contains("| t    | 1.50 ns | 0.05 ns |"), "{text}");
    }

    #[test]
    fn missing_converter_is_reported() {
        let err = render_html(
            "definitely-not-a-real-converter-binary",
            Path::new("in.txt"),
            Path::new("out.html"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::Converter { .. }));
    }
}
