use clap::Parser;
use hashtest_summary::config::{SummaryConfig, DEFAULT_CONVERTER, DEFAULT_INPUT, DEFAULT_OUTPUT};
use hashtest_summary::output;
use hashtest_summary::report::{DEFAULT_BASELINE, DEFAULT_TITLE};
use hashtest_summary::OutputFormat;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hashtest-summary")]
#[command(about = "Summarise a HashTest log into a baseline-relative comparison table")]
struct Args {
    /// HashTest log to read.
    #[arg(value_name = "LOG", default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the summary.
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_OUTPUT)]
    out: PathBuf,

    /// Implementation every other one is compared against.
    #[arg(long, default_value = DEFAULT_BASELINE)]
    baseline: String,

    /// Title line written above the table.
    #[arg(long, default_value = DEFAULT_TITLE)]
    title: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Skip rendering the text report to HTML next to it.
    #[arg(long, default_value_t = false)]
    no_html: bool,

    /// Document converter, invoked as `<converter> <txt> <html>`.
    #[arg(long, default_value = DEFAULT_CONVERTER)]
    converter: String,

    /// Log every record and row at debug level.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let directive = if verbose {
        "hashtest_summary=debug"
    } else {
        "hashtest_summary=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(directive.parse().expect("valid log directive")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// HTML conversion runs unless `--no-html` is given.
fn summary_config(args: Args) -> SummaryConfig {
    SummaryConfig {
        input: args.input,
        output: args.out,
        baseline: args.baseline,
        title: args.title,
        format: args.format,
        html_converter: (!args.no_html).then_some(args.converter),
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);
    let cfg = summary_config(args);

    match output::run(&cfg) {
        Ok(outcome) => {
            eprintln!(
                "Summarised {} tests across {} implementations -> {}",
                outcome.tests,
                outcome.implementations,
                outcome.written.display()
            );
            if let Some(html) = outcome.html {
                eprintln!("  HTML: {}", html.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
