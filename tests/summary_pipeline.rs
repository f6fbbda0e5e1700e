use hashtest_summary::config::SummaryConfig;
use hashtest_summary::output::run;
use hashtest_summary::{Error, OutputFormat};
use std::fs;
use tempfile::tempdir;

const LOG: &str = "\
HashTest run on host
! builtin
+ long-string
: range = [90.00 ns, 130.00 ns]
: μ = 100.00 ns, σ = 5.00 ns
: 95% CI = ± 1.00 ns
+ short-string
: range = [9.00 ns, 12.00 ns]
: μ = 10.00 ns, σ = 0.50 ns
: 95% CI = ± 0.10 ns
! murmur3-x64-128
+ long-string
: range = [40.00 ns, 60.00 ns]
: μ = 50.00 ns, σ = 2.00 ns
: 95% CI = ± 0.50 ns
+ short-string
: range = [15.00 ns, 25.00 ns]
: μ = 20.00 ns, σ = 1.00 ns
: 95% CI = ± 0.20 ns
";

fn config(dir: &std::path::Path, log: &str) -> SummaryConfig {
    let input = dir.join("HashTest.log");
    fs::write(&input, log).unwrap();
    SummaryConfig {
        input,
        output: dir.join("HashTest-Summary.txt"),
        ..SummaryConfig::default()
    }
}

#[test]
fn writes_text_summary() {
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), LOG);

    let outcome = run(&cfg).unwrap();
    assert_eq!(outcome.tests, 2);
    assert_eq!(outcome.implementations, 2);
    assert!(outcome.html.is_none());

    let text = fs::read_to_string(&cfg.output).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Summary of results");
    assert_eq!(lines[1], "");
    assert!(lines[3].contains("bi μ"), "{text}");
    assert!(lines[3].contains("mu-x64-128 μ"), "{text}");
    assert!(lines[3].contains("95% ±"), "{text}");

    let long = lines.iter().find(|l| l.contains("long-string")).unwrap();
    assert!(long.contains("100.00 ns"));
    assert!(long.contains("2.00 x"));
    let short = lines.iter().find(|l| l.contains("short-string")).unwrap();
    assert!(short.contains("-2.00 x"));
}

#[test]
fn writes_json_summary() {
    let dir = tempdir().unwrap();
    let mut cfg = config(dir.path(), LOG);
    cfg.output = dir.path().join("summary.json");
    cfg.format = OutputFormat::Json;

    run(&cfg).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&cfg.output).unwrap()).unwrap();
    assert_eq!(json["baseline"], "builtin");
    assert_eq!(json["tests"][0]["test"], "long-string");
    assert_eq!(json["tests"][0]["results"][1]["speedup"], 2.0);
    assert_eq!(json["tests"][1]["results"][1]["speedup"], -2.0);
}

#[test]
fn baseline_absent_from_one_test_rejects_log() {
    let log = "\
! builtin
+ small-input
: range = [1.00 ns, 2.00 ns]
: μ = 1.50 ns, σ = 0.10 ns
: 95% CI = ± 0.05 ns
! other-impl
+ other-input
: range = [1.00 ns, 2.00 ns]
: μ = 1.50 ns, σ = 0.10 ns
: 95% CI = ± 0.05 ns
";
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), log);

    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, Error::MissingBaselineForTest { ref test, .. } if test == "other-input"));
    assert!(!cfg.output.exists());
}

#[test]
fn malformed_line_names_offending_line() {
    let log = "\
! builtin
+ small-input
: range = [1.00 ns, 2.00 ns]
: μ = abc ns, σ = 0.1 ns
: 95% CI = ± 0.05 ns
";
    let dir = tempdir().unwrap();
    let cfg = config(dir.path(), log);

    let err = run(&cfg).unwrap_err();
    assert!(matches!(err.root(), Error::MalformedNumber { .. }));
    assert!(err.to_string().starts_with("line 4:"), "{err}");
}

#[test]
fn missing_input_is_io_error() {
    let dir = tempdir().unwrap();
    let cfg = SummaryConfig {
        input: dir.path().join("absent.log"),
        output: dir.path().join("out.txt"),
        ..SummaryConfig::default()
    };
    assert!(matches!(run(&cfg).unwrap_err(), Error::Io { .. }));
}

#[test]
fn failing_converter_fails_the_run() {
    let dir = tempdir().unwrap();
    let mut cfg = config(dir.path(), LOG);
    cfg.html_converter = Some("definitely-not-a-real-converter-binary".to_string());

    let err = run(&cfg).unwrap_err();
    assert!(matches!(err, Error::Converter { .. }));
    // The text report is written before conversion is attempted.
    assert!(cfg.output.exists());
}
