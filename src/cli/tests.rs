//! CLI module tests.

use super::args::{Args, Command, RunOptions};
use super::commands::{execute, run_cli};
use super::output::format_run;
use crate::demos::{Outcome, Report};
use crate::error::DemoError;
use crate::reactive::Variable;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

fn run_options(demo: &str) -> RunOptions {
    RunOptions {
        demo: demo.to_string(),
        ..RunOptions::default()
    }
}

// ============================================================================
// Args parsing tests
// ============================================================================

#[test]
fn test_parse_no_args_shows_help() {
    let args = Args::parse_from(["physdemo"]);
    assert_eq!(args.command, Command::Help);
}

#[test]
fn test_parse_help_and_version() {
    for flag in ["-h", "--help", "help"] {
        assert_eq!(Args::parse_from(["physdemo", flag]).command, Command::Help);
    }
    for flag in ["-V", "--version", "version"] {
        assert_eq!(Args::parse_from(["physdemo", flag]).command, Command::Version);
    }
}

#[test]
fn test_parse_list() {
    assert_eq!(Args::parse_from(["physdemo", "list"]).command, Command::List);
}

#[test]
fn test_parse_unknown_command() {
    let args = Args::parse_from(["physdemo", "launch"]);
    assert!(matches!(args.command, Command::Invalid(msg) if msg.contains("launch")));
}

#[test]
fn test_parse_run_minimal() {
    let args = Args::parse_from(["physdemo", "run", "pipe"]);
    assert_eq!(args.command, Command::Run(run_options("pipe")));
    assert!(!args.verbose());
}

#[test]
fn test_parse_run_full() {
    let args = Args::parse_from([
        "physdemo",
        "run",
        "tank",
        "--config",
        "demo.yaml",
        "--set",
        "q=0.03",
        "-s",
        "holes = 40",
        "--svg",
        "tank.svg",
        "--latex",
        "--animate",
        "250",
        "-v",
    ]);
    let options = match &args.command {
        Command::Run(options) => options.clone(),
        other => unreachable!("expected run, got {other:?}"),
    };
    assert_eq!(options.demo, "tank");
    assert_eq!(options.config, Some(PathBuf::from("demo.yaml")));
    assert_eq!(
        options.sets,
        vec![
            ("q".to_string(), "0.03".to_string()),
            ("holes".to_string(), "40".to_string())
        ]
    );
    assert_eq!(options.svg, Some(PathBuf::from("tank.svg")));
    assert!(options.latex);
    assert_eq!(options.animate_ms, Some(250));
    assert!(args.verbose());
}

#[test]
fn test_parse_run_errors() {
    let cases: [&[&str]; 6] = [
        &["physdemo", "run"],
        &["physdemo", "run", "pipe", "--set", "u1"],
        &["physdemo", "run", "pipe", "--set"],
        &["physdemo", "run", "pipe", "--animate", "soon"],
        &["physdemo", "run", "pipe", "--frobnicate"],
        &["physdemo", "run", "pipe", "tank"],
    ];
    for case in cases {
        let args = Args::parse_from(case.iter().copied());
        assert!(
            matches!(args.command, Command::Invalid(_)),
            "{case:?} parsed as {:?}",
            args.command
        );
    }
}

// ============================================================================
// Execution tests
// ============================================================================

#[test]
fn test_execute_pipe_scenario() {
    let mut options = run_options("pipe");
    options.sets = vec![
        ("d1".into(), "20".into()),
        ("d2".into(), "10".into()),
        ("u1".into(), "2".into()),
    ];
    let output = execute(&options).expect("valid run");
    let u2 = output.outcome.get("u2").expect("u2").real();
    assert!((u2 - 8.0).abs() < 1e-9);
    assert!(output.inputs.contains("Velocity U1 = 2 [m/s]"));
    assert!(output.svg.is_none());
}

#[test]
fn test_execute_shape_toggle_hides_diameter() {
    let mut options = run_options("pipe");
    options.sets = vec![("end1_shape".into(), "Rectangle".into())];
    let output = execute(&options).expect("valid run");
    assert!(output.outcome.is_ok());
    assert!(output.inputs.contains("*Rectangle*"));
    assert!(!output.inputs.contains("Diameter D"));
}

#[test]
fn test_execute_unknown_demo() {
    let err = execute(&run_options("rocket")).expect_err("unknown demo");
    assert!(matches!(err, DemoError::UnknownDemo(_)));
}

#[test]
fn test_execute_unknown_control() {
    let mut options = run_options("addition");
    options.sets = vec![("c".into(), "1".into())];
    let err = execute(&options).expect_err("unknown control");
    assert!(matches!(err, DemoError::UnknownControl { .. }));
}

#[test]
fn test_execute_control_mismatch() {
    let mut options = run_options("pipe");
    options.sets = vec![("u1".into(), "fast".into())];
    let err = execute(&options).expect_err("mismatch");
    assert!(matches!(err, DemoError::ControlMismatch { .. }));
}

#[test]
fn test_execute_with_config_and_svg() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "display:\n  width: 400\n  height: 200\n  precision: 2").expect("write");

    let mut options = run_options("tank");
    options.config = Some(file.path().to_path_buf());
    options.svg = Some(PathBuf::from("unused.svg"));
    let output = execute(&options).expect("valid run");
    let svg = output.svg.expect("svg requested");
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains(r#"width="400""#));
}

#[test]
fn test_execute_bad_config_file() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    writeln!(file, "display:\n  width: 10").expect("write");

    let mut options = run_options("pipe");
    options.config = Some(file.path().to_path_buf());
    let err = execute(&options).expect_err("width below minimum");
    assert!(err.is_config_error());
}

#[test]
fn test_run_cli_exit_codes() {
    assert_eq!(run_cli(Args::parse_from(["physdemo", "list"])), ExitCode::SUCCESS);
    assert_eq!(run_cli(Args::parse_from(["physdemo", "version"])), ExitCode::SUCCESS);
    assert_eq!(run_cli(Args::parse_from(["physdemo", "run", "addition"])), ExitCode::SUCCESS);
    assert_eq!(run_cli(Args::parse_from(["physdemo", "nope"])), ExitCode::from(2));
    assert_eq!(
        run_cli(Args::parse_from(["physdemo", "run", "addition", "--set", "z=1"])),
        ExitCode::from(1)
    );
}

#[test]
fn test_invalid_outcome_fails_run() {
    let mut config = crate::config::DemoConfig::default();
    config.angle.mass.min = 0.0;
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("config.yaml");
    std::fs::write(&path, config.to_yaml().expect("serialize")).expect("write");

    let mut options = run_options("angle");
    options.config = Some(path);
    options.sets = vec![("m".into(), "0".into())];
    let output = execute(&options).expect("run completes");
    assert!(!output.outcome.is_ok());

    let args = Args {
        command: Command::Run(options),
    };
    assert_eq!(run_cli(args), ExitCode::from(1));
}

// ============================================================================
// Output tests
// ============================================================================

#[test]
fn test_format_run_plain_and_latex() {
    let outcome = Outcome::Ok(Report::new("Sum", 1).quantity("Sum", "s", Variable::si(3.0, "m")));
    let plain = format_run("a: 1\nb: 2", &outcome, false);
    assert!(plain.starts_with("Inputs:\n  a: 1\n  b: 2\n"));
    assert!(plain.contains("Sum s = 3.0 [m]"));

    let latex = format_run("", &outcome, true);
    assert!(latex.starts_with('$'));
    assert!(!latex.contains("Inputs"));
}

#[test]
fn test_format_invalid() {
    let text = format_run("", &Outcome::invalid("tank has no holes"), false);
    assert_eq!(text, "Invalid: tank has no holes\n");
}
