//! physdemo CLI - interactive physics teaching demos
//!
//! Command-line front end: list the demos, run one headless with control
//! inputs and print its report, optionally writing the sketch as SVG.

use std::process::ExitCode;

use physdemo::cli::{run_cli, Args};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.verbose() { "physdemo=debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    run_cli(args)
}
