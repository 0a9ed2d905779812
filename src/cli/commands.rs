//! CLI command handlers.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use tracing::{debug, error, info};

use super::args::{Args, Command, RunOptions};
use super::output::{format_run, print_demo_list, print_help, print_version};
use crate::config::DemoConfig;
use crate::demos::{DemoKind, Model, Outcome};
use crate::engine::Demo;
use crate::error::DemoResult;
use crate::reactive::ControlInput;
use crate::renderers::SvgSurface;

/// Main CLI entry point.
///
/// Dispatches to the appropriate command handler based on parsed arguments.
#[must_use]
pub fn run_cli(args: Args) -> ExitCode {
    match args.command {
        Command::List => {
            print_demo_list();
            ExitCode::SUCCESS
        }
        Command::Run(options) => run_demo(&options),
        Command::Help => {
            print_help();
            ExitCode::SUCCESS
        }
        Command::Version => {
            print_version();
            ExitCode::SUCCESS
        }
        Command::Invalid(message) => {
            eprintln!("Error: {message}\n");
            print_help();
            ExitCode::from(2)
        }
    }
}

/// What a headless run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    /// Plain-text input view after all inputs were applied.
    pub inputs: String,
    /// Final outcome.
    pub outcome: Outcome,
    /// SVG document, when a drawing was requested.
    pub svg: Option<String>,
}

/// Run a demo and print its inputs and report.
#[must_use]
pub fn run_demo(options: &RunOptions) -> ExitCode {
    match execute(options) {
        Ok(output) => {
            if let (Some(path), Some(svg)) = (&options.svg, &output.svg) {
                if let Err(e) = write_svg(path, svg) {
                    error!(path = %path.display(), error = %e, "cannot write SVG");
                    eprintln!("Error: {e}");
                    return ExitCode::from(1);
                }
                info!(path = %path.display(), "sketch written");
            }
            print!("{}", format_run(&output.inputs, &output.outcome, options.latex));
            if output.outcome.is_ok() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            }
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}

/// Build the demo headless, apply the inputs in order and collect the views.
///
/// # Errors
///
/// Returns configuration, unknown-demo, unknown-control and control-mismatch
/// errors.
pub fn execute(options: &RunOptions) -> DemoResult<RunOutput> {
    let kind: DemoKind = options.demo.parse()?;
    let mut config = match &options.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    // Without an animation window, animated quantities jump to their target.
    if options.animate_ms.is_none() {
        config.animation.enabled = false;
    }
    debug!(demo = %kind, config = ?options.config, "building demo");

    let surface = options.svg.as_ref().map(|_| {
        SvgSurface::new(
            f64::from(config.display.width),
            f64::from(config.display.height),
        )
    });
    let demo: Demo<Box<dyn Model>, SvgSurface> = Demo::new(kind.build(&config), surface);
    demo.show();

    for (name, value) in &options.sets {
        demo.set_control(name, &ControlInput::parse(value))?;
    }

    if let Some(ms) = options.animate_ms {
        let frames = demo.animate_for(Duration::from_millis(ms), config.animation.frame_interval());
        demo.stop();
        info!(frames, "animation finished");
    }

    Ok(RunOutput {
        inputs: demo.render_inputs(),
        outcome: demo
            .outcome()
            .unwrap_or_else(|| Outcome::invalid("demo produced no output")),
        svg: demo.with_surface(SvgSurface::to_svg),
    })
}

fn write_svg(path: &Path, svg: &str) -> std::io::Result<()> {
    std::fs::write(path, svg)
}
