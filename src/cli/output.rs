//! CLI output formatting.

use crate::demos::{DemoKind, Outcome};

/// Print version information.
pub fn print_version() {
    println!(
        "physdemo {} ({})",
        env!("PHYSDEMO_VERSION"),
        env!("PHYSDEMO_REVISION")
    );
}

/// Print help message.
pub fn print_help() {
    println!(
        r"physdemo - Interactive fluid-mechanics and vibration demos

USAGE:
    physdemo <COMMAND> [OPTIONS]

COMMANDS:
    list                        List available demos

    run <demo>                  Build a demo and print its inputs and results
        -c, --config <FILE>     Load parameters from a YAML file
        -s, --set <NAME=VALUE>  Change a control (repeatable, applied in order)
        --svg <FILE>            Write the sketch as SVG
        --latex                 Print the results as LaTeX
        --animate <MS>          Let animations run before reporting
        -v, --verbose           Enable debug logging

    help                        Show this help message
    version                     Show version information

EXAMPLES:
    physdemo run pipe --set u1=2 --set d1=20 --set d2=10
    physdemo run pipe --set end1_shape=Rectangle --set w1=30 --svg pipe.svg
    physdemo run tank --set holes=40 --latex
    physdemo run angle --set m=12 --animate 500

Set RUST_LOG to control log output (default: info).
"
    );
}

/// Print the demo registry.
pub fn print_demo_list() {
    println!("Available demos:\n");
    for kind in DemoKind::ALL {
        println!("  {:<10} {}", kind.name(), kind.description());
    }
}

/// Render the input view and the outcome of a run.
#[must_use]
pub fn format_run(inputs: &str, outcome: &Outcome, latex: bool) -> String {
    let mut out = String::new();
    if !inputs.is_empty() {
        out.push_str("Inputs:\n");
        for line in inputs.lines() {
            if !line.is_empty() {
                out.push_str("  ");
                out.push_str(line);
            }
            out.push('\n');
        }
        out.push('\n');
    }
    if latex {
        out.push_str(&outcome.to_latex());
        out.push('\n');
    } else {
        out.push_str(&outcome.to_string());
    }
    out
}
