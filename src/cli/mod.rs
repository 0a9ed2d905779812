//! CLI module for physdemo.
//!
//! All CLI logic lives here rather than in main.rs so it can be tested. The
//! entry point [`run_cli`] is called from main.rs with parsed arguments.

mod args;
mod commands;
mod output;

pub use args::{Args, Command, RunOptions};
pub use commands::{execute, run_cli, run_demo, RunOutput};
pub use output::{format_run, print_demo_list, print_help, print_version};

#[cfg(test)]
mod tests;
