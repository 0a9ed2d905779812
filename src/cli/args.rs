//! CLI argument parsing.
//!
//! Hand-rolled parser over any iterator of strings so the parsing logic can
//! be tested without touching `std::env::args()`.

use std::path::PathBuf;

/// CLI arguments container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    /// The command to execute.
    pub command: Command,
}

/// Options of the `run` command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Demo name as typed (resolved later so the error can be reported).
    pub demo: String,
    /// YAML configuration file.
    pub config: Option<PathBuf>,
    /// Control inputs in the order given, as `(name, value)`.
    pub sets: Vec<(String, String)>,
    /// Write the drawing to this SVG file.
    pub svg: Option<PathBuf>,
    /// Print the report as LaTeX instead of plain text.
    pub latex: bool,
    /// Enable debug logging.
    pub verbose: bool,
    /// Run animations for this many milliseconds before reporting.
    pub animate_ms: Option<u64>,
}

/// Available CLI commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the available demos
    List,
    /// Build a demo, apply inputs and print its report
    Run(RunOptions),
    /// Show help
    Help,
    /// Show version
    Version,
    /// Malformed command line
    Invalid(String),
}

impl Args {
    /// Parse command-line arguments from an iterator.
    ///
    /// The first item is the program name.
    #[must_use]
    pub fn parse_from<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();
        Self::parse_from_vec(&args)
    }

    /// Parse command-line arguments from the environment.
    #[must_use]
    pub fn parse() -> Self {
        Self::parse_from(std::env::args())
    }

    /// Whether debug logging was requested.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        matches!(&self.command, Command::Run(options) if options.verbose)
    }

    fn parse_from_vec(args: &[String]) -> Self {
        let Some(first) = args.get(1) else {
            return Self {
                command: Command::Help,
            };
        };

        let command = match first.as_str() {
            "list" | "ls" => Command::List,
            "run" => Self::parse_run_command(&args[2..]),
            "-h" | "--help" | "help" => Command::Help,
            "-V" | "--version" | "version" => Command::Version,
            unknown => Command::Invalid(format!("unknown command '{unknown}'")),
        };

        Self { command }
    }

    fn parse_run_command(rest: &[String]) -> Command {
        let mut options = RunOptions::default();
        let mut iter = rest.iter();

        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-c" | "--config" => match iter.next() {
                    Some(path) => options.config = Some(PathBuf::from(path)),
                    None => return Command::Invalid("--config requires a file".into()),
                },
                "-s" | "--set" => {
                    let Some(pair) = iter.next() else {
                        return Command::Invalid("--set requires NAME=VALUE".into());
                    };
                    match pair.split_once('=') {
                        Some((name, value)) if !name.trim().is_empty() => options
                            .sets
                            .push((name.trim().to_string(), value.trim().to_string())),
                        _ => return Command::Invalid(format!("--set expects NAME=VALUE, got '{pair}'")),
                    }
                }
                "--svg" => match iter.next() {
                    Some(path) => options.svg = Some(PathBuf::from(path)),
                    None => return Command::Invalid("--svg requires a file".into()),
                },
                "--animate" => match iter.next().map(|ms| ms.parse::<u64>()) {
                    Some(Ok(ms)) => options.animate_ms = Some(ms),
                    _ => return Command::Invalid("--animate requires milliseconds".into()),
                },
                "--latex" => options.latex = true,
                "-v" | "--verbose" => options.verbose = true,
                flag if flag.starts_with('-') => {
                    return Command::Invalid(format!("unknown option '{flag}'"));
                }
                demo if options.demo.is_empty() => options.demo = demo.to_string(),
                extra => return Command::Invalid(format!("unexpected argument '{extra}'")),
            }
        }

        if options.demo.is_empty() {
            return Command::Invalid("'run' requires a demo name".into());
        }
        Command::Run(options)
    }
}
